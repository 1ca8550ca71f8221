#![allow(dead_code)]

use std::path::Path;

use rusqlite::Connection;

pub const RED: i64 = 1;
pub const EMERALD: i64 = 9;

/// In-memory database seeded from the shipped catalog.
pub fn seeded_db() -> Connection {
    let conn = dextrack_db::open_memory().unwrap();
    let catalog = Path::new(env!("CARGO_MANIFEST_DIR")).join("../catalog");
    dextrack_db::seed_from_catalog(&conn, &catalog).unwrap();
    conn
}

/// A 128 KiB save with `badge_byte` at the first badge offset and
/// `dex_bits` owned flags in the first dex window.
pub fn make_gba_save(badge_byte: u8, dex_bits: u32) -> Vec<u8> {
    let mut data = vec![0u8; 131072];
    data[0x20] = badge_byte;
    let start = 0x27A;
    let full = (dex_bits / 8) as usize;
    for b in &mut data[start..start + full] {
        *b = 0xFF;
    }
    let rest = dex_bits % 8;
    if rest > 0 {
        data[start + full] = (1u8 << rest) - 1;
    }
    data
}

/// An all-zero 8 KiB first-generation save.
pub fn make_gen1_save() -> Vec<u8> {
    vec![0u8; 8192]
}

pub fn count(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).unwrap()
}
