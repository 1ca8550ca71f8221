//! Byte-level probing helpers shared by the generation extractors.
//!
//! Every reader here is bounds-checked and returns `None` (or skips the
//! candidate) instead of panicking on a short buffer.

use crate::trace::{Probe, ProbeKind, ProbeTrace};

/// Playtime values above this are treated as garbage and clamped.
pub const MAX_PLAYTIME_HOURS: u16 = 9999;

/// Format a byte count as a human-readable size string (e.g., "8 KB", "2 MB").
///
/// Values that aren't clean multiples of KB/MB are shown in bytes.
pub fn format_bytes(bytes: u64) -> String {
    if bytes >= 1024 * 1024 && bytes.is_multiple_of(1024 * 1024) {
        format!("{} MB", bytes / (1024 * 1024))
    } else if bytes >= 1024 && bytes.is_multiple_of(1024) {
        format!("{} KB", bytes / 1024)
    } else {
        format!("{} bytes", bytes)
    }
}

pub fn read_u8(data: &[u8], offset: usize) -> Option<u8> {
    data.get(offset).copied()
}

pub fn read_u16_le(data: &[u8], offset: usize) -> Option<u16> {
    let end = offset.checked_add(2)?;
    let bytes = data.get(offset..end)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Number of set bits in `len` bytes starting at `start`, or `None` if the
/// run does not fit inside `data`.
pub fn count_bits(data: &[u8], start: usize, len: usize) -> Option<u32> {
    let end = start.checked_add(len)?;
    let run = data.get(start..end)?;
    Some(run.iter().map(|b| b.count_ones()).sum())
}

/// `round(100 * count / total)`, clamped to 0..=100.
pub fn percent_of(count: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (count as f64 * 100.0 / total as f64).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Walk `offsets` in order and return the first single-byte bit count in
/// `1..=cap`. Out-of-bounds offsets are skipped. Returns 0 if none qualify.
pub fn probe_badges(data: &[u8], offsets: &[usize], cap: u8, trace: &dyn ProbeTrace) -> u8 {
    for &offset in offsets {
        let value = count_bits(data, offset, 1);
        let accepted = matches!(value, Some(n) if n > 0 && n <= cap as u32);
        trace.on_probe(&Probe {
            kind: ProbeKind::Badges,
            offset,
            value,
            accepted,
        });
        if accepted {
            return value.map(|n| n as u8).unwrap_or(0);
        }
    }
    0
}

/// Count set bits in a `run`-byte window at each candidate start and keep
/// the largest count not above `ceiling`. Larger counts are discarded as
/// implausible. Returns 0 if no window fits.
pub fn probe_dex(
    data: &[u8],
    starts: &[usize],
    run: usize,
    ceiling: u32,
    trace: &dyn ProbeTrace,
) -> u32 {
    let mut best = 0u32;
    for &start in starts {
        let value = count_bits(data, start, run);
        let accepted = match value {
            Some(n) if n <= ceiling && n > best => {
                best = n;
                true
            }
            _ => false,
        };
        trace.on_probe(&Probe {
            kind: ProbeKind::Dex,
            offset: start,
            value,
            accepted,
        });
    }
    best
}

/// Read a one-byte hour counter, clamped to [`MAX_PLAYTIME_HOURS`].
pub fn probe_playtime_u8(data: &[u8], offset: usize, trace: &dyn ProbeTrace) -> Option<u16> {
    let value = read_u8(data, offset).map(u16::from);
    record_playtime(offset, value, trace)
}

/// Read a little-endian u16 hour counter, clamped to [`MAX_PLAYTIME_HOURS`].
pub fn probe_playtime_u16_le(
    data: &[u8],
    offset: usize,
    trace: &dyn ProbeTrace,
) -> Option<u16> {
    let value = read_u16_le(data, offset);
    record_playtime(offset, value, trace)
}

fn record_playtime(offset: usize, value: Option<u16>, trace: &dyn ProbeTrace) -> Option<u16> {
    trace.on_probe(&Probe {
        kind: ProbeKind::Playtime,
        offset,
        value: value.map(u32::from),
        accepted: value.is_some(),
    });
    value.map(|v| v.min(MAX_PLAYTIME_HOURS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{RecordingTrace, SilentTrace};

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 bytes");
        assert_eq!(format_bytes(8192), "8 KB");
        assert_eq!(format_bytes(131072), "128 KB");
        assert_eq!(format_bytes(1048576), "1 MB");
        assert_eq!(format_bytes(8200), "8200 bytes");
    }

    #[test]
    fn test_readers_bounds() {
        let data = [0x34, 0x12, 0xFF];
        assert_eq!(read_u8(&data, 2), Some(0xFF));
        assert_eq!(read_u8(&data, 3), None);
        assert_eq!(read_u16_le(&data, 0), Some(0x1234));
        assert_eq!(read_u16_le(&data, 2), None);
        assert_eq!(read_u16_le(&data, usize::MAX), None);
    }

    #[test]
    fn test_count_bits() {
        let data = [0xFF, 0x01, 0x00];
        assert_eq!(count_bits(&data, 0, 3), Some(9));
        assert_eq!(count_bits(&data, 1, 2), Some(1));
        // A run ending exactly at the buffer end still fits.
        assert_eq!(count_bits(&data, 2, 1), Some(0));
        assert_eq!(count_bits(&data, 2, 2), None);
        assert_eq!(count_bits(&[], 0, 1), None);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(0, 151), 0);
        assert_eq!(percent_of(151, 151), 100);
        assert_eq!(percent_of(30, 151), 20);
        assert_eq!(percent_of(1, 0), 0);
        assert_eq!(percent_of(500, 151), 100);
    }

    #[test]
    fn badges_take_first_plausible_candidate() {
        let mut data = vec![0u8; 16];
        data[2] = 0b0000_0111;
        data[5] = 0xFF;
        // 0xFF at offset 5 exceeds a cap of 4, offset 2 has 3 bits.
        assert_eq!(probe_badges(&data, &[0, 5, 2], 4, &SilentTrace), 3);
        assert_eq!(probe_badges(&data, &[5], 8, &SilentTrace), 8);
        assert_eq!(probe_badges(&data, &[100, 0], 8, &SilentTrace), 0);
    }

    #[test]
    fn dex_keeps_max_under_ceiling() {
        let mut data = vec![0u8; 32];
        data[0] = 0x0F;
        data[10..14].fill(0xFF);
        data[20] = 0x03;
        let trace = RecordingTrace::new();
        // Window at 10 holds 32 bits, over the ceiling of 20.
        assert_eq!(probe_dex(&data, &[20, 0, 10, 30], 4, 20, &trace), 4);
        assert_eq!(trace.len(), 4);
        assert_eq!(trace.accepted(ProbeKind::Dex).map(|p| p.offset), Some(0));
        // Window at 30 runs past the end.
        assert_eq!(trace.probes()[3].value, None);
    }

    #[test]
    fn playtime_clamps() {
        let data = [0xFF, 0xFF];
        assert_eq!(probe_playtime_u16_le(&data, 0, &SilentTrace), Some(9999));
        assert_eq!(probe_playtime_u8(&data, 1, &SilentTrace), Some(255));
        assert_eq!(probe_playtime_u8(&data, 2, &SilentTrace), None);
    }
}
