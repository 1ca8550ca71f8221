use std::cell::RefCell;

use serde::Serialize;

/// Which field a probe was trying to recover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeKind {
    Badges,
    Dex,
    Playtime,
}

impl std::fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Badges => "badges",
            Self::Dex => "dex",
            Self::Playtime => "playtime",
        };
        write!(f, "{}", s)
    }
}

/// One candidate offset an extractor looked at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Probe {
    pub kind: ProbeKind,
    pub offset: usize,
    /// Raw value read (bit count or integer), `None` when out of bounds.
    pub value: Option<u32>,
    /// Whether this probe's value was kept.
    pub accepted: bool,
}

/// Sink that observes every probe an extractor performs.
///
/// Extraction stays a pure function of its bytes; the trace only watches.
pub trait ProbeTrace {
    fn on_probe(&self, probe: &Probe);
}

/// A trace that discards all probes.
pub struct SilentTrace;

impl ProbeTrace for SilentTrace {
    fn on_probe(&self, _probe: &Probe) {}
}

/// A trace that forwards probes to `log::debug!`.
pub struct LogTrace;

impl ProbeTrace for LogTrace {
    fn on_probe(&self, probe: &Probe) {
        match probe.value {
            Some(v) => log::debug!(
                "probe {} @0x{:X} = {}{}",
                probe.kind,
                probe.offset,
                v,
                if probe.accepted { " (accepted)" } else { "" }
            ),
            None => log::debug!("probe {} @0x{:X} out of bounds", probe.kind, probe.offset),
        }
    }
}

/// A trace that keeps every probe in memory, in order.
#[derive(Default)]
pub struct RecordingTrace {
    probes: RefCell<Vec<Probe>>,
}

impl RecordingTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probes(&self) -> Vec<Probe> {
        self.probes.borrow().clone()
    }

    pub fn accepted(&self, kind: ProbeKind) -> Option<Probe> {
        self.probes
            .borrow()
            .iter()
            .rfind(|p| p.kind == kind && p.accepted)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.probes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.borrow().is_empty()
    }
}

impl ProbeTrace for RecordingTrace {
    fn on_probe(&self, probe: &Probe) {
        self.probes.borrow_mut().push(probe.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_trace_keeps_order() {
        let trace = RecordingTrace::new();
        for (offset, accepted) in [(1, false), (2, true), (3, false)] {
            trace.on_probe(&Probe {
                kind: ProbeKind::Badges,
                offset,
                value: Some(0),
                accepted,
            });
        }
        assert_eq!(trace.len(), 3);
        let offsets: Vec<usize> = trace.probes().iter().map(|p| p.offset).collect();
        assert_eq!(offsets, vec![1, 2, 3]);
        assert_eq!(trace.accepted(ProbeKind::Badges).map(|p| p.offset), Some(2));
        assert!(trace.accepted(ProbeKind::Dex).is_none());
    }
}
