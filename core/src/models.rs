use serde::{Deserialize, Serialize};

/// One row of the per-state totals source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTotal {
    pub state: String,
    pub inflow: u64,
    pub outflow: u64,
    /// As recorded upstream; may differ from `inflow - outflow`.
    pub net_migration: i64,
}

/// One row of the pairwise flows source. Pairs may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowRecord {
    pub origin: String,
    pub destination: String,
    pub estimate: u64,
}

impl FlowRecord {
    pub fn is_self_flow(&self) -> bool {
        self.origin == self.destination
    }
}

/// A counterpart state and its summed estimate within a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankEntry {
    pub state: String,
    pub estimate: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_flow_detection() {
        let r = FlowRecord { origin: "Texas".into(), destination: "Texas".into(), estimate: 1 };
        assert!(r.is_self_flow());
        let r = FlowRecord { origin: "Texas".into(), destination: "Ohio".into(), estimate: 1 };
        assert!(!r.is_self_flow());
    }
}
