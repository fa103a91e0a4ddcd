//! Per-state migration summaries: totals plus ranked origins and destinations.
//!
//! Grouped sums are built once when the engine is constructed; every query
//! afterwards is a lookup and a truncation over immutable data.

use std::collections::HashMap;

use flow_store::FlowStore;
use flowmap_core::{DataLoadError, FlowRecord, RankEntry, State, StateTotal, UnknownStateError, DEFAULT_TOP_N};
use serde::Serialize;
use tracing::debug;

/// Totals for one state and its two rankings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateReport {
    pub total: StateTotal,
    pub top_origins: Vec<RankEntry>,
    pub top_destinations: Vec<RankEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rankings {
    pub top_origins: Vec<RankEntry>,
    pub top_destinations: Vec<RankEntry>,
}

/// One choropleth cell: a recognized state and its net migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapPoint {
    pub code: &'static str,
    pub state: String,
    pub net_migration: i64,
}

type Ranked = HashMap<String, Vec<RankEntry>>;

pub struct Engine<'a> {
    store: &'a FlowStore,
    /// destination -> origins, fully sorted
    origins: Ranked,
    /// origin -> destinations, fully sorted
    destinations: Ranked,
}

impl<'a> Engine<'a> {
    pub fn new(store: &'a FlowStore) -> Result<Self, DataLoadError> {
        let (origins, destinations) = build_index(store.all_flow_records())?;
        debug!(destinations = origins.len(), origins = destinations.len(), "flow index built");
        Ok(Engine { store, origins, destinations })
    }

    /// Totals plus the top ten origins and destinations for a full state name.
    pub fn query(&self, state: &str) -> Result<StateReport, UnknownStateError> {
        self.query_top(state, DEFAULT_TOP_N)
    }

    pub fn query_top(&self, state: &str, n: usize) -> Result<StateReport, UnknownStateError> {
        let total = self.store.get_total(state)?.clone();
        Ok(StateReport {
            total,
            top_origins: top(&self.origins, state, n),
            top_destinations: top(&self.destinations, state, n),
        })
    }

    /// Totals for a full name or two-letter code.
    pub fn lookup_totals(&self, identifier: &str) -> Result<StateTotal, UnknownStateError> {
        let state = resolve(identifier)?;
        self.store
            .get_total(state.name())
            .cloned()
            .map_err(|_| UnknownStateError::new(identifier))
    }

    /// Top ten origins and destinations for a full name or two-letter code.
    pub fn lookup_rankings(&self, identifier: &str) -> Result<Rankings, UnknownStateError> {
        self.lookup_rankings_top(identifier, DEFAULT_TOP_N)
    }

    pub fn lookup_rankings_top(&self, identifier: &str, n: usize) -> Result<Rankings, UnknownStateError> {
        let report = self.lookup_top(identifier, n)?;
        Ok(Rankings { top_origins: report.top_origins, top_destinations: report.top_destinations })
    }

    /// Totals and rankings in one call, for a full name or two-letter code.
    pub fn lookup_top(&self, identifier: &str, n: usize) -> Result<StateReport, UnknownStateError> {
        let state = resolve(identifier)?;
        self.query_top(state.name(), n)
            .map_err(|_| UnknownStateError::new(identifier))
    }

    /// Net migration per recognized state, ordered by code.
    pub fn map_series(&self) -> Vec<MapPoint> {
        let mut points: Vec<MapPoint> = self
            .store
            .totals()
            .filter_map(|t| {
                State::from_name(&t.state).ok().map(|s| MapPoint {
                    code: s.code(),
                    state: t.state.clone(),
                    net_migration: t.net_migration,
                })
            })
            .collect();
        points.sort_by(|a, b| a.code.cmp(b.code));
        points
    }
}

fn resolve(identifier: &str) -> Result<State, UnknownStateError> {
    State::parse(identifier)
}

fn top(index: &Ranked, state: &str, n: usize) -> Vec<RankEntry> {
    index
        .get(state)
        .map(|ranked| ranked.iter().take(n).cloned().collect())
        .unwrap_or_default()
}

/// Group non-self flows both ways and sort each group.
fn build_index(records: &[FlowRecord]) -> Result<(Ranked, Ranked), DataLoadError> {
    let mut inbound: HashMap<&str, HashMap<&str, u64>> = HashMap::new();
    let mut outbound: HashMap<&str, HashMap<&str, u64>> = HashMap::new();
    let mut self_flows = 0usize;

    for r in records {
        if r.is_self_flow() {
            self_flows += 1;
            continue;
        }
        add(&mut inbound, &r.destination, &r.origin, r)?;
        add(&mut outbound, &r.origin, &r.destination, r)?;
    }
    debug!(records = records.len(), self_flows, "grouped flow records");

    Ok((rank_groups(inbound), rank_groups(outbound)))
}

fn add<'r>(
    groups: &mut HashMap<&'r str, HashMap<&'r str, u64>>,
    key: &'r str,
    counterpart: &'r str,
    record: &FlowRecord,
) -> Result<(), DataLoadError> {
    let sum = groups.entry(key).or_default().entry(counterpart).or_insert(0);
    *sum = sum.checked_add(record.estimate).ok_or_else(|| DataLoadError::Overflow {
        origin: record.origin.clone(),
        destination: record.destination.clone(),
    })?;
    Ok(())
}

fn rank_groups(groups: HashMap<&str, HashMap<&str, u64>>) -> Ranked {
    groups
        .into_iter()
        .map(|(key, sums)| {
            let mut ranked: Vec<RankEntry> = sums
                .into_iter()
                .map(|(state, estimate)| RankEntry { state: state.to_string(), estimate })
                .collect();
            // ties: alphabetical by name
            ranked.sort_by(|a, b| b.estimate.cmp(&a.estimate).then_with(|| a.state.cmp(&b.state)));
            (key.to_string(), ranked)
        })
        .collect()
}
