//! Loads the per-state totals and pairwise flow sources into a frozen snapshot.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use flowmap_core::{DataLoadError, FlowRecord, State, StateTotal, UnknownStateError};
use tracing::{info, warn};

pub const TOTALS_COLUMNS: &[&str] = &["state", "inflow", "outflow", "net_migration"];
pub const FLOWS_COLUMNS: &[&str] = &["origin", "destination", "estimate"];

/// Read-only view over one reference year of migration data.
#[derive(Debug, Clone)]
pub struct FlowStore {
    totals: Vec<StateTotal>,
    by_state: HashMap<String, usize>,
    flows: Vec<FlowRecord>,
}

impl FlowStore {
    /// Load both CSV sources from disk.
    pub fn load(totals: impl AsRef<Path>, flows: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let totals = totals.as_ref();
        let flows = flows.as_ref();
        let totals_name = totals.display().to_string();
        let flows_name = flows.display().to_string();
        let t = open(totals, &totals_name)?;
        let f = open(flows, &flows_name)?;
        Self::from_named_readers(t, &totals_name, f, &flows_name)
    }

    /// Load from in-memory or otherwise injected sources.
    pub fn from_readers(totals: impl Read, flows: impl Read) -> Result<Self, DataLoadError> {
        Self::from_named_readers(totals, "totals", flows, "flows")
    }

    fn from_named_readers(
        totals: impl Read,
        totals_name: &str,
        flows: impl Read,
        flows_name: &str,
    ) -> Result<Self, DataLoadError> {
        let (totals, by_state) = read_totals(totals, totals_name)?;
        let flows = read_flows(flows, flows_name)?;
        let store = FlowStore { totals, by_state, flows };
        info!(states = store.totals.len(), flows = store.flows.len(), "migration data loaded");
        store.report_coverage();
        Ok(store)
    }

    pub fn get_total(&self, state: &str) -> Result<&StateTotal, UnknownStateError> {
        self.by_state
            .get(state)
            .map(|&i| &self.totals[i])
            .ok_or_else(|| UnknownStateError::new(state))
    }

    pub fn all_flow_records(&self) -> &[FlowRecord] {
        &self.flows
    }

    /// Totals in source order.
    pub fn totals(&self) -> impl Iterator<Item = &StateTotal> {
        self.totals.iter()
    }

    fn report_coverage(&self) {
        for s in State::ALL {
            if !self.by_state.contains_key(s.name()) {
                warn!(state = s.name(), "no totals row for state");
            }
        }
        for t in &self.totals {
            if State::from_name(&t.state).is_err() {
                warn!(state = %t.state, "totals row outside the recognized state set");
            }
        }
    }
}

fn open(path: &Path, source_name: &str) -> Result<File, DataLoadError> {
    File::open(path).map_err(|source| DataLoadError::Io { source_name: source_name.to_string(), source })
}

fn read_totals(
    rdr: impl Read,
    source_name: &str,
) -> Result<(Vec<StateTotal>, HashMap<String, usize>), DataLoadError> {
    let mut totals: Vec<StateTotal> = Vec::new();
    let mut by_state = HashMap::new();
    read_rows(rdr, source_name, TOTALS_COLUMNS, |total: StateTotal, line| {
        if by_state.contains_key(&total.state) {
            return Err(DataLoadError::DuplicateState {
                source_name: source_name.to_string(),
                line,
                state: total.state,
            });
        }
        by_state.insert(total.state.clone(), totals.len());
        totals.push(total);
        Ok(())
    })?;
    Ok((totals, by_state))
}

fn read_flows(rdr: impl Read, source_name: &str) -> Result<Vec<FlowRecord>, DataLoadError> {
    let mut flows = Vec::new();
    read_rows(rdr, source_name, FLOWS_COLUMNS, |record: FlowRecord, _| {
        flows.push(record);
        Ok(())
    })?;
    Ok(flows)
}

fn read_rows<T, F>(rdr: impl Read, source_name: &str, required: &[&'static str], mut sink: F) -> Result<(), DataLoadError>
where
    T: serde::de::DeserializeOwned,
    F: FnMut(T, u64) -> Result<(), DataLoadError>,
{
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(rdr);
    let headers = rdr.headers().map_err(|e| csv_error(source_name, e))?.clone();
    for &column in required {
        if !headers.iter().any(|h| h == column) {
            return Err(DataLoadError::MissingColumn { source_name: source_name.to_string(), column });
        }
    }

    let mut record = StringRecord::new();
    while rdr.read_record(&mut record).map_err(|e| csv_error(source_name, e))? {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row: T = record.deserialize(Some(&headers)).map_err(|e| DataLoadError::Malformed {
            source_name: source_name.to_string(),
            line,
            message: e.to_string(),
        })?;
        sink(row, line)?;
    }
    Ok(())
}

fn csv_error(source_name: &str, err: csv::Error) -> DataLoadError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => DataLoadError::Io { source_name: source_name.to_string(), source },
        _ => DataLoadError::Malformed { source_name: source_name.to_string(), line, message },
    }
}
