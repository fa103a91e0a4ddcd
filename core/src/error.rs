use thiserror::Error;

/// Fatal at startup: the dataset could not be read or is structurally invalid.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {source_name}")]
    Io {
        source_name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{source_name}: missing required column `{column}`")]
    MissingColumn {
        source_name: String,
        column: &'static str,
    },
    #[error("{source_name}: line {line}: {message}")]
    Malformed {
        source_name: String,
        line: u64,
        message: String,
    },
    #[error("{source_name}: line {line}: duplicate totals row for {state}")]
    DuplicateState {
        source_name: String,
        line: u64,
        state: String,
    },
    #[error("summed estimate for {origin} -> {destination} overflows")]
    Overflow { origin: String, destination: String },
}

/// Per query: the identifier does not resolve to a state with loaded data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no data for state `{0}`")]
pub struct UnknownStateError(pub String);

impl UnknownStateError {
    pub fn new(identifier: impl Into<String>) -> Self {
        UnknownStateError(identifier.into())
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }
}
