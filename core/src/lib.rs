//! Core types shared by the flow store, the aggregation engine and the CLI.

mod error;
mod models;
pub mod state;

pub use error::{DataLoadError, UnknownStateError};
pub use models::{FlowRecord, RankEntry, StateTotal};
pub use state::State;

/// Number of origins/destinations reported per state unless a caller asks otherwise.
pub const DEFAULT_TOP_N: usize = 10;

pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!version().is_empty());
    }
}
