use thiserror::Error;

use tpchseed_core::Table;

/// Errors emitted by the row synthesizers.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A synthesizer ran before its upstream key pool was populated.
    #[error("{table}: upstream key pool '{dependency}' is empty")]
    MissingDependency {
        table: Table,
        dependency: Table,
    },
    /// More composite-key rows were requested than the upstream pools can
    /// yield.
    #[error("{table}: requested {requested} rows but only {available} distinct keys exist")]
    KeySpaceExhausted {
        table: Table,
        requested: u64,
        available: u64,
    },
}
