use thiserror::Error;

/// Unified error type for the `bitopo` framework.
///
/// Aggregates errors from the sub-crates into a single type for
/// application-level error handling.
#[derive(Error, Debug)]
pub enum BitopoError {
    /// A node type definition was rejected.
    #[error("Definition error: {0}")]
    Definition(#[from] bitopo_core::DefinitionError),

    /// A remote stub could not route or forward a call.
    #[error("Stub error: {0}")]
    Stub(#[from] bitopo_diplomacy::StubError),

    /// The tracing subscriber could not be installed.
    #[error("Telemetry error: {0}")]
    Telemetry(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}
