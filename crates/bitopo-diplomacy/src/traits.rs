use crate::stub::{OutboundCall, RemoteStub, StubError};

/// The link a remote stub forwards calls through.
///
/// Implementations own encoding and delivery. Returning an error rejects the
/// call; the stub reports it as [`StubError::Rejected`].
pub trait Outbound: Send + Sync {
    fn send(&self, call: OutboundCall) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// A typed remote interface (hand-written RPC stub) over a [`RemoteStub`].
pub trait ForeignInterface: Sized {
    /// Name of the remote interface this stub speaks.
    const INTERFACE: &'static str;

    fn from_stub(stub: RemoteStub) -> Self;

    /// Wraps `stub` after checking that it targets [`Self::INTERFACE`].
    fn bind(stub: RemoteStub) -> Result<Self, StubError> {
        if stub.interface() != Self::INTERFACE {
            return Err(StubError::InterfaceMismatch {
                expected: Self::INTERFACE.to_string(),
                found: stub.interface().to_string(),
            });
        }
        Ok(Self::from_stub(stub))
    }
}
