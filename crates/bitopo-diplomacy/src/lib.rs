//! Remote stubs.
//!
//! A [`StubType`] is generated once per node type from its operation table.
//! Binding it to an [`Outbound`] link yields a [`RemoteStub`] that turns
//! `(method, args)` calls into [`OutboundCall`]s keyed by operation id.
//! Argument encoding and delivery stay on the far side of the link.

mod stub;
mod traits;

pub use bitopo_core::Transferable;
pub use bitopo_sidl::Transferable;
pub use stub::{OutboundCall, RemoteStub, StubError, StubRoute, StubType};
pub use traits::{ForeignInterface, Outbound};
