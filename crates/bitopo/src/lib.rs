//! # bitopo
//!
//! Facade over the bitopo crates: node definitions and operation ids
//! ([`core`]), descriptors and their registry ([`descriptor`]) and remote
//! stubs ([`diplomacy`]).
//!
//! `#[derive(Transferable)]` expands to paths under `bitopo_core`, so crates
//! using the derive also depend on `bitopo-core` directly.

pub use bitopo_core as core;
pub use bitopo_descriptor as descriptor;
pub use bitopo_diplomacy as diplomacy;

pub mod error;
#[cfg(feature = "telemetry")]
pub mod telemetry;

pub use error::BitopoError;

/// The types most node authors need.
pub mod prelude {
    pub use bitopo_core::{
        DefinitionError, Described, InterfaceDef, LifecycleRole, Marker, MethodDef, NodeType,
        NodeTypeDef, OperationId, ParamDef, ReturnShape, TypeInfo, Visibility,
    };
    pub use bitopo_descriptor::{DescriptorRegistry, NodeDescriptor, RegistryConfig};
    pub use bitopo_diplomacy::{
        ForeignInterface, Outbound, OutboundCall, RemoteStub, StubError, Transferable,
    };

    pub use crate::BitopoError;
}
