//! Node descriptors.
//!
//! Given a [`NodeType`](bitopo_core::NodeType), a [`DescriptorRegistry`]
//! locates its single remote interface, validates every operation against
//! the wire contract, indexes operations by stable id, resolves the lifecycle
//! methods and generates a stub type. The result is cached as an immutable
//! [`NodeDescriptor`] per type.
//!
//! ```ignore
//! let registry = DescriptorRegistry::new();
//! let counter = registry.get::<Counter>()?;
//! let id = OperationId::from_signature("increment[int]");
//! assert!(counter.operation(&id).is_some());
//! ```

mod config;
mod descriptor;
mod extract;
mod lifecycle;
mod registry;
mod table;
mod validate;

pub use config::{RegistryConfig, RegistryConfigBuilder};
pub use descriptor::{DescriptorSummary, LifecycleSummary, NodeDescriptor, OperationSummary};
pub use extract::{extract_remote_interface, qualifies};
pub use lifecycle::{LifecycleMethod, LifecycleSlots, resolve_lifecycle};
pub use registry::DescriptorRegistry;
pub use table::build_operation_table;
pub use validate::{validate_interface, validate_operation};
