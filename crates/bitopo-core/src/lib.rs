//! Core primitives for bitopo nodes.
//!
//! Node authors describe a node type with plain records: a [`NodeTypeDef`]
//! listing the interfaces it declares and its lifecycle methods, each tagged
//! with [`Marker`]s. Parameter types live in an explicit [`TypeInfo`] graph
//! that answers whether a value may cross a process boundary. Operations are
//! identified by [`OperationId`], hashed from the signature alone.

mod definition;
mod error;
mod marker;
mod operation;
mod traits;
mod types;

pub use definition::{
    InterfaceDef, InterfaceUse, MethodDef, NodeTypeDef, ParamDef, ReturnShape, Visibility,
    signature_string,
};
pub use error::DefinitionError;
pub use marker::{LifecycleRole, Marker, MarkerSet};
pub use operation::{Operation, OperationId, OperationTable, ParseOperationIdError};
pub use traits::{Described, NodeType, Transferable, stable_type_id};
pub use types::{TRANSFERABLE_MARKER_NAME, TypeInfo, TypeInfoBuilder, TypeKind, TypeRef};
