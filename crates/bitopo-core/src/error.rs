use thiserror::Error;

use crate::marker::LifecycleRole;

/// A malformed node type definition.
///
/// Raised while a descriptor is being built. Every variant names the
/// offending node, interface, method, parameter or type. None of them are
/// transient: the definition has to be fixed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("no remote interface on wrapped type {node}")]
    NoRemoteInterface { node: String },

    #[error(
        "multiple remote interfaces on wrapped type {node} ({first}, {second}); exactly one is required"
    )]
    AmbiguousRemoteInterface {
        node: String,
        first: String,
        second: String,
    },

    #[error("method {method} of remote interface {interface} is not marked as a remote operation")]
    MissingOperationMarker { interface: String, method: String },

    #[error(
        "parameter {parameter} of type {ty} is not transferable in method {method} of remote interface {interface}"
    )]
    NonTransferableParameter {
        interface: String,
        method: String,
        parameter: String,
        ty: String,
    },

    #[error(
        "response slot {parameter} must be the first parameter of method {method} of remote interface {interface}"
    )]
    MisplacedResponseSlot {
        interface: String,
        method: String,
        parameter: String,
    },

    #[error(
        "return type {ty} of method {method} of remote interface {interface} is neither unit nor a single response"
    )]
    UnsupportedReturn {
        interface: String,
        method: String,
        ty: String,
    },

    #[error("remote interface {interface} declares {signature} more than once")]
    DuplicateOperation { interface: String, signature: String },

    #[error("remote interface {interface} is not accessible (not public)")]
    InterfaceNotAccessible { interface: String },

    #[error("no {role} method in wrapped type {node}")]
    MissingLifecycle { node: String, role: LifecycleRole },

    #[error("multiple {role} methods in wrapped type {node} ({first}, {second})")]
    DuplicateLifecycle {
        node: String,
        role: LifecycleRole,
        first: String,
        second: String,
    },
}
