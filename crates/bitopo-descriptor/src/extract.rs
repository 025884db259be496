use std::sync::Arc;

use bitopo_core::{DefinitionError, InterfaceDef, InterfaceUse, Marker, NodeTypeDef};

/// Whether a declared interface is a remote surface, either by its use-site
/// marker or by its own definition marker.
pub fn qualifies(interface_use: &InterfaceUse) -> bool {
    interface_use.markers().contains(Marker::Remote)
        || interface_use.interface().markers().contains(Marker::RemoteProxy)
}

/// Locates the single remote interface among the interfaces `node` declares
/// directly.
pub fn extract_remote_interface(node: &NodeTypeDef) -> Result<Arc<InterfaceDef>, DefinitionError> {
    let mut found = node.interfaces().iter().filter(|u| qualifies(u));

    match (found.next(), found.next()) {
        (Some(only), None) => Ok(Arc::clone(only.interface())),
        (Some(first), Some(second)) => Err(DefinitionError::AmbiguousRemoteInterface {
            node: node.name().to_string(),
            first: first.interface().name().to_string(),
            second: second.interface().name().to_string(),
        }),
        (None, _) => Err(DefinitionError::NoRemoteInterface {
            node: node.name().to_string(),
        }),
    }
}
