use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bitopo_core::{DefinitionError, NodeType};
use lazy_static::lazy_static;
use tracing::{debug, info, warn};

use crate::config::RegistryConfig;
use crate::descriptor::NodeDescriptor;

lazy_static! {
    static ref GLOBAL: DescriptorRegistry = DescriptorRegistry::new();
}

/// Node type → descriptor, built once per type.
///
/// Lookup, construction and insertion happen under one lock, so racing
/// first-time callers share a single descriptor. Failed constructions are
/// not cached; asking again rebuilds from the definition. Entries are never
/// evicted or replaced.
///
/// A type's `definition()` runs under the lock and must not call back into
/// the same registry.
#[derive(Debug, Default)]
pub struct DescriptorRegistry {
    config: RegistryConfig,
    entries: Mutex<HashMap<TypeId, Arc<NodeDescriptor>>>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// The process-wide registry, created on first use with the default
    /// configuration.
    pub fn global() -> &'static DescriptorRegistry {
        &GLOBAL
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Returns the descriptor for `T`, building it on first request.
    pub fn get<T: NodeType>(&self) -> Result<Arc<NodeDescriptor>, DefinitionError> {
        let key = TypeId::of::<T>();
        let mut entries = self.lock();

        if let Some(descriptor) = entries.get(&key) {
            debug!(node = %descriptor.node_name(), "Descriptor cache hit");
            return Ok(Arc::clone(descriptor));
        }

        match NodeDescriptor::build::<T>(&self.config) {
            Ok(descriptor) => {
                let descriptor = Arc::new(descriptor);
                entries.insert(key, Arc::clone(&descriptor));
                info!(
                    node = %descriptor.node_name(),
                    interface = %descriptor.remote_interface().name(),
                    operations = descriptor.operations().len(),
                    "Published node descriptor"
                );
                Ok(descriptor)
            }
            Err(e) => {
                warn!(
                    rust_type = std::any::type_name::<T>(),
                    error = %e,
                    "Rejected node definition"
                );
                Err(e)
            }
        }
    }

    pub fn contains<T: NodeType>(&self) -> bool {
        self.lock().contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Every published descriptor, in no particular order.
    pub fn descriptors(&self) -> Vec<Arc<NodeDescriptor>> {
        self.lock().values().cloned().collect()
    }

    // The map is append-only, so a panic elsewhere cannot leave it torn.
    fn lock(&self) -> MutexGuard<'_, HashMap<TypeId, Arc<NodeDescriptor>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
