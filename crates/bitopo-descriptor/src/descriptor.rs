use std::any::{TypeId, type_name};
use std::sync::{Arc, OnceLock};

use bitopo_core::{
    DefinitionError, InterfaceDef, LifecycleRole, NodeType, NodeTypeDef, Operation, OperationId,
    OperationTable,
};
use bitopo_diplomacy::{ForeignInterface, Outbound, RemoteStub, StubError, StubType};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::RegistryConfig;
use crate::extract::extract_remote_interface;
use crate::lifecycle::{LifecycleMethod, LifecycleSlots, resolve_lifecycle};
use crate::table::build_operation_table;

/// Everything the dispatch layer needs to drive one node type.
///
/// Built by a [`DescriptorRegistry`](crate::DescriptorRegistry) and immutable
/// afterwards, except for the default handler slot, which is resolved on
/// first request unless the registry was configured to resolve it eagerly.
#[derive(Debug)]
pub struct NodeDescriptor {
    type_id: TypeId,
    type_name: &'static str,
    definition: NodeTypeDef,
    interface: Arc<InterfaceDef>,
    operations: OperationTable,
    lifecycle: LifecycleSlots,
    default: OnceLock<Result<LifecycleMethod, DefinitionError>>,
    stub: StubType,
}

impl NodeDescriptor {
    pub(crate) fn build<T: NodeType>(config: &RegistryConfig) -> Result<Self, DefinitionError> {
        Self::construct(TypeId::of::<T>(), type_name::<T>(), T::definition(), config)
    }

    #[instrument(
        level = "debug",
        skip_all,
        fields(node = %definition.name(), rust_type = %rust_type)
    )]
    fn construct(
        type_id: TypeId,
        rust_type: &'static str,
        definition: NodeTypeDef,
        config: &RegistryConfig,
    ) -> Result<Self, DefinitionError> {
        let interface = extract_remote_interface(&definition)?;
        let operations = build_operation_table(&interface)?;
        let lifecycle = LifecycleSlots::resolve(&definition)?;

        let default: OnceLock<Result<LifecycleMethod, DefinitionError>> =
            if config.eager_default_handler() {
                OnceLock::from(Ok(resolve_lifecycle(&definition, LifecycleRole::Default)?))
            } else {
                OnceLock::new()
            };

        let stub = StubType::generate(interface.name(), &operations);

        Ok(Self {
            type_id,
            type_name: rust_type,
            definition,
            interface,
            operations,
            lifecycle,
            default,
            stub,
        })
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The Rust path of the wrapped type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The node name from the definition record.
    pub fn node_name(&self) -> &str {
        self.definition.name()
    }

    pub fn definition(&self) -> &NodeTypeDef {
        &self.definition
    }

    pub fn remote_interface(&self) -> &Arc<InterfaceDef> {
        &self.interface
    }

    pub fn operations(&self) -> &OperationTable {
        &self.operations
    }

    pub fn operation(&self, id: &OperationId) -> Option<&Operation> {
        self.operations.get(id)
    }

    pub fn init(&self) -> &LifecycleMethod {
        &self.lifecycle.init
    }

    pub fn process(&self) -> &LifecycleMethod {
        &self.lifecycle.process
    }

    pub fn merge(&self) -> &LifecycleMethod {
        &self.lifecycle.merge
    }

    pub fn query(&self) -> &LifecycleMethod {
        &self.lifecycle.query
    }

    /// The default handler, resolved on first call. Missing or duplicated
    /// handlers are reported on every call.
    pub fn default_handler(&self) -> Result<&LifecycleMethod, DefinitionError> {
        self.default
            .get_or_init(|| resolve_lifecycle(&self.definition, LifecycleRole::Default))
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn lifecycle(&self, role: LifecycleRole) -> Result<&LifecycleMethod, DefinitionError> {
        match role {
            LifecycleRole::Init => Ok(self.init()),
            LifecycleRole::Process => Ok(self.process()),
            LifecycleRole::Merge => Ok(self.merge()),
            LifecycleRole::Query => Ok(self.query()),
            LifecycleRole::Default => self.default_handler(),
        }
    }

    pub fn stub_type(&self) -> &StubType {
        &self.stub
    }

    /// Binds the stub type to `link`.
    pub fn stub(&self, link: Arc<dyn Outbound>) -> RemoteStub {
        self.stub.bind(link)
    }

    /// Builds a typed client for the remote interface over `link`.
    pub fn connect<S: ForeignInterface>(&self, link: Arc<dyn Outbound>) -> Result<S, StubError> {
        S::bind(self.stub(link))
    }

    /// A serializable manifest of this descriptor. Operations are ordered by
    /// signature. The default handler is listed only once it has resolved.
    pub fn summary(&self) -> DescriptorSummary {
        let mut operations: Vec<OperationSummary> = self
            .operations
            .iter()
            .map(|op| OperationSummary {
                id: op.id(),
                signature: op.signature(),
                response_slot: op.has_response_slot(),
                returns_response: op.returns_response(),
            })
            .collect();
        operations.sort_by(|a, b| a.signature.cmp(&b.signature));

        DescriptorSummary {
            node: self.node_name().to_string(),
            interface: self.interface.name().to_string(),
            operations,
            lifecycle: LifecycleSummary {
                init: self.lifecycle.init.name().to_string(),
                process: self.lifecycle.process.name().to_string(),
                merge: self.lifecycle.merge.name().to_string(),
                query: self.lifecycle.query.name().to_string(),
                default: self
                    .default
                    .get()
                    .and_then(|resolved| resolved.as_ref().ok())
                    .map(|handler| handler.name().to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorSummary {
    pub node: String,
    pub interface: String,
    pub operations: Vec<OperationSummary>,
    pub lifecycle: LifecycleSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationSummary {
    pub id: OperationId,
    pub signature: String,
    pub response_slot: bool,
    pub returns_response: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleSummary {
    pub init: String,
    pub process: String,
    pub merge: String,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}
