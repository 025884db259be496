use std::fmt;
use std::sync::Arc;

use bitopo_core::{OperationId, OperationTable};
use thiserror::Error;
use tracing::debug;

use crate::traits::Outbound;

#[derive(Error, Debug)]
pub enum StubError {
    #[error("no operation named {method} on remote interface {interface}")]
    UnknownMethod { interface: String, method: String },

    #[error("operation {method} takes {expected:?} argument(s), got {found}")]
    ArityMismatch {
        method: String,
        expected: Vec<usize>,
        found: usize,
    },

    #[error("call to {method} with {arity} argument(s) matches more than one overload")]
    AmbiguousOverload { method: String, arity: usize },

    #[error("unknown operation id {0}")]
    UnknownOperation(OperationId),

    #[error("stub targets {found}, expected {expected}")]
    InterfaceMismatch { expected: String, found: String },

    #[error("outbound link rejected {operation}: {source}")]
    Rejected {
        operation: OperationId,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// A call handed to the outbound link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundCall {
    pub operation: OperationId,
    pub method: String,
    /// Encoded arguments, response slot excluded.
    pub args: Vec<Vec<u8>>,
    pub expects_reply: bool,
}

/// Routing entry for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubRoute {
    method: String,
    arity: usize,
    operation: OperationId,
    expects_reply: bool,
}

impl StubRoute {
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn operation(&self) -> OperationId {
        self.operation
    }

    pub fn expects_reply(&self) -> bool {
        self.expects_reply
    }
}

/// Client-side proxy type for one remote interface.
///
/// Cloning is cheap; the routes are shared.
#[derive(Debug, Clone)]
pub struct StubType {
    interface: Arc<str>,
    routes: Arc<[StubRoute]>,
}

impl StubType {
    /// Generates routes for every invocable operation in `table`, ordered by
    /// method name, then arity, then id.
    pub fn generate(interface: &str, table: &OperationTable) -> Self {
        let mut routes: Vec<StubRoute> = table
            .iter()
            .filter(|op| op.is_invocable())
            .map(|op| StubRoute {
                method: op.name().to_string(),
                arity: op.arity(),
                operation: op.id(),
                expects_reply: op.expects_reply(),
            })
            .collect();
        routes.sort_by(|a, b| {
            (a.method.as_str(), a.arity, a.operation).cmp(&(
                b.method.as_str(),
                b.arity,
                b.operation,
            ))
        });

        Self {
            interface: Arc::from(interface),
            routes: routes.into(),
        }
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn routes(&self) -> &[StubRoute] {
        &self.routes
    }

    pub fn route(&self, id: OperationId) -> Option<&StubRoute> {
        self.routes.iter().find(|r| r.operation == id)
    }

    /// Picks the single route for `method` called with `arity` arguments.
    pub fn resolve(&self, method: &str, arity: usize) -> Result<&StubRoute, StubError> {
        let named: Vec<&StubRoute> = self.routes.iter().filter(|r| r.method == method).collect();
        if named.is_empty() {
            return Err(StubError::UnknownMethod {
                interface: self.interface.to_string(),
                method: method.to_string(),
            });
        }

        let mut matching = named.iter().filter(|r| r.arity == arity);
        match (matching.next(), matching.next()) {
            (Some(route), None) => Ok(*route),
            (Some(_), Some(_)) => Err(StubError::AmbiguousOverload {
                method: method.to_string(),
                arity,
            }),
            (None, _) => Err(StubError::ArityMismatch {
                method: method.to_string(),
                expected: named.iter().map(|r| r.arity).collect(),
                found: arity,
            }),
        }
    }

    pub fn bind(&self, link: Arc<dyn Outbound>) -> RemoteStub {
        RemoteStub {
            ty: self.clone(),
            link,
        }
    }
}

/// A stub type bound to an outbound link.
#[derive(Clone)]
pub struct RemoteStub {
    ty: StubType,
    link: Arc<dyn Outbound>,
}

impl fmt::Debug for RemoteStub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteStub")
            .field("interface", &self.ty.interface())
            .field("routes", &self.ty.routes().len())
            .finish_non_exhaustive()
    }
}

impl RemoteStub {
    pub fn interface(&self) -> &str {
        self.ty.interface()
    }

    pub fn stub_type(&self) -> &StubType {
        &self.ty
    }

    /// Invokes `method` by name. Overloads are told apart by argument count.
    pub fn call(&self, method: &str, args: Vec<Vec<u8>>) -> Result<OperationId, StubError> {
        let route = self.ty.resolve(method, args.len())?;
        self.forward(route, args)
    }

    /// Invokes an operation by id.
    pub fn call_operation(
        &self,
        id: OperationId,
        args: Vec<Vec<u8>>,
    ) -> Result<OperationId, StubError> {
        let route = self.ty.route(id).ok_or(StubError::UnknownOperation(id))?;
        if route.arity != args.len() {
            return Err(StubError::ArityMismatch {
                method: route.method.clone(),
                expected: vec![route.arity],
                found: args.len(),
            });
        }
        self.forward(route, args)
    }

    fn forward(&self, route: &StubRoute, args: Vec<Vec<u8>>) -> Result<OperationId, StubError> {
        debug!(
            interface = %self.ty.interface(),
            method = %route.method,
            operation = %route.operation,
            "Forwarding remote call"
        );
        let call = OutboundCall {
            operation: route.operation,
            method: route.method.clone(),
            args,
            expects_reply: route.expects_reply,
        };
        self.link
            .send(call)
            .map_err(|source| StubError::Rejected {
                operation: route.operation,
                source,
            })?;
        Ok(route.operation)
    }
}
