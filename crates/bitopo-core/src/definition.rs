use std::borrow::Cow;
use std::sync::Arc;

use crate::marker::{Marker, MarkerSet};
use crate::traits::Described;
use crate::types::TypeRef;

/// Builds the canonical signature string an operation id is hashed from:
/// the method name followed by the bracketed, comma-separated parameter type
/// names, e.g. `increment[int]` or `put[String, i64]`.
pub fn signature_string<S: AsRef<str>>(method: &str, param_types: &[S]) -> String {
    let names: Vec<&str> = param_types.iter().map(|s| s.as_ref()).collect();
    format!("{method}[{}]", names.join(", "))
}

/// Whether code outside the defining module may call into an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Restricted,
}

/// One declared parameter.
#[derive(Debug, Clone)]
pub struct ParamDef {
    name: Cow<'static, str>,
    ty: TypeRef,
    markers: MarkerSet,
}

impl ParamDef {
    pub fn new(name: impl Into<Cow<'static, str>>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            markers: MarkerSet::new(),
        }
    }

    /// A parameter whose type is described by `T`.
    pub fn of<T: Described>(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, T::type_info())
    }

    /// Marks this parameter as the response-callback slot.
    pub fn response(self) -> Self {
        self.marked(Marker::Response)
    }

    pub fn marked(mut self, marker: Marker) -> Self {
        self.markers.insert(marker);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn is_response_slot(&self) -> bool {
        self.markers.contains(Marker::Response)
    }
}

/// What a method hands back to its caller.
#[derive(Debug, Clone, Default)]
pub enum ReturnShape {
    /// No direct result.
    #[default]
    Unit,
    /// A single result delivered asynchronously.
    Response(TypeRef),
    /// Anything else. Never valid for a remote operation.
    Other(TypeRef),
}

impl ReturnShape {
    pub fn type_name(&self) -> &str {
        match self {
            ReturnShape::Unit => "()",
            ReturnShape::Response(ty) | ReturnShape::Other(ty) => ty.name(),
        }
    }
}

/// One declared method, either on an interface or on a node type.
#[derive(Debug, Clone)]
pub struct MethodDef {
    name: Cow<'static, str>,
    markers: MarkerSet,
    params: Vec<ParamDef>,
    returns: ReturnShape,
}

impl MethodDef {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            markers: MarkerSet::new(),
            params: Vec::new(),
            returns: ReturnShape::Unit,
        }
    }

    /// A method already carrying the operation marker.
    pub fn operation(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name).marked(Marker::RemoteOp)
    }

    pub fn marked(mut self, marker: Marker) -> Self {
        self.markers.insert(marker);
        self
    }

    pub fn param(mut self, param: ParamDef) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, shape: ReturnShape) -> Self {
        self.returns = shape;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn params(&self) -> &[ParamDef] {
        &self.params
    }

    pub fn return_shape(&self) -> &ReturnShape {
        &self.returns
    }

    pub fn param_type_names(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.ty().name()).collect()
    }

    pub fn signature(&self) -> String {
        signature_string(&self.name, &self.param_type_names())
    }
}

/// An interface definition. Shared between every node type that uses it.
#[derive(Debug, Clone)]
pub struct InterfaceDef {
    name: Cow<'static, str>,
    markers: MarkerSet,
    visibility: Visibility,
    methods: Vec<MethodDef>,
}

impl InterfaceDef {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            markers: MarkerSet::new(),
            visibility: Visibility::Public,
            methods: Vec::new(),
        }
    }

    pub fn marked(mut self, marker: Marker) -> Self {
        self.markers.insert(marker);
        self
    }

    /// Marks the definition itself as a remote surface.
    pub fn remote_proxy(self) -> Self {
        self.marked(Marker::RemoteProxy)
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    pub fn build(self) -> Arc<InterfaceDef> {
        Arc::new(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn methods(&self) -> &[MethodDef] {
        &self.methods
    }

    pub fn is_accessible(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

/// A node type's declaration of an interface, with use-site markers.
#[derive(Debug, Clone)]
pub struct InterfaceUse {
    interface: Arc<InterfaceDef>,
    markers: MarkerSet,
}

impl InterfaceUse {
    pub fn new(interface: Arc<InterfaceDef>) -> Self {
        Self {
            interface,
            markers: MarkerSet::new(),
        }
    }

    pub fn marked(mut self, marker: Marker) -> Self {
        self.markers.insert(marker);
        self
    }

    pub fn interface(&self) -> &Arc<InterfaceDef> {
        &self.interface
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }
}

/// The capability table of a node type.
#[derive(Debug, Clone)]
pub struct NodeTypeDef {
    name: Cow<'static, str>,
    interfaces: Vec<InterfaceUse>,
    methods: Vec<MethodDef>,
}

impl NodeTypeDef {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            interfaces: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Declares an interface without use-site markers.
    pub fn implements(self, interface: Arc<InterfaceDef>) -> Self {
        self.uses(InterfaceUse::new(interface))
    }

    /// Declares an interface and marks this use as the remote surface.
    pub fn implements_remote(self, interface: Arc<InterfaceDef>) -> Self {
        self.uses(InterfaceUse::new(interface).marked(Marker::Remote))
    }

    pub fn uses(mut self, interface_use: InterfaceUse) -> Self {
        self.interfaces.push(interface_use);
        self
    }

    pub fn method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interfaces(&self) -> &[InterfaceUse] {
        &self.interfaces
    }

    pub fn methods(&self) -> &[MethodDef] {
        &self.methods
    }
}
