use std::borrow::Cow;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use lazy_static::lazy_static;

/// Name of the designated transferability marker interface.
pub const TRANSFERABLE_MARKER_NAME: &str = "Transferable";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Value types (integers, floats, booleans). Trivially transferable.
    Primitive,
    Class,
    Interface,
}

pub type TypeRef = Arc<TypeInfo>;

/// A node in the explicit type graph.
///
/// Classes point at the interfaces they implement and at their superclass;
/// interfaces point at the interfaces they extend. A type without a
/// superclass sits directly below the universal root, which is never
/// represented.
#[derive(Debug)]
pub struct TypeInfo {
    name: Cow<'static, str>,
    kind: TypeKind,
    interfaces: Vec<TypeRef>,
    superclass: Option<TypeRef>,
}

lazy_static! {
    static ref TRANSFERABLE: TypeRef = Arc::new(TypeInfo {
        name: Cow::Borrowed(TRANSFERABLE_MARKER_NAME),
        kind: TypeKind::Interface,
        interfaces: Vec::new(),
        superclass: None,
    });
}

impl TypeInfo {
    pub fn primitive(name: impl Into<Cow<'static, str>>) -> TypeRef {
        TypeInfoBuilder::new(name, TypeKind::Primitive).build()
    }

    pub fn class(name: impl Into<Cow<'static, str>>) -> TypeInfoBuilder {
        TypeInfoBuilder::new(name, TypeKind::Class)
    }

    /// Starts an interface node. `implements` on the builder lists the
    /// interfaces it extends.
    pub fn interface(name: impl Into<Cow<'static, str>>) -> TypeInfoBuilder {
        TypeInfoBuilder::new(name, TypeKind::Interface)
    }

    /// The process-wide transferability marker interface.
    pub fn transferable_marker() -> TypeRef {
        Arc::clone(&TRANSFERABLE)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn interfaces(&self) -> &[TypeRef] {
        &self.interfaces
    }

    pub fn superclass(&self) -> Option<&TypeRef> {
        self.superclass.as_ref()
    }

    /// Whether this node is the marker singleton itself. Another interface
    /// that merely shares its name is not the marker.
    pub fn is_transferable_marker(&self) -> bool {
        std::ptr::eq(self, Arc::as_ptr(&TRANSFERABLE))
    }

    /// Every interface reachable from this type: its own interfaces, the
    /// interfaces those extend, and the interfaces of each superclass up to
    /// the root. Each interface node is reported once, in breadth-first order.
    pub fn all_interfaces(&self) -> Vec<TypeRef> {
        let mut queue: VecDeque<&TypeRef> = VecDeque::new();
        let mut current = Some(self);
        while let Some(ty) = current {
            queue.extend(ty.interfaces.iter());
            current = ty.superclass.as_deref();
        }

        let mut seen = HashSet::new();
        let mut found = Vec::new();
        while let Some(iface) = queue.pop_front() {
            if seen.insert(Arc::as_ptr(iface)) {
                found.push(Arc::clone(iface));
                queue.extend(iface.interfaces.iter());
            }
        }
        found
    }

    /// Whether a value of this type may cross a process boundary.
    pub fn is_transferable(&self) -> bool {
        if self.kind == TypeKind::Primitive || self.is_transferable_marker() {
            return true;
        }
        self.all_interfaces()
            .iter()
            .any(|iface| iface.is_transferable_marker())
    }
}

/// Builder for class and interface nodes.
#[derive(Debug)]
pub struct TypeInfoBuilder {
    name: Cow<'static, str>,
    kind: TypeKind,
    interfaces: Vec<TypeRef>,
    superclass: Option<TypeRef>,
}

impl TypeInfoBuilder {
    fn new(name: impl Into<Cow<'static, str>>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            interfaces: Vec::new(),
            superclass: None,
        }
    }

    pub fn implements(mut self, iface: TypeRef) -> Self {
        self.interfaces.push(iface);
        self
    }

    /// Shorthand for implementing the transferability marker.
    pub fn transferable(self) -> Self {
        self.implements(TypeInfo::transferable_marker())
    }

    pub fn extends(mut self, parent: TypeRef) -> Self {
        self.superclass = Some(parent);
        self
    }

    pub fn build(self) -> TypeRef {
        Arc::new(TypeInfo {
            name: self.name,
            kind: self.kind,
            interfaces: self.interfaces,
            superclass: self.superclass,
        })
    }
}
