use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The declarative capability vocabulary a node author attaches to
/// interfaces, interface uses, methods and parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Marker {
    /// Attached where a node type *uses* an interface: "this is my remote surface".
    Remote,
    /// Attached to an interface *definition*: every use of it is remote.
    RemoteProxy,
    /// The method is a remotely invocable operation.
    RemoteOp,
    /// The parameter is the response-callback slot.
    Response,
    Init,
    Process,
    Merge,
    Query,
    Default,
}

/// An ordered set of [`Marker`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerSet(BTreeSet<Marker>);

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, marker: Marker) -> Self {
        self.0.insert(marker);
        self
    }

    pub fn insert(&mut self, marker: Marker) -> bool {
        self.0.insert(marker)
    }

    pub fn contains(&self, marker: Marker) -> bool {
        self.0.contains(&marker)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Marker> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Marker> for MarkerSet {
    fn from_iter<I: IntoIterator<Item = Marker>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Marker; N]> for MarkerSet {
    fn from(markers: [Marker; N]) -> Self {
        markers.into_iter().collect()
    }
}

/// A lifecycle slot the runtime invokes outside the RPC surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LifecycleRole {
    Init,
    Process,
    Merge,
    Query,
    Default,
}

impl LifecycleRole {
    /// Roles resolved while the descriptor is being built.
    pub const EAGER: [LifecycleRole; 4] = [
        LifecycleRole::Init,
        LifecycleRole::Process,
        LifecycleRole::Merge,
        LifecycleRole::Query,
    ];

    /// The marker that tags a method for this role.
    pub fn marker(self) -> Marker {
        match self {
            LifecycleRole::Init => Marker::Init,
            LifecycleRole::Process => Marker::Process,
            LifecycleRole::Merge => Marker::Merge,
            LifecycleRole::Query => Marker::Query,
            LifecycleRole::Default => Marker::Default,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleRole::Init => "init",
            LifecycleRole::Process => "process",
            LifecycleRole::Merge => "merge",
            LifecycleRole::Query => "query",
            LifecycleRole::Default => "default",
        }
    }
}

impl fmt::Display for LifecycleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
