use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::definition::{MethodDef, ReturnShape, signature_string};

/// Stable identifier of a remote operation.
///
/// Derived from the operation's signature string alone, so every process that
/// sees the same interface computes the same id without coordination.
///
/// Scheme v1: SHA-256 over the UTF-8 signature (`name[T1, T2]`), truncated to
/// 16 bytes and stamped as a version-8 UUID. The textual wire form is the
/// hyphenated UUID, the binary form its 16 bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationId(Uuid);

impl OperationId {
    /// Identifies the hashing scheme. Changing it changes every id on the wire.
    pub const SCHEME: &'static str = "sha256/uuid-v8/1";

    pub fn from_signature(signature: &str) -> Self {
        let digest = Sha256::digest(signature.as_bytes());
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest[..16]);
        Self(Uuid::new_v8(bytes))
    }

    pub fn from_parts<S: AsRef<str>>(method: &str, param_types: &[S]) -> Self {
        Self::from_signature(&signature_string(method, param_types))
    }

    pub fn for_method(method: &MethodDef) -> Self {
        Self::from_signature(&method.signature())
    }

    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl fmt::Debug for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OperationId({})", self.0.hyphenated())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid operation id {input:?}: {reason}")]
pub struct ParseOperationIdError {
    input: String,
    reason: String,
}

impl FromStr for OperationId {
    type Err = ParseOperationIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| ParseOperationIdError {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }
}

/// One validated remote operation.
#[derive(Debug, Clone)]
pub struct Operation {
    id: OperationId,
    interface: Arc<str>,
    method: MethodDef,
    response_slot: bool,
    returns_response: bool,
    invocable: bool,
}

impl Operation {
    pub fn new(id: OperationId, interface: Arc<str>, method: MethodDef) -> Self {
        let response_slot = method
            .params()
            .first()
            .is_some_and(|p| p.is_response_slot());
        let returns_response = matches!(method.return_shape(), ReturnShape::Response(_));
        Self {
            id,
            interface,
            method,
            response_slot,
            returns_response,
            invocable: false,
        }
    }

    /// Opens the operation to the dispatch layer.
    pub fn mark_invocable(&mut self) {
        self.invocable = true;
    }

    pub fn id(&self) -> OperationId {
        self.id
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn method(&self) -> &MethodDef {
        &self.method
    }

    pub fn name(&self) -> &str {
        self.method.name()
    }

    pub fn signature(&self) -> String {
        self.method.signature()
    }

    /// Whether parameter 0 is the response-callback slot.
    pub fn has_response_slot(&self) -> bool {
        self.response_slot
    }

    pub fn returns_response(&self) -> bool {
        self.returns_response
    }

    /// Whether the caller should expect a reply message.
    pub fn expects_reply(&self) -> bool {
        self.response_slot || self.returns_response
    }

    pub fn is_invocable(&self) -> bool {
        self.invocable
    }

    /// Number of arguments a caller supplies, excluding the response slot.
    pub fn arity(&self) -> usize {
        self.method.params().len() - usize::from(self.response_slot)
    }
}

/// Operation id → operation. Built once per node type.
#[derive(Debug, Clone, Default)]
pub struct OperationTable {
    entries: HashMap<OperationId, Operation>,
}

impl OperationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an operation, returning any entry previously under its id.
    pub fn insert(&mut self, operation: Operation) -> Option<Operation> {
        self.entries.insert(operation.id(), operation)
    }

    pub fn get(&self, id: &OperationId) -> Option<&Operation> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &OperationId) -> bool {
        self.entries.contains_key(id)
    }

    /// Every overload registered under a method name.
    pub fn by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Operation> + 'a {
        self.entries.values().filter(move |op| op.name() == name)
    }

    pub fn ids(&self) -> impl Iterator<Item = &OperationId> + '_ {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation> + '_ {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
