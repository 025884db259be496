use std::sync::{Arc, Mutex};

use bitopo_core::{
    Described, MethodDef, Operation, OperationId, OperationTable, ParamDef, stable_type_id,
};
use bitopo_diplomacy::{
    ForeignInterface, Outbound, OutboundCall, RemoteStub, StubError, StubType, Transferable,
};

#[test]
fn test_auto_transferable() {
    #[derive(Transferable)]
    struct LedgerEntry {
        _amount: i64,
    }

    // Hash of "LedgerEntry" should be stable and non-zero.
    assert_ne!(LedgerEntry::TYPE_ID, 0);
    assert_eq!(LedgerEntry::TYPE_ID, stable_type_id("LedgerEntry"));

    #[derive(Transferable)]
    struct OtherEntry {}

    assert_ne!(LedgerEntry::TYPE_ID, OtherEntry::TYPE_ID);
    assert!(LedgerEntry::type_info().is_transferable());
}

#[test]
fn test_derived_type_qualifies_as_parameter() {
    #[derive(Transferable)]
    struct Delta {
        _by: i64,
    }

    let param = ParamDef::of::<Delta>("delta");
    assert_eq!(param.ty().name(), "Delta");
    assert!(param.ty().is_transferable());
    assert!(Vec::<Delta>::type_info().is_transferable());
}

#[test]
fn test_generic_types_named_with_arguments() {
    #[derive(Transferable)]
    struct Envelope<T> {
        _body: T,
    }

    assert_eq!(Envelope::<i32>::type_info().name(), "Envelope<i32>");
    assert_eq!(Envelope::<String>::type_info().name(), "Envelope<String>");

    let a = MethodDef::operation("put").param(ParamDef::of::<Envelope<i32>>("v"));
    let b = MethodDef::operation("put").param(ParamDef::of::<Envelope<String>>("v"));
    assert_ne!(OperationId::for_method(&a), OperationId::for_method(&b));
}

struct Loopback(Mutex<Vec<OutboundCall>>);

impl Outbound for Loopback {
    fn send(&self, call: OutboundCall) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.0.lock().unwrap().push(call);
        Ok(())
    }
}

struct CounterClient {
    stub: RemoteStub,
}

impl ForeignInterface for CounterClient {
    const INTERFACE: &'static str = "CounterOps";

    fn from_stub(stub: RemoteStub) -> Self {
        Self { stub }
    }
}

impl CounterClient {
    fn increment(&self, delta: i32) -> Result<OperationId, StubError> {
        self.stub.call("increment", vec![delta.to_le_bytes().to_vec()])
    }
}

fn counter_stub(interface: &str) -> StubType {
    let method = MethodDef::operation("increment").param(ParamDef::of::<i32>("delta"));
    let mut op = Operation::new(OperationId::for_method(&method), Arc::from(interface), method);
    op.mark_invocable();
    let mut table = OperationTable::new();
    table.insert(op);
    StubType::generate(interface, &table)
}

#[test]
fn test_foreign_interface_over_stub() {
    let link = Arc::new(Loopback(Mutex::new(Vec::new())));
    let client = CounterClient::bind(counter_stub("CounterOps").bind(link.clone())).unwrap();

    let id = client.increment(5).unwrap();
    assert_eq!(id, OperationId::from_signature("increment[i32]"));

    let calls = link.0.lock().unwrap();
    assert_eq!(calls[0].args[0], 5i32.to_le_bytes().to_vec());
}

#[test]
fn test_foreign_interface_rejects_other_interface() {
    let link = Arc::new(Loopback(Mutex::new(Vec::new())));
    let result = CounterClient::bind(counter_stub("GaugeOps").bind(link));
    assert!(matches!(
        result,
        Err(StubError::InterfaceMismatch { ref found, .. }) if found == "GaugeOps"
    ));
}
