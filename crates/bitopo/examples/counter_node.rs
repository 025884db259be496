use std::sync::Arc;

use bitopo::prelude::*;
use bitopo::telemetry::TelemetryConfig;

/// The payload of an increment.
#[derive(Transferable)]
pub struct Delta {
    pub by: i64,
}

/// A replicated counter node.
pub struct Counter;

impl NodeType for Counter {
    fn definition() -> NodeTypeDef {
        let ops = InterfaceDef::new("CounterOps")
            .method(MethodDef::operation("increment").param(ParamDef::of::<Delta>("delta")))
            .method(
                MethodDef::operation("read").returns(ReturnShape::Response(i64::type_info())),
            )
            .build();

        NodeTypeDef::new("Counter")
            .implements_remote(ops)
            .method(MethodDef::new("start").marked(Marker::Init))
            .method(MethodDef::new("on_data").marked(Marker::Process))
            .method(MethodDef::new("absorb").marked(Marker::Merge))
            .method(MethodDef::new("answer").marked(Marker::Query))
    }
}

/// Prints every outbound call instead of sending it.
struct PrintLink;

impl Outbound for PrintLink {
    fn send(&self, call: OutboundCall) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        println!(
            "  -> {} ({}) with {} arg(s), reply expected: {}",
            call.method,
            call.operation,
            call.args.len(),
            call.expects_reply
        );
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Counter node example: starting...");

    TelemetryConfig::builder()
        .service_name("counter-node")
        .log_level("debug")
        .build()
        .init()?;

    let registry = DescriptorRegistry::new();
    let counter = registry.get::<Counter>()?;

    println!(
        "Registered {} via {} with {} operation(s)",
        counter.node_name(),
        counter.remote_interface().name(),
        counter.operations().len()
    );
    for op in counter.operations().iter() {
        println!("  {} = {}", op.signature(), op.id());
    }

    let stub = counter.stub(Arc::new(PrintLink));
    stub.call("increment", vec![5i64.to_le_bytes().to_vec()])?;
    stub.call("read", vec![])?;

    println!("{}", serde_json::to_string_pretty(&counter.summary())?);

    Ok(())
}
