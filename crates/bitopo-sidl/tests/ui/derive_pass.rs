use bitopo_core::{Described, Transferable, TypeInfo, TypeRef, stable_type_id};
use bitopo_sidl::Transferable;

#[derive(Transferable)]
struct Delta {
    _amount: i64,
}

#[derive(Transferable)]
enum Command {
    _Reset,
    _Add(i64),
}

#[derive(Transferable)]
struct Envelope<T> {
    _inner: T,
}

#[derive(Transferable)]
struct Pair<A, B> {
    _a: A,
    _b: B,
}

struct Handle;

impl Described for Handle {
    fn type_info() -> TypeRef {
        TypeInfo::class("Handle").build()
    }
}

fn main() {
    assert_eq!(Delta::TYPE_ID, stable_type_id("Delta"));
    assert_ne!(Delta::TYPE_ID, Command::TYPE_ID);

    let info = Delta::type_info();
    assert_eq!(info.name(), "Delta");
    assert!(info.is_transferable());

    assert!(Command::type_info().is_transferable());

    assert_eq!(Envelope::<i32>::type_info().name(), "Envelope<i32>");
    assert_eq!(Envelope::<String>::type_info().name(), "Envelope<String>");
    assert_eq!(Envelope::<i32>::TYPE_ID, stable_type_id("Envelope"));
    assert_eq!(Pair::<u8, Delta>::type_info().name(), "Pair<u8, Delta>");
    assert!(Pair::<u8, Delta>::type_info().is_transferable());

    assert!(!Envelope::<Handle>::type_info().is_transferable());
}
