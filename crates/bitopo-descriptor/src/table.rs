use std::sync::Arc;

use bitopo_core::{DefinitionError, InterfaceDef, Operation, OperationId, OperationTable};
use tracing::debug;

use crate::validate::validate_operation;

/// Validates every method of `interface` and indexes it by [`OperationId`].
///
/// Each operation is opened for dispatch as it is inserted. A restricted
/// interface cannot be opened, so any operation on it fails with
/// [`DefinitionError::InterfaceNotAccessible`].
///
/// Two methods with the same signature hash to the same id and fail with
/// [`DefinitionError::DuplicateOperation`].
pub fn build_operation_table(
    interface: &InterfaceDef,
) -> Result<OperationTable, DefinitionError> {
    let name: Arc<str> = Arc::from(interface.name());
    let mut table = OperationTable::new();

    for method in interface.methods() {
        validate_operation(interface, method)?;

        let id = OperationId::for_method(method);
        let mut operation = Operation::new(id, Arc::clone(&name), method.clone());
        make_invocable(interface, &mut operation)?;

        let signature = operation.signature();
        if table.insert(operation).is_some() {
            return Err(DefinitionError::DuplicateOperation {
                interface: interface.name().to_string(),
                signature,
            });
        }
        debug!(interface = %name, operation = %id, %signature, "Registered operation");
    }

    Ok(table)
}

fn make_invocable(
    interface: &InterfaceDef,
    operation: &mut Operation,
) -> Result<(), DefinitionError> {
    if !interface.is_accessible() {
        return Err(DefinitionError::InterfaceNotAccessible {
            interface: interface.name().to_string(),
        });
    }
    operation.mark_invocable();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitopo_core::{MethodDef, ParamDef, TypeInfo, Visibility};

    fn counter_ops() -> InterfaceDef {
        InterfaceDef::new("CounterOps")
            .method(
                MethodDef::operation("increment")
                    .param(ParamDef::new("delta", TypeInfo::primitive("int"))),
            )
            .method(MethodDef::operation("reset"))
    }

    #[test]
    fn test_ids_match_signatures() {
        let table = build_operation_table(&counter_ops()).unwrap();
        assert_eq!(table.len(), 2);

        let inc = table.get(&OperationId::from_signature("increment[int]")).unwrap();
        assert_eq!(inc.interface(), "CounterOps");
        assert!(inc.is_invocable());
        assert!(table.contains(&OperationId::from_signature("reset[]")));
    }

    #[test]
    fn test_independent_builds_agree() {
        let a = build_operation_table(&counter_ops()).unwrap();
        let b = build_operation_table(&counter_ops()).unwrap();
        let mut ids_a: Vec<_> = a.ids().copied().collect();
        let mut ids_b: Vec<_> = b.ids().copied().collect();
        ids_a.sort();
        ids_b.sort();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn test_restricted_interface_is_not_accessible() {
        let iface = counter_ops().visibility(Visibility::Restricted);
        assert_eq!(
            build_operation_table(&iface).unwrap_err(),
            DefinitionError::InterfaceNotAccessible {
                interface: "CounterOps".to_string()
            }
        );
    }

    #[test]
    fn test_restricted_interface_without_methods_is_empty() {
        let iface = InterfaceDef::new("Silent").visibility(Visibility::Restricted);
        assert!(build_operation_table(&iface).unwrap().is_empty());
    }

    #[test]
    fn test_repeated_signature_is_rejected() {
        let iface = counter_ops().method(MethodDef::operation("reset"));
        assert_eq!(
            build_operation_table(&iface).unwrap_err(),
            DefinitionError::DuplicateOperation {
                interface: "CounterOps".to_string(),
                signature: "reset[]".to_string(),
            }
        );
    }

    #[test]
    fn test_overloads_on_distinct_type_arguments_coexist() {
        let iface = InterfaceDef::new("Store")
            .method(MethodDef::operation("put").param(ParamDef::new(
                "v",
                TypeInfo::class("Envelope<i32>").transferable().build(),
            )))
            .method(MethodDef::operation("put").param(ParamDef::new(
                "v",
                TypeInfo::class("Envelope<String>").transferable().build(),
            )));
        let table = build_operation_table(&iface).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.by_name("put").count(), 2);
    }

    #[test]
    fn test_validation_failure_stops_build() {
        let iface = counter_ops().method(MethodDef::new("undeclared"));
        assert!(matches!(
            build_operation_table(&iface),
            Err(DefinitionError::MissingOperationMarker { .. })
        ));
    }
}
