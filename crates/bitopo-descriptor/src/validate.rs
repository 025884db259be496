use bitopo_core::{DefinitionError, InterfaceDef, Marker, MethodDef, ReturnShape};

/// Checks one method of a remote interface against the wire contract.
///
/// Fails on the first violation: a missing operation marker, a response slot
/// anywhere but position 0, a non-transferable parameter, or a return shape
/// other than unit or a single response. The response slot's own type is not
/// checked.
pub fn validate_operation(
    interface: &InterfaceDef,
    method: &MethodDef,
) -> Result<(), DefinitionError> {
    if !method.markers().contains(Marker::RemoteOp) {
        return Err(DefinitionError::MissingOperationMarker {
            interface: interface.name().to_string(),
            method: method.name().to_string(),
        });
    }

    for (position, param) in method.params().iter().enumerate() {
        if param.is_response_slot() {
            if position == 0 {
                continue;
            }
            return Err(DefinitionError::MisplacedResponseSlot {
                interface: interface.name().to_string(),
                method: method.name().to_string(),
                parameter: param.name().to_string(),
            });
        }
        if !param.ty().is_transferable() {
            return Err(DefinitionError::NonTransferableParameter {
                interface: interface.name().to_string(),
                method: method.name().to_string(),
                parameter: param.name().to_string(),
                ty: param.ty().name().to_string(),
            });
        }
    }

    match method.return_shape() {
        ReturnShape::Unit | ReturnShape::Response(_) => Ok(()),
        ReturnShape::Other(ty) => Err(DefinitionError::UnsupportedReturn {
            interface: interface.name().to_string(),
            method: method.name().to_string(),
            ty: ty.name().to_string(),
        }),
    }
}

pub fn validate_interface(interface: &InterfaceDef) -> Result<(), DefinitionError> {
    interface
        .methods()
        .iter()
        .try_for_each(|method| validate_operation(interface, method))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitopo_core::{ParamDef, TypeInfo};

    fn ops(method: MethodDef) -> InterfaceDef {
        InterfaceDef::new("Ops").method(method)
    }

    fn check(method: MethodDef) -> Result<(), DefinitionError> {
        validate_interface(&ops(method))
    }

    #[test]
    fn test_plain_operation_passes() {
        let m = MethodDef::operation("increment")
            .param(ParamDef::new("delta", TypeInfo::primitive("int")));
        assert!(check(m).is_ok());
    }

    #[test]
    fn test_missing_operation_marker() {
        let err = check(MethodDef::new("increment")).unwrap_err();
        assert_eq!(
            err,
            DefinitionError::MissingOperationMarker {
                interface: "Ops".to_string(),
                method: "increment".to_string(),
            }
        );
    }

    #[test]
    fn test_non_transferable_parameter() {
        let socket = TypeInfo::class("Socket").build();
        let err =
            check(MethodDef::operation("attach").param(ParamDef::new("sock", socket))).unwrap_err();
        assert!(matches!(
            err,
            DefinitionError::NonTransferableParameter { ref ty, ref parameter, .. }
                if ty == "Socket" && parameter == "sock"
        ));
        assert!(err.to_string().contains("Socket"));
    }

    #[test]
    fn test_response_slot_type_is_exempt() {
        let callback = TypeInfo::class("Callback").build();
        assert!(!callback.is_transferable());
        let m = MethodDef::operation("get")
            .param(ParamDef::new("reply", callback))
            .param(ParamDef::of::<String>("key"));
        assert!(check(m).is_err());

        let callback = TypeInfo::class("Callback").build();
        let m = MethodDef::operation("get")
            .param(ParamDef::new("reply", callback).response())
            .param(ParamDef::of::<String>("key"));
        assert!(check(m).is_ok());
    }

    #[test]
    fn test_response_slot_must_lead() {
        let callback = TypeInfo::class("Callback").build();
        let m = MethodDef::operation("get")
            .param(ParamDef::of::<String>("key"))
            .param(ParamDef::new("reply", callback).response());
        assert!(matches!(
            check(m),
            Err(DefinitionError::MisplacedResponseSlot { ref parameter, .. })
                if parameter == "reply"
        ));
    }

    #[test]
    fn test_return_shapes() {
        let int = TypeInfo::primitive("int");
        let peek = MethodDef::operation("peek").returns(ReturnShape::Response(int.clone()));
        assert!(check(peek).is_ok());
        assert!(matches!(
            check(MethodDef::operation("peek").returns(ReturnShape::Other(int))),
            Err(DefinitionError::UnsupportedReturn { .. })
        ));
    }

    #[test]
    fn test_first_violation_wins() {
        let iface = InterfaceDef::new("Ops")
            .method(MethodDef::operation("ok"))
            .method(MethodDef::new("first"))
            .method(MethodDef::new("second"));
        assert!(matches!(
            validate_interface(&iface),
            Err(DefinitionError::MissingOperationMarker { ref method, .. }) if method == "first"
        ));
    }
}
