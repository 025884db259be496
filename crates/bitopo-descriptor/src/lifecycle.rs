use bitopo_core::{DefinitionError, LifecycleRole, MethodDef, NodeTypeDef};

/// A local method the runtime calls at a fixed point of the node's life.
#[derive(Debug, Clone)]
pub struct LifecycleMethod {
    role: LifecycleRole,
    method: MethodDef,
}

impl LifecycleMethod {
    pub fn role(&self) -> LifecycleRole {
        self.role
    }

    pub fn method(&self) -> &MethodDef {
        &self.method
    }

    pub fn name(&self) -> &str {
        self.method.name()
    }
}

/// Finds the one method of `node` marked for `role`.
pub fn resolve_lifecycle(
    node: &NodeTypeDef,
    role: LifecycleRole,
) -> Result<LifecycleMethod, DefinitionError> {
    let marker = role.marker();
    let mut found = node.methods().iter().filter(|m| m.markers().contains(marker));

    match (found.next(), found.next()) {
        (Some(method), None) => Ok(LifecycleMethod {
            role,
            method: method.clone(),
        }),
        (Some(first), Some(second)) => Err(DefinitionError::DuplicateLifecycle {
            node: node.name().to_string(),
            role,
            first: first.name().to_string(),
            second: second.name().to_string(),
        }),
        (None, _) => Err(DefinitionError::MissingLifecycle {
            node: node.name().to_string(),
            role,
        }),
    }
}

/// The mandatory lifecycle slots, resolved together.
#[derive(Debug, Clone)]
pub struct LifecycleSlots {
    pub init: LifecycleMethod,
    pub process: LifecycleMethod,
    pub merge: LifecycleMethod,
    pub query: LifecycleMethod,
}

impl LifecycleSlots {
    pub fn resolve(node: &NodeTypeDef) -> Result<Self, DefinitionError> {
        Ok(Self {
            init: resolve_lifecycle(node, LifecycleRole::Init)?,
            process: resolve_lifecycle(node, LifecycleRole::Process)?,
            merge: resolve_lifecycle(node, LifecycleRole::Merge)?,
            query: resolve_lifecycle(node, LifecycleRole::Query)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitopo_core::Marker;

    fn node() -> NodeTypeDef {
        NodeTypeDef::new("Counter")
            .method(MethodDef::new("start").marked(Marker::Init))
            .method(MethodDef::new("on_data").marked(Marker::Process))
            .method(MethodDef::new("absorb").marked(Marker::Merge))
            .method(MethodDef::new("answer").marked(Marker::Query))
            .method(MethodDef::new("helper"))
    }

    #[test]
    fn test_all_mandatory_roles_resolve() {
        let slots = LifecycleSlots::resolve(&node()).unwrap();
        assert_eq!(slots.init.name(), "start");
        assert_eq!(slots.process.name(), "on_data");
        assert_eq!(slots.merge.name(), "absorb");
        assert_eq!(slots.query.name(), "answer");
        assert_eq!(slots.query.role(), LifecycleRole::Query);
    }

    #[test]
    fn test_missing_role() {
        let partial = NodeTypeDef::new("Partial")
            .method(MethodDef::new("start").marked(Marker::Init))
            .method(MethodDef::new("on_data").marked(Marker::Process))
            .method(MethodDef::new("absorb").marked(Marker::Merge));
        assert_eq!(
            LifecycleSlots::resolve(&partial).unwrap_err(),
            DefinitionError::MissingLifecycle {
                node: "Partial".to_string(),
                role: LifecycleRole::Query,
            }
        );
    }

    #[test]
    fn test_duplicate_role() {
        let doubled = node().method(MethodDef::new("absorb_again").marked(Marker::Merge));
        assert!(matches!(
            LifecycleSlots::resolve(&doubled),
            Err(DefinitionError::DuplicateLifecycle { role: LifecycleRole::Merge, ref second, .. })
                if second == "absorb_again"
        ));
    }

    #[test]
    fn test_default_role_is_independent() {
        assert!(matches!(
            resolve_lifecycle(&node(), LifecycleRole::Default),
            Err(DefinitionError::MissingLifecycle { role: LifecycleRole::Default, .. })
        ));
        let with_default = node().method(MethodDef::new("fallback").marked(Marker::Default));
        assert_eq!(
            resolve_lifecycle(&with_default, LifecycleRole::Default).unwrap().name(),
            "fallback"
        );
    }
}
