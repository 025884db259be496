/// Configuration for a [`DescriptorRegistry`](crate::DescriptorRegistry).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    eager_default_handler: bool,
}

impl RegistryConfig {
    /// Creates a new configuration builder with default settings.
    pub fn builder() -> RegistryConfigBuilder {
        RegistryConfigBuilder::default()
    }

    /// Whether the default handler is resolved while a descriptor is built.
    pub fn eager_default_handler(&self) -> bool {
        self.eager_default_handler
    }
}

/// Builder for `RegistryConfig`.
#[derive(Debug, Default)]
pub struct RegistryConfigBuilder {
    eager_default_handler: Option<bool>,
}

impl RegistryConfigBuilder {
    /// Resolve the default handler during construction, making it mandatory
    /// (default: false, resolved on first request).
    pub fn eager_default_handler(mut self, eager: bool) -> Self {
        self.eager_default_handler = Some(eager);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> RegistryConfig {
        RegistryConfig {
            eager_default_handler: self.eager_default_handler.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_lazy_default_handler() {
        assert!(!RegistryConfig::default().eager_default_handler());
        assert_eq!(RegistryConfig::builder().build(), RegistryConfig::default());
    }

    #[test]
    fn test_builder_sets_eager() {
        let cfg = RegistryConfig::builder().eager_default_handler(true).build();
        assert!(cfg.eager_default_handler());
    }
}
