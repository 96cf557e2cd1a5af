//! Provider registry.
//!
//! Holds the adapters in ascending priority order. Built once at start-up and shared
//! read-only across requests.

use crate::{ChatCompletionsAdapter, GenerateContentAdapter};
use gateway_core::{ApiStyle, GatewayError, ProviderAdapter, ProviderDescriptor};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Create the adapter matching a descriptor's API style
#[must_use]
pub fn adapter_for(descriptor: ProviderDescriptor) -> Arc<dyn ProviderAdapter> {
    match descriptor.api_style {
        ApiStyle::ChatCompletions => Arc::new(ChatCompletionsAdapter::new(descriptor)),
        ApiStyle::GenerateContent => Arc::new(GenerateContentAdapter::new(descriptor)),
    }
}

/// Ordered catalog of providers
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn ProviderAdapter>>,
}

impl ProviderRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from descriptors, choosing adapters by API style
    ///
    /// # Errors
    /// Returns error if a descriptor is malformed or a name is registered twice
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = ProviderDescriptor>,
    ) -> Result<Self, GatewayError> {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(adapter_for(descriptor))?;
        }
        Ok(registry)
    }

    /// Register a provider.
    ///
    /// The provider is placed after every provider with a lower or equal priority, so
    /// iteration is by priority with ties kept in registration order.
    ///
    /// # Errors
    /// Returns error if the descriptor is malformed or the name is already taken
    pub fn register(&mut self, provider: Arc<dyn ProviderAdapter>) -> Result<(), GatewayError> {
        let descriptor = provider.descriptor();
        descriptor.validate()?;

        if self.get(&descriptor.name).is_some() {
            return Err(GatewayError::configuration(format!(
                "provider '{}' is already registered",
                descriptor.name
            )));
        }

        let priority = descriptor.priority;
        let index = self
            .providers
            .partition_point(|p| p.descriptor().priority <= priority);

        debug!(
            provider = %descriptor.name,
            priority,
            api_style = descriptor.api_style.as_str(),
            position = index,
            "Registered provider"
        );

        self.providers.insert(index, provider);
        Ok(())
    }

    /// Providers in ascending priority order
    #[must_use]
    pub fn providers(&self) -> &[Arc<dyn ProviderAdapter>] {
        &self.providers
    }

    /// Descriptors in ascending priority order
    pub fn descriptors(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.providers.iter().map(|p| p.descriptor())
    }

    /// Look up a provider by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn ProviderAdapter>> {
        self.providers.iter().find(|p| p.name() == name).cloned()
    }

    /// Provider names in ascending priority order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Number of providers
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}
