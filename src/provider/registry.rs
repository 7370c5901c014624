use super::{CiProvider, JavaProvider, LanguageId, NodeJsProvider, PythonProvider};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Providers keyed by language, in registration order.
///
/// Registration order is also detection order. Re-registering a key replaces
/// the earlier provider in place.
pub struct ProviderRegistry {
    providers: IndexMap<LanguageId, Arc<dyn CiProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: IndexMap::new(),
        }
    }

    /// Built-in providers: java, nodejs, python.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        for id in LanguageId::all_variants() {
            let provider: Arc<dyn CiProvider> = match id {
                LanguageId::Java => Arc::new(JavaProvider),
                LanguageId::NodeJs => Arc::new(NodeJsProvider),
                LanguageId::Python => Arc::new(PythonProvider),
                LanguageId::Custom(_) => continue,
            };
            registry.register(provider);
        }

        registry
    }

    /// Registers under the provider's own key. A duplicate key replaces the
    /// existing provider and returns it.
    pub fn register(&mut self, provider: Arc<dyn CiProvider>) -> Option<Arc<dyn CiProvider>> {
        let id = provider.id();
        let previous = self.providers.insert(id.clone(), provider);

        if previous.is_some() {
            warn!(language = %id, "Provider already registered, replacing it");
        } else {
            debug!(language = %id, "Registered provider");
        }

        previous
    }

    pub fn get(&self, id: &LanguageId) -> Option<&dyn CiProvider> {
        self.providers.get(id).map(|p| p.as_ref())
    }

    pub fn contains(&self, id: &LanguageId) -> bool {
        self.providers.contains_key(id)
    }

    /// Providers in registration order.
    pub fn providers(&self) -> impl Iterator<Item = &dyn CiProvider> {
        self.providers.values().map(|p| p.as_ref())
    }

    pub fn keys(&self) -> impl Iterator<Item = &LanguageId> {
        self.providers.keys()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
