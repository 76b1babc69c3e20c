//! Ordered adapter registry
//!
//! The registry is built once at startup and then shared read-only.
//! Resolution scans adapters in registration order and returns the first
//! one whose marker occurs in the model name. `SharedRegistry` allows the
//! whole registry to be swapped for a freshly built one without ever
//! exposing a partially built list to readers.

use super::adapter::{ModelMatch, PromptAdapter};
use super::rules::{AdapterRule, BUILTIN_ADAPTERS};
use crate::error::AdapterError;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct AdapterRegistry {
    adapters: Vec<PromptAdapter>,
}

impl AdapterRegistry {
    /// An empty registry. Add a catch-all adapter last or resolution can fail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in adapter, catch-all last
    pub fn builtin() -> Result<Self, AdapterError> {
        let mut registry = Self::new();
        for rule in &BUILTIN_ADAPTERS {
            registry.register(rule)?;
        }
        info!(adapters = registry.len(), "prompt adapter registry built");
        Ok(registry)
    }

    /// Append an adapter. Templates are validated here, not at render time.
    pub fn register(&mut self, rule: &AdapterRule) -> Result<(), AdapterError> {
        if self.get(rule.name).is_some() {
            return Err(AdapterError::DuplicateAdapter {
                name: rule.name.to_string(),
            });
        }
        let adapter = PromptAdapter::from_rule(rule)?;

        if let Some(catch_all) = self
            .adapters
            .iter()
            .find(|a| a.model_match() == ModelMatch::Any)
        {
            warn!(
                adapter = rule.name,
                shadowed_by = catch_all.name(),
                "adapter registered after a catch-all will never be selected"
            );
        }

        debug!(adapter = rule.name, marker = ?rule.matches.marker(), "registered prompt adapter");
        self.adapters.push(adapter);
        Ok(())
    }

    /// First adapter, in registration order, that applies to `model_name`
    pub fn resolve(&self, model_name: &str) -> Result<&PromptAdapter, AdapterError> {
        if model_name.is_empty() {
            return Err(AdapterError::EmptyModelName);
        }
        match self.adapters.iter().find(|a| a.matches(model_name)) {
            Some(adapter) => {
                debug!(model = model_name, adapter = adapter.name(), "resolved prompt adapter");
                Ok(adapter)
            }
            None => Err(AdapterError::NoAdapterFound {
                model: model_name.to_string(),
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PromptAdapter> {
        self.adapters.iter().find(|a| a.name() == name)
    }

    /// Adapters in registration order
    pub fn adapters(&self) -> impl Iterator<Item = &PromptAdapter> {
        self.adapters.iter()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

/// Shared handle to an immutable registry snapshot.
///
/// Readers take a snapshot and keep using it for the whole request even if
/// the registry is replaced in the meantime.
#[derive(Debug, Clone)]
pub struct SharedRegistry {
    current: Arc<RwLock<Arc<AdapterRegistry>>>,
}

impl SharedRegistry {
    pub fn new(registry: AdapterRegistry) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(registry))),
        }
    }

    pub fn snapshot(&self) -> Arc<AdapterRegistry> {
        // The lock only guards a pointer swap, so a poisoned lock still holds a valid snapshot
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Install a new registry, returning the one it replaced
    pub fn replace(&self, registry: AdapterRegistry) -> Arc<AdapterRegistry> {
        let next = Arc::new(registry);
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, next);
        info!(adapters = guard.len(), "prompt adapter registry replaced");
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::rules::{ALPACA, DEFAULT, MOSS, PHOENIX};

    fn builtin() -> AdapterRegistry {
        AdapterRegistry::builtin().unwrap()
    }

    #[test]
    fn test_builtin_order() {
        let names: Vec<&str> = builtin().adapters().map(|a| a.name()).collect();
        assert_eq!(
            names,
            vec!["moss", "phoenix", "alpaca", "firefly", "baize", "belle", "guanaco", "default"]
        );
    }

    #[test]
    fn test_resolve_family() {
        let registry = builtin();
        assert_eq!(registry.resolve("my-moss-13b").unwrap().name(), "moss");
        assert_eq!(registry.resolve("alpaca-7b").unwrap().name(), "alpaca");
        assert_eq!(registry.resolve("guanaco-33b-merged").unwrap().name(), "guanaco");
        assert_eq!(registry.resolve("BELLE-7B-2M").unwrap().name(), "default");
    }

    #[test]
    fn test_resolve_first_registered_wins() {
        let registry = builtin();
        assert_eq!(registry.resolve("moss-13b-phoenix").unwrap().name(), "moss");
        assert_eq!(registry.resolve("phoenix-alpaca").unwrap().name(), "phoenix");

        let mut reversed = AdapterRegistry::new();
        reversed.register(&PHOENIX).unwrap();
        reversed.register(&MOSS).unwrap();
        assert_eq!(reversed.resolve("moss-13b-phoenix").unwrap().name(), "phoenix");
    }

    #[test]
    fn test_resolve_default_fallback() {
        let adapter = builtin().resolve("totally-unknown-model").unwrap().clone();
        assert_eq!(adapter.name(), "default");
        assert_eq!(adapter.system_preamble(), "You are a helpful assistant!\n");
        assert!(adapter.stop_sequences().is_none());
    }

    #[test]
    fn test_resolve_without_default_fails() {
        let mut registry = AdapterRegistry::new();
        registry.register(&ALPACA).unwrap();
        assert_eq!(
            registry.resolve("llama-2-7b").unwrap_err(),
            AdapterError::NoAdapterFound {
                model: "llama-2-7b".to_string()
            }
        );
        assert!(AdapterRegistry::new().resolve("x").is_err());
    }

    #[test]
    fn test_resolve_empty_name() {
        assert_eq!(builtin().resolve("").unwrap_err(), AdapterError::EmptyModelName);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = builtin();
        assert_eq!(
            registry.register(&DEFAULT),
            Err(AdapterError::DuplicateAdapter {
                name: "default".to_string()
            })
        );
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn test_registered_after_catch_all_is_unreachable() {
        let mut registry = AdapterRegistry::new();
        registry.register(&DEFAULT).unwrap();
        registry.register(&ALPACA).unwrap();
        assert_eq!(registry.resolve("alpaca-7b").unwrap().name(), "default");
    }

    #[test]
    fn test_shared_registry_swap() {
        let shared = SharedRegistry::new(builtin());
        let held = shared.snapshot();

        let mut minimal = AdapterRegistry::new();
        minimal.register(&DEFAULT).unwrap();
        let previous = shared.replace(minimal);

        assert_eq!(previous.len(), 8);
        assert_eq!(held.resolve("alpaca-7b").unwrap().name(), "alpaca");
        assert_eq!(shared.snapshot().resolve("alpaca-7b").unwrap().name(), "default");
    }

    #[test]
    fn test_shared_registry_concurrent_readers() {
        let shared = SharedRegistry::new(builtin());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    let registry = shared.snapshot();
                    let model = if i % 2 == 0 { "moss-moon" } else { "mystery" };
                    registry.resolve(model).unwrap().name()
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let expected = if i % 2 == 0 { "moss" } else { "default" };
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
