//! Adapter registry
//!
//! A caller-owned, thread-safe list of adapters. Lookups take a read lock,
//! registration and removal take the write lock.
//!
//! Copyright (c) 2025 ORSF Team
//! Licensed under the Apache-2.0 license

use super::{Adapter, KeyValueAdapter};
use crate::config::EngineConfig;
use crate::error::Result;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
pub struct AdapterRegistry {
    adapters: RwLock<Vec<Arc<dyn Adapter>>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding one key/value adapter per configured adapter
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;

        let registry = Self::new();
        for adapter in &config.adapters {
            let built = KeyValueAdapter::new(adapter.metadata.clone(), adapter.mappings.clone())
                .with_extension(adapter.file_extension.clone());
            registry.register(Arc::new(built));
        }
        log::debug!("Loaded {} adapters from configuration", registry.len());
        Ok(registry)
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<dyn Adapter>>> {
        self.adapters.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Arc<dyn Adapter>>> {
        self.adapters.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register(&self, adapter: Arc<dyn Adapter>) {
        self.write().push(adapter);
    }

    /// Find an adapter for `id`.
    ///
    /// The first adapter matching every given constraint wins. Failing that,
    /// the first adapter with the id is returned regardless of version and
    /// car.
    pub fn resolve(
        &self,
        id: &str,
        version: Option<&str>,
        car_key: Option<&str>,
    ) -> Option<Arc<dyn Adapter>> {
        let adapters = self.read();

        if let Some(exact) = adapters
            .iter()
            .find(|a| a.metadata().matches(id, version, car_key))
        {
            return Some(Arc::clone(exact));
        }

        let fallback = adapters.iter().find(|a| a.metadata().id == id).cloned();
        if let Some(adapter) = &fallback {
            log::warn!(
                "No adapter for {} matching version {:?} and car {:?}; using {} {}",
                id,
                version,
                car_key,
                adapter.metadata().version,
                adapter.metadata().car_key
            );
        }
        fallback
    }

    /// Every adapter registered for `id`, in registration order
    pub fn adapters_for(&self, id: &str) -> Vec<Arc<dyn Adapter>> {
        self.read()
            .iter()
            .filter(|a| a.metadata().id == id)
            .cloned()
            .collect()
    }

    pub fn all(&self) -> Vec<Arc<dyn Adapter>> {
        self.read().clone()
    }

    /// Remove adapters with exactly this identity; returns how many were removed
    pub fn unregister(&self, id: &str, version: &str, car_key: &str) -> usize {
        let mut adapters = self.write();
        let before = adapters.len();
        adapters.retain(|a| !a.metadata().matches(id, Some(version), Some(car_key)));
        before - adapters.len()
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
