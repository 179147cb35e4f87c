//! Named algorithms.
//!
//! Goal files refer to registered algorithms by name
//! (`{"type": "registered", "name": "..."}`). Embedders register their own
//! Rust implementations here instead of shipping code inside goal files.

use crate::error::GoalError;
use glass_kernel::{Algorithm, AlgorithmError, Mapping, Passthrough};
use std::collections::BTreeMap;

/// Factory producing a fresh algorithm instance for each node.
pub type AlgorithmFactory = Box<dyn Fn() -> Box<dyn Algorithm>>;

pub struct AlgorithmRegistry {
    entries: BTreeMap<String, AlgorithmFactory>,
}

impl AlgorithmRegistry {
    /// A registry with no entries.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// A registry with the built-in entries:
    /// - `passthrough`: identity copy
    /// - `empty`: always measures `{}`
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register("passthrough", || Passthrough);
        registry.register("empty", || {
            |_: &Mapping| -> Result<Mapping, AlgorithmError> { Ok(Mapping::new()) }
        });
        registry
    }

    /// Register (or replace) an algorithm under `name`.
    pub fn register<A, F>(&mut self, name: impl Into<String>, factory: F)
    where
        A: Algorithm + 'static,
        F: Fn() -> A + 'static,
    {
        self.entries.insert(
            name.into(),
            Box::new(move || Box::new(factory()) as Box<dyn Algorithm>),
        );
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Instantiate the algorithm registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<Box<dyn Algorithm>, GoalError> {
        self.entries
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| GoalError::UnknownAlgorithm {
                name: name.to_string(),
            })
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}
