//! Name-keyed registry of drawing strategies.
//!
//! The registry is an explicit object shared into the orchestrator
//! (`Rc<RefCell<StrategyRegistry>>`), not a process global. Single-context
//! access only: the registry is not thread-safe and is meant to live on
//! the same thread as the run loop.

use std::collections::HashMap;
use std::rc::Rc;

use crate::strategies::{Bresenham, Dda};
use crate::strategy::{DrawStrategy, Null};

/// Name of the built-in no-op strategy, always registered.
pub const NULL_STRATEGY: &str = "Null";

/// Mapping from strategy name to implementation.
///
/// Keys are unique; registering an existing name overwrites it (last
/// write wins). Lookup of an unknown name falls back to the `Null`
/// strategy rather than failing, since names arrive from user-editable
/// state encodings.
pub struct StrategyRegistry {
    entries: HashMap<String, Rc<dyn DrawStrategy>>,
}

impl StrategyRegistry {
    /// Create a registry containing only the `Null` strategy.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            entries: HashMap::new(),
        };
        registry.register(NULL_STRATEGY, Rc::new(Null));
        registry
    }

    /// Create a registry with the built-in strategies registered.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("Bresenham", Rc::new(Bresenham));
        registry.register("DDA", Rc::new(Dda));
        registry
    }

    /// Insert or overwrite the strategy registered under `name`.
    pub fn register(&mut self, name: impl Into<String>, strategy: Rc<dyn DrawStrategy>) {
        self.entries.insert(name.into(), strategy);
    }

    /// Look up a strategy by name.
    ///
    /// Unknown names fall back to `Null` with a logged warning; this
    /// never panics.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Rc<dyn DrawStrategy> {
        if let Some(strategy) = self.entries.get(name) {
            return Rc::clone(strategy);
        }
        log::warn!("unknown strategy {name:?}, falling back to {NULL_STRATEGY}");
        Rc::clone(
            self.entries
                .get(NULL_STRATEGY)
                .expect("Null strategy is registered at construction"),
        )
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered strategy names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
