//! Component registry
//!
//! Strategies, cache policies and collectors are selected by name in
//! experiment descriptors. The registry is an explicit mapping from a string
//! identifier to a constructor, populated at construction; looking up an
//! unknown identifier is a configuration error, never a silent default.

use crate::cache::{Cache, Fifo, Lru};
use crate::collectors::{
    CacheHitRatioCollector, Collector, LatencyCollector, LinkLoadCollector, SharedCollector,
};
use crate::error::SimError;
use crate::network::{NetworkController, NetworkView};
use crate::strategy::{LeaveCopyEverywhere, Strategy, StrategySpec};
use crate::Result;
use std::collections::HashMap;

/// Constructor for a cache instance of a given capacity
pub type CacheFactory = fn(usize) -> Box<dyn Cache>;

/// Constructor for a collector observing the given network view
pub type CollectorFactory = fn(NetworkView) -> Box<dyn Collector>;

/// Constructor for a strategy sharing the experiment's view/controller/proxy
pub type StrategyFactory =
    fn(NetworkView, NetworkController, SharedCollector, &StrategySpec) -> Result<Box<dyn Strategy>>;

/// Name-to-factory mapping for all pluggable components
pub struct Registry {
    strategies: HashMap<&'static str, StrategyFactory>,
    cache_policies: HashMap<&'static str, CacheFactory>,
    collectors: HashMap<&'static str, CollectorFactory>,
}

impl Default for Registry {
    fn default() -> Self {
        let mut registry = Self {
            strategies: HashMap::new(),
            cache_policies: HashMap::new(),
            collectors: HashMap::new(),
        };
        registry.register_strategy("LCE", |view, controller, proxy, _spec| {
            Ok(Box::new(LeaveCopyEverywhere::new(view, controller, proxy)))
        });
        registry.register_cache_policy("LRU", |capacity| Box::new(Lru::new(capacity)));
        registry.register_cache_policy("FIFO", |capacity| Box::new(Fifo::new(capacity)));
        registry.register_collector("CACHE_HIT_RATIO", |view| {
            Box::new(CacheHitRatioCollector::new(view))
        });
        registry.register_collector("LATENCY", |view| Box::new(LatencyCollector::new(view)));
        registry.register_collector("LINK_LOAD", |view| Box::new(LinkLoadCollector::new(view)));
        registry
    }
}

impl Registry {
    pub fn register_strategy(&mut self, name: &'static str, factory: StrategyFactory) {
        self.strategies.insert(name, factory);
    }

    pub fn register_cache_policy(&mut self, name: &'static str, factory: CacheFactory) {
        self.cache_policies.insert(name, factory);
    }

    pub fn register_collector(&mut self, name: &'static str, factory: CollectorFactory) {
        self.collectors.insert(name, factory);
    }

    pub fn strategy(&self, name: &str) -> Result<StrategyFactory> {
        self.strategies.get(name).copied().ok_or_else(|| {
            SimError::UnknownComponent {
                kind: "strategy",
                name: name.to_string(),
            }
            .into()
        })
    }

    pub fn cache_policy(&self, name: &str) -> Result<CacheFactory> {
        self.cache_policies.get(name).copied().ok_or_else(|| {
            SimError::UnknownComponent {
                kind: "cache policy",
                name: name.to_string(),
            }
            .into()
        })
    }

    pub fn collector(&self, name: &str) -> Result<CollectorFactory> {
        self.collectors.get(name).copied().ok_or_else(|| {
            SimError::UnknownComponent {
                kind: "collector",
                name: name.to_string(),
            }
            .into()
        })
    }
}
