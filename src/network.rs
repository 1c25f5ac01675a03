//! Network model with a view/controller split
//!
//! One owned `NetworkState` (topology handle, per-router cache instances,
//! content-to-source placement) sits behind `Rc<RefCell<_>>`. Strategies get
//! two narrow handles over it: a `NetworkView` restricted to read-only
//! queries and a `NetworkController` for controller-mediated mutation. The
//! split lets strategy implementations be tested against a read-only double
//! without risking accidental mutation.
//!
//! Experiments are single-threaded with no suspension points (one event is
//! fully processed before the next is pulled from the generator), so
//! `Rc<RefCell>` is the sharing mechanism.

use crate::cache::Cache;
use crate::error::SimError;
use crate::registry::Registry;
use crate::topology::{NodeRole, Topology};
use crate::{ContentId, NodeId, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Cache placement specification: policy name plus per-node capacity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSpec {
    pub name: String,
    pub capacity: usize,
}

/// Mutable simulation state shared by view and controller
pub struct NetworkState {
    topology: Rc<dyn Topology>,
    caches: HashMap<NodeId, Box<dyn Cache>>,
    source_of: HashMap<ContentId, NodeId>,
}

impl NetworkState {
    /// Build the network state from a topology and a cache specification
    ///
    /// Every router-role node receives one cache instance of the requested
    /// policy. Contents {1..n_contents} are spread round-robin over the
    /// source-role nodes in ascending id order, keeping placement uniform
    /// and independent of the workload's random source.
    pub fn new(
        topology: Rc<dyn Topology>,
        cache_spec: &CacheSpec,
        n_contents: u64,
        registry: &Registry,
    ) -> Result<Self> {
        let sources = topology.sources();
        if sources.is_empty() {
            return Err(SimError::invalid("topology has no source-role nodes").into());
        }
        if n_contents < 1 {
            return Err(SimError::invalid("content population must be at least 1").into());
        }
        let cache_factory = registry.cache_policy(&cache_spec.name)?;
        let mut caches = HashMap::new();
        for node in topology.nodes() {
            if topology.role(node) == NodeRole::Router {
                caches.insert(node, cache_factory(cache_spec.capacity));
            }
        }
        let source_of = (1..=n_contents)
            .map(|c| (c, sources[(c - 1) as usize % sources.len()]))
            .collect();
        Ok(Self {
            topology,
            caches,
            source_of,
        })
    }
}

/// Shared handle to the network state
pub type SharedState = Rc<RefCell<NetworkState>>;

/// Read-only capability set over the network state
#[derive(Clone)]
pub struct NetworkView {
    state: SharedState,
}

impl NetworkView {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    /// Whether `content` is available at `node`, either cached or served
    /// from an origin. Never perturbs replacement metadata.
    pub fn has_content(&self, node: NodeId, content: ContentId) -> bool {
        let state = self.state.borrow();
        if state.source_of.get(&content) == Some(&node) {
            return true;
        }
        state
            .caches
            .get(&node)
            .map(|c| c.has(content))
            .unwrap_or(false)
    }

    /// Origin node permanently holding `content`
    pub fn content_source(&self, content: ContentId) -> Option<NodeId> {
        self.state.borrow().source_of.get(&content).copied()
    }

    /// Whether `node` carries a cache
    pub fn has_cache(&self, node: NodeId) -> bool {
        self.state.borrow().caches.contains_key(&node)
    }

    pub fn shortest_path(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
        self.state.borrow().topology.shortest_path(from, to)
    }

    pub fn link_delay(&self, u: NodeId, v: NodeId) -> f64 {
        self.state.borrow().topology.link_delay(u, v)
    }
}

/// Mutating capability set over the network state
///
/// All cache mutation goes through here; strategies hold the view for
/// inspection and this controller for state changes.
#[derive(Clone)]
pub struct NetworkController {
    state: SharedState,
}

impl NetworkController {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    /// Look up `content` in the cache at `node`, counting as a reference
    /// for the replacement policy. Returns true on a cache hit.
    pub fn get_content(&self, node: NodeId, content: ContentId) -> bool {
        self.state
            .borrow_mut()
            .caches
            .get_mut(&node)
            .map(|c| c.get(content))
            .unwrap_or(false)
    }

    /// Insert `content` into the cache at `node`, if the node has one
    pub fn put_content(&self, node: NodeId, content: ContentId) {
        if let Some(cache) = self.state.borrow_mut().caches.get_mut(&node) {
            cache.put(content);
        }
    }

    /// Remove `content` from the cache at `node`
    pub fn remove_content(&self, node: NodeId, content: ContentId) -> bool {
        self.state
            .borrow_mut()
            .caches
            .get_mut(&node)
            .map(|c| c.remove(content))
            .unwrap_or(false)
    }
}
