//! Topology interface
//!
//! The engine and the workload generators only need a narrow view of the
//! network graph: node identifiers, a role attribute distinguishing
//! request-originating receivers from routers and content sources, per-node
//! degree (for spatial skew ranking), and shortest paths for forwarding.
//! Full graph libraries stay outside this crate; `SimpleTopology` is a small
//! adjacency-list implementation sufficient for experiments and tests.

use crate::NodeId;
use std::collections::{HashMap, VecDeque};

/// Role of a node in the network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Client-role node originating content requests
    Receiver,
    /// Intermediate node, eligible for cache placement
    Router,
    /// Origin node permanently holding part of the content catalog
    Source,
}

/// Narrow topology interface consumed by the engine and generators
pub trait Topology {
    fn nodes(&self) -> Vec<NodeId>;
    fn role(&self, node: NodeId) -> NodeRole;
    fn neighbors(&self, node: NodeId) -> &[NodeId];

    fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// Propagation delay of the link (u, v), in abstract time units
    fn link_delay(&self, _u: NodeId, _v: NodeId) -> f64 {
        1.0
    }

    /// Shortest path from `from` to `to`, inclusive of both endpoints
    fn shortest_path(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>>;

    /// All receiver-role nodes, in ascending id order
    fn receivers(&self) -> Vec<NodeId> {
        let mut r: Vec<NodeId> = self
            .nodes()
            .into_iter()
            .filter(|&n| self.role(n) == NodeRole::Receiver)
            .collect();
        r.sort_unstable();
        r
    }

    /// All source-role nodes, in ascending id order
    fn sources(&self) -> Vec<NodeId> {
        let mut s: Vec<NodeId> = self
            .nodes()
            .into_iter()
            .filter(|&n| self.role(n) == NodeRole::Source)
            .collect();
        s.sort_unstable();
        s
    }
}

/// Adjacency-list topology with BFS shortest paths
#[derive(Debug, Clone)]
pub struct SimpleTopology {
    roles: Vec<NodeRole>,
    adjacency: Vec<Vec<NodeId>>,
}

impl SimpleTopology {
    /// Build a topology from per-node roles and undirected edges
    pub fn new(roles: Vec<NodeRole>, edges: &[(NodeId, NodeId)]) -> Self {
        let mut adjacency = vec![Vec::new(); roles.len()];
        for &(u, v) in edges {
            adjacency[u].push(v);
            adjacency[v].push(u);
        }
        Self { roles, adjacency }
    }

    /// Line topology receiver - routers - source, handy for tests
    pub fn line(n_routers: usize) -> Self {
        let mut roles = vec![NodeRole::Receiver];
        roles.extend(std::iter::repeat(NodeRole::Router).take(n_routers));
        roles.push(NodeRole::Source);
        let edges: Vec<(NodeId, NodeId)> = (0..n_routers + 1).map(|i| (i, i + 1)).collect();
        Self::new(roles, &edges)
    }
}

impl Topology for SimpleTopology {
    fn nodes(&self) -> Vec<NodeId> {
        (0..self.roles.len()).collect()
    }

    fn role(&self, node: NodeId) -> NodeRole {
        self.roles[node]
    }

    fn neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.adjacency[node]
    }

    fn shortest_path(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
        if from == to {
            return Some(vec![from]);
        }
        let mut prev: HashMap<NodeId, NodeId> = HashMap::new();
        let mut queue = VecDeque::from([from]);
        while let Some(u) = queue.pop_front() {
            for &v in &self.adjacency[u] {
                if v != from && !prev.contains_key(&v) {
                    prev.insert(v, u);
                    if v == to {
                        let mut path = vec![to];
                        let mut cur = to;
                        while cur != from {
                            cur = prev[&cur];
                            path.push(cur);
                        }
                        path.reverse();
                        return Some(path);
                    }
                    queue.push_back(v);
                }
            }
        }
        None
    }
}
