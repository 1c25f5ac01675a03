//! Caching/routing strategy seam
//!
//! A strategy decides how each request is forwarded and which nodes cache
//! which content. It inspects the network through the read-only view,
//! mutates caches through the controller, and reports metrics through the
//! collector proxy. The engine instantiates two strategy objects per
//! experiment - one for warm-up traffic, one for measured traffic - sharing
//! the same view, controller and proxy.
//!
//! Rich strategy suites plug in through the registry; the crate ships
//! `LeaveCopyEverywhere` as a reference implementation.

use crate::collectors::{Collector, SharedCollector};
use crate::network::{NetworkController, NetworkView};
use crate::workload::Request;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Strategy specification: registry name plus free-form parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategySpec {
    pub name: String,
    #[serde(default)]
    pub params: serde_json::Map<String, Value>,
}

impl StrategySpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Default::default(),
        }
    }
}

/// Per-event strategy behavior
///
/// All observable effects of processing happen through controller mutation
/// and collector metric calls; the method itself returns nothing.
pub trait Strategy {
    fn process_event(&mut self, time: f64, request: &Request);
}

/// Leave Copy Everywhere
///
/// Forwards the request along the shortest path toward the content origin,
/// stopping at the first node holding the content, then delivers the
/// content back along the reverse path, leaving a copy in every cache
/// traversed.
pub struct LeaveCopyEverywhere {
    view: NetworkView,
    controller: NetworkController,
    collector: SharedCollector,
}

impl LeaveCopyEverywhere {
    pub fn new(
        view: NetworkView,
        controller: NetworkController,
        collector: SharedCollector,
    ) -> Self {
        Self {
            view,
            controller,
            collector,
        }
    }
}

impl Strategy for LeaveCopyEverywhere {
    fn process_event(&mut self, time: f64, request: &Request) {
        let (receiver, content, log) = match *request {
            Request::Content {
                receiver,
                content,
                log,
            } => (receiver, content, log),
            // Benchmark operations carry no network semantics
            Request::Op { .. } => {
                debug!("ignoring benchmark operation event");
                return;
            }
        };
        let mut collector = self.collector.borrow_mut();
        collector.start_session(time, receiver, content, log);
        let Some(source) = self.view.content_source(content) else {
            debug!(content, "request for unplaced content");
            collector.end_session(false);
            return;
        };
        let Some(path) = self.view.shortest_path(receiver, source) else {
            debug!(receiver, source, "no route to content source");
            collector.end_session(false);
            return;
        };
        // Request phase: walk toward the source until someone has the content.
        let mut serving_idx = path.len() - 1;
        for i in 1..path.len() {
            let (u, v) = (path[i - 1], path[i]);
            collector.request_hop(u, v, true);
            if v == source {
                collector.server_hit(v);
                serving_idx = i;
                break;
            }
            if self.controller.get_content(v, content) {
                collector.cache_hit(v);
                serving_idx = i;
                break;
            }
            if self.view.has_cache(v) {
                collector.cache_miss(v);
            }
        }
        // Delivery phase: content travels back, cached at every hop.
        for i in (1..=serving_idx).rev() {
            let (u, v) = (path[i], path[i - 1]);
            collector.content_hop(u, v, true);
            self.controller.put_content(v, content);
        }
        collector.end_session(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::{CacheHitRatioCollector, Collector, ProxyCollector};
    use crate::network::{CacheSpec, NetworkState};
    use crate::registry::Registry;
    use crate::topology::SimpleTopology;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn setup() -> (NetworkView, NetworkController, SharedCollector) {
        let topo = Rc::new(SimpleTopology::line(2));
        let spec = CacheSpec {
            name: "LRU".into(),
            capacity: 4,
        };
        let state = Rc::new(RefCell::new(
            NetworkState::new(topo, &spec, 10, &Registry::default()).unwrap(),
        ));
        let view = NetworkView::new(Rc::clone(&state));
        let controller = NetworkController::new(state);
        let proxy = ProxyCollector::new(vec![(
            "CACHE_HIT_RATIO".into(),
            Box::new(CacheHitRatioCollector::new(view.clone())),
        )])
        .into_shared();
        (view, controller, proxy)
    }

    #[test]
    fn test_first_request_misses_then_hits() {
        let (view, controller, proxy) = setup();
        let mut lce = LeaveCopyEverywhere::new(view.clone(), controller, Rc::clone(&proxy));
        let request = Request::Content {
            receiver: 0,
            content: 1,
            log: true,
        };
        lce.process_event(0.0, &request);
        // Copies left on both routers on the way back
        assert!(view.has_content(1, 1));
        assert!(view.has_content(2, 1));
        lce.process_event(1.0, &request);
        let results = proxy.borrow().results();
        assert_eq!(results["CACHE_HIT_RATIO"]["CACHE_HITS"], 1);
        assert_eq!(results["CACHE_HIT_RATIO"]["SERVER_HITS"], 1);
    }

    #[test]
    fn test_ignores_benchmark_ops() {
        let (view, controller, proxy) = setup();
        let mut lce = LeaveCopyEverywhere::new(view, controller, Rc::clone(&proxy));
        lce.process_event(
            0.0,
            &Request::Op {
                kind: crate::workload::OpKind::Read,
                item: 1,
                log: true,
            },
        );
        let results = proxy.borrow().results();
        assert_eq!(results["CACHE_HIT_RATIO"]["CACHE_HITS"], 0);
        assert_eq!(results["CACHE_HIT_RATIO"]["SERVER_HITS"], 0);
    }
}
