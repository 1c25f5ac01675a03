//! Metric collectors
//!
//! Collectors accumulate simulation metrics through a set of session and
//! hop hooks, then finalize into a results mapping. Every hook has an empty
//! default so a collector only implements the events it cares about.
//!
//! A session corresponds to one content request. Collectors honour the
//! session's `log` flag: warm-up sessions (log = false) are observed but not
//! counted, which is what keeps measured statistics free of empty-cache
//! bias.
//!
//! The `ProxyCollector` fans every call out to all attached collectors and
//! merges their individual result mappings keyed by collector name.

use crate::network::NetworkView;
use crate::{ContentId, NodeId};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// Aggregated results mapping produced by collector finalization
pub type Results = serde_json::Map<String, Value>;

/// Pluggable accumulator of simulation metrics
#[allow(unused_variables)]
pub trait Collector {
    /// A new request session begins
    fn start_session(&mut self, time: f64, receiver: NodeId, content: ContentId, log: bool) {}

    /// The session's request was satisfied by a cache at `node`
    fn cache_hit(&mut self, node: NodeId) {}

    /// A cache at `node` was probed and did not hold the content
    fn cache_miss(&mut self, node: NodeId) {}

    /// The session's request was satisfied by the origin at `node`
    fn server_hit(&mut self, node: NodeId) {}

    /// A request message traversed the link (u, v)
    fn request_hop(&mut self, u: NodeId, v: NodeId, main_path: bool) {}

    /// A content message traversed the link (u, v)
    fn content_hop(&mut self, u: NodeId, v: NodeId, main_path: bool) {}

    /// The session ended
    fn end_session(&mut self, success: bool) {}

    /// Finalize into a results mapping
    fn results(&self) -> Results;
}

/// Shared handle to the fan-out proxy, held by both strategy instances
pub type SharedCollector = Rc<RefCell<ProxyCollector>>;

/// Fan-out proxy forwarding every metric call to all attached collectors
pub struct ProxyCollector {
    collectors: Vec<(String, Box<dyn Collector>)>,
}

impl ProxyCollector {
    pub fn new(collectors: Vec<(String, Box<dyn Collector>)>) -> Self {
        Self { collectors }
    }

    pub fn into_shared(self) -> SharedCollector {
        Rc::new(RefCell::new(self))
    }
}

impl Collector for ProxyCollector {
    fn start_session(&mut self, time: f64, receiver: NodeId, content: ContentId, log: bool) {
        for (_, c) in &mut self.collectors {
            c.start_session(time, receiver, content, log);
        }
    }

    fn cache_hit(&mut self, node: NodeId) {
        for (_, c) in &mut self.collectors {
            c.cache_hit(node);
        }
    }

    fn cache_miss(&mut self, node: NodeId) {
        for (_, c) in &mut self.collectors {
            c.cache_miss(node);
        }
    }

    fn server_hit(&mut self, node: NodeId) {
        for (_, c) in &mut self.collectors {
            c.server_hit(node);
        }
    }

    fn request_hop(&mut self, u: NodeId, v: NodeId, main_path: bool) {
        for (_, c) in &mut self.collectors {
            c.request_hop(u, v, main_path);
        }
    }

    fn content_hop(&mut self, u: NodeId, v: NodeId, main_path: bool) {
        for (_, c) in &mut self.collectors {
            c.content_hop(u, v, main_path);
        }
    }

    fn end_session(&mut self, success: bool) {
        for (_, c) in &mut self.collectors {
            c.end_session(success);
        }
    }

    /// Merge per-collector results keyed by collector name
    fn results(&self) -> Results {
        self.collectors
            .iter()
            .map(|(name, c)| (name.clone(), Value::Object(c.results())))
            .collect()
    }
}

/// Cache hit ratio over measured sessions
///
/// Each session resolves in exactly one cache hit or one server hit; the
/// ratio is hits over resolved sessions.
pub struct CacheHitRatioCollector {
    session_logged: bool,
    cache_hits: u64,
    server_hits: u64,
}

impl CacheHitRatioCollector {
    pub fn new(_view: NetworkView) -> Self {
        Self {
            session_logged: false,
            cache_hits: 0,
            server_hits: 0,
        }
    }
}

impl Collector for CacheHitRatioCollector {
    fn start_session(&mut self, _time: f64, _receiver: NodeId, _content: ContentId, log: bool) {
        self.session_logged = log;
    }

    fn cache_hit(&mut self, _node: NodeId) {
        if self.session_logged {
            self.cache_hits += 1;
        }
    }

    fn server_hit(&mut self, _node: NodeId) {
        if self.session_logged {
            self.server_hits += 1;
        }
    }

    fn results(&self) -> Results {
        let resolved = self.cache_hits + self.server_hits;
        let ratio = if resolved > 0 {
            self.cache_hits as f64 / resolved as f64
        } else {
            0.0
        };
        let mut out = Results::new();
        out.insert("MEAN".into(), json!(ratio));
        out.insert("CACHE_HITS".into(), json!(self.cache_hits));
        out.insert("SERVER_HITS".into(), json!(self.server_hits));
        out
    }
}

/// Mean request latency over measured sessions, summing per-hop link delays
pub struct LatencyCollector {
    view: NetworkView,
    session_logged: bool,
    session_latency: f64,
    latencies: Vec<f64>,
}

impl LatencyCollector {
    pub fn new(view: NetworkView) -> Self {
        Self {
            view,
            session_logged: false,
            session_latency: 0.0,
            latencies: Vec::new(),
        }
    }
}

impl Collector for LatencyCollector {
    fn start_session(&mut self, _time: f64, _receiver: NodeId, _content: ContentId, log: bool) {
        self.session_logged = log;
        self.session_latency = 0.0;
    }

    fn request_hop(&mut self, u: NodeId, v: NodeId, main_path: bool) {
        if self.session_logged && main_path {
            self.session_latency += self.view.link_delay(u, v);
        }
    }

    fn content_hop(&mut self, u: NodeId, v: NodeId, main_path: bool) {
        if self.session_logged && main_path {
            self.session_latency += self.view.link_delay(u, v);
        }
    }

    fn end_session(&mut self, success: bool) {
        if self.session_logged && success {
            self.latencies.push(self.session_latency);
        }
    }

    fn results(&self) -> Results {
        let mean = if self.latencies.is_empty() {
            0.0
        } else {
            self.latencies.iter().sum::<f64>() / self.latencies.len() as f64
        };
        let mut out = Results::new();
        out.insert("MEAN".into(), json!(mean));
        out.insert("SESSIONS".into(), json!(self.latencies.len()));
        out
    }
}

/// Per-link message counts over the measured interval
///
/// Loads are message counts divided by the measured duration (time between
/// the first and last logged session start).
pub struct LinkLoadCollector {
    session_logged: bool,
    t_start: Option<f64>,
    t_end: f64,
    request_counts: std::collections::BTreeMap<(NodeId, NodeId), u64>,
    content_counts: std::collections::BTreeMap<(NodeId, NodeId), u64>,
}

impl LinkLoadCollector {
    pub fn new(_view: NetworkView) -> Self {
        Self {
            session_logged: false,
            t_start: None,
            t_end: 0.0,
            request_counts: Default::default(),
            content_counts: Default::default(),
        }
    }

    fn loads(counts: &std::collections::BTreeMap<(NodeId, NodeId), u64>, duration: f64) -> Value {
        let map: Results = counts
            .iter()
            .map(|(&(u, v), &n)| {
                let load = if duration > 0.0 {
                    n as f64 / duration
                } else {
                    n as f64
                };
                (format!("{u}->{v}"), json!(load))
            })
            .collect();
        Value::Object(map)
    }
}

impl Collector for LinkLoadCollector {
    fn start_session(&mut self, time: f64, _receiver: NodeId, _content: ContentId, log: bool) {
        self.session_logged = log;
        if log {
            self.t_start.get_or_insert(time);
            self.t_end = time;
        }
    }

    fn request_hop(&mut self, u: NodeId, v: NodeId, _main_path: bool) {
        if self.session_logged {
            *self.request_counts.entry((u, v)).or_insert(0) += 1;
        }
    }

    fn content_hop(&mut self, u: NodeId, v: NodeId, _main_path: bool) {
        if self.session_logged {
            *self.content_counts.entry((u, v)).or_insert(0) += 1;
        }
    }

    fn results(&self) -> Results {
        let duration = self.t_start.map(|t0| self.t_end - t0).unwrap_or(0.0);
        let mut out = Results::new();
        out.insert("DURATION".into(), json!(duration));
        out.insert(
            "REQUEST_LOADS".into(),
            Self::loads(&self.request_counts, duration),
        );
        out.insert(
            "CONTENT_LOADS".into(),
            Self::loads(&self.content_counts, duration),
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{CacheSpec, NetworkState, NetworkView};
    use crate::registry::Registry;
    use crate::topology::SimpleTopology;

    fn view() -> NetworkView {
        let topo = Rc::new(SimpleTopology::line(2));
        let spec = CacheSpec {
            name: "LRU".into(),
            capacity: 4,
        };
        let state = NetworkState::new(topo, &spec, 10, &Registry::default()).unwrap();
        NetworkView::new(Rc::new(RefCell::new(state)))
    }

    #[test]
    fn test_hit_ratio_ignores_warmup() {
        let mut c = CacheHitRatioCollector::new(view());
        // Warm-up session: hit must not count
        c.start_session(0.0, 0, 1, false);
        c.cache_hit(1);
        c.end_session(true);
        // Two measured sessions: one hit, one server hit
        c.start_session(1.0, 0, 1, true);
        c.cache_hit(1);
        c.end_session(true);
        c.start_session(2.0, 0, 2, true);
        c.server_hit(3);
        c.end_session(true);
        let r = c.results();
        assert_eq!(r["MEAN"], json!(0.5));
        assert_eq!(r["CACHE_HITS"], json!(1));
        assert_eq!(r["SERVER_HITS"], json!(1));
    }

    #[test]
    fn test_latency_sums_hop_delays() {
        let mut c = LatencyCollector::new(view());
        c.start_session(0.0, 0, 1, true);
        c.request_hop(0, 1, true);
        c.request_hop(1, 2, true);
        c.content_hop(2, 1, true);
        c.content_hop(1, 0, true);
        c.end_session(true);
        let r = c.results();
        // Uniform unit delay, 4 hops
        assert_eq!(r["MEAN"], json!(4.0));
        assert_eq!(r["SESSIONS"], json!(1));
    }

    #[test]
    fn test_link_load_counts_per_link() {
        let mut c = LinkLoadCollector::new(view());
        c.start_session(0.0, 0, 1, true);
        c.request_hop(0, 1, true);
        c.end_session(true);
        c.start_session(2.0, 0, 1, true);
        c.request_hop(0, 1, true);
        c.end_session(true);
        let r = c.results();
        assert_eq!(r["DURATION"], json!(2.0));
        assert_eq!(r["REQUEST_LOADS"]["0->1"], json!(1.0)); // 2 messages / 2.0 units
    }

    #[test]
    fn test_proxy_fans_out_and_merges() {
        let v = view();
        let mut proxy = ProxyCollector::new(vec![
            (
                "CACHE_HIT_RATIO".into(),
                Box::new(CacheHitRatioCollector::new(v.clone())),
            ),
            ("LATENCY".into(), Box::new(LatencyCollector::new(v))),
        ]);
        proxy.start_session(0.0, 0, 1, true);
        proxy.request_hop(0, 1, true);
        proxy.cache_hit(1);
        proxy.content_hop(1, 0, true);
        proxy.end_session(true);
        let r = proxy.results();
        assert_eq!(r["CACHE_HIT_RATIO"]["MEAN"], json!(1.0));
        assert_eq!(r["LATENCY"]["MEAN"], json!(2.0));
    }
}
