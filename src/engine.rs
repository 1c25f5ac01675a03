//! Experiment execution engine
//!
//! Consumes one workload's event sequence against an instantiated network
//! model and returns the aggregated collector output. The engine dispatches
//! the first `n_warmup` events to a dedicated warm-up strategy instance and
//! every subsequent event to the measured instance - the switch point is
//! governed strictly by event count, not by each event's own `log` flag
//! (that flag is informational for strategies and collectors).
//!
//! Failure semantics: errors while constructing the network state, a
//! strategy or a collector, and errors streaming out of the workload, all
//! propagate unhandled and abort the experiment. There is no per-event
//! isolation and no partial-result recovery.

use crate::collectors::{Collector, ProxyCollector, Results};
use crate::network::{CacheSpec, NetworkController, NetworkState, NetworkView};
use crate::registry::Registry;
use crate::strategy::StrategySpec;
use crate::topology::Topology;
use crate::workload::Event;
use crate::Result;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

/// Static configuration of one experiment
#[derive(Debug, Clone)]
pub struct ExperimentSettings {
    /// Strategy processing measured traffic
    pub strategy: StrategySpec,
    /// Strategy processing warm-up traffic; defaults to `strategy`
    pub warmup_strategy: Option<StrategySpec>,
    /// Cache policy and per-node capacity placed on every router
    pub cache_policy: CacheSpec,
    /// Collector names to instantiate behind the fan-out proxy
    pub collectors: Vec<String>,
    /// Number of leading events dispatched to the warm-up strategy
    pub n_warmup: u64,
    /// Size of the content population to place on source nodes
    pub n_contents: u64,
}

/// Run one experiment to completion and return the aggregated results
///
/// The workload must be a freshly constructed generator: its event sequence
/// is consumed exactly once, strictly in order, one event fully processed
/// before the next is pulled.
pub fn exec_experiment(
    topology: Rc<dyn Topology>,
    workload: impl IntoIterator<Item = Result<Event>>,
    settings: &ExperimentSettings,
    registry: &Registry,
) -> Result<Results> {
    info!(
        strategy = %settings.strategy.name,
        cache_policy = %settings.cache_policy.name,
        n_warmup = settings.n_warmup,
        "starting experiment"
    );
    let state = Rc::new(RefCell::new(NetworkState::new(
        Rc::clone(&topology),
        &settings.cache_policy,
        settings.n_contents,
        registry,
    )?));
    let view = NetworkView::new(Rc::clone(&state));
    let controller = NetworkController::new(state);

    let mut collectors = Vec::with_capacity(settings.collectors.len());
    for name in &settings.collectors {
        let factory = registry.collector(name)?;
        collectors.push((name.clone(), factory(view.clone())));
    }
    let proxy = ProxyCollector::new(collectors).into_shared();

    let warmup_spec = settings
        .warmup_strategy
        .as_ref()
        .unwrap_or(&settings.strategy);
    let mut warmup = registry.strategy(&warmup_spec.name)?(
        view.clone(),
        controller.clone(),
        Rc::clone(&proxy),
        warmup_spec,
    )?;
    let mut measured = registry.strategy(&settings.strategy.name)?(
        view,
        controller,
        Rc::clone(&proxy),
        &settings.strategy,
    )?;

    let mut dispatched: u64 = 0;
    for event in workload {
        let Event { time, request } = event?;
        if dispatched < settings.n_warmup {
            warmup.process_event(time, &request);
        } else {
            if dispatched == settings.n_warmup {
                debug!(dispatched, "switching to measured strategy");
            }
            measured.process_event(time, &request);
        }
        dispatched += 1;
    }
    info!(dispatched, "experiment complete");
    let results = proxy.borrow().results();
    Ok(results)
}
