//! Client-side load balancing.
//!
//! A policy only ever sees the live candidates of one name; liveness is the
//! registry's business.

use dashmap::DashMap;
use rand::Rng;

use crate::registry::types::InstanceAddr;

/// Chooses one instance out of N live candidates.
pub trait SelectionPolicy: Send + Sync {
    fn choose<'a>(&self, service_name: &str, candidates: &'a [InstanceAddr])
    -> Option<&'a InstanceAddr>;
}

/// Uniform random choice, no weighting and no stickiness.
#[derive(Debug, Default)]
pub struct RandomSelection;

impl SelectionPolicy for RandomSelection {
    fn choose<'a>(
        &self,
        _service_name: &str,
        candidates: &'a [InstanceAddr],
    ) -> Option<&'a InstanceAddr> {
        if candidates.is_empty() {
            return None;
        }
        let idx = rand::thread_rng().gen_range(0..candidates.len());
        candidates.get(idx)
    }
}

/// Cycles through the candidates with one counter per service name.
///
/// The candidate list can shrink or grow between calls; the counter is simply taken
/// modulo the current length.
#[derive(Debug, Default)]
pub struct RoundRobinSelection {
    counters: DashMap<String, usize>,
}

impl SelectionPolicy for RoundRobinSelection {
    fn choose<'a>(
        &self,
        service_name: &str,
        candidates: &'a [InstanceAddr],
    ) -> Option<&'a InstanceAddr> {
        if candidates.is_empty() {
            return None;
        }

        let mut counter = self.counters.entry(service_name.to_string()).or_insert(0);
        let idx = *counter % candidates.len();
        *counter = counter.wrapping_add(1);

        candidates.get(idx)
    }
}
