//! Simulated device state shared across HTTP handlers

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::http::StatusCode;
use netcounter_api::Endpoint;

use crate::config::DeviceConfig;

/// Counter device shared by all handlers
///
/// Besides the counter itself it records how often each endpoint was hit and
/// can be told to fail an endpoint, which tests use to drive error paths.
#[derive(Debug, Clone)]
pub struct DeviceState {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    counter: Mutex<i64>,
    config: DeviceConfig,
    hits: [AtomicU64; 3],
    faults: Mutex<HashMap<Endpoint, StatusCode>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn slot(endpoint: Endpoint) -> usize {
    match endpoint {
        Endpoint::Count => 0,
        Endpoint::Add => 1,
        Endpoint::Sub => 2,
    }
}

impl DeviceState {
    /// Create a device from its configuration
    pub fn new(config: DeviceConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                counter: Mutex::new(config.initial),
                config,
                hits: Default::default(),
                faults: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Current counter value
    #[must_use]
    pub fn get(&self) -> i64 {
        *lock(&self.inner.counter)
    }

    /// Overwrite the counter, ignoring bounds
    pub fn set(&self, value: i64) {
        *lock(&self.inner.counter) = value;
    }

    /// Add one step, saturating at the configured maximum
    pub fn add(&self) -> i64 {
        let config = &self.inner.config;
        let mut counter = lock(&self.inner.counter);
        *counter = counter.saturating_add(config.step).min(config.max);
        *counter
    }

    /// Remove one step, saturating at the configured minimum
    pub fn sub(&self) -> i64 {
        let config = &self.inner.config;
        let mut counter = lock(&self.inner.counter);
        *counter = counter.saturating_sub(config.step).max(config.min);
        *counter
    }

    /// Make `endpoint` answer with `status` until healed
    pub fn fail(&self, endpoint: Endpoint, status: StatusCode) {
        lock(&self.inner.faults).insert(endpoint, status);
    }

    /// Stop failing `endpoint`
    pub fn heal(&self, endpoint: Endpoint) {
        lock(&self.inner.faults).remove(&endpoint);
    }

    /// Injected failure for `endpoint`, if any
    #[must_use]
    pub fn fault(&self, endpoint: Endpoint) -> Option<StatusCode> {
        lock(&self.inner.faults).get(&endpoint).copied()
    }

    /// Number of requests received on `endpoint`
    #[must_use]
    pub fn hits(&self, endpoint: Endpoint) -> u64 {
        self.inner.hits[slot(endpoint)].load(Ordering::Relaxed)
    }

    pub(crate) fn record_hit(&self, endpoint: Endpoint) {
        self.inner.hits[slot(endpoint)].fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::new(DeviceConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_sub() {
        let device = DeviceState::default();
        assert_eq!(device.add(), 1);
        assert_eq!(device.add(), 2);
        assert_eq!(device.sub(), 1);
        assert_eq!(device.get(), 1);
    }

    #[test]
    fn test_floor_is_enforced() {
        let device = DeviceState::default();
        assert_eq!(device.sub(), 0);
        assert_eq!(device.get(), 0);
    }

    #[test]
    fn test_ceiling_is_enforced() {
        let device = DeviceState::new(DeviceConfig {
            initial: 9,
            step: 5,
            min: 0,
            max: 10,
        });
        assert_eq!(device.add(), 10);
    }

    #[test]
    fn test_faults() {
        let device = DeviceState::default();
        device.fail(Endpoint::Sub, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            device.fault(Endpoint::Sub),
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        );
        assert_eq!(device.fault(Endpoint::Add), None);
        device.heal(Endpoint::Sub);
        assert_eq!(device.fault(Endpoint::Sub), None);
    }

    #[test]
    fn test_clones_share_state() {
        let device = DeviceState::default();
        let other = device.clone();
        other.set(41);
        device.record_hit(Endpoint::Count);
        assert_eq!(device.add(), 42);
        assert_eq!(other.hits(Endpoint::Count), 1);
    }
}
