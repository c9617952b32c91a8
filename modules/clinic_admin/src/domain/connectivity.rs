use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::domain::ports::{Method, RemoteError, Transport};

/// When a degraded façade should try the remote service again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconnectPolicy {
    /// Stay on the fallback store until [`Connectivity::reset`] is called.
    Never,
    /// Try the remote service again once this long has passed since the last failure.
    /// `After(Duration::ZERO)` re-decides on every call.
    After(Duration),
}

impl ReconnectPolicy {
    pub fn from_secs(secs: Option<u64>) -> Self {
        match secs {
            Some(s) => Self::After(Duration::from_secs(s)),
            None => Self::Never,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Connected,
    Degraded { since: Instant },
}

/// Per-façade transport/fallback decision.
///
/// `Connected -> Degraded` on the first remote failure, back to `Connected`
/// on the next successful remote call.
#[derive(Debug)]
pub struct Connectivity {
    state: Mutex<LinkState>,
    policy: ReconnectPolicy,
}

impl Connectivity {
    pub fn new(policy: ReconnectPolicy) -> Self {
        Self {
            state: Mutex::new(LinkState::Connected),
            policy,
        }
    }

    pub fn state(&self) -> LinkState {
        *self.state.lock()
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.state(), LinkState::Degraded { .. })
    }

    /// Whether the next call should go to the remote service.
    pub fn should_attempt_remote(&self) -> bool {
        match (self.state(), self.policy) {
            (LinkState::Connected, _) => true,
            (LinkState::Degraded { .. }, ReconnectPolicy::Never) => false,
            (LinkState::Degraded { since }, ReconnectPolicy::After(wait)) => {
                since.elapsed() >= wait
            }
        }
    }

    pub fn record_success(&self) {
        let mut state = self.state.lock();
        if let LinkState::Degraded { .. } = *state {
            info!("remote service reachable again");
        }
        *state = LinkState::Connected;
    }

    pub fn record_failure(&self) {
        *self.state.lock() = LinkState::Degraded {
            since: Instant::now(),
        };
    }

    /// Force the next call back onto the remote service.
    pub fn reset(&self) {
        *self.state.lock() = LinkState::Connected;
    }
}

/// A transport bound to one façade's connectivity state.
pub struct RemoteLink {
    transport: Arc<dyn Transport>,
    connectivity: Connectivity,
    resource: &'static str,
}

impl RemoteLink {
    pub fn new(
        transport: Arc<dyn Transport>,
        policy: ReconnectPolicy,
        resource: &'static str,
    ) -> Self {
        Self {
            transport,
            connectivity: Connectivity::new(policy),
            resource,
        }
    }

    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    /// Try the remote service once and decode the body.
    ///
    /// Returns `None` when the link is degraded, the call fails, or the body
    /// does not decode; the caller then serves the fallback store.
    pub async fn attempt<T, F>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<Value>,
        decode: F,
    ) -> Option<T>
    where
        F: FnOnce(Value) -> Result<T, RemoteError>,
    {
        if !self.connectivity.should_attempt_remote() {
            debug!(resource = self.resource, "link degraded, skipping remote call");
            return None;
        }

        let outcome = match self.transport.request(method, segments, body).await {
            Ok(value) => decode(value),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(v) => {
                self.connectivity.record_success();
                Some(v)
            }
            Err(e) => {
                warn!(
                    resource = self.resource,
                    method = %method,
                    error = %e,
                    "remote call failed, serving fallback store"
                );
                self.connectivity.record_failure();
                None
            }
        }
    }
}
