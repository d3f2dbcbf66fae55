//! Trackpad swipe forwarding from embedded web views.
//!
//! Web content receives wheel events the host window never sees. The filter
//! here picks out horizontal-dominant wheel events (swipes rather than vertical
//! scrolls) and throttles them so the host channel is not flooded.

use serde::{Deserialize, Serialize};

use crate::config::GestureConfig;

/// A wheel event as observed inside the web view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub delta_x: f64,
    pub delta_y: f64,
    /// Milliseconds on any monotonic clock
    pub timestamp_ms: u64,
}

impl WheelEvent {
    pub fn new(delta_x: f64, delta_y: f64, timestamp_ms: u64) -> Self {
        Self {
            delta_x,
            delta_y,
            timestamp_ms,
        }
    }
}

/// Payload sent to the host window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeDelta {
    pub delta_x: f64,
    pub delta_y: f64,
}

/// Receiver on the host side of the forwarding channel
pub trait HostSink {
    fn send_to_host(&mut self, channel: &str, delta: SwipeDelta);
}

impl HostSink for Vec<(String, SwipeDelta)> {
    fn send_to_host(&mut self, channel: &str, delta: SwipeDelta) {
        self.push((channel.to_string(), delta));
    }
}

/// Horizontal-swipe filter with a minimum spacing between forwarded events
#[derive(Debug, Clone)]
pub struct SwipeFilter {
    config: GestureConfig,
    last_sent_ms: Option<u64>,
}

impl SwipeFilter {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            last_sent_ms: None,
        }
    }

    pub fn channel(&self) -> &str {
        &self.config.channel
    }

    /// Whether the event looks like a horizontal swipe
    pub fn is_horizontal(&self, event: &WheelEvent) -> bool {
        let abs_x = event.delta_x.abs();
        let abs_y = event.delta_y.abs();

        abs_x >= self.config.min_delta_x && abs_y <= abs_x * self.config.max_vertical_ratio
    }

    /// Decide whether to forward `event`, recording it as sent if so
    pub fn accept(&mut self, event: &WheelEvent) -> Option<SwipeDelta> {
        if !self.is_horizontal(event) {
            return None;
        }

        if let Some(last) = self.last_sent_ms {
            if event.timestamp_ms.saturating_sub(last) < self.config.throttle_ms {
                tracing::trace!(at = event.timestamp_ms, last, "Throttled swipe event");
                return None;
            }
        }

        self.last_sent_ms = Some(event.timestamp_ms);
        Some(SwipeDelta {
            delta_x: event.delta_x,
            delta_y: event.delta_y,
        })
    }

    /// Filter `event` and hand it to `sink` when accepted
    pub fn forward(&mut self, event: &WheelEvent, sink: &mut dyn HostSink) -> bool {
        match self.accept(event) {
            Some(delta) => {
                sink.send_to_host(&self.config.channel, delta);
                true
            }
            None => false,
        }
    }
}

impl Default for SwipeFilter {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
