//! Domain event trait.

use chrono::{DateTime, Utc};

/// A domain event: a fact that already happened.
///
/// Events are the only way aggregate state evolves; they must carry everything
/// `apply` needs, so rehydration stays deterministic.
pub trait Event: Clone + core::fmt::Debug {
    /// Stable, dotted event type name (e.g. `"ordering.order.placed"`).
    fn event_type(&self) -> &'static str;

    /// Schema version of the event payload.
    fn version(&self) -> u32;

    /// When the event occurred.
    fn occurred_at(&self) -> DateTime<Utc>;
}
