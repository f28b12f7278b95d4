//! # sartor-telemetry
//!
//! Event bus for fitting telemetry. Emits structured events
//! (correspondence stats, replay write-backs, joint corrections,
//! scratch reclamation) that can be consumed by pluggable sinks
//! (tracing, test capture, host progress panels).

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, FitEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
