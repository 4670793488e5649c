//! One-way telemetry surface.
//!
//! Rendering and analytics consumers subscribe per topic; nothing published
//! here ever feeds back into the tick path.
mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{ModeChangedEvent, TelemetryEvent, TrainingEvent};
