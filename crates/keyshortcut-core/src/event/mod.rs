// Keyshortcut Event Handling
// Host event sources and the pump that feeds them to a dispatcher

pub mod r#loop;

pub use r#loop::{EventPump, EventSource, IterSource, PumpStats};
