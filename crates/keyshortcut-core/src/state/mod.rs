// Keyshortcut State
// Registry storage behind the dispatcher

mod registry;

pub use registry::{Bucket, Registry, Snapshot};
