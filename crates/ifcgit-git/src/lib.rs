mod noop_backend;

pub use noop_backend::NoopBackend;

use ifcgit_core::services::IfcBackend;
use std::sync::Arc;

pub fn default_backend() -> Arc<dyn IfcBackend> {
    Arc::new(NoopBackend)
}
