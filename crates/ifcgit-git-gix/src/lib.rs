mod backend;
mod repo;
mod util;

pub use backend::GixBackend;
