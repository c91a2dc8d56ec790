pub mod domain;
pub mod entity_diff;
pub mod error;
pub mod locate;
pub mod merge;
pub mod refindex;
pub mod refname;
pub mod revlist;
pub mod services;
