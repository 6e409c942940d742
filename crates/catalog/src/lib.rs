//! Read-only country dataset and everything derived from it without state:
//! name resolution, the world aggregate and head-to-head insights.

pub mod dataset;
pub mod insights;
pub mod record;
pub mod resolver;

pub use dataset::*;
pub use insights::*;
pub use record::*;
pub use resolver::*;
