pub mod math;
pub mod time;

// Clock and spherical math shared by every other crate.
pub use time::*;
