pub mod easing;
pub mod geodesy;

pub use easing::*;
pub use geodesy::*;
