pub mod camera;
pub mod comparison;
pub mod region;
pub mod selection;

pub use camera::*;
pub use comparison::*;
pub use region::*;
pub use selection::*;
