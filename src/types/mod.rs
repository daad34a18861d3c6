mod coord;
mod options;
mod primitives;

pub use coord::*;
pub use options::*;
pub use primitives::*;
