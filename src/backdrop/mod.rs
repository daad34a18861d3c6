mod graticule;
mod plugin;
mod starfield;

pub use graticule::*;
pub use plugin::*;
pub use starfield::*;
