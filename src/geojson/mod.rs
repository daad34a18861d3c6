mod draw;
mod flatten;
mod interpolate;
mod loader;
mod plugin;
mod renderer;

pub use draw::*;
pub use flatten::*;
pub use interpolate::*;
pub use loader::*;
pub use plugin::*;
pub use renderer::*;
