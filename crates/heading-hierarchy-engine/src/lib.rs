pub mod hierarchy;
pub mod host;
pub mod io;
pub mod plugin;
pub mod render;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use hierarchy::*;
pub use host::*;
pub use io::*;
pub use plugin::HeadingHierarchyPlugin;
pub use render::{Preview, RenderedBlock};
