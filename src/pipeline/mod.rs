pub mod bootstrap;
pub mod loader;
pub mod walker;

pub use bootstrap::bootstrap;
pub use loader::reveal;
pub use walker::walk;
