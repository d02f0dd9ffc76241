pub mod layout;
pub mod product;

pub use layout::*;
pub use product::*;

// Sentinel strings persisted verbatim when a source field is missing
pub const NO_NAME: &str = "No name found";
pub const NO_BRAND: &str = "No brand found";
pub const UNKNOWN: &str = "Unknown";
