pub mod enums;
pub mod error;
pub mod regions;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{GroupDimension, SourceStatus};
pub use error::CoreError;
pub use regions::Region;
pub use structs::Transaction;
