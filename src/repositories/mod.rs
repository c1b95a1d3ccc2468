pub mod repository_trait;
pub mod system_repository;

pub use repository_trait::*;
pub use system_repository::*;
