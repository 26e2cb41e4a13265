pub mod types;
pub mod settings;
pub mod error;
pub mod events;
pub mod emit;


// Re-export the crate error for convenience
pub use error::{AppError, AppResult};
