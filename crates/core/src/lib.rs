pub mod block;
pub mod chunk;
pub mod config;
pub mod document;
pub mod error;

pub use block::*;
pub use chunk::*;
pub use config::ChunkingConfig;
pub use document::*;
pub use error::*;
