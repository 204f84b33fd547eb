pub mod chunker;
pub mod store;

pub use store::{ensure_index, ChunkSearchResult, IndexEntry, VectorIndex};
