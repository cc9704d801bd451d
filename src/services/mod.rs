// Service exports
pub mod elasticsearch;
pub mod index;
pub mod provision;

pub use elasticsearch::ElasticsearchClient;
pub use index::{DocumentIndex, Hit, IndexError, SearchResponse};
pub use provision::{ensure_indices, seed_sample_data};
