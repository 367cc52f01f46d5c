mod store;
mod types;

pub use store::GraphDataStore;
pub use types::{GraphDataset, GraphLink, GraphNode};
