pub mod error;
pub mod types;

pub use error::Error;
pub use types::{Distance, DistanceVector, Edge, FileWeight, INF, Weight};
