pub mod builder;
pub mod context;
pub mod error;

pub use builder::{BuildState, FeedBuilder};
pub use context::AppContext;
pub use error::{Result, StationlogError};
