//! Query routing, canned data and result normalization

pub mod catalog;
mod config;
mod dispatch;
mod error;
mod local;
mod normalize;
mod resolver;
pub mod suggestions;
mod types;

pub use config::Config;
pub use dispatch::{Dispatcher, Submission};
pub use error::{DispatchError, QueryError};
pub use local::LocalResolver;
pub use normalize::normalize;
pub use resolver::Resolver;
pub use types::{
    ChartKind, ChartPoint, ChartSpec, ContentBlock, DataTable, Query, ResultPayload, ResultShape,
};

pub use querydash_storage::{QueryMode, QueryStatus};
