pub mod config;
pub mod dedup;
pub mod error;
pub mod models;
pub mod pagination;
pub mod query;
pub mod source;

pub use config::Config;
pub use dedup::dedup_first_seen;
pub use error::{Error, Result};
pub use models::{Article, Links, ResultEnvelope, SearchResponse};
pub use pagination::{paginate, LinkBuilder, PAGE_SIZE};
pub use query::{SearchParams, SearchQuery};
pub use source::NewsSource;

pub mod prelude {
    pub use crate::{Article, Config, Error, NewsSource, Result};
}
