pub mod http;
pub mod logging;
pub mod offline;
pub mod pipeline;
pub mod service;
pub mod sources;

pub use http::{HttpClient, HttpResponse, ReqwestHttpClient};
pub use logging::init_logging;
pub use offline::{OfflineSnapshot, OfflineStore};
pub use pipeline::{Aggregation, Aggregator};
pub use service::SearchService;
pub use sources::{default_sources, GuardianSource, NytSource};

pub mod prelude {
    pub use super::{Aggregator, HttpClient, SearchService};
    pub use na_core::{Article, Error, NewsSource, Result};
}
