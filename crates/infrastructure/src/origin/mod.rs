pub mod http;

pub use http::{HttpOriginFetcher, DEFAULT_CONTENT_TYPE, UNREACHABLE_STATUS};
