pub mod fetch_coordinator;
pub mod response_renderer;

pub use fetch_coordinator::{FetchCoordinator, TIMEOUT_STATUS};
pub use response_renderer::{RenderedResponse, ResponseRenderer};
