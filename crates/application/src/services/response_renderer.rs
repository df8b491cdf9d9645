use bytes::Bytes;
use ferrous_cdn_domain::cache_entry::STATUS_OK;
use ferrous_cdn_domain::CacheEntry;
use std::sync::Arc;

/// What the HTTP glue writes back for a resolved entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResponse {
    pub status: u16,
    pub content_type: Option<Arc<str>>,
    pub body: Bytes,
}

impl RenderedResponse {
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Turns stored entries into responses.
///
/// A cached failure renders as an empty 200 without a content type: the
/// origin status is deliberately not passed through to the client.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseRenderer;

impl ResponseRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, entry: &CacheEntry) -> RenderedResponse {
        match entry {
            CacheEntry::Success { content_type, body } => RenderedResponse {
                status: STATUS_OK,
                content_type: Some(Arc::clone(content_type)),
                body: body.clone(),
            },
            CacheEntry::Failure { .. } => RenderedResponse {
                status: STATUS_OK,
                content_type: None,
                body: Bytes::new(),
            },
        }
    }
}
