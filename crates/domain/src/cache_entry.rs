use bytes::Bytes;
use std::sync::Arc;

/// HTTP status stored with every successful entry.
pub const STATUS_OK: u16 = 200;

/// Immutable outcome of one origin fetch.
///
/// A key maps either to a fully formed entry or to nothing; entries are never
/// mutated once stored, only replaced. `Bytes` and `Arc<str>` make clones
/// share the same buffers, so every waiter of a fetch sees the identical body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEntry {
    /// Origin answered 200 and the body was drained completely.
    Success {
        content_type: Arc<str>,
        body: Bytes,
    },

    /// Any other outcome, including synthetic statuses for transport errors.
    Failure { status: u16 },
}

impl CacheEntry {
    pub fn success(content_type: impl Into<Arc<str>>, body: impl Into<Bytes>) -> Self {
        Self::Success {
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    pub fn failure(status: u16) -> Self {
        Self::Failure { status }
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::Success { .. } => STATUS_OK,
            Self::Failure { status } => *status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Negative entries are memoized exactly like successes.
    pub fn is_negative(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    pub fn body_len(&self) -> usize {
        match self {
            Self::Success { body, .. } => body.len(),
            Self::Failure { .. } => 0,
        }
    }
}
