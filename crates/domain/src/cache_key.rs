use crate::DomainError;
use std::fmt;
use std::sync::Arc;

/// Opaque identifier of a fetchable resource.
///
/// Built from a router-supplied relative path with leading and trailing `/`
/// stripped. Everything else is kept byte-for-byte, so two keys that differ
/// only in percent-encoding are distinct. `Arc<str>` keeps clones cheap across
/// coordinator → store → fetch task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(Arc<str>);

impl CacheKey {
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim_matches('/');
        if trimmed.is_empty() {
            return Err(DomainError::MalformedKey(format!(
                "'{raw}' is empty after normalization"
            )));
        }
        Ok(Self(Arc::from(trimmed)))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for CacheKey {
    type Error = DomainError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}
