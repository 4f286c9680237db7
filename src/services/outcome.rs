use std::fmt::Display;

/// Result of an upstream call on a path that has a fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamOutcome<T> {
    Success(T),
    /// The upstream could not deliver a usable payload.
    Unavailable(String),
}

impl<T> UpstreamOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, UpstreamOutcome::Success(_))
    }

    /// Always yields a payload: the upstream one, or the fallback's.
    pub fn resolve(self, path: &'static str, fallback: impl FnOnce() -> T) -> T {
        match self {
            UpstreamOutcome::Success(payload) => payload,
            UpstreamOutcome::Unavailable(reason) => {
                tracing::warn!(path, %reason, "Upstream unavailable, substituting generated data");
                fallback()
            }
        }
    }
}

impl<T, E: Display> From<Result<T, E>> for UpstreamOutcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(payload) => UpstreamOutcome::Success(payload),
            Err(e) => UpstreamOutcome::Unavailable(e.to_string()),
        }
    }
}
