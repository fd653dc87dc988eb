//! Load-with-fallback contract shared by every module.
//!
//! A module asks the backend first. If the envelope fails, the dataset's
//! [`Fallback::placeholder`] is substituted so rendering never depends on
//! where the data came from. A dataset without a placeholder turns the
//! failure into [`ModuleError::Unavailable`], which the page shows as an
//! error state with a retry action.

use std::future::Future;

use crate::core::error::ModuleError;
use crate::core::gateway::Envelope;
use crate::core::navigation::PageKey;

/// Where a loaded dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Remote,
    Placeholder,
}

impl DataSource {
    pub fn is_placeholder(self) -> bool {
        matches!(self, Self::Placeholder)
    }

    /// Placeholder if either side is.
    pub fn combine(self, other: Self) -> Self {
        if self.is_placeholder() || other.is_placeholder() {
            Self::Placeholder
        } else {
            Self::Remote
        }
    }
}

/// Deterministic stand-in data used when the backend cannot be reached.
pub trait Fallback: Sized {
    fn placeholder() -> Option<Self>;
}

/// A dataset plus its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub data: T,
    pub source: DataSource,
}

impl<T> Loaded<T> {
    pub fn remote(data: T) -> Self {
        Self {
            data,
            source: DataSource::Remote,
        }
    }

    pub fn placeholder(data: T) -> Self {
        Self {
            data,
            source: DataSource::Placeholder,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loaded<U> {
        Loaded {
            data: f(self.data),
            source: self.source,
        }
    }
}

/// Resolve an envelope into data, substituting the placeholder on failure.
pub fn resolve<T: Fallback>(page: PageKey, envelope: Envelope<T>) -> Result<Loaded<T>, ModuleError> {
    match envelope.into_result() {
        Ok(data) => Ok(Loaded::remote(data)),
        Err(reason) => match T::placeholder() {
            Some(data) => {
                tracing::info!(page = page.key(), %reason, "using placeholder data");
                Ok(Loaded::placeholder(data))
            }
            None => {
                tracing::warn!(page = page.key(), %reason, "load failed with no placeholder");
                Err(ModuleError::Unavailable {
                    page: page.key(),
                    reason,
                })
            }
        },
    }
}

/// Await `request` and resolve it with [`resolve`].
pub async fn load_with_fallback<T, F>(page: PageKey, request: F) -> Result<Loaded<T>, ModuleError>
where
    T: Fallback,
    F: Future<Output = Envelope<T>>,
{
    resolve(page, request.await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Counts(Vec<u32>);

    impl Fallback for Counts {
        fn placeholder() -> Option<Self> {
            Some(Counts(vec![1, 2, 3]))
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Report(String);

    impl Fallback for Report {
        fn placeholder() -> Option<Self> {
            None
        }
    }

    #[tokio::test]
    async fn test_remote_data_kept() {
        let loaded = load_with_fallback(PageKey::Users, async { Envelope::ok(Counts(vec![9])) })
            .await
            .unwrap();
        assert_eq!(loaded, Loaded::remote(Counts(vec![9])));
    }

    #[tokio::test]
    async fn test_failure_uses_placeholder_exactly() {
        let loaded = load_with_fallback(PageKey::Users, async {
            Envelope::<Counts>::failure("HTTP 500")
        })
        .await
        .unwrap();
        assert_eq!(loaded.source, DataSource::Placeholder);
        assert_eq!(Some(loaded.data), Counts::placeholder());
    }

    #[tokio::test]
    async fn test_failure_without_placeholder_is_unavailable() {
        let err = load_with_fallback(PageKey::Analytics, async {
            Envelope::<Report>::failure("Request timed out")
        })
        .await
        .unwrap_err();
        assert_eq!(
            err,
            ModuleError::Unavailable {
                page: "analytics",
                reason: "Request timed out".into()
            }
        );
    }

    #[test]
    fn test_source_combine() {
        use DataSource::*;
        assert_eq!(Remote.combine(Remote), Remote);
        assert_eq!(Remote.combine(Placeholder), Placeholder);
        assert_eq!(Placeholder.combine(Remote), Placeholder);
    }

    #[test]
    fn test_loaded_map_keeps_source() {
        let loaded = Loaded::placeholder(2).map(|n| n * 10);
        assert_eq!(loaded, Loaded::placeholder(20));
    }
}
