// Entity id generation: SHA-256 over a timestamp and a process-local counter,
// truncated to a short lowercase hex string with a kind prefix.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

macro_rules! id_newtype {
    ($(
        $(#[doc = $doc:expr])*
        $name:ident => $prefix:literal
    ),* $(,)?) => {
        $(
            $(#[doc = $doc])*
            #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(pub String);

            impl $name {
                /// Generate a fresh, unique id.
                pub fn generate() -> Self {
                    Self(fresh_id($prefix))
                }

                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<&str> for $name {
                fn from(s: &str) -> Self {
                    Self(s.to_string())
                }
            }
        )*
    };
}

id_newtype! {
    /// Identifier of an uploaded [`Document`](crate::model::Document).
    DocumentId => "doc",
    /// Identifier of a workflow [`Task`](crate::model::Task).
    TaskId => "task",
    /// Identifier of an extracted [`Figure`](crate::model::Figure).
    FigureId => "fig",
}

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Produce a fresh id of the form `<prefix>-<12 hex chars>`.
///
/// The hex portion is the truncated SHA-256 of the current wall-clock
/// nanoseconds plus a monotonically increasing counter, so ids created in the
/// same nanosecond still differ.
pub fn fresh_id(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let count = ID_COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut hasher = Sha256::new();
    hasher.update(prefix.as_bytes());
    hasher.update(nanos.to_le_bytes());
    hasher.update(count.to_le_bytes());
    let digest = hex::encode(hasher.finalize());

    format!("{prefix}-{}", &digest[..12])
}

/// Current wall-clock time as unix seconds.
pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_id_has_prefix_and_length() {
        let id = fresh_id("task");
        assert!(id.starts_with("task-"));
        assert_eq!(id.len(), "task-".len() + 12);
    }

    #[test]
    fn test_fresh_id_is_unique() {
        let a = fresh_id("fig");
        let b = fresh_id("fig");
        assert_ne!(a, b);
    }
}
