use thiserror::Error;

/// Failures surfaced by the solving engine.
///
/// Resolver timeouts are not represented here; they are a
/// [`crate::search::Phase`] that triggers blueprint fallback.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid bucket counts, empty action sets, zero workers.
    /// Reported before any work starts.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A checkpoint or blueprint was produced against a different abstraction.
    #[error("abstraction mismatch: expected {expected:#018x}, found {found:#018x}")]
    AbstractionMismatch { expected: u64, found: u64 },

    /// A worker crashed mid-batch. Its partial delta is discarded.
    #[error("worker {worker} failed: {reason}")]
    WorkerFailure { worker: usize, reason: String },

    /// Malformed or truncated artifact.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Subgame construction failed.
    #[error("subgame build error: {0}")]
    Build(String),

    /// Leaf evaluation unavailable or failed.
    #[error("leaf evaluator error: {0}")]
    Evaluator(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_displays_both_hashes() {
        let err = Error::AbstractionMismatch {
            expected: 0xDEAD_BEEF,
            found: 0xCAFE,
        };
        let msg = err.to_string();
        assert!(msg.contains("deadbeef"), "{msg}");
        assert!(msg.contains("cafe"), "{msg}");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        match Error::from(io) {
            Error::Io(e) => assert!(e.to_string().contains("missing")),
            e => panic!("unexpected {e:?}"),
        }
    }
}
