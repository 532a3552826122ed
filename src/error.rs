use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading a scenario or advancing a simulation.
///
/// The simulation is deterministic, so none of these are retried: the same
/// input reproduces the same failure.
#[derive(Debug, Error)]
pub enum Error {
    /// Unparsable or wrong-arity line in a plain-text scenario.
    #[error("malformed config at line {line}: {reason}")]
    MalformedConfig { line: usize, reason: String },

    /// Two bodies share a position, so the inverse-square law is undefined.
    #[error("degenerate geometry: bodies {a} and {b} are coincident")]
    DegenerateGeometry { a: usize, b: usize },

    /// Body index outside the body list, or a probe that is its own target.
    #[error("{role} index {index} {reason}")]
    InvalidIndex {
        role: &'static str,
        index: usize,
        reason: String,
    },

    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// An evaluation produced NaN or infinity.
    #[error("non-finite {quantity} produced")]
    NonFinite { quantity: &'static str },

    /// Propagated I/O errors from scenario or log files.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn out_of_range(role: &'static str, index: usize, len: usize) -> Self {
        Error::InvalidIndex {
            role,
            index,
            reason: format!("out of range for {len} bodies"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::MalformedConfig {
            line: 3,
            reason: "expected 8 fields, found 7".to_string(),
        };
        let msg = format!("{e}");
        assert!(msg.contains("line 3"));
        assert!(msg.contains("8 fields"));
    }

    #[test]
    fn index_error_names_role() {
        let e = Error::out_of_range("probe", 9, 4);
        assert_eq!(e.to_string(), "probe index 9 out of range for 4 bodies");
    }
}
