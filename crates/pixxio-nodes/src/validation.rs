//! Input validation shared by the nodes
//!
//! All checks here run before any conversion or network work.

use pixxio_core::{NodeError, NodeResult};

/// Fail with `message` if any of the given values is empty.
///
/// # Example
/// ```
/// # use pixxio_nodes::validation::require_present;
/// assert!(require_present(&["key", "host"], "both are required").is_ok());
/// assert!(require_present(&["key", ""], "both are required").is_err());
/// ```
pub fn require_present(values: &[&str], message: &str) -> NodeResult<()> {
    if values.iter().any(|value| value.is_empty()) {
        tracing::debug!(reason = message, "Rejected node inputs");
        return Err(NodeError::argument(message));
    }
    Ok(())
}

/// Fail unless `value` is strictly positive.
pub fn require_positive(name: &str, value: i64) -> NodeResult<()> {
    if value <= 0 {
        return Err(NodeError::argument(format!(
            "{} must be a positive integer",
            name
        )));
    }
    Ok(())
}
