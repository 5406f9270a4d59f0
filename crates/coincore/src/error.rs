use thiserror::Error;

/// Errors raised while a handler runs.
///
/// None of these ever reach the transport: [`crate::Engine::handle`] turns
/// each one into a user-visible reply through [`CoreError::user_message`].
///
/// # Example
///
/// ```
/// use coincore::CoreError;
///
/// let err = CoreError::NotFound(42);
/// assert_eq!(err.kind(), "not_found");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Malformed command arguments; carries the usage line shown to the user
    #[error("Validation error: {0}")]
    Validation(String),

    /// A non-admin invoked an admin-only handler
    #[error("Unauthorized: admin privileges required")]
    Unauthorized,

    /// Lookup of a user that has never been seen
    #[error("Account {0} not found")]
    NotFound(i64),
}

/// Type alias for Result with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Reply text for unauthorized admin access.
pub const ACCESS_DENIED: &str = "⛔ Access denied. This command is for admins only.";

impl CoreError {
    /// Short label used for logs and the failure counter.
    pub fn kind(&self) -> &'static str {
        match self {
            CoreError::Validation(_) => "validation",
            CoreError::Unauthorized => "unauthorized",
            CoreError::NotFound(_) => "not_found",
        }
    }

    /// Text sent back to the user instead of a handler's normal reply.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Validation(usage) => usage.clone(),
            CoreError::Unauthorized => ACCESS_DENIED.to_string(),
            CoreError::NotFound(user_id) => format!("❓ Account {} not found.", user_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_the_usage_line() {
        let err = CoreError::Validation("Usage: /give <user_id> <amount>".to_string());
        assert_eq!(err.user_message(), "Usage: /give <user_id> <amount>");
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn test_not_found_mentions_the_id() {
        assert!(CoreError::NotFound(777).user_message().contains("777"));
    }
}
