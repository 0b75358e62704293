//! Confirmation messages for operations without a richer result.

use std::fmt;

/// Outcome line such as `Success: Task 2 marked as completed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "{prefix} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Task 2 marked as completed");
        assert_eq!(success.to_string(), "Success: Task 2 marked as completed\n");

        let failure = OperationStatus::failure(String::from("Deletion not confirmed"));
        assert!(failure.to_string().starts_with("Error:"));
    }
}
