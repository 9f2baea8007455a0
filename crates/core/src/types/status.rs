//! Order status.
//!
//! The status is a free-form label chosen by the client application. Four
//! values carry meaning for the dashboard; anything else is stored and
//! returned untouched but counts as neither active nor closed.

use serde::{Deserialize, Serialize};

/// Status label of an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderStatus(String);

impl OrderStatus {
    /// Freshly taken order.
    pub const NEW: &'static str = "New";
    /// Order being prepared.
    pub const IN_PROGRESS: &'static str = "In Progress";
    /// Order handed over to the client; counts toward revenue.
    pub const DELIVERED: &'static str = "Delivered";
    /// Order that will not be fulfilled.
    pub const CANCELLED: &'static str = "Cancelled";

    /// Wrap any status label.
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    /// Returns the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `New` or `In Progress`.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.as_str(), Self::NEW | Self::IN_PROGRESS)
    }

    /// `Delivered` or `Cancelled`.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.as_str(), Self::DELIVERED | Self::CANCELLED)
    }

    #[must_use]
    pub fn is_delivered(&self) -> bool {
        self.as_str() == Self::DELIVERED
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::new(Self::NEW)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_new() {
        assert_eq!(OrderStatus::default().as_str(), "New");
    }

    #[test]
    fn test_classification() {
        assert!(OrderStatus::new("New").is_active());
        assert!(OrderStatus::new("In Progress").is_active());
        assert!(!OrderStatus::new("Delivered").is_active());

        assert!(OrderStatus::new("Delivered").is_closed());
        assert!(OrderStatus::new("Cancelled").is_closed());
        assert!(!OrderStatus::new("In Progress").is_closed());
    }

    #[test]
    fn test_unknown_labels_are_kept() {
        let status = OrderStatus::new("Waiting for fondant");
        assert!(!status.is_active());
        assert!(!status.is_closed());
        assert_eq!(
            serde_json::to_string(&status).unwrap(),
            "\"Waiting for fondant\""
        );
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        assert!(!OrderStatus::new("delivered").is_delivered());
    }
}
