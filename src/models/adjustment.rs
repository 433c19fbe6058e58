//! Ad-hoc pay adjustments supplied per calculation.
//!
//! Additions raise gross pay and count as additional wages for
//! contribution purposes. Deductions reduce net pay only.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of an [`Addition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdditionKind {
    /// A one-off or recurring allowance (transport, meal, ...).
    Allowance,
    /// A bonus payment.
    Bonus,
    /// Anything else; counted in the total but not broken out.
    Other,
}

/// A payment added on top of basic salary for one pay period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Addition, AdditionKind};
/// use rust_decimal::Decimal;
///
/// let transport = Addition::new(AdditionKind::Allowance, Decimal::new(500, 0))
///     .with_description("Transport");
/// assert_eq!(transport.description.as_deref(), Some("Transport"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addition {
    /// The kind of addition.
    #[serde(rename = "type")]
    pub kind: AdditionKind,
    /// The amount added (expected to be non-negative).
    pub amount: Decimal,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Addition {
    /// Creates an addition without a description.
    pub fn new(kind: AdditionKind, amount: Decimal) -> Self {
        Self {
            kind,
            amount,
            description: None,
        }
    }

    /// Attaches a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An amount withheld from pay for one pay period, other than the
/// employee's statutory contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    /// Free-form label (e.g., "loan", "insurance").
    #[serde(rename = "type")]
    pub kind: String,
    /// The amount deducted (expected to be non-negative).
    pub amount: Decimal,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Deduction {
    /// Creates a deduction without a description.
    pub fn new(kind: impl Into<String>, amount: Decimal) -> Self {
        Self {
            kind: kind.into(),
            amount,
            description: None,
        }
    }

    /// Attaches a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_addition_uses_type_key() {
        let json = r#"{"type": "bonus", "amount": "1000", "description": "Performance"}"#;
        let addition: Addition = serde_json::from_str(json).unwrap();
        assert_eq!(addition.kind, AdditionKind::Bonus);
        assert_eq!(addition.amount, Decimal::new(1000, 0));
        assert_eq!(addition.description.as_deref(), Some("Performance"));
    }

    #[test]
    fn test_deserialize_deduction_without_description() {
        let json = r#"{"type": "loan", "amount": "200"}"#;
        let deduction: Deduction = serde_json::from_str(json).unwrap();
        assert_eq!(deduction.kind, "loan");
        assert_eq!(deduction.amount, Decimal::new(200, 0));
        assert!(deduction.description.is_none());
    }

    #[test]
    fn test_missing_description_is_not_serialized() {
        let deduction = Deduction::new("insurance", Decimal::new(100, 0));
        let json = serde_json::to_string(&deduction).unwrap();
        assert!(!json.contains("description"));
    }

    #[test]
    fn test_unknown_addition_kind_is_rejected() {
        let json = r#"{"type": "commission", "amount": "10"}"#;
        assert!(serde_json::from_str::<Addition>(json).is_err());
    }
}
