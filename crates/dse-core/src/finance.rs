//! Finance records: a ledger of income and expenses, newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_USER_ID, Error, Id, Result, error::require_text};

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinanceKind {
  Income,
  Expense,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceRecord {
  pub id:               Id,
  pub user_id:          Id,
  pub description:      String,
  pub amount:           f64,
  #[serde(rename = "type")]
  pub kind:             FinanceKind,
  pub category:         String,
  pub transaction_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewFinanceRecord {
  pub user_id:     Id,
  pub description: String,
  pub amount:      f64,
  pub kind:        FinanceKind,
  pub category:    String,
}

impl NewFinanceRecord {
  pub fn new(
    description: impl Into<String>,
    amount: f64,
    kind: FinanceKind,
    category: impl Into<String>,
  ) -> Self {
    Self {
      user_id: DEFAULT_USER_ID,
      description: description.into(),
      amount,
      kind,
      category: category.into(),
    }
  }

  pub fn validate(&self) -> Result<()> {
    require_text("description", &self.description)?;
    require_text("category", &self.category)?;
    if !self.amount.is_finite() {
      return Err(Error::NonFiniteAmount);
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kind_uses_lowercase_names() {
    assert_eq!(serde_json::to_string(&FinanceKind::Expense).unwrap(), "\"expense\"");
    let kind: FinanceKind = serde_json::from_str("\"income\"").unwrap();
    assert_eq!(kind, FinanceKind::Income);
    assert!(serde_json::from_str::<FinanceKind>("\"refund\"").is_err());
  }

  #[test]
  fn non_finite_amount_fails_validation() {
    let r = NewFinanceRecord::new("Lunch", f64::NAN, FinanceKind::Expense, "food");
    assert_eq!(r.validate(), Err(Error::NonFiniteAmount));
  }

  #[test]
  fn blank_category_fails_validation() {
    let r = NewFinanceRecord::new("Lunch", 12.5, FinanceKind::Expense, "");
    assert_eq!(r.validate(), Err(Error::Blank("category")));
  }
}
