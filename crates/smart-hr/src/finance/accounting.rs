//! Double-entry journal vouchers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    pub account_code: String,
    #[serde(default)]
    pub debit: u64,
    #[serde(default)]
    pub credit: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl JournalLine {
    pub fn debit(account_code: impl Into<String>, amount: u64) -> Self {
        Self {
            account_code: account_code.into(),
            debit: amount,
            credit: 0,
            cost_center: None,
            note: None,
        }
    }

    pub fn credit(account_code: impl Into<String>, amount: u64) -> Self {
        Self {
            account_code: account_code.into(),
            debit: 0,
            credit: amount,
            cost_center: None,
            note: None,
        }
    }

    pub fn with_cost_center(mut self, cost_center: impl Into<String>) -> Self {
        self.cost_center = Some(cost_center.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalStatus {
    #[default]
    Draft,
    Posted,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub serial: String,
    pub description: String,
    pub lines: Vec<JournalLine>,
    #[serde(default)]
    pub status: JournalStatus,
}

/// Debit/credit totals of a voucher as shown under the entry grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JournalTotals {
    pub debit: u64,
    pub credit: u64,
    pub difference: i128,
    pub balanced: bool,
}

impl JournalEntry {
    pub fn new(serial: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            serial: serial.into(),
            description: description.into(),
            lines: Vec::new(),
            status: JournalStatus::Draft,
        }
    }

    pub fn with_line(mut self, line: JournalLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Column totals; fails when either column does not fit in a `u64`.
    pub fn totals(&self) -> Result<JournalTotals, JournalError> {
        let column = |amount: fn(&JournalLine) -> u64| {
            self.lines
                .iter()
                .try_fold(0u64, |total, line| total.checked_add(amount(line)))
                .ok_or_else(|| JournalError::Overflow {
                    serial: self.serial.clone(),
                })
        };
        let debit = column(|line| line.debit)?;
        let credit = column(|line| line.credit)?;
        Ok(JournalTotals {
            debit,
            credit,
            difference: i128::from(debit) - i128::from(credit),
            balanced: debit == credit && debit > 0,
        })
    }

    /// Debits equal credits and the voucher moves some money.
    pub fn is_balanced(&self) -> bool {
        self.totals().is_ok_and(|totals| totals.balanced)
    }

    pub fn validate(&self) -> Result<JournalTotals, JournalError> {
        if let Some(line) = self
            .lines
            .iter()
            .find(|line| line.debit > 0 && line.credit > 0)
        {
            return Err(JournalError::MixedLine {
                account_code: line.account_code.clone(),
            });
        }

        let totals = self.totals()?;
        if !totals.balanced {
            return Err(JournalError::Unbalanced {
                debit: totals.debit,
                credit: totals.credit,
            });
        }
        Ok(totals)
    }

    pub fn post(&mut self) -> Result<JournalTotals, JournalError> {
        if self.status != JournalStatus::Draft {
            return Err(JournalError::NotDraft(self.status));
        }
        let totals = self.validate()?;
        self.status = JournalStatus::Posted;
        Ok(totals)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JournalError {
    #[error("voucher is unbalanced: debit {debit}, credit {credit}")]
    Unbalanced { debit: u64, credit: u64 },
    #[error("line for account {account_code} carries both a debit and a credit")]
    MixedLine { account_code: String },
    #[error("only draft vouchers can be posted (status: {0:?})")]
    NotDraft(JournalStatus),
    #[error("voucher {serial} totals exceed the supported amount range")]
    Overflow { serial: String },
}
