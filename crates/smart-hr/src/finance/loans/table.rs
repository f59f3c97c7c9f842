use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Requested principal in whole Iraqi dinars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoanAmount(pub u64);

impl LoanAmount {
    pub const fn dinars(self) -> u64 {
        self.0
    }
}

impl From<u64> for LoanAmount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for LoanAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::locale::format_amount(self.0))
    }
}

const STANDARD_SCHEDULE: [(u64, u64); 14] = [
    (10_000_000, 150_000),
    (15_000_000, 225_000),
    (20_000_000, 300_000),
    (25_000_000, 375_000),
    (30_000_000, 450_000),
    (35_000_000, 525_000),
    (40_000_000, 600_000),
    (45_000_000, 675_000),
    (50_000_000, 750_000),
    (60_000_000, 900_000),
    (70_000_000, 1_050_000),
    (80_000_000, 1_200_000),
    (90_000_000, 1_350_000),
    (100_000_000, 1_500_000),
];

/// One selectable principal and its fixed monthly installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentEntry {
    pub amount: LoanAmount,
    pub installment: u64,
}

/// Immutable principal -> monthly installment schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallmentTable {
    entries: BTreeMap<LoanAmount, u64>,
}

impl InstallmentTable {
    /// The published advance schedule, 10M through 100M dinars.
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_SCHEDULE
                .iter()
                .map(|&(amount, installment)| (LoanAmount(amount), installment))
                .collect(),
        }
    }

    pub fn new<I>(entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = InstallmentEntry>,
    {
        let mut map = BTreeMap::new();
        for entry in entries {
            if entry.installment == 0 {
                return Err(TableError::ZeroInstallment(entry.amount));
            }
            if map.insert(entry.amount, entry.installment).is_some() {
                return Err(TableError::DuplicateAmount(entry.amount));
            }
        }
        if map.is_empty() {
            return Err(TableError::Empty);
        }
        Ok(Self { entries: map })
    }

    /// Tabled installment, or 0 when `amount` is not a key of the schedule.
    ///
    /// A zero installment always clears the salary deduction check; callers
    /// that need to tell "not tabled" apart should use [`Self::lookup`].
    pub fn installment(&self, amount: LoanAmount) -> u64 {
        self.lookup(amount).unwrap_or(0)
    }

    pub fn lookup(&self, amount: LoanAmount) -> Option<u64> {
        self.entries.get(&amount).copied()
    }

    pub fn contains(&self, amount: LoanAmount) -> bool {
        self.entries.contains_key(&amount)
    }

    /// Selectable principals in ascending order.
    pub fn amounts(&self) -> impl Iterator<Item = LoanAmount> + '_ {
        self.entries.keys().copied()
    }

    pub fn entries(&self) -> Vec<InstallmentEntry> {
        self.entries
            .iter()
            .map(|(&amount, &installment)| InstallmentEntry {
                amount,
                installment,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InstallmentTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("installment schedule has no entries")]
    Empty,
    #[error("principal {0} appears more than once")]
    DuplicateAmount(LoanAmount),
    #[error("principal {0} has a zero installment")]
    ZeroInstallment(LoanAmount),
}
