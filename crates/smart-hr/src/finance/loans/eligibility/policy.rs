use serde::{Deserialize, Serialize};

/// Deduction ceiling applied to every advance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanPolicy {
    /// Share of the monthly salary, in percent, that an installment may take.
    pub max_deduction_pct: u8,
}

impl LoanPolicy {
    /// Largest monthly deduction for `salary`, rounded down to whole dinars.
    pub fn max_deduction(&self, salary: u64) -> u64 {
        (u128::from(salary) * u128::from(self.max_deduction_pct) / 100) as u64
    }

    /// Exact comparison of `installment` against the salary share, no rounding.
    pub(crate) fn exceeds(&self, installment: u64, salary: u64) -> bool {
        u128::from(installment) * 100 > u128::from(salary) * u128::from(self.max_deduction_pct)
    }
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self {
            max_deduction_pct: 50,
        }
    }
}
