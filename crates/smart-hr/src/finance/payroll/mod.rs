//! Monthly payroll sheet: earnings, statutory deductions and sheet totals.

mod import;

pub use import::{PayrollImportError, PayrollImporter};

use serde::{Deserialize, Serialize};

/// Retirement contribution withheld from the nominal salary, in percent.
pub const RETIREMENT_CONTRIBUTION_PCT: u64 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowances {
    pub certificate: u64,
    pub family: u64,
    pub risk: u64,
    pub position: u64,
    pub transport: u64,
    pub other: u64,
}

impl Allowances {
    /// Sum of all allowances, `None` when it does not fit in a `u64`.
    pub fn total(&self) -> Option<u64> {
        [
            self.family,
            self.risk,
            self.position,
            self.transport,
            self.other,
        ]
        .into_iter()
        .try_fold(self.certificate, u64::checked_add)
    }
}

/// Deductions entered by hand; the retirement share is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualDeductions {
    pub tax: u64,
    pub absence: u64,
    pub loan: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    #[default]
    Draft,
    Approved,
    Paid,
}

/// One employee's input row for a payroll month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollLine {
    pub employee_id: String,
    pub employee_name: String,
    pub financial_number: String,
    /// `YYYY-MM`.
    pub month: String,
    pub grade: u8,
    pub step: u8,
    pub nominal_salary: u64,
    pub allowances: Allowances,
    pub deductions: ManualDeductions,
    /// Contract-315 and daily-wage staff do not pay into the pension fund.
    pub retirement_contributor: bool,
    pub status: PayrollStatus,
}

/// Computed payslip for one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    pub line: PayrollLine,
    pub total_earnings: u64,
    pub deduction_retirement: u64,
    pub total_deductions: u64,
    pub net_salary: u64,
}

impl PayrollRecord {
    /// Fails with [`PayrollImportError::AmountOverflow`] when a line's figures
    /// cannot be totalled in whole dinars.
    pub fn compute(line: PayrollLine) -> Result<Self, PayrollImportError> {
        let overflow = || PayrollImportError::AmountOverflow {
            employee_id: line.employee_id.clone(),
        };

        let total_earnings = line
            .allowances
            .total()
            .and_then(|allowances| allowances.checked_add(line.nominal_salary))
            .ok_or_else(overflow)?;
        let deduction_retirement = if line.retirement_contributor {
            // 10% of a u64 always fits back into a u64
            (u128::from(line.nominal_salary) * u128::from(RETIREMENT_CONTRIBUTION_PCT) / 100)
                as u64
        } else {
            0
        };
        let total_deductions = [
            line.deductions.tax,
            line.deductions.absence,
            line.deductions.loan,
        ]
        .into_iter()
        .try_fold(deduction_retirement, u64::checked_add)
        .ok_or_else(overflow)?;
        let net_salary = total_earnings.saturating_sub(total_deductions);

        Ok(Self {
            line,
            total_earnings,
            deduction_retirement,
            total_deductions,
            net_salary,
        })
    }

    pub fn allowances_total(&self) -> u64 {
        self.total_earnings - self.line.nominal_salary
    }
}

/// Sheet-level totals shown above the payroll grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    pub headcount: usize,
    pub total_nominal: u64,
    pub total_allowances: u64,
    pub total_deductions: u64,
    pub total_net: u64,
}

impl PayrollSummary {
    pub fn from_records(records: &[PayrollRecord]) -> Result<Self, PayrollImportError> {
        records.iter().try_fold(Self::default(), |summary, record| {
            let add = |total: u64, value: u64| {
                total
                    .checked_add(value)
                    .ok_or(PayrollImportError::SheetTotalOverflow)
            };
            Ok(Self {
                headcount: summary.headcount + 1,
                total_nominal: add(summary.total_nominal, record.line.nominal_salary)?,
                total_allowances: add(summary.total_allowances, record.allowances_total())?,
                total_deductions: add(summary.total_deductions, record.total_deductions)?,
                total_net: add(summary.total_net, record.net_salary)?,
            })
        })
    }
}
