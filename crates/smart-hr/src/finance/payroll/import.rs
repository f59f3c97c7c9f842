use super::{Allowances, ManualDeductions, PayrollLine, PayrollRecord, PayrollStatus};
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reads a payroll master sheet exported as CSV.
pub struct PayrollImporter;

impl PayrollImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<PayrollRecord>, PayrollImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<PayrollRecord>, PayrollImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for (index, row) in csv_reader.deserialize::<PayrollRow>().enumerate() {
            let row = row?;
            if !(1..=10).contains(&row.grade) {
                return Err(PayrollImportError::InvalidGrade {
                    // header occupies line 1
                    line: index + 2,
                    grade: row.grade,
                });
            }
            records.push(PayrollRecord::compute(row.into_line())?);
        }

        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
struct PayrollRow {
    employee_id: String,
    employee_name: String,
    #[serde(default)]
    financial_number: String,
    month: String,
    grade: u8,
    #[serde(default)]
    step: u8,
    nominal_salary: u64,
    #[serde(default, deserialize_with = "blank_as_zero")]
    allowance_certificate: u64,
    #[serde(default, deserialize_with = "blank_as_zero")]
    allowance_family: u64,
    #[serde(default, deserialize_with = "blank_as_zero")]
    allowance_risk: u64,
    #[serde(default, deserialize_with = "blank_as_zero")]
    allowance_position: u64,
    #[serde(default, deserialize_with = "blank_as_zero")]
    allowance_transport: u64,
    #[serde(default, deserialize_with = "blank_as_zero")]
    allowance_other: u64,
    #[serde(default, deserialize_with = "blank_as_zero")]
    deduction_tax: u64,
    #[serde(default, deserialize_with = "blank_as_zero")]
    deduction_absence: u64,
    #[serde(default, deserialize_with = "blank_as_zero")]
    deduction_loan: u64,
    #[serde(default = "default_true")]
    retirement: bool,
    #[serde(default)]
    status: PayrollStatus,
}

impl PayrollRow {
    fn into_line(self) -> PayrollLine {
        PayrollLine {
            employee_id: self.employee_id,
            employee_name: self.employee_name,
            financial_number: self.financial_number,
            month: self.month,
            grade: self.grade,
            step: self.step,
            nominal_salary: self.nominal_salary,
            allowances: Allowances {
                certificate: self.allowance_certificate,
                family: self.allowance_family,
                risk: self.allowance_risk,
                position: self.allowance_position,
                transport: self.allowance_transport,
                other: self.allowance_other,
            },
            deductions: ManualDeductions {
                tax: self.deduction_tax,
                absence: self.deduction_absence,
                loan: self.deduction_loan,
            },
            retirement_contributor: self.retirement,
            status: self.status,
        }
    }
}

fn default_true() -> bool {
    true
}

fn blank_as_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(0),
        Some(value) => value.replace(',', "").parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug)]
pub enum PayrollImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidGrade { line: usize, grade: u8 },
    AmountOverflow { employee_id: String },
    SheetTotalOverflow,
}

impl std::fmt::Display for PayrollImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayrollImportError::Io(err) => write!(f, "failed to read payroll sheet: {}", err),
            PayrollImportError::Csv(err) => write!(f, "invalid payroll CSV data: {}", err),
            PayrollImportError::InvalidGrade { line, grade } => write!(
                f,
                "line {}: job grade {} is outside the 1-10 salary scale",
                line, grade
            ),
            PayrollImportError::AmountOverflow { employee_id } => write!(
                f,
                "payroll figures for employee {} are too large to total",
                employee_id
            ),
            PayrollImportError::SheetTotalOverflow => {
                write!(f, "payroll sheet totals exceed the supported range")
            }
        }
    }
}

impl std::error::Error for PayrollImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PayrollImportError::Io(err) => Some(err),
            PayrollImportError::Csv(err) => Some(err),
            PayrollImportError::InvalidGrade { .. }
            | PayrollImportError::AmountOverflow { .. }
            | PayrollImportError::SheetTotalOverflow => None,
        }
    }
}

impl From<std::io::Error> for PayrollImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for PayrollImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}
