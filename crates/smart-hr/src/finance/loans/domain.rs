use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::ApplicantCategory;
use super::table::LoanAmount;

/// Identifier wrapper for submitted advance applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoanApplicationId(pub String);

/// What an employee fills in on the advance form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanApplicationRequest {
    pub applicant_name: String,
    pub employee_id: String,
    pub amount: LoanAmount,
    pub salary: u64,
    pub category: ApplicantCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanApplicationStatus {
    Submitted,
    Approved,
    Rejected,
}

impl LoanApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            LoanApplicationStatus::Submitted => "submitted",
            LoanApplicationStatus::Approved => "approved",
            LoanApplicationStatus::Rejected => "rejected",
        }
    }
}

/// Stored application. Only requests that passed eligibility get one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanApplicationRecord {
    pub id: LoanApplicationId,
    pub request: LoanApplicationRequest,
    pub installment: u64,
    pub status: LoanApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl LoanApplicationRecord {
    pub fn status_view(&self) -> LoanApplicationView {
        LoanApplicationView {
            id: self.id.clone(),
            employee_id: self.request.employee_id.clone(),
            amount: self.request.amount,
            installment: self.installment,
            category: self.request.category,
            status: self.status.label(),
            submitted_at: self.submitted_at,
        }
    }
}

/// Public projection of an application; salary and name stay internal.
#[derive(Debug, Clone, Serialize)]
pub struct LoanApplicationView {
    pub id: LoanApplicationId,
    pub employee_id: String,
    pub amount: LoanAmount,
    pub installment: u64,
    pub category: ApplicantCategory,
    pub status: &'static str,
    pub submitted_at: DateTime<Utc>,
}
