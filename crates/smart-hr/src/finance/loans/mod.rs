//! Salary advance programme: the installment schedule, the eligibility
//! evaluator and the desk that accepts applications which pass it.

mod category;
pub mod domain;
mod eligibility;
pub mod repository;
pub mod router;
pub mod service;
mod table;

#[cfg(test)]
mod tests;

pub use category::{ApplicantCategory, UnknownCategory};
pub use domain::{
    LoanApplicationId, LoanApplicationRecord, LoanApplicationRequest, LoanApplicationStatus,
    LoanApplicationView,
};
pub use eligibility::{EligibilityDecision, EligibilityEvaluator, EligibilityResult, LoanPolicy};
pub use repository::{LoanApplicationRepository, RepositoryError};
pub use router::loan_router;
pub use service::{LoanApplicationService, LoanServiceError};
pub use table::{InstallmentEntry, InstallmentTable, LoanAmount, TableError};
