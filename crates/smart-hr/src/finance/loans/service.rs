use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{
    LoanApplicationId, LoanApplicationRecord, LoanApplicationRequest, LoanApplicationStatus,
};
use super::eligibility::{EligibilityEvaluator, EligibilityResult};
use super::repository::{LoanApplicationRepository, RepositoryError};
use super::table::LoanAmount;

/// Loan desk composing the eligibility evaluator with application storage.
pub struct LoanApplicationService<R> {
    evaluator: Arc<EligibilityEvaluator>,
    repository: Arc<R>,
    sequence: AtomicU64,
}

impl<R> LoanApplicationService<R>
where
    R: LoanApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>, evaluator: EligibilityEvaluator) -> Self {
        Self {
            evaluator: Arc::new(evaluator),
            repository,
            sequence: AtomicU64::new(1),
        }
    }

    pub fn evaluator(&self) -> &EligibilityEvaluator {
        &self.evaluator
    }

    fn next_id(&self) -> LoanApplicationId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        LoanApplicationId(format!("loan-{id:06}"))
    }

    /// Re-run eligibility and store the application only when it passes.
    /// Amounts missing from the schedule are refused before evaluation.
    pub fn submit(
        &self,
        request: LoanApplicationRequest,
    ) -> Result<LoanApplicationRecord, LoanServiceError> {
        if !self.evaluator.table().contains(request.amount) {
            debug!(
                employee_id = %request.employee_id,
                amount = request.amount.dinars(),
                "advance request for an amount off the schedule"
            );
            return Err(LoanServiceError::UnknownAmount(request.amount));
        }

        let result = self
            .evaluator
            .evaluate(request.amount, request.salary, request.category);

        if !result.is_eligible {
            debug!(
                employee_id = %request.employee_id,
                amount = request.amount.dinars(),
                "advance request refused at intake"
            );
            return Err(LoanServiceError::NotEligible(result));
        }

        let record = LoanApplicationRecord {
            id: self.next_id(),
            request,
            installment: result.installment,
            status: LoanApplicationStatus::Submitted,
            submitted_at: Utc::now(),
            decided_at: None,
        };

        let stored = self.repository.insert(record)?;
        info!(
            application_id = %stored.id.0,
            installment = stored.installment,
            "advance application submitted"
        );
        Ok(stored)
    }

    pub fn get(&self, id: &LoanApplicationId) -> Result<LoanApplicationRecord, LoanServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Approve or reject a submitted application. Decided applications are final.
    pub fn decide(
        &self,
        id: &LoanApplicationId,
        approve: bool,
    ) -> Result<LoanApplicationRecord, LoanServiceError> {
        let mut record = self.get(id)?;

        if record.status != LoanApplicationStatus::Submitted {
            return Err(LoanServiceError::InvalidTransition {
                from: record.status,
            });
        }

        record.status = if approve {
            LoanApplicationStatus::Approved
        } else {
            LoanApplicationStatus::Rejected
        };
        record.decided_at = Some(Utc::now());

        match self
            .repository
            .update(record.clone(), LoanApplicationStatus::Submitted)
        {
            Ok(()) => {}
            Err(RepositoryError::StatusChanged(current)) => {
                return Err(LoanServiceError::InvalidTransition { from: current });
            }
            Err(err) => return Err(err.into()),
        }
        info!(
            application_id = %record.id.0,
            status = record.status.label(),
            "advance application decided"
        );
        Ok(record)
    }

    pub fn list(&self) -> Result<Vec<LoanApplicationRecord>, LoanServiceError> {
        let mut records = self.repository.list()?;
        records.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(records)
    }
}

/// Error raised by the loan desk.
#[derive(Debug, thiserror::Error)]
pub enum LoanServiceError {
    #[error("{}", .0.message)]
    NotEligible(EligibilityResult),
    #[error("amount {0} is not on the installment schedule")]
    UnknownAmount(LoanAmount),
    #[error("application already {} and cannot be decided again", .from.label())]
    InvalidTransition { from: LoanApplicationStatus },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
