use super::domain::{LoanApplicationId, LoanApplicationRecord, LoanApplicationStatus};

/// Storage abstraction so the desk service can be exercised in isolation.
pub trait LoanApplicationRepository: Send + Sync {
    fn insert(&self, record: LoanApplicationRecord)
        -> Result<LoanApplicationRecord, RepositoryError>;
    /// Replace the stored record only while its status is still `expected`.
    ///
    /// The check and the write must happen under one lock or transaction so
    /// that two concurrent decisions cannot both succeed.
    fn update(
        &self,
        record: LoanApplicationRecord,
        expected: LoanApplicationStatus,
    ) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &LoanApplicationId)
        -> Result<Option<LoanApplicationRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<LoanApplicationRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("record is now {}", .0.label())]
    StatusChanged(LoanApplicationStatus),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
