use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::finance::loans::domain::{
    LoanApplicationId, LoanApplicationRecord, LoanApplicationRequest, LoanApplicationStatus,
};
use crate::finance::loans::repository::{LoanApplicationRepository, RepositoryError};
use crate::finance::loans::{
    ApplicantCategory, EligibilityEvaluator, InstallmentTable, LoanAmount, LoanApplicationService,
    LoanPolicy,
};
use crate::locale::Locale;

pub(super) fn evaluator() -> EligibilityEvaluator {
    EligibilityEvaluator::new(
        InstallmentTable::standard(),
        LoanPolicy::default(),
        Locale::English,
    )
}

pub(super) fn arabic_evaluator() -> EligibilityEvaluator {
    EligibilityEvaluator::new(
        InstallmentTable::standard(),
        LoanPolicy::default(),
        Locale::Arabic,
    )
}

pub(super) fn request(
    amount: u64,
    salary: u64,
    category: ApplicantCategory,
) -> LoanApplicationRequest {
    LoanApplicationRequest {
        applicant_name: "Ahmed Kadhim Hassan".to_string(),
        employee_id: "10203".to_string(),
        amount: LoanAmount(amount),
        salary,
        category,
    }
}

pub(super) fn memory_service() -> Arc<LoanApplicationService<MemoryRepository>> {
    Arc::new(LoanApplicationService::new(
        Arc::new(MemoryRepository::default()),
        evaluator(),
    ))
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<HashMap<LoanApplicationId, LoanApplicationRecord>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl LoanApplicationRepository for MemoryRepository {
    fn insert(
        &self,
        record: LoanApplicationRecord,
    ) -> Result<LoanApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(
        &self,
        record: LoanApplicationRecord,
        expected: LoanApplicationStatus,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(&record.id) {
            Some(existing) if existing.status != expected => {
                Err(RepositoryError::StatusChanged(existing.status))
            }
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(
        &self,
        id: &LoanApplicationId,
    ) -> Result<Option<LoanApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<LoanApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

pub(super) struct UnavailableRepository;

impl LoanApplicationRepository for UnavailableRepository {
    fn insert(
        &self,
        _record: LoanApplicationRecord,
    ) -> Result<LoanApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("ledger offline".to_string()))
    }

    fn update(
        &self,
        _record: LoanApplicationRecord,
        _expected: LoanApplicationStatus,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("ledger offline".to_string()))
    }

    fn fetch(
        &self,
        _id: &LoanApplicationId,
    ) -> Result<Option<LoanApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("ledger offline".to_string()))
    }

    fn list(&self) -> Result<Vec<LoanApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("ledger offline".to_string()))
    }
}

pub(super) struct ConflictRepository;

impl LoanApplicationRepository for ConflictRepository {
    fn insert(
        &self,
        _record: LoanApplicationRecord,
    ) -> Result<LoanApplicationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(
        &self,
        _record: LoanApplicationRecord,
        _expected: LoanApplicationStatus,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::NotFound)
    }

    fn fetch(
        &self,
        _id: &LoanApplicationId,
    ) -> Result<Option<LoanApplicationRecord>, RepositoryError> {
        Ok(None)
    }

    fn list(&self) -> Result<Vec<LoanApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

/// Serves every read as the originally submitted record, like a desk whose
/// fetch raced with another clerk's decision. Writes go to the inner store.
pub(super) struct StaleReadRepository {
    pub(super) inner: MemoryRepository,
    pub(super) snapshot: Mutex<Option<LoanApplicationRecord>>,
}

impl StaleReadRepository {
    pub(super) fn new() -> Self {
        Self {
            inner: MemoryRepository::default(),
            snapshot: Mutex::new(None),
        }
    }
}

impl LoanApplicationRepository for StaleReadRepository {
    fn insert(
        &self,
        record: LoanApplicationRecord,
    ) -> Result<LoanApplicationRecord, RepositoryError> {
        *self.snapshot.lock().expect("snapshot mutex poisoned") = Some(record.clone());
        self.inner.insert(record)
    }

    fn update(
        &self,
        record: LoanApplicationRecord,
        expected: LoanApplicationStatus,
    ) -> Result<(), RepositoryError> {
        self.inner.update(record, expected)
    }

    fn fetch(
        &self,
        _id: &LoanApplicationId,
    ) -> Result<Option<LoanApplicationRecord>, RepositoryError> {
        Ok(self.snapshot.lock().expect("snapshot mutex poisoned").clone())
    }

    fn list(&self) -> Result<Vec<LoanApplicationRecord>, RepositoryError> {
        self.inner.list()
    }
}
