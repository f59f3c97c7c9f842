//! End-to-end scenarios through the public loan desk facade.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use smart_hr::finance::loans::{
    ApplicantCategory, EligibilityDecision, EligibilityEvaluator, InstallmentTable, LoanAmount,
    LoanApplicationId, LoanApplicationRecord, LoanApplicationRepository, LoanApplicationRequest,
    LoanApplicationService, LoanApplicationStatus, LoanPolicy, LoanServiceError, RepositoryError,
};
use smart_hr::locale::Locale;

#[derive(Default)]
struct LedgerRepository {
    records: Mutex<BTreeMap<LoanApplicationId, LoanApplicationRecord>>,
}

impl LoanApplicationRepository for LedgerRepository {
    fn insert(
        &self,
        record: LoanApplicationRecord,
    ) -> Result<LoanApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("ledger mutex poisoned");
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
        let mut guard = self.records.lock().expect("ledger mutex poisoned");
        let existing = guard.get_mut(&record.id).ok_or(RepositoryError::NotFound)?;
        if existing.status != expected {
            return Err(RepositoryError::StatusChanged(existing.status));
        }
        *existing = record;
        Ok(())
    }

    fn fetch(
        &self,
        id: &LoanApplicationId,
    ) -> Result<Option<LoanApplicationRecord>, RepositoryError> {
        Ok(self.records.lock().expect("ledger mutex poisoned").get(id).cloned())
    }

    fn list(&self) -> Result<Vec<LoanApplicationRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("ledger mutex poisoned")
            .values()
            .cloned()
            .collect())
    }
}

fn desk(policy: LoanPolicy) -> LoanApplicationService<LedgerRepository> {
    LoanApplicationService::new(
        Arc::new(LedgerRepository::default()),
        EligibilityEvaluator::new(InstallmentTable::standard(), policy, Locale::English),
    )
}

fn request(amount: u64, salary: u64, category: ApplicantCategory) -> LoanApplicationRequest {
    LoanApplicationRequest {
        applicant_name: "Hussein Ali Rida".to_string(),
        employee_id: "10205".to_string(),
        amount: LoanAmount(amount),
        salary,
        category,
    }
}

#[test]
fn welfare_applicant_moves_from_refusal_to_approval() {
    let desk = desk(LoanPolicy::default());

    let refused = desk
        .submit(request(20_000_000, 2_000_000, ApplicantCategory::SocialWelfare))
        .expect_err("above the welfare cap");
    let LoanServiceError::NotEligible(result) = refused else {
        panic!("expected an eligibility refusal");
    };
    assert!(matches!(
        result.decision,
        EligibilityDecision::CategoryCapExceeded {
            category: ApplicantCategory::SocialWelfare,
            cap: 15_000_000
        }
    ));

    let record = desk
        .submit(request(15_000_000, 2_000_000, ApplicantCategory::SocialWelfare))
        .expect("at the cap is accepted");
    assert_eq!(record.installment, 225_000);

    let approved = desk.decide(&record.id, true).expect("approval recorded");
    assert_eq!(approved.status, LoanApplicationStatus::Approved);
    assert_eq!(desk.list().expect("list").len(), 1);
}

#[test]
fn stricter_deduction_policy_refuses_what_the_default_allows() {
    let default_desk = desk(LoanPolicy::default());
    let strict_desk = desk(LoanPolicy {
        max_deduction_pct: 25,
    });

    // 450,000 against a 1,000,000 salary: 45%.
    assert!(default_desk
        .submit(request(30_000_000, 1_000_000, ApplicantCategory::Military))
        .is_ok());

    let err = strict_desk
        .submit(request(30_000_000, 1_000_000, ApplicantCategory::Military))
        .expect_err("45% is above a 25% ceiling");
    let LoanServiceError::NotEligible(result) = err else {
        panic!("expected an eligibility refusal");
    };
    assert_eq!(
        result.decision,
        EligibilityDecision::ExceedsDeductionLimit {
            installment: 450_000,
            max_deduction: 250_000,
            limit_pct: 25,
        }
    );
    assert_eq!(
        result.message,
        "The installment (450,000) exceeds 25% of the salary."
    );
}
