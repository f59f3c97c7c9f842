use metrics_exporter_prometheus::PrometheusHandle;
use smart_hr::config::AppConfig;
use smart_hr::finance::loans::{
    ApplicantCategory, EligibilityEvaluator, InstallmentTable, LoanAmount, LoanApplicationId,
    LoanApplicationRecord, LoanApplicationRepository, LoanApplicationStatus, RepositoryError,
};
use smart_hr::locale::Locale;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

type RecordMap = HashMap<LoanApplicationId, LoanApplicationRecord>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryLoanRepository {
    records: Arc<Mutex<RecordMap>>,
}

impl InMemoryLoanRepository {
    fn guard(&self) -> Result<MutexGuard<'_, RecordMap>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl LoanApplicationRepository for InMemoryLoanRepository {
    fn insert(
        &self,
        record: LoanApplicationRecord,
    ) -> Result<LoanApplicationRecord, RepositoryError> {
        let mut guard = self.guard()?;
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
        let mut guard = self.guard()?;
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
        Ok(self.guard()?.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<LoanApplicationRecord>, RepositoryError> {
        Ok(self.guard()?.values().cloned().collect())
    }
}

/// Evaluator wired from the loaded configuration; the schedule itself is fixed.
pub(crate) fn evaluator_from_config(config: &AppConfig) -> EligibilityEvaluator {
    EligibilityEvaluator::new(InstallmentTable::standard(), config.loans, config.locale)
}

/// Accepts `30000000`, `30,000,000` or `30m`.
pub(crate) fn parse_amount(raw: &str) -> Result<LoanAmount, String> {
    let trimmed = raw.trim().replace(['_', ','], "");
    let (digits, multiplier) = match trimmed.strip_suffix(['m', 'M']) {
        Some(millions) => (millions, 1_000_000),
        None => (trimmed.as_str(), 1),
    };
    digits
        .parse::<u64>()
        .ok()
        .and_then(|value| value.checked_mul(multiplier))
        .map(LoanAmount)
        .ok_or_else(|| format!("'{raw}' is not a whole dinar amount"))
}

pub(crate) fn parse_category(raw: &str) -> Result<ApplicantCategory, String> {
    raw.parse::<ApplicantCategory>()
        .map_err(|err| err.to_string())
}

pub(crate) fn parse_locale(raw: &str) -> Result<Locale, String> {
    Locale::parse(raw).ok_or_else(|| format!("unsupported locale '{raw}' (expected ar or en)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use smart_hr::finance::loans::LoanApplicationRequest;

    fn record(id: &str) -> LoanApplicationRecord {
        LoanApplicationRecord {
            id: LoanApplicationId(id.to_string()),
            request: LoanApplicationRequest {
                applicant_name: "Zainab Jassim".to_string(),
                employee_id: "10210".to_string(),
                amount: LoanAmount(10_000_000),
                salary: 900_000,
                category: ApplicantCategory::Civilian,
            },
            installment: 150_000,
            status: LoanApplicationStatus::Submitted,
            submitted_at: Utc::now(),
            decided_at: None,
        }
    }

    #[test]
    fn parses_amount_shorthands() {
        assert_eq!(parse_amount("30m"), Ok(LoanAmount(30_000_000)));
        assert_eq!(parse_amount("15,000,000"), Ok(LoanAmount(15_000_000)));
        assert_eq!(parse_amount(" 20000000 "), Ok(LoanAmount(20_000_000)));
        assert!(parse_amount("twenty").is_err());
    }

    #[test]
    fn parses_category_and_locale_flags() {
        assert_eq!(
            parse_category("social-welfare"),
            Ok(ApplicantCategory::SocialWelfare)
        );
        assert!(parse_category("pensioner").is_err());
        assert_eq!(parse_locale("en"), Ok(Locale::English));
        assert!(parse_locale("fr").is_err());
    }

    #[test]
    fn repository_refuses_duplicate_ids_and_unknown_updates() {
        let repository = InMemoryLoanRepository::default();
        repository.insert(record("loan-000001")).expect("first insert");

        assert!(matches!(
            repository.insert(record("loan-000001")),
            Err(RepositoryError::Conflict)
        ));
        assert!(matches!(
            repository.update(record("loan-000009"), LoanApplicationStatus::Submitted),
            Err(RepositoryError::NotFound)
        ));
        assert_eq!(repository.list().expect("list").len(), 1);
    }

    #[test]
    fn repository_update_only_applies_to_expected_status() {
        let repository = InMemoryLoanRepository::default();
        repository.insert(record("loan-000001")).expect("insert");

        let mut approved = record("loan-000001");
        approved.status = LoanApplicationStatus::Approved;
        repository
            .update(approved, LoanApplicationStatus::Submitted)
            .expect("first decision stored");

        let mut rejected = record("loan-000001");
        rejected.status = LoanApplicationStatus::Rejected;
        assert!(matches!(
            repository.update(rejected, LoanApplicationStatus::Submitted),
            Err(RepositoryError::StatusChanged(LoanApplicationStatus::Approved))
        ));

        let stored = repository
            .fetch(&LoanApplicationId("loan-000001".to_string()))
            .expect("fetch")
            .expect("present");
        assert_eq!(stored.status, LoanApplicationStatus::Approved);
    }
}
