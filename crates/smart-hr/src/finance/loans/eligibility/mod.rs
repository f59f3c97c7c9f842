mod decision;
mod policy;

pub use decision::EligibilityDecision;
pub use policy::LoanPolicy;

use super::category::ApplicantCategory;
use super::table::{InstallmentTable, LoanAmount};
use crate::locale::Locale;
use serde::{Deserialize, Serialize};

/// Stateless evaluator applying the deduction ceiling and category caps.
#[derive(Debug, Clone)]
pub struct EligibilityEvaluator {
    table: InstallmentTable,
    policy: LoanPolicy,
    locale: Locale,
}

impl EligibilityEvaluator {
    pub fn new(table: InstallmentTable, policy: LoanPolicy, locale: Locale) -> Self {
        Self {
            table,
            policy,
            locale,
        }
    }

    pub fn table(&self) -> &InstallmentTable {
        &self.table
    }

    pub fn policy(&self) -> LoanPolicy {
        self.policy
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Rules run in a fixed order and the first failure wins: salary present,
    /// deduction ceiling, then the category cap.
    pub fn evaluate(
        &self,
        amount: LoanAmount,
        salary: u64,
        category: ApplicantCategory,
    ) -> EligibilityResult {
        let installment = self.table.installment(amount);
        let decision = self.decide(amount, installment, salary, category);

        EligibilityResult {
            is_eligible: decision.is_eligible(),
            installment,
            message: decision.message(self.locale),
            decision,
        }
    }

    fn decide(
        &self,
        amount: LoanAmount,
        installment: u64,
        salary: u64,
        category: ApplicantCategory,
    ) -> EligibilityDecision {
        if salary == 0 {
            return EligibilityDecision::SalaryRequired;
        }

        if self.policy.exceeds(installment, salary) {
            return EligibilityDecision::ExceedsDeductionLimit {
                installment,
                max_deduction: self.policy.max_deduction(salary),
                limit_pct: self.policy.max_deduction_pct,
            };
        }

        if let Some(cap) = category.principal_cap() {
            if amount.dinars() > cap {
                return EligibilityDecision::CategoryCapExceeded { category, cap };
            }
        }

        EligibilityDecision::Approved
    }
}

impl Default for EligibilityEvaluator {
    fn default() -> Self {
        Self::new(
            InstallmentTable::standard(),
            LoanPolicy::default(),
            Locale::default(),
        )
    }
}

/// Derived answer for one (amount, salary, category) triple; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub is_eligible: bool,
    pub installment: u64,
    pub message: String,
    pub decision: EligibilityDecision,
}
