use super::super::category::ApplicantCategory;
use crate::locale::{format_amount, Locale};
use serde::{Deserialize, Serialize};

/// Which rule settled an eligibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EligibilityDecision {
    Approved,
    SalaryRequired,
    ExceedsDeductionLimit {
        installment: u64,
        max_deduction: u64,
        limit_pct: u8,
    },
    CategoryCapExceeded {
        category: ApplicantCategory,
        cap: u64,
    },
}

impl EligibilityDecision {
    pub fn is_eligible(&self) -> bool {
        matches!(self, EligibilityDecision::Approved)
    }

    pub fn message(&self, locale: Locale) -> String {
        match (self, locale) {
            (EligibilityDecision::Approved, Locale::Arabic) => {
                "أنت مؤهل للحصول على هذه السلفة.".to_string()
            }
            (EligibilityDecision::Approved, Locale::English) => {
                "You are eligible for this loan.".to_string()
            }
            (EligibilityDecision::SalaryRequired, Locale::Arabic) => {
                "يرجى إدخال الراتب للتحقق.".to_string()
            }
            (EligibilityDecision::SalaryRequired, Locale::English) => {
                "Please enter the salary to check eligibility.".to_string()
            }
            (
                EligibilityDecision::ExceedsDeductionLimit {
                    installment,
                    limit_pct,
                    ..
                },
                Locale::Arabic,
            ) => format!(
                "القسط ({}) يتجاوز {}% من الراتب.",
                format_amount(*installment),
                limit_pct
            ),
            (
                EligibilityDecision::ExceedsDeductionLimit {
                    installment,
                    limit_pct,
                    ..
                },
                Locale::English,
            ) => format!(
                "The installment ({}) exceeds {}% of the salary.",
                format_amount(*installment),
                limit_pct
            ),
            (EligibilityDecision::CategoryCapExceeded { category, cap }, locale) => {
                cap_message(*category, *cap, locale)
            }
        }
    }
}

fn cap_message(category: ApplicantCategory, cap: u64, locale: Locale) -> String {
    let millions = cap / 1_000_000;
    match (category, locale) {
        (ApplicantCategory::PoorFamilies, Locale::Arabic) => {
            format!("الحد الأقصى للعوائل المتعففة هو {millions} مليون دينار.")
        }
        (ApplicantCategory::SocialWelfare, Locale::Arabic) => {
            format!("الحد الأقصى للرعاية الاجتماعية هو {millions} مليون دينار.")
        }
        (other, Locale::Arabic) => format!(
            "الحد الأقصى لفئة {} هو {millions} مليون دينار.",
            other.label(Locale::Arabic)
        ),
        (ApplicantCategory::PoorFamilies, Locale::English) => {
            format!("The maximum for poor families is {millions} million dinars.")
        }
        (ApplicantCategory::SocialWelfare, Locale::English) => {
            format!("The maximum for social welfare is {millions} million dinars.")
        }
        (other, Locale::English) => format!(
            "The maximum for {} is {millions} million dinars.",
            other.label(Locale::English).to_lowercase()
        ),
    }
}
