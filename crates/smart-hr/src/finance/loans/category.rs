use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SOCIAL_WELFARE_CAP: u64 = 15_000_000;
const POOR_FAMILIES_CAP: u64 = 20_000_000;

/// Applicant grouping used by the advance programme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantCategory {
    Civilian,
    Military,
    Intelligence,
    SocialWelfare,
    PoorFamilies,
}

impl ApplicantCategory {
    pub const ALL: [ApplicantCategory; 5] = [
        ApplicantCategory::Civilian,
        ApplicantCategory::Military,
        ApplicantCategory::Intelligence,
        ApplicantCategory::SocialWelfare,
        ApplicantCategory::PoorFamilies,
    ];

    /// Largest principal this category may request, if the category is capped.
    pub const fn principal_cap(self) -> Option<u64> {
        match self {
            ApplicantCategory::SocialWelfare => Some(SOCIAL_WELFARE_CAP),
            ApplicantCategory::PoorFamilies => Some(POOR_FAMILIES_CAP),
            ApplicantCategory::Civilian
            | ApplicantCategory::Military
            | ApplicantCategory::Intelligence => None,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            ApplicantCategory::Civilian => "civilian",
            ApplicantCategory::Military => "military",
            ApplicantCategory::Intelligence => "intelligence",
            ApplicantCategory::SocialWelfare => "social_welfare",
            ApplicantCategory::PoorFamilies => "poor_families",
        }
    }

    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (ApplicantCategory::Civilian, Locale::Arabic) => "موظف مدني",
            (ApplicantCategory::Military, Locale::Arabic) => "عسكري / دفاع",
            (ApplicantCategory::Intelligence, Locale::Arabic) => "استخبارات",
            (ApplicantCategory::SocialWelfare, Locale::Arabic) => "رعاية اجتماعية",
            (ApplicantCategory::PoorFamilies, Locale::Arabic) => "عوائل متعففة",
            (ApplicantCategory::Civilian, Locale::English) => "Civilian employee",
            (ApplicantCategory::Military, Locale::English) => "Military / defence",
            (ApplicantCategory::Intelligence, Locale::English) => "Intelligence",
            (ApplicantCategory::SocialWelfare, Locale::English) => "Social welfare",
            (ApplicantCategory::PoorFamilies, Locale::English) => "Poor families",
        }
    }
}

impl fmt::Display for ApplicantCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown applicant category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for ApplicantCategory {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        ApplicantCategory::ALL
            .into_iter()
            .find(|category| category.key() == normalized)
            .ok_or_else(|| UnknownCategory(value.to_string()))
    }
}
