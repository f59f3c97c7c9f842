use serde::{Deserialize, Serialize};

/// Display language for operator-facing messages.
///
/// Chosen once at startup from configuration and handed to whatever renders
/// text; nothing reads it from ambient state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    Arabic,
    English,
}

impl Locale {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ar" | "arabic" => Some(Self::Arabic),
            "en" | "english" => Some(Self::English),
            _ => None,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Locale::Arabic => "ar",
            Locale::English => "en",
        }
    }
}

/// Render a whole-dinar amount with thousands separators, e.g. `1,500,000`.
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_amounts_with_separators() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(150_000), "150,000");
        assert_eq!(format_amount(1_500_000), "1,500,000");
        assert_eq!(format_amount(100_000_000), "100,000,000");
    }

    #[test]
    fn parses_locale_codes() {
        assert_eq!(Locale::parse("AR"), Some(Locale::Arabic));
        assert_eq!(Locale::parse(" english "), Some(Locale::English));
        assert_eq!(Locale::parse("fr"), None);
    }
}
