//! Display formatting for engine output. The engine hands over raw
//! numbers; everything that turns them into text lives here.

use serde::{Deserialize, Serialize};

/// Shown in place of a ratio whose denominator was zero.
pub const UNDEFINED: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    Prefix,
    #[default]
    Suffix,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FormatSettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub symbol_position: SymbolPosition,
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,
}

fn default_currency_symbol() -> String {
    "€".to_string()
}

fn default_thousands_separator() -> String {
    " ".to_string()
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            symbol_position: SymbolPosition::default(),
            thousands_separator: default_thousands_separator(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NumberFormat {
    settings: FormatSettings,
}

impl NumberFormat {
    pub fn new(settings: FormatSettings) -> Self {
        Self { settings }
    }

    /// Integer with thousands separators
    pub fn number(&self, value: i64) -> String {
        let digits = value.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() * 2);

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push_str(&self.settings.thousands_separator);
            }
            out.push(ch);
        }

        if value < 0 {
            out.insert(0, '-');
        }
        out
    }

    /// Whole currency amount, e.g. `1 720 000 €`
    pub fn currency(&self, value: f64) -> String {
        let grouped = self.number(value.round() as i64);
        let symbol = &self.settings.currency_symbol;
        match self.settings.symbol_position {
            SymbolPosition::Prefix => format!("{symbol}{grouped}"),
            SymbolPosition::Suffix => format!("{grouped} {symbol}"),
        }
    }

    pub fn currency_or_undefined(&self, value: Option<f64>) -> String {
        value.map_or_else(|| UNDEFINED.to_string(), |v| self.currency(v))
    }
}

/// One decimal with an explicit `+` for non-negative values, e.g. `+25.8%`
pub fn percentage(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{value:.1}%")
}

pub fn percentage_or_undefined(value: Option<f64>) -> String {
    value.map_or_else(|| UNDEFINED.to_string(), percentage)
}

/// One decimal without sign, for shares and margins, e.g. `37.5%`
pub fn share(value: Option<f64>) -> String {
    value.map_or_else(|| UNDEFINED.to_string(), |v| format!("{v:.1}%"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_grouping() {
        let fmt = NumberFormat::default();
        assert_eq!(fmt.number(0), "0");
        assert_eq!(fmt.number(999), "999");
        assert_eq!(fmt.number(5_600), "5 600");
        assert_eq!(fmt.number(1_720_000), "1 720 000");
        assert_eq!(fmt.number(-87_000), "-87 000");
    }

    #[test]
    fn test_currency_positions() {
        let fmt = NumberFormat::default();
        assert_eq!(fmt.currency(4_583_000.0), "4 583 000 €");
        assert_eq!(fmt.currency(818.39), "818 €");

        let fmt = NumberFormat::new(FormatSettings {
            currency_symbol: "$".to_string(),
            symbol_position: SymbolPosition::Prefix,
            thousands_separator: ",".to_string(),
        });
        assert_eq!(fmt.currency(370_500.0), "$370,500");
        assert_eq!(fmt.currency_or_undefined(None), UNDEFINED);
    }

    #[test]
    fn test_percentages() {
        assert_eq!(percentage(25.76), "+25.8%");
        assert_eq!(percentage(0.0), "+0.0%");
        assert_eq!(percentage(-7.02), "-7.0%");
        assert_eq!(percentage_or_undefined(None), "—");
        assert_eq!(share(Some(37.53)), "37.5%");
        assert_eq!(share(None), "—");
    }
}
