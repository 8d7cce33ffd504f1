//! Display currency preference.
//!
//! Formatting only: amounts are never converted, and the preference is
//! never transmitted to the server. Completely independent of the session.

use std::sync::Arc;

use tracing::warn;

use crate::storage::{Store, CURRENCY_KEY};

/// The supported display currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Currency {
    #[default]
    Usd,
    Vnd,
}

impl Currency {
    /// The persisted code.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Vnd => "VND",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Vnd => "₫",
        }
    }

    /// VND is not subdivided.
    pub fn decimals(self) -> usize {
        match self {
            Currency::Usd => 2,
            Currency::Vnd => 0,
        }
    }

    fn thousands_separator(self) -> char {
        match self {
            Currency::Usd => ',',
            Currency::Vnd => '.',
        }
    }

    pub fn from_code(code: &str) -> Option<Currency> {
        match code {
            "USD" => Some(Currency::Usd),
            "VND" => Some(Currency::Vnd),
            _ => None,
        }
    }

    /// Pure formatting: `$1,234.56` for USD, `1.234.568₫` for VND (symbol
    /// placement and grouping follow each currency's locale convention).
    pub fn format_amount(self, amount: f64) -> String {
        let negative = amount < 0.0;
        let digits = format!("{:.*}", self.decimals(), amount.abs());
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (digits.as_str(), None),
        };

        let mut number = group_thousands(int_part, self.thousands_separator());
        if let Some(frac_part) = frac_part {
            number.push('.');
            number.push_str(frac_part);
        }

        let formatted = match self {
            Currency::Usd => format!("{}{}", self.symbol(), number),
            Currency::Vnd => format!("{}{}", number, self.symbol()),
        };
        if negative {
            format!("-{}", formatted)
        } else {
            formatted
        }
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut grouped = String::with_capacity(chars.len() + chars.len() / 3);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(*c);
    }
    grouped
}

/// The persisted preference, stored under its own key so it survives logout
/// and never interacts with the token.
pub struct CurrencyPreference {
    store: Arc<dyn Store>,
}

impl CurrencyPreference {
    pub fn new(store: Arc<dyn Store>) -> Self {
        CurrencyPreference { store }
    }

    /// The stored currency; absent or unrecognized values read as the
    /// default (USD).
    pub fn current(&self) -> Currency {
        match self.store.get(CURRENCY_KEY) {
            Ok(Some(code)) => Currency::from_code(&code).unwrap_or_else(|| {
                warn!(%code, "Unrecognized stored currency; using the default");
                Currency::default()
            }),
            Ok(None) => Currency::default(),
            Err(e) => {
                warn!("Could not read the currency preference: {}", e);
                Currency::default()
            }
        }
    }

    pub fn set(&self, currency: Currency) -> Result<(), String> {
        self.store.set(CURRENCY_KEY, currency.code())
    }

    /// Format an amount with the stored preference.
    pub fn format(&self, amount: f64) -> String {
        self.current().format_amount(amount)
    }
}
