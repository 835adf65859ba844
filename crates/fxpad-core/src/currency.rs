//! Static currency metadata and the first-run default-currency guess.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::timezone::{CountryOptions, CountryView, TimezoneResolver};
use crate::CoreError;

const BUNDLED_CURRENCIES: &str = include_str!("../data/currencies.json");

/// Members of the euro area; the table lists the euro once under `EU`.
const EURO_AREA: &[&str] = &[
    "AD", "AT", "BE", "CY", "DE", "EE", "ES", "FI", "FR", "GR", "HR", "IE", "IT", "LT", "LU",
    "LV", "MC", "ME", "MT", "NL", "PT", "SI", "SK", "SM", "VA", "XK",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRecord {
    pub currency_code: String,
    pub currency_symbol: String,
    pub english_currency_name: String,
    pub local_currency_name: String,
    pub language_code: String,
    pub country_code: String,
}

impl CurrencyRecord {
    /// Lowercase country code, as used for flag assets.
    pub fn flag_country_code(&self) -> String {
        self.country_code.to_ascii_lowercase()
    }
}

/// Read-only currency table in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyTable {
    records: Vec<CurrencyRecord>,
}

impl CurrencyTable {
    pub fn new(records: Vec<CurrencyRecord>) -> Self {
        Self { records }
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Process-wide table over the dataset compiled into the crate.
    pub fn bundled() -> &'static Self {
        static BUNDLED: OnceLock<CurrencyTable> = OnceLock::new();
        BUNDLED.get_or_init(|| {
            Self::from_json(BUNDLED_CURRENCIES).expect("bundled currency dataset must be valid")
        })
    }

    pub fn find(&self, code: &str) -> Option<&CurrencyRecord> {
        let code = code.trim();
        self.records
            .iter()
            .find(|record| record.currency_code.eq_ignore_ascii_case(code))
    }

    /// First currency in table order issued for `country_code`.
    pub fn guess_for_country(&self, country_code: &str) -> Option<&CurrencyRecord> {
        let country_code = country_code.trim();
        self.records
            .iter()
            .find(|record| record.country_code.eq_ignore_ascii_case(country_code))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CurrencyRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Outcome of guessing a default currency from a timezone name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyGuess {
    pub timezone: String,
    pub country: CountryView,
    pub currency: Option<CurrencyRecord>,
}

/// Timezone → country → currency, as done once on first run.
///
/// Returns `None` when the timezone maps to no known country. A country
/// without its own entry in the table falls back to the euro when it is a
/// euro-area member.
pub fn guess_default_currency(
    resolver: &TimezoneResolver,
    table: &CurrencyTable,
    timezone: &str,
) -> Option<CurrencyGuess> {
    let country = resolver.country_for_timezone(timezone, CountryOptions::default())?;

    let currency = table.guess_for_country(&country.id).or_else(|| {
        EURO_AREA
            .contains(&country.id.as_str())
            .then(|| table.find("eur"))
            .flatten()
    });
    debug!(
        timezone,
        country = %country.id,
        currency = currency.map(|record| record.currency_code.as_str()),
        "guessed default currency"
    );

    Some(CurrencyGuess {
        timezone: timezone.to_owned(),
        country,
        currency: currency.cloned(),
    })
}
