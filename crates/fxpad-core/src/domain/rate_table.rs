use std::collections::BTreeMap;

use serde::Serialize;

use crate::{AsOfDate, CurrencyCode, LookupError, ValidationError};

/// Units of a currency per one US dollar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateEntry {
    pub code: CurrencyCode,
    pub rate: f64,
}

impl RateEntry {
    pub fn new(code: CurrencyCode, rate: f64) -> Result<Self, ValidationError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(ValidationError::InvalidRate {
                code: code.into(),
                rate,
            });
        }

        Ok(Self { code, rate })
    }
}

/// Snapshot of USD-relative rates published for a single date.
///
/// There is no mutable access once constructed; a fresh fetch produces a
/// fresh table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateTable {
    date: AsOfDate,
    rates: BTreeMap<CurrencyCode, RateEntry>,
}

impl RateTable {
    pub fn new(
        date: AsOfDate,
        entries: impl IntoIterator<Item = RateEntry>,
    ) -> Result<Self, ValidationError> {
        let mut rates = BTreeMap::new();
        for entry in entries {
            if rates.contains_key(&entry.code) {
                return Err(ValidationError::DuplicateRate {
                    code: entry.code.into(),
                });
            }
            rates.insert(entry.code.clone(), entry);
        }

        Ok(Self { date, rates })
    }

    /// Build a table from raw `(code, rate)` pairs, validating each one.
    pub fn from_pairs<I, S>(date: AsOfDate, pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let entries = pairs
            .into_iter()
            .map(|(code, rate)| RateEntry::new(CurrencyCode::parse(code.as_ref())?, rate))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(date, entries)
    }

    pub const fn date(&self) -> AsOfDate {
        self.date
    }

    pub fn get(&self, code: &CurrencyCode) -> Option<&RateEntry> {
        self.rates.get(code)
    }

    /// Rate for `code`, or a lookup error naming the missing code.
    pub fn rate(&self, code: &CurrencyCode) -> Result<f64, LookupError> {
        self.get(code)
            .map(|entry| entry.rate)
            .ok_or_else(|| LookupError::CurrencyNotInTable {
                code: code.as_str().to_owned(),
            })
    }

    pub fn entries(&self) -> impl Iterator<Item = &RateEntry> {
        self.rates.values()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

pub(crate) fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
