//! # Domain Models
//!
//! Canonical value types shared by the loader, calculator, and CLI.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`CurrencyCode`] | Validated, lowercase currency code |
//! | [`AsOfDate`] | ISO calendar date of a rate snapshot |
//! | [`RateEntry`] | Units of one currency per US dollar |
//! | [`RateTable`] | Immutable snapshot of USD-relative rates |
//!
//! ## Validation
//!
//! Construction enforces every invariant, so a `RateTable` in hand always
//! holds unique codes with finite, positive rates:
//!
//! ```rust
//! use fxpad_core::{AsOfDate, RateTable, ValidationError};
//!
//! let date = AsOfDate::parse("2024-01-01").unwrap();
//! let table = RateTable::from_pairs(date, [("usd", 1.0), ("inr", 83.0)]).unwrap();
//! assert_eq!(table.len(), 2);
//!
//! let invalid = RateTable::from_pairs(date, [("usd", 0.0)]);
//! assert!(matches!(invalid, Err(ValidationError::InvalidRate { .. })));
//! ```

mod as_of_date;
mod currency_code;
mod rate_table;

pub use as_of_date::AsOfDate;
pub use currency_code::CurrencyCode;
pub(crate) use rate_table::validate_non_negative;
pub use rate_table::{RateEntry, RateTable};
