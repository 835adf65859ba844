//! Behavior-driven tests for currency conversion.
//!
//! These tests verify WHAT a user sees when typing amounts into either side
//! of the converter, given a loaded USD rate table.

use fxpad_core::{
    exchange, format_amount, parse_rate_payload, AsOfDate, CoreError, CurrencyCode, LookupError,
    RateTable,
};

fn code(raw: &str) -> CurrencyCode {
    CurrencyCode::parse(raw).expect("valid code")
}

fn sample_table() -> RateTable {
    parse_rate_payload(r#"{"date":"2024-01-01","rates":{"usd":1,"inr":83,"eur":0.92}}"#)
        .expect("sample payload is valid")
}

fn wide_table() -> RateTable {
    let date = AsOfDate::parse("2024-06-30").expect("date");
    RateTable::from_pairs(
        date,
        [
            ("usd", 1.0),
            ("inr", 83.42),
            ("eur", 0.9331),
            ("jpy", 160.88),
            ("kwd", 0.3067),
            ("btc", 0.000_016_3),
            ("vnd", 25_455.0),
        ],
    )
    .expect("valid table")
}

// =============================================================================
// Conversion: Known Rates
// =============================================================================

#[test]
fn when_user_converts_dollars_to_rupees_result_uses_the_published_rate() {
    // Given: A table with 83 rupees per dollar
    let table = sample_table();

    // When: The user types 100 USD
    let result = exchange(100.0, &code("usd"), &code("inr"), &table).expect("convert");

    // Then: They see 8300 INR
    assert_eq!(result, 8300.0);
}

#[test]
fn when_user_converts_rupees_back_to_dollars_the_rate_is_inverted() {
    let table = sample_table();

    let result = exchange(8300.0, &code("inr"), &code("usd"), &table).expect("convert");
    assert_eq!(result, 100.0);

    let result = exchange(83.0, &code("inr"), &code("usd"), &table).expect("convert");
    assert_eq!(result, 1.0);
}

#[test]
fn when_user_converts_euros_to_dollars_result_is_the_reciprocal_rate() {
    let table = sample_table();

    let result = exchange(1.0, &code("eur"), &code("usd"), &table).expect("convert");

    assert!((result - 1.0869).abs() < 1e-4, "got {result}");
    assert_eq!(format_amount(result, &code("usd")), "1.09");
}

#[test]
fn cross_rates_go_through_the_dollar() {
    let table = sample_table();

    let result = exchange(92.0, &code("eur"), &code("inr"), &table).expect("convert");

    assert!((result - 8300.0).abs() < 1e-9, "got {result}");
}

// =============================================================================
// Conversion: Properties
// =============================================================================

#[test]
fn converting_there_and_back_returns_the_original_amount() {
    let table = wide_table();
    let codes: Vec<CurrencyCode> = table.entries().map(|entry| entry.code.clone()).collect();

    for amount in [0.01, 1.0, 12.5, 999.99, 1_234_567.0] {
        for from in &codes {
            for to in &codes {
                let there = exchange(amount, from, to, &table).expect("convert");
                let back = exchange(there, to, from, &table).expect("convert back");
                let tolerance = amount * 1e-12;
                assert!(
                    (back - amount).abs() <= tolerance,
                    "{amount} {from}->{to}->{from} gave {back}"
                );
            }
        }
    }
}

#[test]
fn converting_to_the_same_currency_is_the_identity() {
    let table = wide_table();

    for entry in table.entries() {
        for amount in [0.0, 0.3, 17.0, 1e9] {
            let result = exchange(amount, &entry.code, &entry.code, &table).expect("convert");
            assert_eq!(result, amount);
        }
    }
}

#[test]
fn zero_converts_to_zero_for_every_pair() {
    let table = wide_table();

    for from in table.entries() {
        for to in table.entries() {
            let result = exchange(0.0, &from.code, &to.code, &table).expect("convert");
            assert_eq!(result, 0.0);
        }
    }
}

// =============================================================================
// Conversion: Errors
// =============================================================================

#[test]
fn when_a_currency_is_missing_from_the_table_conversion_fails_loudly() {
    // Given: A table without pounds
    let table = sample_table();

    // When: A caller asks for GBP
    let err = exchange(5.0, &code("gbp"), &code("usd"), &table).expect_err("must fail");

    // Then: It gets a lookup error naming the code, not 0 or NaN
    match err {
        CoreError::Lookup(LookupError::CurrencyNotInTable { code }) => assert_eq!(code, "gbp"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn negative_amounts_are_rejected() {
    let table = sample_table();

    let err = exchange(-3.0, &code("usd"), &code("inr"), &table).expect_err("must fail");
    assert!(matches!(err, CoreError::Validation(_)));
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn displayed_amounts_follow_the_target_currency_precision() {
    let table = wide_table();

    let yen = table.convert(10.0, &code("usd"), &code("jpy")).expect("convert");
    assert_eq!(yen.display, "1609");

    let dinar = table.convert(10.0, &code("usd"), &code("kwd")).expect("convert");
    assert_eq!(dinar.display, "3.067");

    let rupees = table.convert(10.0, &code("usd"), &code("inr")).expect("convert");
    assert_eq!(rupees.display, "834.20");
    assert_eq!(rupees.as_of.format_long(), "30 June 2024");
}
