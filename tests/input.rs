use capital_budgeting::budgeting::input::{parse_cash_flows, InputField};
use capital_budgeting::budgeting::{parse_inputs, ParseError};

#[test]
fn parses_all_three_fields() {
    let inputs = parse_inputs(" 1000 ", "400, 400 ,400", "10").unwrap();
    assert_eq!(inputs.investment, 1000.0);
    assert_eq!(inputs.cash_flows.as_slice(), &[400.0, 400.0, 400.0]);
    assert_eq!(inputs.discount_rate, Some(10.0));
    assert_eq!(inputs.require_discount_rate(), Ok(10.0));
}

#[test]
fn blank_discount_rate_is_absent() {
    let inputs = parse_inputs("100", "50,50", "   ").unwrap();
    assert_eq!(inputs.discount_rate, None);
    assert_eq!(
        inputs.require_discount_rate(),
        Err(ParseError::MissingDiscountRate)
    );
}

#[test]
fn negative_and_scientific_values_parse() {
    let flows = parse_cash_flows("-1.5e2, 3.25,0").unwrap();
    assert_eq!(flows.as_slice(), &[-150.0, 3.25, 0.0]);
}

#[test]
fn bad_investment_names_the_field() {
    let err = parse_inputs("ten", "1,2", "").unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidNumber {
            field: InputField::Investment,
            text: "ten".into()
        }
    );
    assert!(err.to_string().contains("initial investment"));
}

#[test]
fn bad_discount_rate_is_rejected() {
    let err = parse_inputs("100", "1,2", "5%").unwrap_err();
    assert!(matches!(
        err,
        ParseError::InvalidNumber {
            field: InputField::DiscountRate,
            ..
        }
    ));
}

#[test]
fn empty_or_trailing_cash_flow_entries_fail() {
    assert_eq!(
        parse_cash_flows(""),
        Err(ParseError::InvalidCashFlow {
            position: 1,
            text: String::new()
        })
    );
    assert_eq!(
        parse_cash_flows("1,2,"),
        Err(ParseError::InvalidCashFlow {
            position: 3,
            text: String::new()
        })
    );
    assert!(parse_cash_flows("1;2").is_err());
}

#[test]
fn non_finite_values_fail() {
    assert!(parse_inputs("inf", "1", "").is_err());
    assert!(parse_cash_flows("1, NaN").is_err());
}
