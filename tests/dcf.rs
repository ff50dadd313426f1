//! NPV/PI/IRR 회귀 테스트.
use approx::{assert_abs_diff_eq, assert_relative_eq};
use capital_budgeting::budgeting::{
    discount_cash_flows, evaluate_dcf, internal_rate_of_return, CalculationError,
};

#[test]
fn three_equal_flows_at_ten_percent() {
    let summary = evaluate_dcf(1000.0, &[400.0, 400.0, 400.0], 10.0).unwrap();
    let values: Vec<f64> = summary.rows().iter().map(|r| r.value).collect();
    assert_abs_diff_eq!(values[0], 363.64, epsilon = 0.005);
    assert_abs_diff_eq!(values[1], 330.58, epsilon = 0.005);
    assert_abs_diff_eq!(values[2], 300.53, epsilon = 0.005);
    assert_eq!(
        summary.rows().iter().map(|r| r.period).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_abs_diff_eq!(summary.npv(), -5.26, epsilon = 0.005);
    assert_abs_diff_eq!(summary.profitability_index(), 0.9947, epsilon = 0.00005);
    assert_abs_diff_eq!(summary.irr_percent, 9.70, epsilon = 0.01);
}

#[test]
fn zero_rate_leaves_flows_undiscounted() {
    let summary = evaluate_dcf(100.0, &[50.0, 50.0], 0.0).unwrap();
    assert_abs_diff_eq!(summary.rows()[0].value, 50.0, epsilon = 1e-12);
    assert_abs_diff_eq!(summary.rows()[1].value, 50.0, epsilon = 1e-12);
    assert_abs_diff_eq!(summary.npv(), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(summary.profitability_index(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(summary.irr_percent, 0.0, epsilon = 1e-6);
}

#[test]
fn npv_is_zero_at_irr() {
    let flows = [300.0, 450.0, -50.0, 500.0];
    let irr = internal_rate_of_return(900.0, &flows).unwrap();
    let at_irr = discount_cash_flows(900.0, &flows, irr).unwrap();
    assert_abs_diff_eq!(at_irr.npv, 0.0, epsilon = 1e-6);
}

#[test]
fn one_period_irr() {
    let irr = internal_rate_of_return(100.0, &[110.0]).unwrap();
    assert_relative_eq!(irr, 10.0, epsilon = 1e-8);
}

#[test]
fn zero_investment_fails_profitability_index() {
    assert_eq!(
        discount_cash_flows(0.0, &[10.0], 5.0),
        Err(CalculationError::ZeroInvestment)
    );
    assert!(matches!(
        evaluate_dcf(0.0, &[10.0], 5.0),
        Err(CalculationError::ZeroInvestment)
    ));
}

#[test]
fn empty_flows_give_negative_investment_npv() {
    let flows = discount_cash_flows(250.0, &[], 8.0).unwrap();
    assert!(flows.rows.is_empty());
    assert_eq!(flows.present_value_sum, 0.0);
    assert_eq!(flows.npv, -250.0);
    assert_eq!(flows.profitability_index, 0.0);
    assert_eq!(
        internal_rate_of_return(250.0, &[]),
        Err(CalculationError::IrrUndefined)
    );
    assert!(evaluate_dcf(250.0, &[], 8.0).is_err());
}

#[test]
fn no_sign_change_means_no_irr() {
    assert_eq!(
        internal_rate_of_return(-100.0, &[10.0, 20.0]),
        Err(CalculationError::IrrUndefined)
    );
    assert_eq!(
        internal_rate_of_return(100.0, &[-10.0, -20.0]),
        Err(CalculationError::IrrUndefined)
    );
}

#[test]
fn irr_above_thousand_percent_is_found() {
    let irr = internal_rate_of_return(100.0, &[1200.0]).unwrap();
    assert_relative_eq!(irr, 1100.0, epsilon = 1e-6);
}

#[test]
fn irr_without_real_root_is_reported() {
    // 부호는 바뀌지만 어떤 할인율에서도 NPV가 0에 닿지 않는다
    let result = internal_rate_of_return(100.0, &[230.0, -140.0]);
    assert!(
        matches!(result, Err(CalculationError::IrrNotConverged(_))),
        "got {result:?}"
    );
}

#[test]
fn rate_at_or_below_minus_hundred_is_rejected() {
    assert_eq!(
        discount_cash_flows(100.0, &[10.0], -100.0),
        Err(CalculationError::InvalidDiscountRate(-100.0))
    );
}
