//! 계산 결과를 화면 표시용 문자열로 바꾼다. GUI와 CLI가 함께 쓴다.

use crate::budgeting::{ArrResult, CalculationOutcome, DcfSummary, DiscountedCashFlowRow, Payback};
use crate::i18n::{keys, Translator};

pub fn payback_text(tr: &Translator, payback: Payback) -> String {
    match payback {
        Payback::Achieved(n) => tr.fill(keys::RESULT_PAYBACK, &[("periods", n.to_string())]),
        Payback::NotAchieved => tr.t(keys::RESULT_PAYBACK_NOT_ACHIEVED),
    }
}

pub fn arr_text(tr: &Translator, arr: &ArrResult) -> String {
    tr.fill(keys::RESULT_ARR, &[("arr", format!("{:.2}", arr.rounded()))])
}

pub fn dcf_text(tr: &Translator, dcf: &DcfSummary) -> String {
    tr.fill(
        keys::RESULT_DCF,
        &[
            ("npv", format!("{:.2}", dcf.npv())),
            ("pi", format!("{:.2}", dcf.profitability_index())),
            ("irr", format!("{:.2}", dcf.irr_percent)),
        ],
    )
}

/// 결과 한 줄 요약.
pub fn outcome_text(tr: &Translator, outcome: &CalculationOutcome) -> String {
    match outcome {
        CalculationOutcome::Payback(p) => payback_text(tr, *p),
        CalculationOutcome::Arr(a) => arr_text(tr, a),
        CalculationOutcome::Dcf(d) => dcf_text(tr, d),
    }
}

/// 표 한 줄: (기간, 소수 둘째 자리 값).
pub fn table_rows(rows: &[DiscountedCashFlowRow]) -> Vec<(String, String)> {
    rows.iter()
        .map(|r| (r.period.to_string(), format!("{:.2}", r.value)))
        .collect()
}
