use thiserror::Error;

use super::CashFlowSeries;

/// 입력 필드 종류. 오류 메시지에서 어느 칸이 잘못됐는지 알려준다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Investment,
    CashFlows,
    DiscountRate,
}

impl std::fmt::Display for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InputField::Investment => "initial investment",
            InputField::CashFlows => "cash flows",
            InputField::DiscountRate => "discount rate",
        };
        f.write_str(name)
    }
}

/// 입력 파싱 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// 숫자로 해석할 수 없는 값
    #[error("{field}: '{text}' is not a valid number")]
    InvalidNumber { field: InputField, text: String },
    /// 현금흐름 목록의 n번째(1부터) 항목이 잘못됨
    #[error("cash flows: entry {position} ('{text}') is not a valid number")]
    InvalidCashFlow { position: usize, text: String },
    /// 할인율이 필요한 계산에서 할인율이 비어 있음
    #[error("a discount rate is required for NPV, PI and IRR")]
    MissingDiscountRate,
}

/// 파싱이 끝난 계산 입력.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetInputs {
    /// 초기 투자비(양수로 입력, 계산 시 유출로 취급)
    pub investment: f64,
    pub cash_flows: CashFlowSeries,
    /// 할인율 [%]. 빈 칸이면 None
    pub discount_rate: Option<f64>,
}

impl BudgetInputs {
    /// 할인율을 요구하는 계산에서 사용한다.
    pub fn require_discount_rate(&self) -> Result<f64, ParseError> {
        self.discount_rate.ok_or(ParseError::MissingDiscountRate)
    }
}

/// 세 개의 입력 문자열을 계산 입력으로 변환한다.
pub fn parse_inputs(
    investment: &str,
    cash_flows: &str,
    discount_rate: &str,
) -> Result<BudgetInputs, ParseError> {
    let investment = parse_number(investment, InputField::Investment)?;
    let cash_flows = parse_cash_flows(cash_flows)?;
    let discount_rate = if discount_rate.trim().is_empty() {
        None
    } else {
        Some(parse_number(discount_rate, InputField::DiscountRate)?)
    };
    Ok(BudgetInputs {
        investment,
        cash_flows,
        discount_rate,
    })
}

/// 쉼표로 구분된 현금흐름 목록을 파싱한다. 빈 항목도 오류로 본다.
pub fn parse_cash_flows(text: &str) -> Result<CashFlowSeries, ParseError> {
    text.split(',')
        .enumerate()
        .map(|(i, part)| {
            parse_finite(part).ok_or_else(|| ParseError::InvalidCashFlow {
                position: i + 1,
                text: part.trim().to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(CashFlowSeries::new)
}

fn parse_number(text: &str, field: InputField) -> Result<f64, ParseError> {
    parse_finite(text).ok_or_else(|| ParseError::InvalidNumber {
        field,
        text: text.trim().to_string(),
    })
}

fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
