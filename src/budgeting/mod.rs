//! 투자안 경제성 평가(회수기간, 평균이익률, 현금흐름 할인) 계산 모듈 모음.

pub mod arr;
pub mod dcf;
pub mod input;
pub mod payback;

pub use arr::{average_rate_of_return, ArrResult};
pub use dcf::{
    discount_cash_flows, evaluate_dcf, internal_rate_of_return, DcfSummary,
    DiscountedCashFlowRow, DiscountedCashFlows,
};
pub use input::{parse_inputs, BudgetInputs, ParseError};
pub use payback::{payback_period, Payback};

use thiserror::Error;

use crate::solver::SolverError;

/// 계산 단계에서 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    /// 초기 투자비가 0이라 나눗셈이 정의되지 않음
    #[error("initial investment is zero; the ratio is undefined")]
    ZeroInvestment,
    /// 현금흐름이 비어 평균을 낼 수 없음
    #[error("no cash flows were given")]
    EmptyCashFlows,
    /// 할인율이 -100% 이하
    #[error("discount rate must be greater than -100% (got {0}%)")]
    InvalidDiscountRate(f64),
    /// 부호 변화가 없어 IRR 근이 존재하지 않음
    #[error("internal rate of return is undefined for these cash flows")]
    IrrUndefined,
    /// 수치 해법이 수렴하지 않음
    #[error("internal rate of return did not converge: {0}")]
    IrrNotConverged(#[from] SolverError),
}

/// 기간별 현금흐름 목록. 입력 순서가 곧 시간 순서다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CashFlowSeries(Vec<f64>);

impl CashFlowSeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f64>> for CashFlowSeries {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl AsRef<[f64]> for CashFlowSeries {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// 마지막으로 화면에 표시할 계산 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculationOutcome {
    Payback(Payback),
    Arr(ArrResult),
    Dcf(DcfSummary),
}
