use tracing::debug;

use super::CalculationError;
use crate::solver::{self, SolverConfig};

/// 기간별 할인 현금흐름 한 줄.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountedCashFlowRow {
    /// 기간(1부터)
    pub period: usize,
    /// 현재가치로 할인된 현금흐름
    pub value: f64,
}

/// 할인 현금흐름 계산 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountedCashFlows {
    pub rows: Vec<DiscountedCashFlowRow>,
    /// 할인 현금흐름 합계
    pub present_value_sum: f64,
    /// 순현재가치 = -투자비 + 합계
    pub npv: f64,
    /// 수익성지수 = 합계 / 투자비
    pub profitability_index: f64,
}

/// NPV/PI/IRR 일괄 계산 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct DcfSummary {
    pub flows: DiscountedCashFlows,
    /// 내부수익률 [%]
    pub irr_percent: f64,
}

impl DcfSummary {
    pub fn npv(&self) -> f64 {
        self.flows.npv
    }

    pub fn profitability_index(&self) -> f64 {
        self.flows.profitability_index
    }

    pub fn rows(&self) -> &[DiscountedCashFlowRow] {
        &self.flows.rows
    }
}

/// 각 기간 현금흐름을 `(1 + r/100)^기간`으로 할인하고 NPV, PI를 구한다.
pub fn discount_cash_flows(
    investment: f64,
    cash_flows: &[f64],
    discount_rate_percent: f64,
) -> Result<DiscountedCashFlows, CalculationError> {
    let base = 1.0 + discount_rate_percent / 100.0;
    if base <= 0.0 {
        return Err(CalculationError::InvalidDiscountRate(discount_rate_percent));
    }
    if investment == 0.0 {
        return Err(CalculationError::ZeroInvestment);
    }

    let rows: Vec<DiscountedCashFlowRow> = cash_flows
        .iter()
        .enumerate()
        .map(|(i, cf)| DiscountedCashFlowRow {
            period: i + 1,
            value: cf / base.powi(i as i32 + 1),
        })
        .collect();
    let present_value_sum: f64 = rows.iter().map(|r| r.value).sum();
    let npv = -investment + present_value_sum;
    let profitability_index = present_value_sum / investment;
    debug!(
        investment,
        discount_rate_percent, present_value_sum, npv, profitability_index, "discounted cash flows"
    );
    Ok(DiscountedCashFlows {
        rows,
        present_value_sum,
        npv,
        profitability_index,
    })
}

/// NPV가 0이 되는 할인율[%]을 구한다.
///
/// `[-투자비, 현금흐름...]`에 부호 변화가 없으면 근이 없으므로 `IrrUndefined`.
pub fn internal_rate_of_return(
    investment: f64,
    cash_flows: &[f64],
) -> Result<f64, CalculationError> {
    let flows: Vec<f64> = std::iter::once(-investment)
        .chain(cash_flows.iter().copied())
        .collect();
    let has_positive = flows.iter().any(|v| *v > 0.0);
    let has_negative = flows.iter().any(|v| *v < 0.0);
    if !(has_positive && has_negative) {
        return Err(CalculationError::IrrUndefined);
    }
    let result = solver::solve_irr(&flows, &SolverConfig::default())?;
    Ok(result.root * 100.0)
}

/// 할인 현금흐름, NPV, PI, IRR을 한 번에 계산한다. 하나라도 실패하면 전체가 실패한다.
pub fn evaluate_dcf(
    investment: f64,
    cash_flows: &[f64],
    discount_rate_percent: f64,
) -> Result<DcfSummary, CalculationError> {
    let flows = discount_cash_flows(investment, cash_flows, discount_rate_percent)?;
    let irr_percent = internal_rate_of_return(investment, cash_flows)?;
    Ok(DcfSummary { flows, irr_percent })
}
