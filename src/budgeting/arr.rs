use tracing::debug;

use super::CalculationError;

/// 평균이익률(ARR) 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrResult {
    /// 평균 현금흐름 / 투자비 × 100 [%]. 반올림하지 않은 값
    pub percent: f64,
}

impl ArrResult {
    /// 표시용 소수 둘째 자리 반올림 값.
    pub fn rounded(&self) -> f64 {
        (self.percent * 100.0).round() / 100.0
    }
}

/// 평균 현금흐름을 투자비로 나눈 백분율을 계산한다.
pub fn average_rate_of_return(
    investment: f64,
    cash_flows: &[f64],
) -> Result<ArrResult, CalculationError> {
    if cash_flows.is_empty() {
        return Err(CalculationError::EmptyCashFlows);
    }
    if investment == 0.0 {
        return Err(CalculationError::ZeroInvestment);
    }
    let mean = cash_flows.iter().sum::<f64>() / cash_flows.len() as f64;
    let percent = mean / investment * 100.0;
    debug!(investment, mean, percent, "average rate of return");
    Ok(ArrResult { percent })
}
