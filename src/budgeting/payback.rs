use tracing::debug;

/// 회수기간 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payback {
    /// 누적 현금흐름이 투자비 이상이 되는 최초 기간(1부터)
    Achieved(usize),
    /// 분석 기간 안에 회수되지 않음
    NotAchieved,
}

impl Payback {
    pub fn periods(&self) -> Option<usize> {
        match self {
            Payback::Achieved(n) => Some(*n),
            Payback::NotAchieved => None,
        }
    }
}

/// 현금흐름을 순서대로 누적해 투자비를 회수하는 기간을 구한다.
///
/// 음수 현금흐름도 그대로 더하므로 회수가 늦어지거나 불가능해질 수 있다.
pub fn payback_period(investment: f64, cash_flows: &[f64]) -> Payback {
    let mut cumulative = 0.0;
    for (i, cash_flow) in cash_flows.iter().enumerate() {
        cumulative += cash_flow;
        if cumulative >= investment {
            debug!(investment, period = i + 1, "payback achieved");
            return Payback::Achieved(i + 1);
        }
    }
    debug!(investment, cumulative, "payback not achieved");
    Payback::NotAchieved
}
