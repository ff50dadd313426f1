//! 내부수익률 계산용 근 찾기.
//!
//! Newton-Raphson으로 먼저 시도하고, 발산하거나 도함수가 0에 가까우면
//! 유한 구간에서 부호 변화를 찾아 이분법으로 넘어간다. 어느 쪽이든 실패하면
//! NaN 대신 `SolverError`를 돌려준다.

use thiserror::Error;
use tracing::{debug, warn};

/// 기본 수렴 허용오차.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// 기본 최대 반복 횟수.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// 근 찾기 실패 사유.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("no convergence after {iterations} iterations (residual {residual:.2e})")]
    ConvergenceFailed { iterations: u32, residual: f64 },
    #[error("f({a}) = {fa:.2e} and f({b}) = {fb:.2e} have the same sign")]
    InvalidBracket { a: f64, b: f64, fa: f64, fb: f64 },
    #[error("no sign change found in [{lower}, {upper}]")]
    NoBracket { lower: f64, upper: f64 },
}

/// 근 찾기 설정.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }
}

/// 근과 반복 통계.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    pub root: f64,
    pub iterations: u32,
    pub residual: f64,
}

/// 이분법. `f(a)`와 `f(b)`의 부호가 달라야 한다.
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> Result<SolverResult, SolverError>
where
    F: Fn(f64) -> f64,
{
    let mut lo = a.min(b);
    let mut hi = a.max(b);
    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo * f_hi > 0.0 {
        return Err(SolverError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }
    if f_lo.abs() < config.tolerance {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi.abs() < config.tolerance {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }

    for iteration in 0..config.max_iterations {
        let mid = (lo + hi) / 2.0;
        let f_mid = f(mid);
        if f_mid.abs() < config.tolerance || (hi - lo) / 2.0 < config.tolerance {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: f_mid,
            });
        }
        if f_mid * f_lo < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    let mid = (lo + hi) / 2.0;
    Err(SolverError::ConvergenceFailed {
        iterations: config.max_iterations,
        residual: f(mid).abs(),
    })
}

/// 발산 감시가 들어간 Newton-Raphson.
///
/// `domain_min` 이하로 내려가면 실패로 본다(할인율 -100% 이하 등).
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    domain_min: f64,
    config: &SolverConfig,
) -> Result<SolverResult, SolverError>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    const MAX_DIVERGENCE: u32 = 3;
    let mut x = initial_guess;
    let mut prev_residual = f64::MAX;
    let mut divergence_count = 0;

    for iteration in 0..config.max_iterations {
        let fx = f(x);
        let residual = fx.abs();
        if !fx.is_finite() {
            break;
        }
        if residual < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }
        if residual > prev_residual * 2.0 {
            divergence_count += 1;
            if divergence_count >= MAX_DIVERGENCE {
                break;
            }
        } else {
            divergence_count = 0;
        }
        prev_residual = residual;

        let dfx = df(x);
        if !dfx.is_finite() || dfx.abs() < 1e-15 {
            break;
        }
        let step = fx / dfx;
        x -= step;
        if !x.is_finite() || x <= domain_min {
            break;
        }
        if step.abs() < config.tolerance * (1.0 + x.abs()) {
            let fx = f(x);
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: fx,
            });
        }
    }

    Err(SolverError::ConvergenceFailed {
        iterations: config.max_iterations,
        residual: f(x).abs(),
    })
}

/// `[lower, upper]`를 `steps`등분해 처음으로 부호가 바뀌는 구간을 찾는다.
pub fn find_bracket<F>(f: F, lower: f64, upper: f64, steps: usize) -> Option<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let width = (upper - lower) / steps as f64;
    let mut a = lower;
    let mut fa = f(a);
    for i in 1..=steps {
        let b = lower + width * i as f64;
        let fb = f(b);
        if fa.is_finite() && fb.is_finite() && fa * fb <= 0.0 {
            return Some((a, b));
        }
        a = b;
        fa = fb;
    }
    None
}

/// IRR 탐색 구간 하한(소수, -99%).
pub const IRR_LOWER_BOUND: f64 = -0.99;
/// 첫 부호 변화 탐색 구간 상한(소수, 1000%).
pub const IRR_UPPER_BOUND: f64 = 10.0;
/// 구간을 열 배씩 넓혀 가며 찾는 최대 상한(소수, 1,000,000%).
pub const IRR_MAX_UPPER_BOUND: f64 = 10_000.0;
const IRR_INITIAL_GUESS: f64 = 0.1;
const IRR_SCAN_STEPS: usize = 2_000;
/// Newton 근으로 받아들일 잔차 한도(현금흐름 최대 절댓값 대비).
const IRR_RESIDUAL_RATIO: f64 = 1e-8;

/// `flows[0]`을 0기(할인 없음)로 보는 현금흐름의 내부수익률(소수)을 구한다.
///
/// Newton이 -100%보다 큰 근으로 수렴하면 크기와 상관없이 그 근을 쓴다.
/// 아니면 `[-99%, 1000%]`부터 상한을 열 배씩 넓혀 가며 부호 변화를 찾아 이분법으로 푼다.
pub fn solve_irr(flows: &[f64], config: &SolverConfig) -> Result<SolverResult, SolverError> {
    let npv = |rate: f64| {
        flows
            .iter()
            .enumerate()
            .map(|(t, cf)| cf / (1.0 + rate).powi(t as i32))
            .sum::<f64>()
    };
    let d_npv = |rate: f64| {
        flows
            .iter()
            .enumerate()
            .skip(1)
            .map(|(t, cf)| -(t as f64) * cf / (1.0 + rate).powi(t as i32 + 1))
            .sum::<f64>()
    };
    let scale = flows.iter().fold(1.0_f64, |m, cf| m.max(cf.abs()));

    match newton_raphson(npv, d_npv, IRR_INITIAL_GUESS, -1.0, config) {
        Ok(result) if result.residual.abs() <= IRR_RESIDUAL_RATIO * scale => {
            debug!(root = result.root, iterations = result.iterations, "irr via newton");
            return Ok(result);
        }
        Ok(result) => warn!(
            root = result.root,
            residual = result.residual,
            "newton stopped away from a root, falling back to bisection"
        ),
        Err(e) => warn!(error = %e, "newton failed, falling back to bisection"),
    }

    let mut lower = IRR_LOWER_BOUND;
    let mut upper = IRR_UPPER_BOUND;
    loop {
        if let Some((a, b)) = find_bracket(npv, lower, upper, IRR_SCAN_STEPS) {
            let result = bisection(npv, a, b, config)?;
            debug!(root = result.root, iterations = result.iterations, "irr via bisection");
            return Ok(result);
        }
        if upper >= IRR_MAX_UPPER_BOUND {
            return Err(SolverError::NoBracket {
                lower: IRR_LOWER_BOUND,
                upper,
            });
        }
        lower = upper;
        upper *= 10.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bisection_sqrt_2() {
        let result = bisection(|x| x * x - 2.0, 1.0, 2.0, &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-9);
    }

    #[test]
    fn bisection_rejects_same_sign_bracket() {
        let result = bisection(|x| x * x - 2.0, 2.0, 3.0, &SolverConfig::default());
        assert!(matches!(result, Err(SolverError::InvalidBracket { .. })));
    }

    #[test]
    fn newton_fails_on_flat_function() {
        let result = newton_raphson(|_| 1.0, |_| 0.0, 0.5, -1.0, &SolverConfig::default());
        assert!(matches!(result, Err(SolverError::ConvergenceFailed { .. })));
    }

    #[test]
    fn find_bracket_locates_sign_change() {
        let (a, b) = find_bracket(|x| x - 0.37, 0.0, 1.0, 100).unwrap();
        assert!(a <= 0.37 && 0.37 <= b);
        assert!(find_bracket(|x| x * x + 1.0, -1.0, 1.0, 100).is_none());
    }

    #[test]
    fn irr_simple_two_period() {
        let result = solve_irr(&[-100.0, 110.0], &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, 0.10, epsilon = 1e-9);
    }

    #[test]
    fn irr_falls_back_when_newton_leaves_domain() {
        // 큰 손실 뒤 작은 회수: 근이 -90% 근처라 10%에서 출발한 Newton은 구간을 벗어난다
        let flows = [-1000.0, 50.0, 50.0];
        let result = solve_irr(&flows, &SolverConfig::default()).unwrap();
        let npv: f64 = flows
            .iter()
            .enumerate()
            .map(|(t, cf)| cf / (1.0 + result.root).powi(t as i32))
            .sum();
        assert!(npv.abs() < 1e-5, "npv at root = {npv}");
        assert_relative_eq!(result.root, -0.75, epsilon = 1e-8);
        assert!(result.root > IRR_LOWER_BOUND && result.root < 0.0);
    }

    #[test]
    fn irr_accepts_newton_root_above_thousand_percent() {
        let result = solve_irr(&[-1.0, 1000.0], &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, 999.0, max_relative = 1e-9);
    }

    #[test]
    fn irr_without_real_root_is_error() {
        // 부호는 바뀌지만 NPV의 최댓값이 음수인 흐름
        let result = solve_irr(&[-100.0, 230.0, -140.0], &SolverConfig::default());
        assert!(
            matches!(
                result,
                Err(SolverError::NoBracket { upper, .. }) if upper == IRR_MAX_UPPER_BOUND
            ),
            "got {result:?}"
        );
    }
}
