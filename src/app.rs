use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::budgeting::{
    self, CalculationError, CalculationOutcome, DcfSummary, ParseError,
};
use crate::config::{Config, ConfigError, CONFIG_PATH};
use crate::export::{self, ExportError};
use crate::i18n::{self, Translator};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 콘솔 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("settings error: {0}")]
    Config(#[from] ConfigError),
    /// 입력값 파싱 오류
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// 계산 오류
    #[error("{0}")]
    Calculation(#[from] CalculationError),
    /// CSV 내보내기 오류
    #[error("{0}")]
    Export(#[from] ExportError),
}

impl AppError {
    /// 알림 창 제목에 쓸 번역 키.
    pub fn notice_key(&self) -> &'static str {
        match self {
            AppError::Parse(_) => i18n::keys::NOTICE_INPUT_ERROR,
            AppError::Calculation(_) => i18n::keys::NOTICE_CALC_ERROR,
            AppError::Export(_) => i18n::keys::NOTICE_EXPORT_ERROR,
            AppError::Io(_) | AppError::Config(_) => i18n::keys::ERROR_PREFIX,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, AppError::Export(e) if e.is_warning())
    }
}

/// 버튼(또는 메뉴)으로 실행하는 계산 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Payback,
    Arr,
    Dcf,
}

/// 입력 칸의 원문 텍스트.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInputs {
    pub investment: String,
    pub cash_flows: String,
    pub discount_rate: String,
}

impl FormInputs {
    pub fn new(
        investment: impl Into<String>,
        cash_flows: impl Into<String>,
        discount_rate: impl Into<String>,
    ) -> Self {
        Self {
            investment: investment.into(),
            cash_flows: cash_flows.into(),
            discount_rate: discount_rate.into(),
        }
    }
}

/// 입력을 파싱하고 요청한 계산 하나를 끝까지 수행한다.
pub fn calculate(action: Action, form: &FormInputs) -> Result<CalculationOutcome, AppError> {
    let inputs = budgeting::parse_inputs(&form.investment, &form.cash_flows, &form.discount_rate)?;
    let flows = inputs.cash_flows.as_slice();
    debug!(?action, investment = inputs.investment, periods = flows.len(), "calculate");
    let outcome = match action {
        Action::Payback => {
            CalculationOutcome::Payback(budgeting::payback_period(inputs.investment, flows))
        }
        Action::Arr => CalculationOutcome::Arr(budgeting::average_rate_of_return(
            inputs.investment,
            flows,
        )?),
        Action::Dcf => {
            let rate = inputs.require_discount_rate()?;
            CalculationOutcome::Dcf(budgeting::evaluate_dcf(inputs.investment, flows, rate)?)
        }
    };
    Ok(outcome)
}

/// 할인 현금흐름을 `path`(없으면 설정의 기본 경로)에 저장한다.
pub fn export_summary(
    config: &Config,
    summary: &DcfSummary,
    path: Option<&Path>,
) -> Result<PathBuf, ExportError> {
    let target = match path {
        Some(p) => p.to_path_buf(),
        None => export::default_export_path(config),
    };
    export::export_discounted_cash_flows(summary.rows(), &target)
}

/// CLI 대화형 모드의 메인 루프를 실행한다.
pub fn run(config: &mut Config, tr: &Translator) -> Result<(), AppError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    run_with_input(config, tr, &mut input, Path::new(CONFIG_PATH))
}

/// `input`에서 메뉴 입력을 읽는 대화형 루프. 설정은 `config_path`에 저장한다.
///
/// 입력이 끝나면 종료 메뉴를 고른 것과 같다.
pub fn run_with_input<R: BufRead>(
    config: &mut Config,
    tr: &Translator,
    input: &mut R,
    config_path: &Path,
) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr, input)? {
            MenuChoice::Calculate(action) => ui_cli::handle_action(tr, config, action, input)?,
            MenuChoice::Settings => {
                if ui_cli::handle_settings(tr, config, input)? {
                    ui_cli::save_settings(tr, config, config_path);
                }
            }
            MenuChoice::Exit => {
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
