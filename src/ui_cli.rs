use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::app::{self, Action, AppError, FormInputs};
use crate::budgeting::CalculationOutcome;
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::report;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Calculate(Action),
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다. 입력이 끝나면 `Exit`.
pub fn main_menu<R: BufRead>(tr: &Translator, input: &mut R) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_PAYBACK,
        keys::MAIN_MENU_ARR,
        keys::MAIN_MENU_DCF,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let Some(sel) = read_line(input, &tr.t(keys::PROMPT_MENU_SELECT))? else {
            debug!("input closed at main menu");
            return Ok(MenuChoice::Exit);
        };
        if let Some(choice) = parse_menu_choice(&sel) {
            return Ok(choice);
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    }
}

/// 메뉴 번호를 선택지로 바꾼다.
pub fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" => Some(MenuChoice::Calculate(Action::Payback)),
        "2" => Some(MenuChoice::Calculate(Action::Arr)),
        "3" => Some(MenuChoice::Calculate(Action::Dcf)),
        "4" => Some(MenuChoice::Settings),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 입력을 받아 계산하고 결과(또는 오류 알림)를 출력한다.
///
/// 입력/계산 오류는 알림만 하고 메뉴로 돌아간다. 콘솔 입출력 오류만 전파한다.
/// 입력 도중 끝에 닿으면 아무것도 계산하지 않는다.
pub fn handle_action<R: BufRead>(
    tr: &Translator,
    cfg: &Config,
    action: Action,
    input: &mut R,
) -> Result<(), AppError> {
    let Some(investment) = read_line(input, &tr.t(keys::PROMPT_INVESTMENT))? else {
        return Ok(());
    };
    let Some(cash_flows) = read_line(input, &tr.t(keys::PROMPT_CASH_FLOWS))? else {
        return Ok(());
    };
    let discount_rate = if action == Action::Dcf {
        match read_line(input, &tr.t(keys::PROMPT_DISCOUNT_RATE))? {
            Some(rate) => rate,
            None => return Ok(()),
        }
    } else {
        String::new()
    };
    let form = FormInputs::new(investment, cash_flows, discount_rate);
    match app::calculate(action, &form) {
        Ok(outcome) => print_outcome(tr, cfg, &outcome, cfg.auto_export),
        Err(e @ (AppError::Io(_) | AppError::Config(_))) => return Err(e),
        Err(e) => print_notice(tr, &e),
    }
    Ok(())
}

/// 결과와 할인 현금흐름 표를 출력하고, 필요하면 CSV로 저장한다.
pub fn print_outcome(tr: &Translator, cfg: &Config, outcome: &CalculationOutcome, export: bool) {
    println!("{}", report::outcome_text(tr, outcome));
    if let CalculationOutcome::Dcf(summary) = outcome {
        println!("{:>6}  {:>22}", tr.t(keys::TABLE_YEAR), tr.t(keys::TABLE_DCF));
        for (period, value) in report::table_rows(summary.rows()) {
            println!("{period:>6}  {value:>22}");
        }
        if export {
            match app::export_summary(cfg, summary, None) {
                Ok(path) => println!(
                    "{}",
                    tr.fill(keys::NOTICE_EXPORT_DONE, &[("path", path.display().to_string())])
                ),
                Err(e) => print_notice(tr, &AppError::Export(e)),
            }
        }
    }
}

/// 오류/경고를 사용자 알림 형태로 출력한다.
pub fn print_notice(tr: &Translator, err: &AppError) {
    let prefix = if err.is_warning() {
        tr.t(keys::WARNING_PREFIX)
    } else {
        tr.t(keys::ERROR_PREFIX)
    };
    eprintln!("{prefix} ({}): {err}", tr.t(err.notice_key()));
}

/// 설정 메뉴를 처리한다. 변경이 있으면 true.
pub fn handle_settings<R: BufRead>(
    tr: &Translator,
    cfg: &mut Config,
    input: &mut R,
) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{}: {}", tr.t(keys::SETTINGS_AUTO_EXPORT), cfg.auto_export);
    let Some(sel) = read_line(input, &tr.t(keys::SETTINGS_PROMPT_AUTO_EXPORT))? else {
        return Ok(false);
    };
    let auto_export = match sel.trim().to_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => return Ok(false),
    };
    cfg.auto_export = auto_export;
    Ok(true)
}

/// 설정을 `path`에 저장하고 결과를 알린다. 실패해도 세션은 계속된다.
pub fn save_settings(tr: &Translator, cfg: &Config, path: &Path) -> bool {
    match cfg.save_to(path) {
        Ok(()) => {
            println!("{}", tr.t(keys::SETTINGS_SAVED));
            true
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "settings not saved");
            print_notice(tr, &AppError::Config(e));
            false
        }
    }
}

/// 프롬프트를 출력하고 한 줄을 읽는다. 입력이 끝났으면 `None`.
pub fn read_line<R: BufRead>(input: &mut R, prompt: &str) -> Result<Option<String>, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        println!();
        return Ok(None);
    }
    Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
}
