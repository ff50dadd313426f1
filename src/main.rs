use std::process::ExitCode;

use capital_budgeting::app::{self, AppError};
use capital_budgeting::budgeting::CalculationOutcome;
use capital_budgeting::cli::{Cli, Command};
use capital_budgeting::{config, i18n, logging, ui_cli};
use clap::Parser;

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 명령을 실행한다.
fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();
    match try_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let mut cfg = config::load_or_default()?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());

    let command = cli.command.unwrap_or(Command::Interactive);
    let Some((action, form)) = command.action() else {
        return app::run(&mut cfg, &tr);
    };

    let outcome = app::calculate(action, &form.into())?;
    println!("{}", capital_budgeting::report::outcome_text(&tr, &outcome));
    if let (Command::Dcf(dcf), CalculationOutcome::Dcf(summary)) = (&command, &outcome) {
        for (period, value) in capital_budgeting::report::table_rows(summary.rows()) {
            println!("{period}\t{value}");
        }
        if !dcf.no_export && (cfg.auto_export || dcf.export.is_some()) {
            match app::export_summary(&cfg, summary, dcf.export.as_deref()) {
                Ok(path) => println!(
                    "{}",
                    tr.fill(
                        i18n::keys::NOTICE_EXPORT_DONE,
                        &[("path", path.display().to_string())]
                    )
                ),
                Err(e) => {
                    let err = AppError::Export(e);
                    if !err.is_warning() {
                        return Err(err);
                    }
                    ui_cli::print_notice(&tr, &err);
                }
            }
        }
    }
    Ok(())
}
