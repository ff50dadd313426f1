//! 명령행 인자 정의.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::{Action, FormInputs};

#[derive(Debug, Parser)]
#[command(
    name = "capital_budgeting_cli",
    version,
    about = "Payback period, ARR, NPV, PI and IRR from the command line"
)]
pub struct Cli {
    /// 표시 언어: auto, en, ko
    #[arg(long, short = 'L', global = true, default_value = "auto")]
    pub lang: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Payback period
    Payback(FormArgs),
    /// Average (accounting) rate of return
    Arr(FormArgs),
    /// Discounted cash flows with NPV, PI and IRR
    Dcf(DcfArgs),
    /// Menu-driven session
    Interactive,
}

#[derive(Debug, Clone, Args)]
pub struct FormArgs {
    /// Initial investment (positive)
    #[arg(long, short = 'i', allow_hyphen_values = true)]
    pub investment: String,
    /// Comma-separated cash flows, e.g. "400,400,400"
    #[arg(long, short = 'c', allow_hyphen_values = true)]
    pub cash_flows: String,
    /// Discount rate in percent
    #[arg(long, short = 'r', default_value = "", allow_hyphen_values = true)]
    pub discount_rate: String,
}

#[derive(Debug, Clone, Args)]
pub struct DcfArgs {
    #[command(flatten)]
    pub form: FormArgs,
    /// Write the CSV to this path instead of the default location
    #[arg(long, conflicts_with = "no_export")]
    pub export: Option<PathBuf>,
    /// Skip writing the CSV
    #[arg(long)]
    pub no_export: bool,
}

impl From<&FormArgs> for FormInputs {
    fn from(args: &FormArgs) -> Self {
        FormInputs::new(&*args.investment, &*args.cash_flows, &*args.discount_rate)
    }
}

impl Command {
    /// 계산 명령이면 (종류, 입력)을 돌려준다.
    pub fn action(&self) -> Option<(Action, &FormArgs)> {
        match self {
            Command::Payback(form) => Some((Action::Payback, form)),
            Command::Arr(form) => Some((Action::Arr, form)),
            Command::Dcf(dcf) => Some((Action::Dcf, &dcf.form)),
            Command::Interactive => None,
        }
    }
}
