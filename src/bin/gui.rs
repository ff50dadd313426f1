#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use capital_budgeting::{
    app::{self, Action, AppError, FormInputs},
    budgeting::{CalculationOutcome, DcfSummary},
    config, export, i18n, logging, report,
};
use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path, path::PathBuf};
use tracing::{info, warn};

const BG: egui::Color32 = egui::Color32::from_rgb(0xe8, 0xf0, 0xf2);
const PAYBACK_COLOR: egui::Color32 = egui::Color32::from_rgb(0x4c, 0xaf, 0x50);
const ARR_COLOR: egui::Color32 = egui::Color32::from_rgb(0x21, 0x96, 0xf3);
const DCF_COLOR: egui::Color32 = egui::Color32::from_rgb(0xff, 0x57, 0x22);

fn main() -> Result<(), eframe::Error> {
    logging::init();

    // 언어 옵션: --lang xx 또는 --lang=xx (xx: auto/en/ko)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let app_cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config.toml unreadable, using defaults");
            config::Config::default()
        }
    };
    let lang = i18n::resolve_language(
        cli_lang.as_deref().unwrap_or("auto"),
        Some(app_cfg.language.as_str()),
    );

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([600.0, 600.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Capital Budgeting Calculator",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                warn!("{e}");
            }
            Box::new(GuiApp::new(app_cfg, &lang))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width: w,
        height: h,
    })
}

/// 바이너리 폰트 바이트를 egui 기본 글꼴 앞에 등록한다.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(name.to_string(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .insert(0, name.to_string());
    }
    ctx.set_fonts(fonts);
}

/// 한글 표시용 시스템 폰트를 찾아 적용한다. 못 찾으면 기본 폰트를 유지한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<PathBuf> = vec![PathBuf::from("assets/fonts/NanumGothic.ttf")];
    if let Some(windir) = env::var_os("WINDIR") {
        let dir = Path::new(&windir).join("Fonts");
        candidates.push(dir.join("malgun.ttf"));
        candidates.push(dir.join("gulim.ttc"));
    }
    candidates.push(PathBuf::from("/System/Library/Fonts/AppleSDGothicNeo.ttc"));
    candidates.push(PathBuf::from(
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    ));
    candidates.push(PathBuf::from("/usr/share/fonts/truetype/nanum/NanumGothic.ttf"));

    let found = candidates
        .iter()
        .find(|p| p.exists())
        .ok_or_else(|| "No CJK font found; Korean text may not render.".to_string())?;
    let bytes = fs::read(found).map_err(|e| format!("Failed to read font ({}): {e}", found.display()))?;
    apply_font_bytes(ctx, bytes, "cjk_font");
    info!(font = %found.display(), "loaded font");
    Ok(())
}

/// 알림 창 내용.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Notice {
    title: String,
    body: String,
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    form: FormInputs,
    result_text: Option<String>,
    table: Vec<(String, String)>,
    last_dcf: Option<DcfSummary>,
    notice: Option<Notice>,
    // 설정
    show_settings: bool,
    lang_input: String,
    export_dir_input: String,
    settings_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config, lang: &str) -> Self {
        let tr = i18n::Translator::new_with_pack(lang, config.language_pack_dir.as_deref());
        let export_dir_input = config
            .export_dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        Self {
            lang_input: config.language.clone(),
            config,
            tr,
            form: FormInputs::default(),
            result_text: None,
            table: Vec::new(),
            last_dcf: None,
            notice: None,
            show_settings: false,
            export_dir_input,
            settings_status: None,
        }
    }

    /// 버튼 하나의 계산을 수행한다. 실패하면 알림만 띄우고 이전 결과는 그대로 둔다.
    fn run_action(&mut self, action: Action) {
        match app::calculate(action, &self.form) {
            Ok(outcome) => {
                self.result_text = Some(report::outcome_text(&self.tr, &outcome));
                if let CalculationOutcome::Dcf(summary) = outcome {
                    self.table = report::table_rows(summary.rows());
                    if self.config.auto_export {
                        self.export_to(&summary, None);
                    }
                    self.last_dcf = Some(summary);
                }
            }
            Err(e) => self.show_error(&e),
        }
    }

    fn export_to(&mut self, summary: &DcfSummary, path: Option<&Path>) {
        match app::export_summary(&self.config, summary, path) {
            Ok(path) => {
                self.notice = Some(Notice {
                    title: self.tr.t(i18n::keys::APP_TITLE),
                    body: self.tr.fill(
                        i18n::keys::NOTICE_EXPORT_DONE,
                        &[("path", path.display().to_string())],
                    ),
                });
            }
            Err(e) => self.show_error(&AppError::Export(e)),
        }
    }

    /// "다른 이름으로 저장": 저장할 표가 없으면 대화상자 없이 경고한다.
    fn save_as(&mut self) {
        let Some(summary) = self.last_dcf.clone() else {
            self.show_error(&AppError::Export(export::ExportError::NothingToExport));
            return;
        };
        if summary.rows().is_empty() {
            self.show_error(&AppError::Export(export::ExportError::NothingToExport));
            return;
        }
        let picked = FileDialog::new()
            .set_file_name(export::EXPORT_FILE_NAME)
            .add_filter("CSV", &["csv"])
            .save_file();
        if let Some(path) = picked {
            self.export_to(&summary, Some(&path));
        }
    }

    fn show_error(&mut self, err: &AppError) {
        let prefix = if err.is_warning() {
            i18n::keys::WARNING_PREFIX
        } else {
            i18n::keys::ERROR_PREFIX
        };
        self.notice = Some(Notice {
            title: format!("{} - {}", self.tr.t(prefix), self.tr.t(err.notice_key())),
            body: err.to_string(),
        });
    }

    fn save_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        let dir = self.export_dir_input.trim();
        self.config.export_dir = (!dir.is_empty()).then(|| PathBuf::from(dir));
        let lang = i18n::resolve_language(&self.config.language, None);
        self.tr = i18n::Translator::new_with_pack(&lang, self.config.language_pack_dir.as_deref());
        self.settings_status = Some(match self.config.save() {
            Ok(()) => self.tr.t(i18n::keys::SETTINGS_SAVED),
            Err(e) => format!("{}: {e}", self.tr.t(i18n::keys::ERROR_PREFIX)),
        });
    }

    fn ui_form(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        egui::Grid::new("input_grid")
            .num_columns(2)
            .spacing([10.0, 8.0])
            .show(ui, |ui| {
                for (key, value) in [
                    (i18n::keys::LABEL_INVESTMENT, &mut self.form.investment),
                    (i18n::keys::LABEL_CASH_FLOWS, &mut self.form.cash_flows),
                    (i18n::keys::LABEL_DISCOUNT_RATE, &mut self.form.discount_rate),
                ] {
                    ui.label(egui::RichText::new(tr.t(key)).size(15.0));
                    ui.add(egui::TextEdit::singleline(value).desired_width(200.0));
                    ui.end_row();
                }
            });
    }

    fn ui_buttons(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let colored = |text: String, fill: egui::Color32| {
            egui::Button::new(egui::RichText::new(text).color(egui::Color32::WHITE).size(15.0))
                .fill(fill)
        };
        ui.horizontal(|ui| {
            if ui.add(colored(tr.t(i18n::keys::BUTTON_PAYBACK), PAYBACK_COLOR)).clicked() {
                self.run_action(Action::Payback);
            }
            if ui.add(colored(tr.t(i18n::keys::BUTTON_ARR), ARR_COLOR)).clicked() {
                self.run_action(Action::Arr);
            }
        });
        ui.add_space(6.0);
        if ui.add(colored(tr.t(i18n::keys::BUTTON_DCF), DCF_COLOR)).clicked() {
            self.run_action(Action::Dcf);
        }
    }

    fn ui_results(&mut self, ui: &mut egui::Ui) {
        let text = self
            .result_text
            .clone()
            .unwrap_or_else(|| self.tr.t(i18n::keys::RESULT_PLACEHOLDER));
        ui.label(egui::RichText::new(text).size(17.0));
        ui.add_space(10.0);

        egui::ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
            egui::Grid::new("dcf_table")
                .num_columns(2)
                .striped(true)
                .min_col_width(120.0)
                .show(ui, |ui| {
                    ui.strong(self.tr.t(i18n::keys::TABLE_YEAR));
                    ui.strong(self.tr.t(i18n::keys::TABLE_DCF));
                    ui.end_row();
                    for (period, value) in &self.table {
                        ui.label(period.as_str());
                        ui.label(value.as_str());
                        ui.end_row();
                    }
                });
        });
        ui.add_space(6.0);
        if ui.button(self.tr.t(i18n::keys::BUTTON_SAVE_AS)).clicked() {
            self.save_as();
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let tr = self.tr.clone();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(tr.t(i18n::keys::APP_TITLE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(tr.t(i18n::keys::SETTINGS_BUTTON)).clicked() {
                        self.show_settings = true;
                    }
                });
            });
        });

        if self.show_settings {
            let mut save = false;
            egui::Window::new(tr.t(i18n::keys::SETTINGS_HEADING).trim().to_string())
                .collapsible(false)
                .resizable(false)
                .open(&mut self.show_settings)
                .show(ctx, |ui| {
                    ui.label(tr.t(i18n::keys::SETTINGS_LANGUAGE));
                    egui::ComboBox::from_id_source("lang_choice")
                        .selected_text(self.lang_input.clone())
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut self.lang_input, "auto".into(), "auto");
                            ui.selectable_value(&mut self.lang_input, "en".into(), "English");
                            ui.selectable_value(&mut self.lang_input, "ko".into(), "한국어");
                        });
                    ui.separator();
                    ui.checkbox(
                        &mut self.config.auto_export,
                        tr.t(i18n::keys::SETTINGS_AUTO_EXPORT),
                    );
                    ui.label(tr.t(i18n::keys::SETTINGS_EXPORT_DIR));
                    ui.text_edit_singleline(&mut self.export_dir_input);
                    ui.separator();
                    if ui.button(tr.t(i18n::keys::SETTINGS_SAVE)).clicked() {
                        save = true;
                    }
                    if let Some(msg) = &self.settings_status {
                        ui.label(msg.as_str());
                    }
                });
            if save {
                self.save_settings();
            }
        }

        if let Some(notice) = self.notice.clone() {
            let mut open = true;
            let mut close = false;
            egui::Window::new(notice.title)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.label(notice.body);
                    if ui.button(tr.t(i18n::keys::NOTICE_CLOSE)).clicked() {
                        close = true;
                    }
                });
            if !open || close {
                self.notice = None;
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).fill(BG))
            .show(ctx, |ui| {
                ui.visuals_mut().override_text_color = Some(egui::Color32::BLACK);
                ui.vertical_centered(|ui| {
                    ui.add_space(10.0);
                    self.ui_form(ui);
                    ui.add_space(10.0);
                    self.ui_buttons(ui);
                    ui.add_space(10.0);
                    self.ui_results(ui);
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_without_export() -> GuiApp {
        let cfg = config::Config {
            auto_export: false,
            ..config::Config::default()
        };
        GuiApp::new(cfg, "en")
    }

    #[test]
    fn dcf_fills_result_and_table() {
        let mut app = app_without_export();
        app.form = FormInputs::new("1000", "400,400,400", "10");
        app.run_action(Action::Dcf);
        assert_eq!(
            app.result_text.as_deref(),
            Some("NPV: -5.26, PI: 0.99, IRR: 9.70%")
        );
        assert_eq!(app.table.len(), 3);
        assert_eq!(app.table[0], ("1".to_string(), "363.64".to_string()));
        assert!(app.notice.is_none());
    }

    #[test]
    fn failed_action_keeps_previous_result() {
        let mut app = app_without_export();
        app.form = FormInputs::new("100", "50,50", "");
        app.run_action(Action::Payback);
        assert_eq!(app.result_text.as_deref(), Some("Payback Period: 2 years"));

        app.form.investment = "abc".into();
        app.run_action(Action::Arr);
        assert_eq!(app.result_text.as_deref(), Some("Payback Period: 2 years"));
        let notice = app.notice.expect("input error notice");
        assert!(notice.title.contains("Input Error"));
    }

    #[test]
    fn dcf_without_rate_is_input_error() {
        let mut app = app_without_export();
        app.form = FormInputs::new("100", "50,50", " ");
        app.run_action(Action::Dcf);
        assert!(app.result_text.is_none());
        assert!(app.table.is_empty());
        assert!(app.notice.is_some());
    }

    #[test]
    fn save_as_without_rows_warns() {
        let mut app = app_without_export();
        app.save_as();
        let notice = app.notice.expect("warning notice");
        assert!(notice.title.starts_with("Warning"));
    }
}
