use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const APP_TITLE: &str = "app.title";
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const WARNING_PREFIX: &str = "general.warning_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const LABEL_INVESTMENT: &str = "form.investment";
    pub const LABEL_CASH_FLOWS: &str = "form.cash_flows";
    pub const LABEL_DISCOUNT_RATE: &str = "form.discount_rate";
    pub const BUTTON_PAYBACK: &str = "form.button_payback";
    pub const BUTTON_ARR: &str = "form.button_arr";
    pub const BUTTON_DCF: &str = "form.button_dcf";
    pub const BUTTON_SAVE_AS: &str = "form.button_save_as";
    pub const RESULT_PLACEHOLDER: &str = "form.result_placeholder";

    pub const TABLE_YEAR: &str = "table.year";
    pub const TABLE_DCF: &str = "table.discounted_cash_flow";

    pub const RESULT_PAYBACK: &str = "result.payback";
    pub const RESULT_PAYBACK_NOT_ACHIEVED: &str = "result.payback_not_achieved";
    pub const RESULT_ARR: &str = "result.arr";
    pub const RESULT_DCF: &str = "result.dcf";

    pub const NOTICE_INPUT_ERROR: &str = "notice.input_error";
    pub const NOTICE_CALC_ERROR: &str = "notice.calculation_error";
    pub const NOTICE_EXPORT_ERROR: &str = "notice.export_error";
    pub const NOTICE_EXPORT_DONE: &str = "notice.export_done";
    pub const NOTICE_CLOSE: &str = "notice.close";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_PAYBACK: &str = "main_menu.payback";
    pub const MAIN_MENU_ARR: &str = "main_menu.arr";
    pub const MAIN_MENU_DCF: &str = "main_menu.dcf";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const PROMPT_INVESTMENT: &str = "prompt.investment";
    pub const PROMPT_CASH_FLOWS: &str = "prompt.cash_flows";
    pub const PROMPT_DISCOUNT_RATE: &str = "prompt.discount_rate";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_BUTTON: &str = "settings.button";
    pub const SETTINGS_LANGUAGE: &str = "settings.language";
    pub const SETTINGS_AUTO_EXPORT: &str = "settings.auto_export";
    pub const SETTINGS_EXPORT_DIR: &str = "settings.export_dir";
    pub const SETTINGS_SAVE: &str = "settings.save";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const SETTINGS_PROMPT_AUTO_EXPORT: &str = "settings.prompt_auto_export";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Ko,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.to_lowercase().starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ko => "ko",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(en/ko)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아 번역기를 생성한다.
    /// 디렉터리나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: pack_dir.and_then(|dir| load_overrides(dir, lang_code)),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 언어팩에서 키를 찾는다. 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 한국어 번역이 없으면 영어 문자열로 폴백한다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let built_in = match self.lang {
            Language::Ko => ko(key).unwrap_or_else(|| en(key)),
            Language::En => en(key),
        };
        built_in.to_string()
    }

    /// `{name}` 자리표시자를 채운 번역을 돌려준다.
    pub fn fill(&self, key: &str, vars: &[(&str, String)]) -> String {
        let mut out = self.t(key);
        for (k, v) in vars {
            out = out.replace(&format!("{{{k}}}"), v);
        }
        out
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(code) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(code);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. `<dir>/<code>.toml`, 형식은 key = "value".
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn en(key: &str) -> &'static str {
    use keys::*;
    match key {
        APP_TITLE => "Capital Budgeting Calculator",
        ERROR_PREFIX => "Error",
        WARNING_PREFIX => "Warning",
        APP_EXIT => "Exiting application.",
        LABEL_INVESTMENT => "Initial Investment:",
        LABEL_CASH_FLOWS => "Cash Flows (comma-separated):",
        LABEL_DISCOUNT_RATE => "Discount Rate (%):",
        BUTTON_PAYBACK => "Calculate Payback",
        BUTTON_ARR => "Calculate ARR",
        BUTTON_DCF => "Calculate NPV, PI, IRR",
        BUTTON_SAVE_AS => "Save CSV as…",
        RESULT_PLACEHOLDER => "Result will be displayed here",
        TABLE_YEAR => "Year",
        TABLE_DCF => "Discounted Cash Flow",
        RESULT_PAYBACK => "Payback Period: {periods} years",
        RESULT_PAYBACK_NOT_ACHIEVED => "Payback Period: Not achieved",
        RESULT_ARR => "ARR: {arr}%",
        RESULT_DCF => "NPV: {npv}, PI: {pi}, IRR: {irr}%",
        NOTICE_INPUT_ERROR => "Input Error",
        NOTICE_CALC_ERROR => "Calculation Error",
        NOTICE_EXPORT_ERROR => "Export Error",
        NOTICE_EXPORT_DONE => "Discounted cash flows have been saved to '{path}'.",
        NOTICE_CLOSE => "Close",
        MAIN_MENU_TITLE => "\n=== Capital Budgeting Calculator ===",
        MAIN_MENU_PAYBACK => "1) Payback period",
        MAIN_MENU_ARR => "2) Average rate of return",
        MAIN_MENU_DCF => "3) NPV, PI, IRR",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        PROMPT_INVESTMENT => "Initial investment: ",
        PROMPT_CASH_FLOWS => "Cash flows (comma-separated): ",
        PROMPT_DISCOUNT_RATE => "Discount rate [%] (blank if none): ",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_BUTTON => "Settings",
        SETTINGS_LANGUAGE => "Language",
        SETTINGS_AUTO_EXPORT => "Save CSV automatically after NPV, PI, IRR",
        SETTINGS_EXPORT_DIR => "CSV folder (blank = Downloads)",
        SETTINGS_SAVE => "Save settings",
        SETTINGS_SAVED => "Saved.",
        SETTINGS_PROMPT_AUTO_EXPORT => "Save CSV automatically? (y/n, enter to keep): ",
        _ => "[missing translation]",
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_TITLE => "자본예산 계산기",
        ERROR_PREFIX => "오류",
        WARNING_PREFIX => "경고",
        APP_EXIT => "프로그램을 종료합니다.",
        LABEL_INVESTMENT => "초기 투자비:",
        LABEL_CASH_FLOWS => "현금흐름(쉼표 구분):",
        LABEL_DISCOUNT_RATE => "할인율(%):",
        BUTTON_PAYBACK => "회수기간 계산",
        BUTTON_ARR => "ARR 계산",
        BUTTON_DCF => "NPV, PI, IRR 계산",
        BUTTON_SAVE_AS => "CSV 다른 이름으로 저장…",
        RESULT_PLACEHOLDER => "결과가 여기에 표시됩니다",
        TABLE_YEAR => "연도",
        TABLE_DCF => "할인 현금흐름",
        RESULT_PAYBACK => "회수기간: {periods}년",
        RESULT_PAYBACK_NOT_ACHIEVED => "회수기간: 회수 불가",
        RESULT_ARR => "ARR: {arr}%",
        RESULT_DCF => "NPV: {npv}, PI: {pi}, IRR: {irr}%",
        NOTICE_INPUT_ERROR => "입력 오류",
        NOTICE_CALC_ERROR => "계산 오류",
        NOTICE_EXPORT_ERROR => "내보내기 오류",
        NOTICE_EXPORT_DONE => "할인 현금흐름을 '{path}'에 저장했습니다.",
        NOTICE_CLOSE => "닫기",
        MAIN_MENU_TITLE => "\n=== 자본예산 계산기 ===",
        MAIN_MENU_PAYBACK => "1) 회수기간",
        MAIN_MENU_ARR => "2) 평균이익률",
        MAIN_MENU_DCF => "3) NPV, PI, IRR",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        PROMPT_INVESTMENT => "초기 투자비: ",
        PROMPT_CASH_FLOWS => "현금흐름(쉼표 구분): ",
        PROMPT_DISCOUNT_RATE => "할인율 [%] (없으면 엔터): ",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_BUTTON => "설정",
        SETTINGS_LANGUAGE => "언어",
        SETTINGS_AUTO_EXPORT => "NPV, PI, IRR 계산 후 CSV 자동 저장",
        SETTINGS_EXPORT_DIR => "CSV 저장 폴더(비우면 다운로드 폴더)",
        SETTINGS_SAVE => "설정 저장",
        SETTINGS_SAVED => "저장했습니다.",
        SETTINGS_PROMPT_AUTO_EXPORT => "CSV 자동 저장? (y/n, 엔터는 유지): ",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_language_wins_over_config() {
        assert_eq!(resolve_language("ko-KR", Some("en")), "ko");
        assert_eq!(resolve_language("auto", Some("en-us")), "en");
    }

    #[test]
    fn unknown_key_falls_back_to_english_marker() {
        let tr = Translator::new("ko");
        assert_eq!(tr.language().as_code(), "ko");
        assert_eq!(tr.t("no.such.key"), "[missing translation]");
        assert_eq!(tr.t(keys::TABLE_YEAR), "연도");
    }

    #[test]
    fn fill_replaces_placeholders() {
        let tr = Translator::new("en");
        let s = tr.fill(keys::RESULT_PAYBACK, &[("periods", "3".to_string())]);
        assert_eq!(s, "Payback Period: 3 years");
    }

    #[test]
    fn nested_pack_tables_flatten_to_dotted_keys() {
        let map = parse_toml_to_map("[result]\narr = \"Rendite: {arr}%\"\n").unwrap();
        assert_eq!(map.get("result.arr").map(String::as_str), Some("Rendite: {arr}%"));
    }
}
