use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_CALCULATE: &str = "main_menu.calculate";
    pub const MAIN_MENU_BROWSE: &str = "main_menu.browse";
    pub const MAIN_MENU_MORE_INFO: &str = "main_menu.more_info";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_NEGATIVE: &str = "error.negative_number";

    pub const CALC_HEADING: &str = "calc.heading";
    pub const CALC_EMPTY_TABLE: &str = "calc.empty_table";
    pub const CALC_PROMPT_STATE: &str = "calc.prompt_state";
    pub const CALC_PROMPT_COUNTY: &str = "calc.prompt_county";
    pub const CALC_NOT_FOUND: &str = "calc.not_found";
    pub const CALC_LABEL_FIPS: &str = "calc.label_fips";
    pub const CALC_LABEL_EF: &str = "calc.label_ef";
    pub const CALC_LABEL_ACF: &str = "calc.label_acf";
    pub const CALC_LABEL_SWI: &str = "calc.label_swi";
    pub const CALC_LABEL_EWIF: &str = "calc.label_ewif";
    pub const CALC_PROMPT_PUE: &str = "calc.prompt_pue";
    pub const CALC_PROMPT_WUE: &str = "calc.prompt_wue";
    pub const CALC_RESULT_CUE: &str = "calc.result_cue";
    pub const CALC_RESULT_WSUE: &str = "calc.result_wsue";
    pub const CALC_RESULT_WUE_SOURCE: &str = "calc.result_wue_source";

    pub const BROWSE_HEADING: &str = "browse.heading";
    pub const BROWSE_STATES: &str = "browse.states";
    pub const BROWSE_PROMPT_STATE: &str = "browse.prompt_state";
    pub const BROWSE_COUNTIES: &str = "browse.counties";
    pub const BROWSE_SKIP_HINT: &str = "browse.skip_hint";

    pub const INFO_HEADING: &str = "info.heading";
    pub const INFO_BODY: &str = "info.body";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_CURRENT_DATA_FILE: &str = "settings.current_data_file";
    pub const SETTINGS_CURRENT_PROFILE: &str = "settings.current_profile";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_PROMPT_DATA_FILE: &str = "settings.prompt_data_file";
    pub const SETTINGS_PROMPT_PROFILE: &str = "settings.prompt_profile";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const SETTINGS_RESTART_NOTE: &str = "settings.restart_note";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
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
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Box::leak(v.clone().into_boxed_str());
            }
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" => Some("ko".into()),
        "ko-kr" => Some("ko-kr".into()),
        "en" => Some("en".into()),
        "en-us" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
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
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    if let Ok(lang) = std::env::var("LC_ALL") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
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

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "en-us" | "en" => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        "ko-kr" | "ko" => parse_toml_to_map(include_str!("../locales/ko-kr.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== County Efficiency Calculator ===",
        MAIN_MENU_CALCULATE => "1) 효율 계산",
        MAIN_MENU_BROWSE => "2) 참조 테이블 조회",
        MAIN_MENU_MORE_INFO => "3) 추가 정보",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_NEGATIVE => "0 이상의 값을 입력하세요.",
        CALC_HEADING => "\n-- 효율 계산 --",
        CALC_EMPTY_TABLE => "참조 테이블에 선택 가능한 주가 없습니다.",
        CALC_PROMPT_STATE => "주 선택: ",
        CALC_PROMPT_COUNTY => "카운티 선택: ",
        CALC_NOT_FOUND => "선택한 주/카운티에 해당하는 행이 없습니다. 계산을 건너뜁니다.",
        CALC_LABEL_FIPS => "FIPS 코드:",
        CALC_LABEL_EF => "EF (배출 계수) [kg CO2e/kWh]:",
        CALC_LABEL_ACF => "ACF (조정 계수) [무차원]:",
        CALC_LABEL_SWI => "SWI (수원 취수 강도) [L/kWh]:",
        CALC_LABEL_EWIF => "EWIF (외부 수자원 영향 계수) [L/kWh]:",
        CALC_PROMPT_PUE => "PUE (전력 사용 효율) 입력: ",
        CALC_PROMPT_WUE => "WUE (물 사용 효율) [L/kWh] 입력: ",
        CALC_RESULT_CUE => "CUE [kg CO2e/kWh] =",
        CALC_RESULT_WSUE => "WSUE [L/kWh] =",
        CALC_RESULT_WUE_SOURCE => "WUE_source [L/kWh] =",
        BROWSE_HEADING => "\n-- 참조 테이블 조회 --",
        BROWSE_STATES => "주 목록:",
        BROWSE_PROMPT_STATE => "카운티를 볼 주 번호(건너뛰려면 엔터): ",
        BROWSE_COUNTIES => "카운티 목록:",
        BROWSE_SKIP_HINT => "(엔터로 메뉴 복귀)",
        INFO_HEADING => "\n-- 추가 정보 --",
        INFO_BODY => "주와 카운티를 선택하면 FIPS 코드가 자동으로 조회됩니다.\n\
                      PUE(전력 사용 효율)와 WUE(물 사용 효율, L/kWh)를 입력하세요.\n\
                      계산식:\n\
                      - CUE [kg CO2e/kWh] = PUE × EF\n\
                      - WSUE [L/kWh] = ACF × WUE + SWI × PUE\n\
                      - WUE_source [L/kWh] = WUE + EWIF × PUE (확장 프로파일)\n\
                      단위: EF/CUE → kg CO2e/kWh, WUE/SWI/WSUE → L/kWh, ACF → 무차원",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_CURRENT_DATA_FILE => "현재 참조 파일:",
        SETTINGS_CURRENT_PROFILE => "현재 프로파일:",
        SETTINGS_OPTIONS => "1) 언어  2) 참조 파일 경로  3) 프로파일",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_PROMPT_LANGUAGE => "언어 코드 (auto/en-us/ko-kr): ",
        SETTINGS_PROMPT_DATA_FILE => "참조 파일 경로: ",
        SETTINGS_PROMPT_PROFILE => "프로파일 (1=positional, 2=header-named): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정이 저장되었습니다.",
        SETTINGS_RESTART_NOTE => "참조 파일/프로파일 변경은 다음 실행부터 적용됩니다.",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== County Efficiency Calculator ===",
        MAIN_MENU_CALCULATE => "1) Run calculation",
        MAIN_MENU_BROWSE => "2) Browse reference table",
        MAIN_MENU_MORE_INFO => "3) More information",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_NEGATIVE => "Please enter a value of 0 or more.",
        CALC_HEADING => "\n-- Run Calculation --",
        CALC_EMPTY_TABLE => "The reference table has no selectable states.",
        CALC_PROMPT_STATE => "Select a state: ",
        CALC_PROMPT_COUNTY => "Select a county: ",
        CALC_NOT_FOUND => "No reference row matches the selected state/county. Skipping calculation.",
        CALC_LABEL_FIPS => "FIPS code:",
        CALC_LABEL_EF => "EF (emission factor) [kg CO2e/kWh]:",
        CALC_LABEL_ACF => "ACF (adjustment coefficient) [-]:",
        CALC_LABEL_SWI => "SWI (source water intensity) [L/kWh]:",
        CALC_LABEL_EWIF => "EWIF (external water impact factor) [L/kWh]:",
        CALC_PROMPT_PUE => "Enter PUE (power usage effectiveness): ",
        CALC_PROMPT_WUE => "Enter WUE (water usage effectiveness) [L/kWh]: ",
        CALC_RESULT_CUE => "CUE [kg CO2e/kWh] =",
        CALC_RESULT_WSUE => "WSUE [L/kWh] =",
        CALC_RESULT_WUE_SOURCE => "WUE_source [L/kWh] =",
        BROWSE_HEADING => "\n-- Browse Reference Table --",
        BROWSE_STATES => "States:",
        BROWSE_PROMPT_STATE => "State number to list counties (enter to skip): ",
        BROWSE_COUNTIES => "Counties:",
        BROWSE_SKIP_HINT => "(press enter to return)",
        INFO_HEADING => "\n-- More Information --",
        INFO_BODY => "Select a state and county; the FIPS code is retrieved automatically.\n\
                      Enter PUE (power usage effectiveness) and WUE (water usage effectiveness, L/kWh).\n\
                      Formulas:\n\
                      - CUE [kg CO2e/kWh] = PUE x EF\n\
                      - WSUE [L/kWh] = ACF x WUE + SWI x PUE\n\
                      - WUE_source [L/kWh] = WUE + EWIF x PUE (header-named profile)\n\
                      Units: EF/CUE -> kg CO2e/kWh, WUE/SWI/WSUE -> L/kWh, ACF -> dimensionless",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_CURRENT_DATA_FILE => "Current reference file:",
        SETTINGS_CURRENT_PROFILE => "Current profile:",
        SETTINGS_OPTIONS => "1) Language  2) Reference file path  3) Profile",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_PROMPT_LANGUAGE => "Language code (auto/en-us/ko-kr): ",
        SETTINGS_PROMPT_DATA_FILE => "Reference file path: ",
        SETTINGS_PROMPT_PROFILE => "Profile (1=positional, 2=header-named): ",
        SETTINGS_INVALID => "Invalid input; nothing changed.",
        SETTINGS_SAVED => "Settings saved.",
        SETTINGS_RESTART_NOTE => "Reference file/profile changes apply on next start.",
        _ => return None,
    })
}
