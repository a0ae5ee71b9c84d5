use std::io::{self, Write};

use crate::app::AppError;
use crate::config::{Config, TableProfile};
use crate::efficiency::{
    compute_basic, compute_extended, BasicEfficiencyInput, ExtendedEfficiencyInput,
};
use crate::i18n::{keys, Translator};
use crate::reference::ReferenceTable;
use crate::selector;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Calculate,
    Browse,
    MoreInformation,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_CALCULATE));
    println!("{}", tr.t(keys::MAIN_MENU_BROWSE));
    println!("{}", tr.t(keys::MAIN_MENU_MORE_INFO));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Calculate),
            "2" => return Ok(MenuChoice::Browse),
            "3" => return Ok(MenuChoice::MoreInformation),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 효율 계산 메뉴를 처리한다. 행이 없으면 메시지만 내고 복귀한다.
pub fn handle_calculation(tr: &Translator, table: &ReferenceTable) -> Result<(), AppError> {
    println!("{}", tr.t(keys::CALC_HEADING));

    let states = selector::list_states(table);
    if states.is_empty() {
        println!("{}", tr.t(keys::CALC_EMPTY_TABLE));
        return Ok(());
    }
    let state = match select_from_list(tr, keys::CALC_PROMPT_STATE, &states)? {
        Some(s) => s,
        None => return Ok(()),
    };

    let counties = selector::list_counties(table, &state);
    let county = match select_from_list(tr, keys::CALC_PROMPT_COUNTY, &counties)? {
        Some(c) => c,
        None => return Ok(()),
    };

    let row = match selector::resolve(table, &state, &county) {
        Ok(row) => row,
        Err(_) => {
            println!("{}", tr.t(keys::CALC_NOT_FOUND));
            return Ok(());
        }
    };

    println!("{} {}", tr.t(keys::CALC_LABEL_FIPS), row.fips);
    println!("{} {}", tr.t(keys::CALC_LABEL_EF), row.ef);
    println!("{} {}", tr.t(keys::CALC_LABEL_ACF), row.acf);
    println!("{} {}", tr.t(keys::CALC_LABEL_SWI), row.swi);
    if let Some(ewif) = row.ewif {
        println!("{} {}", tr.t(keys::CALC_LABEL_EWIF), ewif);
    }

    let pue = read_f64_min0(tr, tr.t(keys::CALC_PROMPT_PUE))?;
    let wue = read_f64_min0(tr, tr.t(keys::CALC_PROMPT_WUE))?;

    // 표시만 소수점 3자리로 반올림한다.
    match row.ewif {
        Some(ewif) => {
            let result = compute_extended(ExtendedEfficiencyInput {
                ef: row.ef,
                acf: row.acf,
                swi: row.swi,
                ewif,
                pue,
                wue,
            });
            println!("{} {:.3}", tr.t(keys::CALC_RESULT_CUE), result.cue);
            println!("{} {:.3}", tr.t(keys::CALC_RESULT_WSUE), result.wsue);
            println!(
                "{} {:.3}",
                tr.t(keys::CALC_RESULT_WUE_SOURCE),
                result.wue_source
            );
        }
        None => {
            let result = compute_basic(BasicEfficiencyInput {
                ef: row.ef,
                acf: row.acf,
                swi: row.swi,
                pue,
                wue,
            });
            println!("{} {:.3}", tr.t(keys::CALC_RESULT_CUE), result.cue);
            println!("{} {:.3}", tr.t(keys::CALC_RESULT_WSUE), result.wsue);
        }
    }
    Ok(())
}

/// 참조 테이블 조회 메뉴를 처리한다.
pub fn handle_browse(tr: &Translator, table: &ReferenceTable) -> Result<(), AppError> {
    println!("{}", tr.t(keys::BROWSE_HEADING));
    let states = selector::list_states(table);
    println!("{}", tr.t(keys::BROWSE_STATES));
    print_numbered(&states);

    let sel = read_line(tr.t(keys::BROWSE_PROMPT_STATE))?;
    let sel = sel.trim();
    if sel.is_empty() {
        return Ok(());
    }
    if let Ok(n) = sel.parse::<usize>() {
        if n >= 1 && n <= states.len() {
            let counties = selector::list_counties(table, &states[n - 1]);
            println!("{}", tr.t(keys::BROWSE_COUNTIES));
            print_numbered(&counties);
            return Ok(());
        }
    }
    println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    Ok(())
}

/// 추가 정보(도움말)를 출력한다.
pub fn handle_more_info(tr: &Translator) {
    println!("{}", tr.t(keys::INFO_HEADING));
    println!("{}", tr.t(keys::INFO_BODY));
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    println!(
        "{} {}",
        tr.t(keys::SETTINGS_CURRENT_DATA_FILE),
        cfg.data_file
    );
    println!(
        "{} {}",
        tr.t(keys::SETTINGS_CURRENT_PROFILE),
        cfg.profile.as_str()
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    match sel.trim() {
        "" => return Ok(()),
        "1" => {
            let lang = read_line(tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
            let lang = lang.trim();
            if lang.is_empty() {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
                return Ok(());
            }
            cfg.language = lang.to_string();
        }
        "2" => {
            let path = read_line(tr.t(keys::SETTINGS_PROMPT_DATA_FILE))?;
            let path = path.trim();
            if path.is_empty() {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
                return Ok(());
            }
            cfg.data_file = path.to_string();
            println!("{}", tr.t(keys::SETTINGS_RESTART_NOTE));
        }
        "3" => {
            let p = read_line(tr.t(keys::SETTINGS_PROMPT_PROFILE))?;
            match p.trim() {
                "1" => cfg.profile = TableProfile::Positional,
                "2" => cfg.profile = TableProfile::HeaderNamed,
                _ => {
                    println!("{}", tr.t(keys::SETTINGS_INVALID));
                    return Ok(());
                }
            }
            println!("{}", tr.t(keys::SETTINGS_RESTART_NOTE));
        }
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(());
        }
    }
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

/// 번호 목록을 보여주고 하나를 고르게 한다. 엔터는 취소.
fn select_from_list(
    tr: &Translator,
    prompt_key: &str,
    items: &[String],
) -> Result<Option<String>, AppError> {
    print_numbered(items);
    loop {
        let sel = read_line(tr.t(prompt_key))?;
        let sel = sel.trim();
        if sel.is_empty() {
            return Ok(None);
        }
        if let Ok(n) = sel.parse::<usize>() {
            if n >= 1 && n <= items.len() {
                return Ok(Some(items[n - 1].clone()));
            }
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    }
}

fn print_numbered(items: &[String]) {
    for (i, item) in items.iter().enumerate() {
        println!("{:>3}) {}", i + 1, item);
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// 입력 경계에서 음수를 거른다. 계산기 자체는 검증하지 않는다.
fn read_f64_min0(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let v = read_f64(tr, prompt)?;
        if v >= 0.0 {
            return Ok(v);
        }
        println!("{}", tr.t(keys::ERROR_NEGATIVE));
    }
}
