use std::path::Path;

use crate::config::Config;
use crate::i18n::{self, Translator};
use crate::reference;
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(crate::config::ConfigError),
    /// 참조 테이블 로드 오류. 시작 시 치명적이다.
    DataLoad(reference::DataLoadError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::DataLoad(e) => write!(f, "참조 테이블 로드 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<reference::DataLoadError> for AppError {
    fn from(value: reference::DataLoadError) -> Self {
        AppError::DataLoad(value)
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
/// 참조 테이블은 시작 시 한 번 로드되고 이후 불변으로 공유된다.
pub fn run(config: &mut Config, tr: &Translator) -> Result<(), AppError> {
    let table = reference::load_cached(Path::new(&config.data_file), config.profile)?;
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Calculate => ui_cli::handle_calculation(tr, table)?,
            MenuChoice::Browse => ui_cli::handle_browse(tr, table)?,
            MenuChoice::MoreInformation => ui_cli::handle_more_info(tr),
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save()?;
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
