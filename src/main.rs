use clap::Parser;
use county_efficiency_toolbox::{app, config, i18n};

/// 카운티 효율 계산기 터미널 UI.
#[derive(Parser)]
#[command(name = "county_efficiency_toolbox_cli")]
struct Cli {
    /// 언어 코드 (auto/en-us/ko-kr)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    /// 참조 테이블 CSV 경로 (설정값 대신 사용)
    #[arg(long)]
    data_file: Option<String>,
    /// 컬럼 매핑 프로파일 (positional | header-named)
    #[arg(long)]
    profile: Option<String>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut cfg = config::load_or_default()?;
    if let Some(path) = cli.data_file {
        cfg.data_file = path;
    }
    if let Some(profile) = cli.profile.as_deref() {
        cfg.profile = match profile {
            "positional" => config::TableProfile::Positional,
            "header-named" => config::TableProfile::HeaderNamed,
            other => return Err(format!("알 수 없는 프로파일: {other}").into()),
        };
    }

    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());

    app::run(&mut cfg, &tr)?;
    Ok(())
}
