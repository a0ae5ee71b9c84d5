//! 카운티 환경 계수 참조 테이블 로더.
//!
//! 입력 파일은 3줄 메타데이터 서문 뒤에 헤더가 오는 latin1 인코딩 CSV이며,
//! 프로파일에 따라 컬럼을 위치 또는 헤더 이름으로 선택한다.
//! 테이블은 로드 이후 불변이고, 프로세스당 한 번만 파싱된다.

use csv::{ReaderBuilder, StringRecord};
use encoding_rs::WINDOWS_1252;
use once_cell::sync::OnceCell;
use std::fs;
use std::path::Path;

use crate::config::TableProfile;

/// 서문으로 건너뛰는 메타데이터 줄 수.
pub const METADATA_LINES: usize = 3;

/// 결합 필드("County, State")가 위치하는 0-기준 컬럼.
const COUNTY_STATE_COLUMN: usize = 9;

/// 참조 테이블의 한 행.
#[derive(Debug, Clone, PartialEq)]
pub struct CountyRecord {
    /// 연방 카운티 식별 코드
    pub fips: String,
    /// 배출 계수 [kg CO2e/kWh]
    pub ef: f64,
    /// 조정 계수 [무차원]
    pub acf: f64,
    /// 수원 취수 강도 [L/kWh]
    pub swi: f64,
    /// 외부 수자원 영향 계수 [L/kWh]. 확장 프로파일에만 존재.
    pub ewif: Option<f64>,
    /// 카운티명 (트림됨)
    pub county: String,
    /// 주명 (트림됨). 결합 필드에 쉼표가 없으면 빈 문자열.
    pub state: String,
}

/// 로드 이후 불변인 참조 테이블. 행 순서는 파일 순서를 유지한다.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    profile: TableProfile,
    rows: Vec<CountyRecord>,
}

impl ReferenceTable {
    pub fn profile(&self) -> TableProfile {
        self.profile
    }

    pub fn rows(&self) -> &[CountyRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 테이블 로드 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum DataLoadError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// CSV 파싱 오류
    Csv(csv::Error),
    /// 헤더에서 필수 컬럼을 찾지 못함 (확장 프로파일)
    MissingColumn(String),
    /// 행의 컬럼 수가 결합 필드 위치에 못 미침
    TooFewColumns { expected: usize, found: usize },
    /// 숫자 필드 파싱 실패
    BadNumber { line: usize, column: String },
}

impl std::fmt::Display for DataLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataLoadError::Io(e) => write!(f, "참조 파일 입출력 오류: {e}"),
            DataLoadError::Csv(e) => write!(f, "참조 파일 CSV 파싱 오류: {e}"),
            DataLoadError::MissingColumn(name) => {
                write!(f, "헤더에 필수 컬럼이 없습니다: {name}")
            }
            DataLoadError::TooFewColumns { expected, found } => {
                write!(f, "컬럼 수 부족: {expected}개 필요, {found}개 발견")
            }
            DataLoadError::BadNumber { line, column } => {
                write!(f, "{line}행 {column} 컬럼의 숫자를 해석할 수 없습니다")
            }
        }
    }
}

impl std::error::Error for DataLoadError {}

impl From<std::io::Error> for DataLoadError {
    fn from(value: std::io::Error) -> Self {
        DataLoadError::Io(value)
    }
}

impl From<csv::Error> for DataLoadError {
    fn from(value: csv::Error) -> Self {
        DataLoadError::Csv(value)
    }
}

/// 파일에서 참조 테이블을 로드한다.
pub fn load(path: &Path, profile: TableProfile) -> Result<ReferenceTable, DataLoadError> {
    let bytes = fs::read(path)?;
    parse_bytes(&bytes, profile)
}

/// 메모리 버퍼에서 참조 테이블을 파싱한다. 파일 로드와 동일한 파이프라인.
pub fn parse_bytes(bytes: &[u8], profile: TableProfile) -> Result<ReferenceTable, DataLoadError> {
    // 원본 파일은 latin1 계열 레거시 인코딩이다. WHATWG 매핑상 windows-1252로 디코드한다.
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    let body = skip_lines(&text, METADATA_LINES);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = resolve_columns(&headers, profile)?;

    let mut rows = Vec::new();
    // 헤더가 서문 다음 줄이므로 첫 데이터 행은 METADATA_LINES + 2 행이 된다.
    let mut line = METADATA_LINES + 2;
    for record in reader.records() {
        let record = record?;
        rows.push(parse_row(&record, &columns, line)?);
        line += 1;
    }

    Ok(ReferenceTable { profile, rows })
}

/// 프로세스 수명 동안 한 번만 초기화되는 읽기 전용 싱글턴 캐시.
static TABLE: OnceCell<ReferenceTable> = OnceCell::new();

/// 테이블을 로드하거나 이미 로드된 테이블을 돌려준다.
/// 최초 성공한 로드가 테이블을 고정하며 무효화는 없다.
/// 이후 호출은 인자와 무관하게 같은 테이블을 반환한다.
pub fn load_cached(
    path: &Path,
    profile: TableProfile,
) -> Result<&'static ReferenceTable, DataLoadError> {
    TABLE.get_or_try_init(|| load(path, profile))
}

/// 선행 n줄을 건너뛴 나머지를 돌려준다. CRLF도 처리한다.
fn skip_lines(text: &str, n: usize) -> &str {
    let mut rest = text;
    for _ in 0..n {
        match rest.split_once('\n') {
            Some((_, tail)) => rest = tail,
            None => return "",
        }
    }
    rest
}

/// 프로파일별로 해석된 컬럼 위치.
struct ColumnMap {
    fips: usize,
    ef: usize,
    acf: usize,
    swi: usize,
    ewif: Option<usize>,
    county_state: usize,
}

fn resolve_columns(
    headers: &StringRecord,
    profile: TableProfile,
) -> Result<ColumnMap, DataLoadError> {
    match profile {
        TableProfile::Positional => {
            if headers.len() <= COUNTY_STATE_COLUMN {
                return Err(DataLoadError::TooFewColumns {
                    expected: COUNTY_STATE_COLUMN + 1,
                    found: headers.len(),
                });
            }
            Ok(ColumnMap {
                fips: 0,
                ef: 3,
                acf: 4,
                swi: 5,
                ewif: None,
                county_state: COUNTY_STATE_COLUMN,
            })
        }
        TableProfile::HeaderNamed => {
            if headers.len() <= COUNTY_STATE_COLUMN {
                return Err(DataLoadError::TooFewColumns {
                    expected: COUNTY_STATE_COLUMN + 1,
                    found: headers.len(),
                });
            }
            let find = |name: &str| -> Result<usize, DataLoadError> {
                headers
                    .iter()
                    .position(|h| h.trim() == name)
                    .ok_or_else(|| DataLoadError::MissingColumn(name.to_string()))
            };
            Ok(ColumnMap {
                fips: find("County FIPS")?,
                ef: find("EF")?,
                acf: find("ACF")?,
                swi: find("SWI")?,
                ewif: Some(find("EWIF")?),
                // 결합 필드는 확장 변형에서도 위치로 선택된다.
                county_state: COUNTY_STATE_COLUMN,
            })
        }
    }
}

fn parse_row(
    record: &StringRecord,
    columns: &ColumnMap,
    line: usize,
) -> Result<CountyRecord, DataLoadError> {
    let field = |idx: usize| record.get(idx).unwrap_or("").trim();

    let number = |idx: usize, name: &str| -> Result<f64, DataLoadError> {
        field(idx)
            .parse::<f64>()
            .map_err(|_| DataLoadError::BadNumber {
                line,
                column: name.to_string(),
            })
    };

    let combined = field(columns.county_state);
    // 첫 쉼표에서만 가르고 양쪽 공백을 제거한다. 쉼표가 없으면 주는 빈 문자열.
    let (county, state) = match combined.split_once(',') {
        Some((c, s)) => (c.trim().to_string(), s.trim().to_string()),
        None => (combined.to_string(), String::new()),
    };

    let ewif = match columns.ewif {
        Some(idx) => Some(number(idx, "EWIF")?),
        None => None,
    };

    Ok(CountyRecord {
        fips: field(columns.fips).to_string(),
        ef: number(columns.ef, "EF")?,
        acf: number(columns.acf, "ACF")?,
        swi: number(columns.swi, "SWI")?,
        ewif,
        county,
        state,
    })
}
