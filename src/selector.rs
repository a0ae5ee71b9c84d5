//! 주 → 카운티 2단계 선택으로 참조 테이블에서 행 하나를 찾는다.

use crate::config::TableProfile;
use crate::reference::{CountyRecord, ReferenceTable};

/// 선택 결과가 없을 때 반환되는 오류. 복구 가능하며 메시지로만 표면화한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    /// (주, 카운티) 조합에 해당하는 행이 없음
    NotFound { state: String, county: String },
}

impl std::fmt::Display for SelectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectError::NotFound { state, county } => {
                write!(f, "해당 행이 없습니다: {county}, {state}")
            }
        }
    }
}

impl std::error::Error for SelectError {}

/// 정렬된 고유 주 목록을 돌려준다.
/// 확장 프로파일은 빈 주명을 걸러내고, 기본 프로파일은 그대로 포함한다
/// (원본 두 변형의 공백 처리 차이를 그대로 재현한다).
pub fn list_states(table: &ReferenceTable) -> Vec<String> {
    let mut states: Vec<String> = table
        .rows()
        .iter()
        .map(|r| r.state.clone())
        .filter(|s| match table.profile() {
            TableProfile::Positional => true,
            TableProfile::HeaderNamed => !s.is_empty(),
        })
        .collect();
    states.sort();
    states.dedup();
    states
}

/// 해당 주의 정렬된 고유 카운티 목록을 돌려준다. 공백 처리 규칙은 주 목록과 동일.
pub fn list_counties(table: &ReferenceTable, state: &str) -> Vec<String> {
    let mut counties: Vec<String> = table
        .rows()
        .iter()
        .filter(|r| r.state == state)
        .map(|r| r.county.clone())
        .filter(|c| match table.profile() {
            TableProfile::Positional => true,
            TableProfile::HeaderNamed => !c.is_empty(),
        })
        .collect();
    counties.sort();
    counties.dedup();
    counties
}

/// (주, 카운티)에 해당하는 첫 행을 돌려준다.
/// 중복 행은 테이블 순서상 첫 행이 이긴다 (로드 순서가 안정적이므로 결정적).
pub fn resolve<'a>(
    table: &'a ReferenceTable,
    state: &str,
    county: &str,
) -> Result<&'a CountyRecord, SelectError> {
    table
        .rows()
        .iter()
        .find(|r| r.state == state && r.county == county)
        .ok_or_else(|| SelectError::NotFound {
            state: state.to_string(),
            county: county.to_string(),
        })
}
