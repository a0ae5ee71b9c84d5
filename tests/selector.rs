use county_efficiency_toolbox::config::TableProfile;
use county_efficiency_toolbox::reference::{parse_bytes, ReferenceTable};
use county_efficiency_toolbox::selector::{list_counties, list_states, resolve, SelectError};

fn table(profile: TableProfile) -> ReferenceTable {
    let bytes = b"m1\nm2\nm3\n\
        County FIPS,Region,Grid,EF,ACF,SWI,EWIF,Flag,Reserve,County/State\n\
        04013,West,WECC,0.38,0.95,2.4,0.41,,,\"Maricopa County, Arizona\"\n\
        01003,Southeast,SERC,0.46,0.88,1.7,0.25,,,\"Baldwin County, Alabama\"\n\
        01001,Southeast,SERC,0.45,0.9,1.8,0.3,,,\"Autauga County, Alabama\"\n\
        11001,East,PJM,0.33,0.8,1.1,0.2,,,District of Columbia\n"
        .to_vec();
    parse_bytes(&bytes, profile).expect("parse")
}

#[test]
fn states_are_sorted_and_unique() {
    let t = table(TableProfile::HeaderNamed);
    let states = list_states(&t);
    assert_eq!(states, vec!["Alabama".to_string(), "Arizona".to_string()]);
}

#[test]
fn blank_states_are_kept_by_positional_profile_only() {
    // 쉼표 없는 결합 필드는 주가 빈 문자열이 된다. 기본 변형은 그대로 노출하고
    // 확장 변형은 걸러낸다 (원본 두 변형의 차이 재현).
    let positional = list_states(&table(TableProfile::Positional));
    assert_eq!(
        positional,
        vec!["".to_string(), "Alabama".to_string(), "Arizona".to_string()]
    );

    let named = list_states(&table(TableProfile::HeaderNamed));
    assert!(!named.iter().any(|s| s.is_empty()));
}

#[test]
fn counties_belong_to_the_selected_state() {
    let t = table(TableProfile::HeaderNamed);
    let counties = list_counties(&t, "Alabama");
    assert_eq!(
        counties,
        vec!["Autauga County".to_string(), "Baldwin County".to_string()]
    );
    for county in counties {
        let row = resolve(&t, "Alabama", &county).expect("row");
        assert_eq!(row.state, "Alabama");
    }
}

#[test]
fn resolve_returns_the_matching_row() {
    let t = table(TableProfile::HeaderNamed);
    let row = resolve(&t, "Arizona", "Maricopa County").expect("row");
    assert_eq!(row.fips, "04013");
    assert_eq!(row.ewif, Some(0.41));
}

#[test]
fn resolve_absent_pair_is_not_found_not_a_panic() {
    let t = table(TableProfile::HeaderNamed);
    let err = resolve(&t, "Alabama", "Maricopa County").unwrap_err();
    match err {
        SelectError::NotFound { state, county } => {
            assert_eq!(state, "Alabama");
            assert_eq!(county, "Maricopa County");
        }
    }
}

#[test]
fn duplicate_rows_first_in_table_order_wins() {
    let bytes = b"m1\nm2\nm3\n\
        County FIPS,Region,Grid,EF,ACF,SWI,EWIF,Flag,Reserve,County/State\n\
        01001,Southeast,SERC,0.45,0.9,1.8,0.3,,,\"Autauga County, Alabama\"\n\
        01001,Southeast,SERC,0.99,0.5,9.9,0.9,,,\"Autauga County, Alabama\"\n"
        .to_vec();
    let t = parse_bytes(&bytes, TableProfile::HeaderNamed).expect("parse");
    let row = resolve(&t, "Alabama", "Autauga County").expect("row");
    assert_eq!(row.ef, 0.45);
    // 목록은 중복을 접지만 행 자체는 보존된다.
    assert_eq!(t.len(), 2);
    assert_eq!(list_counties(&t, "Alabama").len(), 1);
}
