use county_efficiency_toolbox::config::TableProfile;
use county_efficiency_toolbox::reference::{parse_bytes, DataLoadError};

const EPS: f64 = 1e-12;

/// 3줄 메타데이터 서문 + 헤더 + 데이터 행으로 된 대표 픽스처.
/// EF/ACF/SWI는 위치(3/4/5)와 헤더 이름이 모두 맞고 결합 필드는 9번 컬럼이다.
fn fixture() -> Vec<u8> {
    b"County Environmental Reference, release 2\n\
      Compiled from county-level grid and water data,,,\n\
      Units: EF kg CO2e/kWh; ACF -; SWI L/kWh; EWIF L/kWh\n\
      County FIPS,Region,Grid,EF,ACF,SWI,EWIF,Flag,Reserve,County/State\n\
      01001,Southeast,SERC,0.45,0.9,1.8,0.3,,,\"Autauga County, Alabama\"\n\
      01003,Southeast,SERC,0.46,0.88,1.7,0.25,,,\" Baldwin County ,  Alabama \"\n\
      04013,West,WECC,0.38,0.95,2.4,0.41,,,\"Maricopa County, Arizona\"\n"
        .to_vec()
}

#[test]
fn header_named_profile_parses_all_rows() {
    let table = parse_bytes(&fixture(), TableProfile::HeaderNamed).expect("parse");
    assert_eq!(table.len(), 3);
    assert_eq!(table.profile(), TableProfile::HeaderNamed);

    let row = &table.rows()[0];
    assert_eq!(row.fips, "01001");
    assert!((row.ef - 0.45).abs() < EPS);
    assert!((row.acf - 0.9).abs() < EPS);
    assert!((row.swi - 1.8).abs() < EPS);
    assert_eq!(row.ewif, Some(0.3));
    assert_eq!(row.county, "Autauga County");
    assert_eq!(row.state, "Alabama");
}

#[test]
fn positional_profile_has_no_ewif() {
    let table = parse_bytes(&fixture(), TableProfile::Positional).expect("parse");
    assert_eq!(table.len(), 3);
    let row = &table.rows()[2];
    assert_eq!(row.fips, "04013");
    assert!((row.ef - 0.38).abs() < EPS);
    assert_eq!(row.ewif, None);
    assert_eq!(row.county, "Maricopa County");
    assert_eq!(row.state, "Arizona");
}

#[test]
fn combined_field_is_split_on_first_comma_and_trimmed() {
    let table = parse_bytes(&fixture(), TableProfile::HeaderNamed).expect("parse");
    let row = &table.rows()[1];
    assert_eq!(row.county, "Baldwin County");
    assert_eq!(row.state, "Alabama");
}

#[test]
fn combined_field_without_comma_leaves_state_empty() {
    let bytes = b"m1\nm2\nm3\n\
        County FIPS,Region,Grid,EF,ACF,SWI,EWIF,Flag,Reserve,County/State\n\
        11001,East,PJM,0.33,0.8,1.1,0.2,,,District of Columbia\n"
        .to_vec();
    let table = parse_bytes(&bytes, TableProfile::HeaderNamed).expect("parse");
    let row = &table.rows()[0];
    assert_eq!(row.county, "District of Columbia");
    assert_eq!(row.state, "");
}

#[test]
fn parse_is_idempotent() {
    let a = parse_bytes(&fixture(), TableProfile::HeaderNamed).expect("parse");
    let b = parse_bytes(&fixture(), TableProfile::HeaderNamed).expect("parse");
    assert_eq!(a, b);
}

#[test]
fn latin1_bytes_decode() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"m1\nm2\nm3\n");
    bytes.extend_from_slice(b"County FIPS,Region,Grid,EF,ACF,SWI,EWIF,Flag,Reserve,County/State\n");
    // 0xF1 = latin1 'n-tilde'
    bytes.extend_from_slice(b"35013,West,WECC,0.40,0.92,2.1,0.33,,,\"Do\xF1a Ana County, New Mexico\"\n");
    let table = parse_bytes(&bytes, TableProfile::HeaderNamed).expect("parse");
    let row = &table.rows()[0];
    assert_eq!(row.county, "Do\u{f1}a Ana County");
    assert_eq!(row.state, "New Mexico");
}

#[test]
fn missing_named_column_is_reported() {
    // EWIF 헤더를 뺀 확장 프로파일 입력.
    let bytes = b"m1\nm2\nm3\n\
        County FIPS,Region,Grid,EF,ACF,SWI,Other,Flag,Reserve,County/State\n\
        01001,Southeast,SERC,0.45,0.9,1.8,,,,\"Autauga County, Alabama\"\n"
        .to_vec();
    let err = parse_bytes(&bytes, TableProfile::HeaderNamed).unwrap_err();
    match err {
        DataLoadError::MissingColumn(name) => assert_eq!(name, "EWIF"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn too_few_columns_is_reported() {
    let bytes = b"m1\nm2\nm3\nA,B,C\n1,2,3\n".to_vec();
    let err = parse_bytes(&bytes, TableProfile::Positional).unwrap_err();
    match err {
        DataLoadError::TooFewColumns { expected, found } => {
            assert_eq!(expected, 10);
            assert_eq!(found, 3);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unparseable_number_is_reported_with_column() {
    let bytes = b"m1\nm2\nm3\n\
        County FIPS,Region,Grid,EF,ACF,SWI,EWIF,Flag,Reserve,County/State\n\
        01001,Southeast,SERC,n/a,0.9,1.8,0.3,,,\"Autauga County, Alabama\"\n"
        .to_vec();
    let err = parse_bytes(&bytes, TableProfile::HeaderNamed).unwrap_err();
    match err {
        DataLoadError::BadNumber { column, .. } => assert_eq!(column, "EF"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn numeric_fields_tolerate_surrounding_whitespace() {
    let bytes = b"m1\nm2\nm3\n\
        County FIPS,Region,Grid,EF,ACF,SWI,EWIF,Flag,Reserve,County/State\n\
        01001,Southeast,SERC, 0.45 , 0.9 , 1.8 , 0.3 ,,,\"Autauga County, Alabama\"\n"
        .to_vec();
    let table = parse_bytes(&bytes, TableProfile::HeaderNamed).expect("parse");
    assert!((table.rows()[0].ef - 0.45).abs() < EPS);
}
