//! 카운티 계수 + 운영 지표(PUE/WUE)로 파생 효율 지표를 계산한다.
//! 순수 함수만 있으며 반올림은 표시 계층에서 처리한다.

/// 기본 프로파일 효율 계산 입력.
#[derive(Debug, Clone)]
pub struct BasicEfficiencyInput {
    /// 배출 계수 EF [kg CO2e/kWh]
    pub ef: f64,
    /// 조정 계수 ACF [무차원]
    pub acf: f64,
    /// 수원 취수 강도 SWI [L/kWh]
    pub swi: f64,
    /// 전력 사용 효율 PUE [무차원]
    pub pue: f64,
    /// 물 사용 효율 WUE [L/kWh]
    pub wue: f64,
}

/// 기본 프로파일 효율 계산 결과.
#[derive(Debug, Clone)]
pub struct BasicEfficiencyResult {
    /// 탄소 사용 효율 CUE [kg CO2e/kWh]
    pub cue: f64,
    /// 수원 사용 효율 WSUE [L/kWh]
    pub wsue: f64,
}

/// CUE = PUE × EF, WSUE = ACF × WUE + SWI × PUE.
pub fn compute_basic(input: BasicEfficiencyInput) -> BasicEfficiencyResult {
    BasicEfficiencyResult {
        cue: input.pue * input.ef,
        wsue: input.acf * input.wue + input.swi * input.pue,
    }
}

/// 확장 프로파일 효율 계산 입력. EWIF가 추가된다.
#[derive(Debug, Clone)]
pub struct ExtendedEfficiencyInput {
    /// 배출 계수 EF [kg CO2e/kWh]
    pub ef: f64,
    /// 조정 계수 ACF [무차원]
    pub acf: f64,
    /// 수원 취수 강도 SWI [L/kWh]
    pub swi: f64,
    /// 외부 수자원 영향 계수 EWIF [L/kWh]
    pub ewif: f64,
    /// 전력 사용 효율 PUE [무차원]
    pub pue: f64,
    /// 물 사용 효율 WUE [L/kWh]
    pub wue: f64,
}

/// 확장 프로파일 효율 계산 결과.
#[derive(Debug, Clone)]
pub struct ExtendedEfficiencyResult {
    /// 탄소 사용 효율 CUE [kg CO2e/kWh]
    pub cue: f64,
    /// 수원 사용 효율 WSUE [L/kWh]
    pub wsue: f64,
    /// 전력 생산측 물 사용까지 포함한 WUE_source [L/kWh]
    pub wue_source: f64,
}

/// 기본 지표에 더해 WUE_source = WUE + EWIF × PUE 를 계산한다.
pub fn compute_extended(input: ExtendedEfficiencyInput) -> ExtendedEfficiencyResult {
    let base = compute_basic(BasicEfficiencyInput {
        ef: input.ef,
        acf: input.acf,
        swi: input.swi,
        pue: input.pue,
        wue: input.wue,
    });
    ExtendedEfficiencyResult {
        cue: base.cue,
        wsue: base.wsue,
        wue_source: input.wue + input.ewif * input.pue,
    }
}
