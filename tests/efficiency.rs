use county_efficiency_toolbox::efficiency::{
    compute_basic, compute_extended, BasicEfficiencyInput, ExtendedEfficiencyInput,
};

const EPS: f64 = 1e-12;

fn basic(ef: f64, acf: f64, swi: f64, pue: f64, wue: f64) -> (f64, f64) {
    let r = compute_basic(BasicEfficiencyInput {
        ef,
        acf,
        swi,
        pue,
        wue,
    });
    (r.cue, r.wsue)
}

#[test]
fn zero_inputs_give_zero_outputs() {
    for (ef, acf, swi) in [(0.45, 0.9, 1.8), (1.2, 0.0, 0.0), (0.0, 3.0, 7.5)] {
        let (cue, wsue) = basic(ef, acf, swi, 0.0, 0.0);
        assert_eq!(cue, 0.0, "ef={ef}");
        assert_eq!(wsue, 0.0, "acf={acf} swi={swi}");
    }
}

#[test]
fn cue_is_linear_in_pue() {
    let (cue1, _) = basic(0.45, 0.9, 1.8, 1.3, 2.0);
    let (cue2, _) = basic(0.45, 0.9, 1.8, 2.6, 2.0);
    assert!((cue2 - 2.0 * cue1).abs() < EPS);
}

#[test]
fn wsue_superposition_holds() {
    // wue 항과 pue 항이 독립적으로 기여한다.
    let (_, wue_only) = basic(0.45, 0.9, 1.8, 0.0, 2.0);
    let (_, pue_only) = basic(0.45, 0.9, 1.8, 1.5, 0.0);
    let (_, both) = basic(0.45, 0.9, 1.8, 1.5, 2.0);
    assert!((both - (wue_only + pue_only)).abs() < EPS);
}

#[test]
fn reference_scenario_matches() {
    let (cue, wsue) = basic(0.45, 0.9, 1.8, 1.5, 2.0);
    assert!((cue - 0.675).abs() < EPS, "cue={cue}");
    assert!((wsue - 4.5).abs() < EPS, "wsue={wsue}");
}

#[test]
fn extended_scenario_adds_wue_source() {
    let r = compute_extended(ExtendedEfficiencyInput {
        ef: 0.45,
        acf: 0.9,
        swi: 1.8,
        ewif: 0.3,
        pue: 1.5,
        wue: 2.0,
    });
    assert!((r.cue - 0.675).abs() < EPS);
    assert!((r.wsue - 4.5).abs() < EPS);
    assert!((r.wue_source - 2.45).abs() < EPS, "wue_source={}", r.wue_source);
}

#[test]
fn extended_agrees_with_basic_on_shared_metrics() {
    let b = compute_basic(BasicEfficiencyInput {
        ef: 0.38,
        acf: 0.95,
        swi: 2.4,
        pue: 1.12,
        wue: 0.7,
    });
    let e = compute_extended(ExtendedEfficiencyInput {
        ef: 0.38,
        acf: 0.95,
        swi: 2.4,
        ewif: 0.41,
        pue: 1.12,
        wue: 0.7,
    });
    assert_eq!(b.cue, e.cue);
    assert_eq!(b.wsue, e.wsue);
}

#[test]
fn extended_zero_inputs_give_zero_wue_source() {
    let r = compute_extended(ExtendedEfficiencyInput {
        ef: 0.45,
        acf: 0.9,
        swi: 1.8,
        ewif: 0.3,
        pue: 0.0,
        wue: 0.0,
    });
    assert_eq!(r.wue_source, 0.0);
}
