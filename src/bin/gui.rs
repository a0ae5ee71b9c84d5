#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};

use county_efficiency_toolbox::{
    config,
    config::TableProfile,
    efficiency::{compute_basic, compute_extended, BasicEfficiencyInput, ExtendedEfficiencyInput},
    i18n, reference,
    reference::ReferenceTable,
    selector,
};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/ko-kr)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        }
        i += 1;
    }

    let icon_data = load_app_icon();
    let mut viewport = egui::ViewportBuilder::default();
    if let Some(icon) = icon_data.clone() {
        viewport = viewport.with_icon(icon);
    }
    let native = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_default();
    if let Some(lang_cli) = cli_lang {
        let resolved = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
        app_cfg.language = resolved;
    }
    eframe::run_native(
        "County Efficiency Calculator",
        native,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                eprintln!("Font error: {e}");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png"];
    let path = search
        .iter()
        .find(|p| Path::new(*p).exists())
        .map(|s| s.to_string())?;
    let bytes = fs::read(&path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 한글을 표시하기 위해 기본 폰트를 우선 적용한다.
/// 1) assets/fonts/ 아래 사용자 배치 폰트
/// 2) Windows 시스템 폰트(맑은 고딕/굴림/바탕 등)
/// 3) 모두 실패 시 Err를 반환하고 egui 기본 폰트를 유지한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let asset_path = Path::new("assets/fonts/malgun.ttf");
    if asset_path.exists() {
        let bytes = fs::read(asset_path).map_err(|e| format!("Failed to read font file: {e}"))?;
        apply_font_bytes(ctx, bytes, "korean_font");
        return Ok(());
    }

    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        let candidates = ["malgun.ttf", "malgunsl.ttf", "malgunbd.ttf", "gulim.ttc"];
        for cand in candidates {
            let p = fonts.join(cand);
            if p.exists() {
                let bytes = fs::read(&p)
                    .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
                apply_font_bytes(ctx, bytes, "korean_font");
                return Ok(());
            }
        }
    }

    Err("Korean-capable font not found; falling back to egui defaults.".into())
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    lang_input: String,
    settings_status: Option<String>,
    // 참조 테이블. 시작 시 한 번 로드되며 실패 메시지는 그대로 표시한다.
    table: Result<&'static ReferenceTable, String>,
    selected_state: String,
    selected_county: String,
    pue: f64,
    wue: f64,
    result: Option<String>,
    show_info: bool,
    show_settings_modal: bool,
    show_help_modal: bool,
    data_file_input: String,
    profile_input: TableProfile,
    apply_initial_view_size: bool,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());

        let table = reference::load_cached(Path::new(&config.data_file), config.profile)
            .map_err(|e| e.to_string());

        let mut selected_state = String::new();
        let mut selected_county = String::new();
        if let Ok(table) = table {
            if let Some(first) = selector::list_states(table).into_iter().next() {
                selected_county = selector::list_counties(table, &first)
                    .into_iter()
                    .next()
                    .unwrap_or_default();
                selected_state = first;
            }
        }

        let lang_input = config.language.clone();
        let data_file_input = config.data_file.clone();
        let profile_input = config.profile;
        Self {
            config,
            tr,
            lang_input,
            settings_status: None,
            table,
            selected_state,
            selected_county,
            pue: 1.5,
            wue: 1.0,
            result: None,
            show_info: false,
            show_settings_modal: false,
            show_help_modal: false,
            data_file_input,
            profile_input,
            apply_initial_view_size: true,
        }
    }

    fn ui_calculator(&mut self, ui: &mut egui::Ui, table: &ReferenceTable) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());

        ui.heading(txt("gui.calc.heading", "County Efficiency Calculator"));
        ui.label(txt(
            "gui.calc.subtitle",
            "Calculates CUE and WSUE from county coefficients, PUE, and WUE.",
        ));
        ui.add_space(8.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("select_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(txt("gui.calc.state", "State"));
                    let states = selector::list_states(table);
                    let before_state = self.selected_state.clone();
                    egui::ComboBox::from_id_source("state_choice")
                        .selected_text(self.selected_state.clone())
                        .show_ui(ui, |ui| {
                            for s in &states {
                                ui.selectable_value(
                                    &mut self.selected_state,
                                    s.clone(),
                                    s.clone(),
                                );
                            }
                        });
                    if before_state != self.selected_state {
                        // 주가 바뀌면 카운티 선택을 첫 항목으로 되돌린다.
                        self.selected_county =
                            selector::list_counties(table, &self.selected_state)
                                .into_iter()
                                .next()
                                .unwrap_or_default();
                        self.result = None;
                    }
                    ui.end_row();

                    ui.label(txt("gui.calc.county", "County"));
                    let counties = selector::list_counties(table, &self.selected_state);
                    egui::ComboBox::from_id_source("county_choice")
                        .selected_text(self.selected_county.clone())
                        .show_ui(ui, |ui| {
                            for c in &counties {
                                ui.selectable_value(
                                    &mut self.selected_county,
                                    c.clone(),
                                    c.clone(),
                                );
                            }
                        });
                    ui.end_row();
                });
        });

        ui.add_space(8.0);
        match selector::resolve(table, &self.selected_state, &self.selected_county) {
            Ok(row) => {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    egui::Grid::new("coeff_grid")
                        .num_columns(2)
                        .spacing([12.0, 4.0])
                        .show(ui, |ui| {
                            ui.label(txt("gui.calc.fips", "FIPS code"));
                            ui.label(row.fips.clone());
                            ui.end_row();
                            ui.label(txt("gui.calc.ef", "EF [kg CO2e/kWh]"));
                            ui.label(format!("{}", row.ef));
                            ui.end_row();
                            ui.label(txt("gui.calc.acf", "ACF [-]"));
                            ui.label(format!("{}", row.acf));
                            ui.end_row();
                            ui.label(txt("gui.calc.swi", "SWI [L/kWh]"));
                            ui.label(format!("{}", row.swi));
                            ui.end_row();
                            if let Some(ewif) = row.ewif {
                                ui.label(txt("gui.calc.ewif", "EWIF [L/kWh]"));
                                ui.label(format!("{ewif}"));
                                ui.end_row();
                            }
                        });
                });
            }
            Err(_) => {
                ui.colored_label(
                    ui.visuals().warn_fg_color,
                    txt(
                        "gui.calc.not_found",
                        "No reference row matches the selected state/county.",
                    ),
                );
            }
        }

        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("input_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(txt("gui.calc.pue", "PUE (power usage effectiveness)"));
                    ui.add(
                        egui::DragValue::new(&mut self.pue)
                            .speed(0.01)
                            .clamp_range(0.0..=f64::INFINITY),
                    );
                    ui.end_row();
                    ui.label(txt("gui.calc.wue", "WUE (water usage effectiveness) [L/kWh]"));
                    ui.add(
                        egui::DragValue::new(&mut self.wue)
                            .speed(0.01)
                            .clamp_range(0.0..=f64::INFINITY),
                    );
                    ui.end_row();
                });
        });

        ui.add_space(8.0);
        if ui
            .button(txt("gui.calc.run", "Run Calculation"))
            .clicked()
        {
            self.result = Some(self.run_calculation(table, &txt));
        }
        if let Some(result) = &self.result {
            ui.add_space(4.0);
            ui.label(egui::RichText::new(result).strong());
        }

        ui.add_space(8.0);
        ui.checkbox(
            &mut self.show_info,
            txt("gui.calc.more_info", "More Information"),
        );
        if self.show_info {
            ui.add(
                egui::Label::new(egui::RichText::new(self.tr.t(i18n::keys::INFO_BODY)).small())
                    .wrap(true),
            );
        }
    }

    /// 현재 선택과 입력으로 결과 문자열을 만든다. 표시만 소수점 3자리.
    fn run_calculation<F>(&self, table: &ReferenceTable, txt: &F) -> String
    where
        F: Fn(&str, &str) -> String,
    {
        let row = match selector::resolve(table, &self.selected_state, &self.selected_county) {
            Ok(row) => row,
            Err(_) => {
                return txt(
                    "gui.calc.not_found",
                    "No reference row matches the selected state/county.",
                )
            }
        };
        match row.ewif {
            Some(ewif) => {
                let r = compute_extended(ExtendedEfficiencyInput {
                    ef: row.ef,
                    acf: row.acf,
                    swi: row.swi,
                    ewif,
                    pue: self.pue,
                    wue: self.wue,
                });
                format!(
                    "CUE = {:.3} kg CO2e/kWh\nWSUE = {:.3} L/kWh\nWUE_source = {:.3} L/kWh",
                    r.cue, r.wsue, r.wue_source
                )
            }
            None => {
                let r = compute_basic(BasicEfficiencyInput {
                    ef: row.ef,
                    acf: row.acf,
                    swi: row.swi,
                    pue: self.pue,
                    wue: self.wue,
                });
                format!(
                    "CUE = {:.3} kg CO2e/kWh\nWSUE = {:.3} L/kWh",
                    r.cue, r.wsue
                )
            }
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 최초 1회 화면 크기 조정
        if self.apply_initial_view_size {
            if let Some(screen) = ctx.input(|i| {
                let r = i.screen_rect();
                if r.is_positive() {
                    Some(r.size())
                } else {
                    None
                }
            }) {
                let target = egui::vec2((screen.x * 0.4).max(560.0), (screen.y * 0.6).max(640.0));
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(target));
                self.apply_initial_view_size = false;
            }
        }

        let tr = self.tr.clone();
        let txt =
            move |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(txt("gui.nav.app_title", "County Efficiency Calculator"));
                ui.separator();
                if ui.button(txt("gui.settings.title", "Settings")).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(txt("gui.about.title", "Help / About")).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        // 설정 모달
        if self.show_settings_modal {
            egui::Window::new(txt("gui.settings.title", "Settings"))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_settings_modal)
                .show(ctx, |ui| {
                    ui.label(txt("gui.settings.lang", "Language"));
                    egui::ComboBox::from_id_source("lang_choice")
                        .selected_text(&self.lang_input)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(
                                &mut self.lang_input,
                                "auto".into(),
                                txt("gui.settings.lang_auto", "System"),
                            );
                            ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                            ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                        });
                    ui.separator();

                    ui.label(txt("gui.settings.data_file", "Reference file"));
                    ui.horizontal(|ui| {
                        ui.text_edit_singleline(&mut self.data_file_input);
                        if ui.button(txt("gui.settings.browse", "Browse...")).clicked() {
                            if let Some(path) = FileDialog::new()
                                .add_filter("CSV", &["csv"])
                                .pick_file()
                            {
                                self.data_file_input = path.display().to_string();
                            }
                        }
                    });
                    ui.label(txt("gui.settings.profile", "Column-mapping profile"));
                    ui.horizontal(|ui| {
                        ui.selectable_value(
                            &mut self.profile_input,
                            TableProfile::Positional,
                            "positional",
                        );
                        ui.selectable_value(
                            &mut self.profile_input,
                            TableProfile::HeaderNamed,
                            "header-named",
                        );
                    });
                    ui.small(txt(
                        "gui.settings.restart_note",
                        "Reference file/profile changes apply on next start.",
                    ));
                    ui.separator();

                    if ui.button(txt("gui.settings.save", "Save settings")).clicked() {
                        self.config.language = self.lang_input.clone();
                        self.config.data_file = self.data_file_input.clone();
                        self.config.profile = self.profile_input;
                        // 언어는 즉시 반영, 테이블은 다음 실행부터.
                        let resolved = i18n::resolve_language(&self.config.language, None);
                        self.tr = i18n::Translator::new_with_pack(
                            &resolved,
                            self.config.language_pack_dir.as_deref(),
                        );
                        if let Err(e) = self.config.save() {
                            self.settings_status = Some(format!("Save error: {e}"));
                        } else {
                            self.settings_status = Some(txt("gui.settings.saved", "Saved."));
                        }
                    }
                    if let Some(msg) = &self.settings_status {
                        ui.label(msg);
                    }
                });
        }

        // 도움말 모달
        if self.show_help_modal {
            egui::Window::new(txt("gui.about.title", "Help / About"))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_help_modal)
                .show(ctx, |ui| {
                    ui.heading(txt(
                        "gui.about.app",
                        "Offline CUE/WSUE calculator over a county reference table",
                    ));
                    ui.separator();
                    ui.label(self.tr.t(i18n::keys::INFO_BODY));
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.table {
                    Ok(table) => self.ui_calculator(ui, table),
                    Err(ref msg) => {
                        ui.heading(txt("gui.load_error.title", "Reference table failed to load"));
                        ui.add_space(8.0);
                        ui.colored_label(ui.visuals().error_fg_color, msg.clone());
                        ui.add_space(8.0);
                        ui.label(format!(
                            "{} {}",
                            txt("gui.load_error.path", "Configured file:"),
                            self.config.data_file
                        ));
                        ui.label(txt(
                            "gui.load_error.hint",
                            "Fix the path in Settings and restart the application.",
                        ));
                    }
                });
        });
    }
}
