//! Simulator panel that drives the transaction store, feature flags and locale

use eframe::egui;

use rusty_txlist_adapters::LocaleCatalog;

/// Sidebar action returned after rendering
pub enum SimulatorAction {
    None,
    Submit,
    SpeedUp(u64),
    Cancel(u64),
    Confirm(u64),
    Fail(u64),
    SetTransactionTime(bool),
    SwitchLocale(String),
}

pub struct SimulatorState {
    pub collapsed: bool,
    pub recipient: String,
    pub value_wei: String,
    pub nonce: String,
    pub transaction_time: bool,
    pub locale: String,
}

impl SimulatorState {
    pub fn new(transaction_time: bool, locale: String) -> Self {
        Self {
            collapsed: false,
            recipient: "0x000000000000000000000000000000000000dEaD".to_owned(),
            value_wei: "1000000000000000".to_owned(),
            nonce: String::new(),
            transaction_time,
            locale,
        }
    }

    /// Nonce typed into the panel, or the lowest pending one.
    fn target_nonce(&self, lowest_pending: Option<u64>) -> Option<u64> {
        match self.nonce.trim() {
            "" => lowest_pending,
            typed => typed.parse().ok(),
        }
    }
}

/// Render the simulator panel
pub fn render(
    ctx: &egui::Context,
    state: &mut SimulatorState,
    lowest_pending: Option<u64>,
) -> SimulatorAction {
    let mut action = SimulatorAction::None;

    egui::SidePanel::left("simulator_panel")
        .resizable(true)
        .default_width(260.0)
        .min_width(60.0)
        .show_animated(ctx, !state.collapsed, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    ui.heading(egui::RichText::new("Simulator").size(16.0).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("◀").on_hover_text("Collapse panel").clicked() {
                            state.collapsed = true;
                        }
                    });
                });
                ui.separator();

                ui.label("Recipient:");
                ui.add(
                    egui::TextEdit::singleline(&mut state.recipient)
                        .hint_text("0x...")
                        .desired_width(f32::INFINITY)
                        .font(egui::TextStyle::Monospace),
                );
                ui.label("Value (wei):");
                ui.add(
                    egui::TextEdit::singleline(&mut state.value_wei)
                        .desired_width(f32::INFINITY)
                        .font(egui::TextStyle::Monospace),
                );
                if ui.button("➕ Submit transaction").clicked() {
                    action = SimulatorAction::Submit;
                }

                ui.add_space(10.0);
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label("Nonce:");
                    let hint = lowest_pending
                        .map(|nonce| nonce.to_string())
                        .unwrap_or_else(|| "-".to_owned());
                    ui.add(
                        egui::TextEdit::singleline(&mut state.nonce)
                            .hint_text(hint)
                            .desired_width(80.0)
                            .font(egui::TextStyle::Monospace),
                    );
                });

                let target = state.target_nonce(lowest_pending);
                ui.add_enabled_ui(target.is_some(), |ui| {
                    ui.horizontal_wrapped(|ui| {
                        if let Some(nonce) = target {
                            if ui.button("⏩ Speed up").clicked() {
                                action = SimulatorAction::SpeedUp(nonce);
                            }
                            if ui.button("✖ Cancel").clicked() {
                                action = SimulatorAction::Cancel(nonce);
                            }
                            if ui.button("✔ Confirm").clicked() {
                                action = SimulatorAction::Confirm(nonce);
                            }
                            if ui.button("⚠ Fail").clicked() {
                                action = SimulatorAction::Fail(nonce);
                            }
                        } else {
                            ui.label(egui::RichText::new("No pending nonce").weak());
                        }
                    });
                });

                ui.add_space(10.0);
                ui.separator();
                if ui
                    .checkbox(&mut state.transaction_time, "transactionTime feature")
                    .changed()
                {
                    action = SimulatorAction::SetTransactionTime(state.transaction_time);
                }

                ui.horizontal(|ui| {
                    ui.label("Locale:");
                    egui::ComboBox::from_id_salt("simulator_locale")
                        .selected_text(&state.locale)
                        .width(80.0)
                        .show_ui(ui, |ui| {
                            for code in LocaleCatalog::available_locales() {
                                if ui
                                    .selectable_label(state.locale == code, code)
                                    .clicked()
                                {
                                    state.locale = code.to_owned();
                                    action = SimulatorAction::SwitchLocale(code.to_owned());
                                }
                            }
                        });
                });
            });
        });

    if state.collapsed {
        egui::SidePanel::left("simulator_panel_collapsed")
            .exact_width(32.0)
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(10.0);
                if ui.button("▶").on_hover_text("Expand panel").clicked() {
                    state.collapsed = false;
                }
            });
    }

    action
}
