//! Main application state and update loop

use std::sync::Arc;

use alloy::primitives::{address, Address, U256};
use eframe::egui;
use eyre::WrapErr;

use rusty_txlist_adapters::{
    DefaultItemRenderer, FeatureFlagStore, GasStationAdapter, LocaleCatalog, SystemClockAdapter,
    ThreadedRefreshDispatcher, TransactionStore, TxListAdapterConfig,
};
use rusty_txlist_core::{FeatureFlags, RefreshError, RefreshOutcome, TransactionList};

use crate::sidebar::{self, SimulatorAction, SimulatorState};
use crate::ui;

/// Path to a JSON array of transaction records loaded at startup
const FIXTURE_ENV: &str = "RUSTY_TXLIST_FIXTURE";
/// Overrides the gas station base URL
const GAS_STATION_ENV: &str = "RUSTY_TXLIST_GAS_STATION_URL";
/// Overrides the startup locale
const LOCALE_ENV: &str = "RUSTY_TXLIST_LOCALE";

const DEMO_OWNER: Address = address!("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");

type Component = TransactionList<
    TransactionStore,
    FeatureFlagStore,
    LocaleCatalog,
    DefaultItemRenderer<LocaleCatalog>,
    ThreadedRefreshDispatcher<GasStationAdapter>,
>;

/// The main application state
pub struct App {
    /// Transaction list and its ports
    list: Component,
    config: TxListAdapterConfig,
    clock: SystemClockAdapter,
    /// Sender of simulated transactions
    owner: Address,
    simulator: SimulatorState,
    /// Last failed simulator action
    error: Option<String>,
}

impl App {
    /// Create a new App instance
    pub fn new(cc: &eframe::CreationContext<'_>) -> eyre::Result<Self> {
        let config = config_from_env();

        let store = match std::env::var(FIXTURE_ENV) {
            Ok(path) => {
                let json = std::fs::read_to_string(&path)
                    .wrap_err_with(|| format!("reading transaction fixture {path}"))?;
                let store = TransactionStore::from_json(&json)
                    .wrap_err_with(|| format!("parsing transaction fixture {path}"))?;
                tracing::info!(%path, "loaded transaction fixture");
                store
            }
            Err(_) => TransactionStore::default(),
        };
        let owner = store
            .records()
            .wrap_err("reading transaction store")?
            .first()
            .map(|record| record.from)
            .unwrap_or(DEMO_OWNER);

        let flags = FeatureFlagStore::new(FeatureFlags {
            transaction_time: true,
            ..FeatureFlags::default()
        });
        let catalog = LocaleCatalog::bundled(&config.default_locale, &config.fallback_locale)
            .wrap_err("loading locale catalog")?;
        let items = DefaultItemRenderer::new(catalog.clone(), config.explorer_base_url.clone());

        let gas = GasStationAdapter::with_config(config.clone())
            .wrap_err("building gas station client")?;
        let repaint_ctx = cc.egui_ctx.clone();
        let dispatcher = ThreadedRefreshDispatcher::new(gas)
            .with_on_settled(Arc::new(
                move |_: &Result<RefreshOutcome, RefreshError>| repaint_ctx.request_repaint(),
            ));

        let simulator = SimulatorState::new(true, config.default_locale.clone());

        Ok(Self {
            list: TransactionList::new(store, flags, catalog, items, dispatcher),
            config,
            clock: SystemClockAdapter,
            owner,
            simulator,
            error: None,
        })
    }

    fn apply(&mut self, action: SimulatorAction) -> eyre::Result<()> {
        match action {
            SimulatorAction::None => {}
            SimulatorAction::Submit => {
                let to: Address = self
                    .simulator
                    .recipient
                    .trim()
                    .parse()
                    .wrap_err("invalid recipient address")?;
                let value: U256 = self
                    .simulator
                    .value_wei
                    .trim()
                    .parse()
                    .wrap_err("invalid value")?;
                let record = self.list.source.submit(self.owner, to, value, &self.clock)?;
                tracing::info!(nonce = record.nonce, "submitted transaction");
            }
            SimulatorAction::SpeedUp(nonce) => {
                self.list.source.speed_up(self.owner, nonce, &self.clock)?;
                tracing::info!(nonce, "sped up transaction");
            }
            SimulatorAction::Cancel(nonce) => {
                self.list.source.cancel(self.owner, nonce, &self.clock)?;
                tracing::info!(nonce, "cancelled transaction");
            }
            SimulatorAction::Confirm(nonce) => {
                self.list.source.confirm(self.owner, nonce)?;
                tracing::info!(nonce, "confirmed transaction");
            }
            SimulatorAction::Fail(nonce) => {
                self.list.source.fail(self.owner, nonce)?;
                tracing::info!(nonce, "failed transaction");
            }
            SimulatorAction::SetTransactionTime(active) => {
                self.list.flags.set_transaction_time(active)?;
                tracing::info!(active, "transactionTime feature toggled");
            }
            SimulatorAction::SwitchLocale(code) => self.list.translator.set_locale(&code)?,
        }
        Ok(())
    }

    fn render_gas_status(&self, ui: &mut egui::Ui) {
        let state = match self.list.dispatcher.gas().snapshot() {
            Ok(state) => state,
            Err(e) => {
                ui::error_message(ui, &e.to_string());
                return;
            }
        };

        ui.horizontal(|ui| {
            if state.basic_loading || state.estimates_loading {
                ui.spinner();
            }
            let Some(basic) = &state.basic else {
                ui.label(egui::RichText::new("No gas estimates yet").weak());
                return;
            };
            let average = format!("{:.1}", basic.average);
            let wait = format!("{:.1}", basic.avg_wait);
            if let Some(summary) = self
                .list
                .translator
                .message("gasEstimateSummary", &[average.as_str(), wait.as_str()])
            {
                ui.label(summary);
            }
            let quickest = state
                .price_and_time
                .iter()
                .min_by(|a, b| a.expected_time_secs.total_cmp(&b.expected_time_secs));
            if let Some(quickest) = quickest {
                ui.label(
                    egui::RichText::new(format!(
                        "· {:.0}s at {:.1} gwei ({} points)",
                        quickest.expected_time_secs,
                        quickest.gas_price_gwei,
                        state.price_and_time.len()
                    ))
                    .weak(),
                );
            }
        });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        let lowest_pending = match self.list.source.pending_for(self.owner) {
            Ok(pending) => pending.first().map(|group| group.nonce),
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        };
        let action = sidebar::render(ctx, &mut self.simulator, lowest_pending);
        if let Err(e) = self.apply(action) {
            tracing::warn!(error = %e, "simulator action failed");
            self.error = Some(format!("{e:#}"));
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading(egui::RichText::new("🧾 Rusty-TxList").size(22.0).color(ui::ACCENT));
                ui.add_space(30.0);
                ui.separator();
                ui.label(egui::RichText::new(self.owner.to_string()).monospace().weak());
            });
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_gas_status(ui);
            let git_hash = env!("GIT_HASH");
            ui.label(
                egui::RichText::new(format!(
                    "build {} · {}",
                    git_hash.get(..8).unwrap_or(git_hash),
                    env!("BUILD_TIME")
                ))
                .small()
                .weak(),
            );
            ui.add_space(4.0);
        });

        let is_wide = self.config.is_wide_viewport(ctx.screen_rect().width());
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(10.0);
                ui::styled_heading(ui, "Activity");
                let mut dismissed = false;
                if let Some(error) = &self.error {
                    ui::error_message(ui, error);
                    dismissed = ui.small_button("Dismiss").clicked();
                }
                if dismissed {
                    self.error = None;
                }
                match self.list.render(is_wide) {
                    Ok(view) => ui::paint_view(ui, &view),
                    Err(e) => ui::error_message(ui, &e.to_string()),
                }
                ui.add_space(20.0);
            });
        });
    }
}

fn config_from_env() -> TxListAdapterConfig {
    let defaults = TxListAdapterConfig::default();
    TxListAdapterConfig {
        gas_station_base_url: std::env::var(GAS_STATION_ENV)
            .unwrap_or_else(|_| defaults.gas_station_base_url.clone()),
        default_locale: std::env::var(LOCALE_ENV)
            .unwrap_or_else(|_| defaults.default_locale.clone()),
        ..defaults
    }
}
