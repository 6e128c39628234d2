//! UI helper components and the view-tree painter

use eframe::egui;

use rusty_txlist_adapters::item_renderer::{
    BADGE_CLASS, EARLIEST_CLASS, EARLIEST_ITEM_CLASS, HASH_CLASS, ITEM_CLASS, NONCE_CLASS,
    STATUS_CLASS, TITLE_CLASS,
};
use rusty_txlist_core::view::{
    COMPLETED_CLASS, EMPTY_CLASS, HEADER_CLASS, PENDING_CLASS,
};
use rusty_txlist_core::ViewNode;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0, 212, 170);
const BADGE: egui::Color32 = egui::Color32::from_rgb(220, 180, 50);

pub fn open_url_new_tab(url: &str) {
    if let Err(e) = open::that(url) {
        tracing::warn!(%url, error = %e, "failed to open browser");
    }
}

pub fn copy_to_clipboard(text: &str) {
    if let Ok(mut clipboard) = arboard::Clipboard::new() {
        let _ = clipboard.set_text(text);
    }
}

/// Styled heading with accent color
pub fn styled_heading(ui: &mut egui::Ui, text: &str) {
    ui.heading(egui::RichText::new(text).color(ACCENT));
}

/// Section header with separator
pub fn section_header(ui: &mut egui::Ui, text: &str) {
    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(text).strong().size(14.0));
    });
    ui.separator();
}

/// Error message display
pub fn error_message(ui: &mut egui::Ui, message: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("❌").size(16.0));
        ui.label(egui::RichText::new(message).color(egui::Color32::from_rgb(220, 80, 80)));
    });
}

/// Paints a transaction list view tree.
pub fn paint_view(ui: &mut egui::Ui, node: &ViewNode) {
    match node {
        ViewNode::Text(text) => {
            ui.label(text);
        }
        ViewNode::Link { text, href } => paint_hash_link(ui, text, href),
        ViewNode::Keyed { key, node } => {
            ui.push_id(key, |ui| paint_view(ui, node));
        }
        ViewNode::Element { class, children } => paint_element(ui, class, children, node),
    }
}

fn paint_element(ui: &mut egui::Ui, class: &str, children: &[ViewNode], node: &ViewNode) {
    match class {
        HEADER_CLASS => section_header(ui, &node.text_content()),
        EMPTY_CLASS => {
            ui.add_space(20.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(node.text_content()).weak().size(15.0));
            });
        }
        PENDING_CLASS | COMPLETED_CLASS => {
            ui.vertical(|ui| paint_children(ui, children));
            ui.add_space(8.0);
        }
        ITEM_CLASS | EARLIEST_ITEM_CLASS => {
            let stroke_color = if class == EARLIEST_ITEM_CLASS {
                ACCENT
            } else {
                ui.visuals().widgets.noninteractive.bg_stroke.color
            };
            egui::Frame::group(ui.style())
                .stroke(egui::Stroke::new(1.0, stroke_color))
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal_wrapped(|ui| paint_children(ui, children));
                });
            ui.add_space(4.0);
        }
        TITLE_CLASS => {
            ui.label(egui::RichText::new(node.text_content()).strong().size(14.0));
        }
        NONCE_CLASS => {
            ui.label(egui::RichText::new(node.text_content()).monospace().weak());
        }
        STATUS_CLASS => {
            ui.label(node.text_content());
        }
        BADGE_CLASS => {
            ui.label(egui::RichText::new(node.text_content()).small().color(BADGE));
        }
        EARLIEST_CLASS => {
            ui.label(egui::RichText::new(node.text_content()).small().color(ACCENT));
        }
        HASH_CLASS => paint_children(ui, children),
        _ => {
            ui.vertical(|ui| paint_children(ui, children));
        }
    }
}

fn paint_children(ui: &mut egui::Ui, children: &[ViewNode]) {
    for child in children {
        paint_view(ui, child);
    }
}

fn paint_hash_link(ui: &mut egui::Ui, text: &str, href: &str) {
    let response = ui
        .link(egui::RichText::new(text).monospace())
        .on_hover_text("Open in block explorer");
    if response.clicked() {
        open_url_new_tab(href);
    }
    if ui
        .small_button("📋")
        .on_hover_text("Copy transaction hash")
        .clicked()
    {
        if let Some(hash) = href.rsplit('/').next() {
            copy_to_clipboard(hash);
        }
    }
}
