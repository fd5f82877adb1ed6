use eframe::egui::{self, RichText, Ui};
use launch_dash::data::model::{site_label, PayloadRange, SiteSelector};

use crate::state::AppState;
use crate::ui::to_color32;

// ---------------------------------------------------------------------------
// Left side panel – site and payload controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // ---- Launch site dropdown ----
    ui.strong("Launch site");
    let current = state.site.clone();
    let selected_text = match &current {
        SiteSelector::All => "All Sites".to_string(),
        SiteSelector::Site(site) => site.clone(),
    };
    let sites = state.dataset.sites().to_vec();

    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current == SiteSelector::All, "All Sites")
                .clicked()
            {
                state.set_site(SiteSelector::All);
            }
            for site in &sites {
                let label = site_label(site).unwrap_or(site.as_str());
                let is_selected = current.as_str() == site;
                if ui.selectable_label(is_selected, label).clicked() {
                    state.set_site(SiteSelector::Site(site.clone()));
                }
            }
        });

    ui.add_space(8.0);
    ui.separator();

    // ---- Payload range (two sliders, kept ordered) ----
    ui.strong("Payload range (kg)");
    let bounds = state.dataset.payload_bounds();
    let PayloadRange { mut low, mut high } = state.payload_range;

    let low_changed = ui
        .add(egui::Slider::new(&mut low, bounds.low..=bounds.high).text("from"))
        .changed();
    let high_changed = ui
        .add(egui::Slider::new(&mut high, bounds.low..=bounds.high).text("to"))
        .changed();

    if low_changed && low > high {
        high = low;
    }
    if high_changed && high < low {
        low = high;
    }
    if low_changed || high_changed {
        state.set_payload_range(PayloadRange::new(low, high));
    }

    if ui.small_button("Reset range").clicked() {
        state.reset_payload_range();
    }

    ui.add_space(8.0);
    ui.separator();

    ui.checkbox(&mut state.show_points, "Show points table");

    ui.add_space(8.0);
    ui.separator();

    // ---- Booster colour legend ----
    ui.strong("Booster Version Category");
    for (label, color) in state.booster_colors.legend_entries() {
        ui.label(RichText::new(format!("● {label}")).color(to_color32(color)));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with dataset counts.
pub fn top_bar(ui: &mut Ui, state: &AppState, title: &str) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(RichText::new(title).strong());

        ui.separator();

        ui.label(format!(
            "{} launches loaded, {} in payload range",
            state.dataset.len(),
            state.points.len()
        ));

        if !state.payload_range.is_valid() {
            ui.label(RichText::new("Invalid payload range").color(egui::Color32::RED));
        }
    });
}
