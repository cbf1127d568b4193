use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::{availability_color, legend_entries};
use crate::data::filter::AgeYear;
use crate::data::model::NurseryRecord;
use crate::state::{NurseryState, ViewUpdate};

/// Which view occupies the right-hand panel. Details and favorites are
/// mutually exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InfoPanel {
    #[default]
    Details,
    Favorites,
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filter panel. Widget changes are applied after drawing.
pub fn side_panel(ui: &mut Ui, state: &mut NurseryState) -> ViewUpdate {
    ui.heading("Filters");
    ui.separator();

    let criteria = state.criteria().clone();
    let mut age = criteria.age;
    let mut facility_type = criteria.facility_type.clone();
    let mut availability_only = criteria.availability_only;
    let facility_types: Vec<String> = state.dataset().facility_types().map(str::to_string).collect();

    ui.strong("Age");
    let age_label = |a: Option<AgeYear>| match a {
        Some(a) => format!("Age {a}"),
        None => "All ages".to_string(),
    };
    egui::ComboBox::from_id_salt("age_filter")
        .selected_text(age_label(age))
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut age, None, age_label(None));
            for a in AgeYear::all() {
                ui.selectable_value(&mut age, Some(a), age_label(Some(a)));
            }
        });

    ui.add_space(4.0);
    ui.strong("Facility type");
    egui::ComboBox::from_id_salt("facility_type_filter")
        .selected_text(facility_type.as_deref().unwrap_or("All types"))
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut facility_type, None, "All types");
            for t in &facility_types {
                ui.selectable_value(&mut facility_type, Some(t.clone()), t.as_str());
            }
        });

    ui.add_space(4.0);
    ui.checkbox(&mut availability_only, "Only with openings");

    ui.add_space(8.0);
    let clear = ui.button("Clear filters").clicked();

    ui.separator();
    ui.strong("Legend");
    for (label, color) in legend_entries() {
        ui.label(RichText::new(format!("● {label}")).color(color));
    }

    if clear {
        return state.clear_filters();
    }
    let mut update = ViewUpdate::default();
    if age != criteria.age {
        update = state.set_age_filter(age);
    }
    if facility_type != criteria.facility_type {
        update = state.set_facility_type_filter(facility_type);
    }
    if availability_only != criteria.availability_only {
        update = state.set_availability_only(availability_only);
    }
    update
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar with counts and the favorites toggle.
pub fn top_bar(ui: &mut Ui, state: &NurseryState, panel: &mut InfoPanel) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(format!(
            "{} nurseries loaded, {} visible",
            state.dataset().len(),
            state.visible_indices().len()
        ));

        ui.separator();

        let showing = *panel == InfoPanel::Favorites;
        let label = format!("★ Favorites ({})", state.favorites().len());
        if ui.selectable_label(showing, label).clicked() {
            *panel = if showing {
                InfoPanel::Details
            } else {
                InfoPanel::Favorites
            };
        }
    });
}

// ---------------------------------------------------------------------------
// Right panel – details / favorites
// ---------------------------------------------------------------------------

/// Render whichever view `panel` selects.
pub fn info_panel(ui: &mut Ui, state: &mut NurseryState, panel: InfoPanel) -> ViewUpdate {
    match panel {
        InfoPanel::Details => details_panel(ui, state),
        InfoPanel::Favorites => favorites_panel(ui, state),
    }
}

fn details_panel(ui: &mut Ui, state: &mut NurseryState) -> ViewUpdate {
    ui.heading("Details");
    ui.separator();

    let Some(record) = state.selected_record() else {
        ui.label("Click a marker to see its openings.");
        return ViewUpdate::default();
    };
    let id = record.id;
    let favorite = state.is_favorite(id);

    record_details(ui, record);
    ui.add_space(8.0);

    let text = if favorite {
        "Remove from favorites"
    } else {
        "Add to favorites"
    };
    let mut update = ViewUpdate::default();
    ui.horizontal(|ui: &mut Ui| {
        if ui.button(text).clicked() {
            update = state.toggle_favorite(id);
        }
        if ui.button("Close").clicked() {
            update = state.clear_selection();
        }
    });
    update
}

fn record_details(ui: &mut Ui, record: &NurseryRecord) {
    ui.label(RichText::new(&record.name).strong().size(16.0));
    ui.label(record.facility_type.as_str());
    if !record.age_group.is_empty() {
        ui.label(format!("Ages {}", record.age_group));
    }
    ui.add_space(4.0);

    egui::Grid::new("capacity_grid")
        .num_columns(record.age_slots.len())
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            for age in 0..record.age_slots.len() {
                ui.label(format!("{age}y"));
            }
            ui.end_row();
            for &count in &record.age_slots {
                let color = if count > 0 {
                    Color32::from_rgb(40, 160, 60)
                } else {
                    Color32::GRAY
                };
                ui.label(RichText::new(count.to_string()).color(color));
            }
            ui.end_row();
        });

    ui.add_space(4.0);
    ui.label(
        RichText::new(format!("Total openings: {}", record.total_available()))
            .color(availability_color(record.availability())),
    );
    if !record.extended_care.is_empty() {
        ui.label(format!("Extended care: {} h", record.extended_care));
    }
    if !record.date.is_empty() {
        ui.label(RichText::new(format!("As of {}", record.date)).weak());
    }
}

fn favorites_panel(ui: &mut Ui, state: &mut NurseryState) -> ViewUpdate {
    ui.heading("Favorites");
    ui.separator();

    let entries: Vec<(u32, String, String)> = state
        .favorite_records()
        .iter()
        .map(|r| {
            (
                r.id,
                r.name.clone(),
                format!("{} | {} open", r.facility_type, r.total_available()),
            )
        })
        .collect();

    if entries.is_empty() {
        ui.label("No favorites yet.");
        return ViewUpdate::default();
    }

    let mut clicked = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (id, name, summary) in &entries {
                let response = ui.selectable_label(false, RichText::new(name).strong());
                ui.label(summary.as_str());
                ui.separator();
                if response.clicked() {
                    clicked = Some(*id);
                }
            }
        });

    match clicked {
        Some(id) => state.select_record(id),
        None => ViewUpdate::default(),
    }
}
