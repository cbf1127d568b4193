use eframe::egui::Ui;
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points};

use crate::color::{availability_color, favorite_color};
use crate::config::MAP_CENTER;
use crate::data::model::Availability;
use crate::state::{NurseryState, ViewUpdate};

/// Screen distance (points) within which a click picks a marker.
const PICK_RADIUS: f32 = 12.0;

// ---------------------------------------------------------------------------
// Marker map (central panel)
// ---------------------------------------------------------------------------

/// Render visible nurseries as markers at (longitude, latitude).
///
/// Clicking near a marker selects it for the detail panel.
pub fn nursery_map(ui: &mut Ui, state: &mut NurseryState) -> ViewUpdate {
    let records = state.dataset().records();
    let visible = state.visible_indices();

    let response = Plot::new("nursery_map")
        .legend(Legend::default())
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .data_aspect(1.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if visible.is_empty() {
                let (lat, lng) = MAP_CENTER;
                plot_ui.points(
                    Points::new(PlotPoints::new(vec![[lng, lat]]))
                        .name("Meguro")
                        .shape(MarkerShape::Plus)
                        .radius(6.0),
                );
            }

            for category in Availability::ALL {
                let points: PlotPoints = visible
                    .iter()
                    .map(|&i| &records[i])
                    .filter(|r| r.availability() == category)
                    .map(|r| [r.longitude, r.latitude])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name(category.to_string())
                        .color(availability_color(category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(5.0),
                );
            }

            let favorites: PlotPoints = visible
                .iter()
                .map(|&i| &records[i])
                .filter(|r| state.is_favorite(r.id))
                .map(|r| [r.longitude, r.latitude])
                .collect();
            plot_ui.points(
                Points::new(favorites)
                    .name("Favorites")
                    .color(favorite_color())
                    .shape(MarkerShape::Asterisk)
                    .radius(9.0),
            );
        });

    if !response.response.clicked() {
        return ViewUpdate::default();
    }
    let Some(pointer) = response.response.interact_pointer_pos() else {
        return ViewUpdate::default();
    };

    let transform = &response.transform;
    let picked = visible
        .iter()
        .map(|&i| &records[i])
        .map(|r| {
            let screen = transform.position_from_point(&PlotPoint::new(r.longitude, r.latitude));
            (r.id, screen.distance(pointer))
        })
        .filter(|(_, d)| *d <= PICK_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id);

    match picked {
        Some(id) => state.select_record(id),
        None => ViewUpdate::default(),
    }
}
