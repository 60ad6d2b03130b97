use chrono::{Datelike, Month, NaiveDate};
use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Legend, Line, Plot, PlotPoint, PlotPoints, Points};

use crate::data::series::DailyQuantity;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Daily quantity chart (central panel)
// ---------------------------------------------------------------------------

/// Render the "Quantity Sold" line chart for the configured month.
pub fn quantity_chart(ui: &mut Ui, state: &AppState) {
    let Some(dashboard) = &state.dashboard else {
        return;
    };

    ui.label(RichText::new(chart_title(state.month)).size(18.0).strong());

    let series = &dashboard.daily_quantity;
    if series.is_empty() {
        ui.label(RichText::new("No sales in this month for the current selection.").weak());
        return;
    }

    let color = state
        .color_map
        .as_ref()
        .map(|cm| cm.color_for(&state.selection))
        .unwrap_or(Color32::LIGHT_BLUE);
    let name = state.selection.to_string();

    let line_points: PlotPoints = series.iter().map(to_plot_point).collect();
    let marker_points: PlotPoints = series.iter().map(to_plot_point).collect();

    Plot::new("quantity_plot")
        .height(320.0)
        .legend(Legend::default())
        .x_axis_label("Order date")
        .y_axis_label("Quantity")
        .x_axis_formatter(|mark, _range| format_day(mark.value))
        .label_formatter(|_name, value: &PlotPoint| {
            format!("{}\nQuantity: {:.0}", format_day(value.x.round()), value.y)
        })
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(line_points).name(&name).color(color).width(2.0));
            plot_ui.points(Points::new(marker_points).color(color).radius(3.0));
        });
}

/// Per-day figures under the chart.
pub fn daily_table(ui: &mut Ui, state: &AppState) {
    let Some(dashboard) = &state.dashboard else {
        return;
    };
    let series = &dashboard.daily_quantity;
    if series.is_empty() {
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(140.0))
        .column(Column::remainder())
        .max_scroll_height(240.0)
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Date");
            });
            header.col(|ui| {
                ui.strong("Quantity");
            });
        })
        .body(|mut body| {
            for point in series {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(point.date.format("%Y-%m-%d").to_string());
                    });
                    row.col(|ui| {
                        ui.label(point.total_quantity.to_string());
                    });
                });
            }
        });
}

fn to_plot_point(point: &DailyQuantity) -> [f64; 2] {
    [
        f64::from(point.date.num_days_from_ce()),
        point.total_quantity as f64,
    ]
}

/// Axis label for an x value holding days since the common era; blank between days.
fn format_day(x: f64) -> String {
    if (x - x.round()).abs() > 1e-6 {
        return String::new();
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
        .map(|d| d.format("%b %d").to_string())
        .unwrap_or_default()
}

pub fn chart_title(month: u32) -> String {
    let name = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("the Month");
    format!("Quantity Sold over {name}")
}
