use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::stats::SummaryStats;
use crate::state::AppState;

const CARD_BG: Color32 = Color32::from_rgb(0x11, 0x11, 0x11);
const INCOME_BG: Color32 = Color32::from_rgb(0x09, 0x3b, 0x09);
const COSTS_BG: Color32 = Color32::from_rgb(0x4e, 0x00, 0x00);
const PROFIT_BG: Color32 = Color32::from_rgb(0x00, 0x00, 0x62);

/// One titled figure on a coloured tile.
struct StatCard {
    title: &'static str,
    value: String,
    fill: Color32,
}

impl StatCard {
    fn show(&self, ui: &mut Ui) {
        egui::Frame::default()
            .fill(self.fill)
            .corner_radius(egui::CornerRadius::same(4))
            .inner_margin(egui::Margin::symmetric(12, 10))
            .show(ui, |ui: &mut Ui| {
                ui.set_min_width(ui.available_width());
                ui.vertical_centered(|ui: &mut Ui| {
                    ui.label(RichText::new(self.title).size(12.0).color(Color32::from_gray(0xbb)));
                    ui.label(RichText::new(&self.value).size(24.0).color(Color32::from_gray(0xdd)));
                });
            });
    }
}

fn card_row(ui: &mut Ui, cards: &[StatCard]) {
    ui.columns(cards.len(), |columns: &mut [Ui]| {
        for (col, card) in columns.iter_mut().zip(cards) {
            card.show(col);
        }
    });
}

/// "Top Stats" row followed by the income / costs / profit row.
pub fn stat_rows(ui: &mut Ui, state: &AppState) {
    let Some(dashboard) = &state.dashboard else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a sales file to view the dashboard  (File → Open…)");
        });
        return;
    };
    let stats = &dashboard.summary;

    ui.label(RichText::new("Top Stats").size(18.0).strong());
    ui.add_space(6.0);
    card_row(ui, &top_cards(stats));
    ui.add_space(12.0);
    card_row(ui, &money_cards(stats));
}

fn top_cards(stats: &SummaryStats) -> [StatCard; 3] {
    [
        StatCard {
            title: "Total Invoices",
            value: stats.total_invoices.to_string(),
            fill: CARD_BG,
        },
        StatCard {
            title: "Average Rating",
            value: format_rating(stats.average_rating),
            fill: CARD_BG,
        },
        StatCard {
            title: "Most Active Time",
            value: format_time(&stats.most_active_time),
            fill: CARD_BG,
        },
    ]
}

fn money_cards(stats: &SummaryStats) -> [StatCard; 3] {
    [
        StatCard {
            title: "Income",
            value: format_currency(stats.income),
            fill: INCOME_BG,
        },
        StatCard {
            title: "Costs",
            value: format_currency(stats.costs),
            fill: COSTS_BG,
        },
        StatCard {
            title: "Profit",
            value: format_currency(stats.profit),
            fill: PROFIT_BG,
        },
    ]
}

pub fn format_rating(rating: f64) -> String {
    format!("{rating:.2}")
}

pub fn format_currency(amount: f64) -> String {
    format!("£ {amount:.1}")
}

/// Empty views have no most active time; show a dash instead of nothing.
pub fn format_time(time: &str) -> String {
    if time.is_empty() {
        "–".to_string()
    } else {
        time.to_string()
    }
}
