use client_core::view::{ActionItemView, LightView, QueueView, StatsView, SummaryItemView};
use eframe::egui;

use crate::ui::theme;

pub fn stats_grid(ui: &mut egui::Ui, stats: &StatsView) {
    egui::Grid::new("stats_grid")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            for (label, value) in stats.rows() {
                ui.label(label);
                ui.label(egui::RichText::new(value).monospace().strong());
                ui.end_row();
            }
        });
}

/// Two-lamp signal head; exactly one lamp is lit.
pub fn traffic_light(ui: &mut egui::Ui, light: &LightView) {
    ui.vertical(|ui| {
        ui.label(egui::RichText::new(light.direction.as_str()).strong());
        let (rect, _) = ui.allocate_exact_size(egui::vec2(30.0, 58.0), egui::Sense::hover());
        let painter = ui.painter();
        painter.rect_filled(rect, egui::CornerRadius::same(8), theme::LIGHT_HOUSING);

        let red_center = egui::pos2(rect.center().x, rect.top() + 15.0);
        let green_center = egui::pos2(rect.center().x, rect.bottom() - 15.0);
        let red = if light.red_active {
            theme::RED_ON
        } else {
            theme::RED_OFF
        };
        let green = if light.green_active {
            theme::GREEN_ON
        } else {
            theme::GREEN_OFF
        };
        painter.circle_filled(red_center, 10.0, red);
        painter.circle_filled(green_center, 10.0, green);
    });
}

pub fn queue_strip(ui: &mut egui::Ui, queue: &QueueView) {
    ui.horizontal_wrapped(|ui| {
        ui.add_sized(
            [90.0, 14.0],
            egui::Label::new(format!("{} ({})", queue.direction, queue.markers)),
        );
        for _ in 0..queue.drawn_markers() {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 9.0), egui::Sense::hover());
            ui.painter()
                .rect_filled(rect, egui::CornerRadius::same(2), theme::CAR);
        }
    });
}

pub fn action_item(ui: &mut egui::Ui, item: &ActionItemView) {
    egui::Frame::new()
        .inner_margin(egui::Margin::symmetric(6, 3))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(&item.headline);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(&item.reward).monospace());
                });
            });
        });
}

pub fn summary_item(ui: &mut egui::Ui, item: &SummaryItemView) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        let [title, rest @ ..] = item.lines();
        ui.label(egui::RichText::new(title).strong());
        for line in rest {
            ui.label(line);
        }
    });
}
