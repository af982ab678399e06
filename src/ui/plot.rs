use std::f64::consts::TAU;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Polygon};

use crate::color;
use crate::data::aggregate::GroupPoint;
use crate::widgets::{ChartKind, ChartWidget};

const CHART_HEIGHT: f32 = 240.0;

// ---------------------------------------------------------------------------
// Chart widget body
// ---------------------------------------------------------------------------

/// Draw one dashboard widget from its aggregated points.
pub fn widget_chart(ui: &mut Ui, widget: &ChartWidget, points: &[GroupPoint]) {
    if points.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No records match the current filters.");
        });
        return;
    }

    let stroke = widget.spec.color.color32();
    match widget.spec.kind {
        ChartKind::Pie => pie_chart(ui, widget.id, points),
        kind => category_chart(ui, widget.id, kind, stroke, points),
    }
}

/// Bar / line / area over category labels on the x axis.
fn category_chart(ui: &mut Ui, id: u64, kind: ChartKind, stroke: Color32, points: &[GroupPoint]) {
    let names: Vec<String> = points.iter().map(|p| p.name.clone()).collect();
    let xy: Vec<[f64; 2]> = points
        .iter()
        .enumerate()
        .map(|(i, p)| [i as f64, p.value])
        .collect();

    Plot::new(("widget_chart", id))
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            names.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| match kind {
            ChartKind::Bar => {
                let bars: Vec<Bar> = points
                    .iter()
                    .enumerate()
                    .map(|(i, p)| Bar::new(i as f64, p.value).name(&p.name).width(0.6))
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).color(stroke));
            }
            ChartKind::Line => {
                plot_ui.line(Line::new(PlotPoints::new(xy)).color(stroke).width(2.0));
            }
            ChartKind::Area => {
                plot_ui.line(
                    Line::new(PlotPoints::new(xy))
                        .color(stroke)
                        .width(2.0)
                        .fill(0.0_f32),
                );
            }
            ChartKind::Pie => {}
        });
}

/// Pie with one slice per group, coloured from the fixed palette.
fn pie_chart(ui: &mut Ui, id: u64, points: &[GroupPoint]) {
    let total: f64 = points.iter().map(|p| p.value.max(0.0)).sum();
    if total <= 0.0 {
        ui.label("Nothing to show: every group sums to zero.");
        return;
    }

    Plot::new(("widget_pie", id))
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for (i, p) in points.iter().enumerate() {
                let sweep = p.value.max(0.0) / total * TAU;
                if sweep <= 0.0 {
                    continue;
                }
                plot_ui.polygon(
                    Polygon::new(PlotPoints::new(slice_outline(start, sweep)))
                        .fill_color(color::slice_color(i))
                        .name(&p.name),
                );
                start += sweep;
            }
        });
}

/// Outline of a unit-circle slice starting at angle `start` (radians).
fn slice_outline(start: f64, sweep: f64) -> Vec<[f64; 2]> {
    let steps = ((sweep / TAU) * 64.0).ceil().max(2.0) as usize;
    let mut outline = Vec::with_capacity(steps + 2);
    outline.push([0.0, 0.0]);
    for s in 0..=steps {
        let angle = start + sweep * s as f64 / steps as f64;
        outline.push([angle.cos(), angle.sin()]);
    }
    outline
}
