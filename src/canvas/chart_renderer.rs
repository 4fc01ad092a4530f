use std::f64::consts::{FRAC_PI_2, TAU};
use lab_core::{ChartKind, ChartSpec};
use web_sys::CanvasRenderingContext2d;

const BACKGROUND: &str = "#ffffff";
const TEXT: &str = "#333333";
const AXIS: &str = "#999999";
const LEGEND_ROW: f64 = 18.0;

pub fn draw_chart(ctx: &CanvasRenderingContext2d, spec: &ChartSpec, width: f64, height: f64) {
    clear(ctx, width, height);
    match spec.kind {
        ChartKind::Pie => draw_pie(ctx, spec, width, height),
        ChartKind::Bar => draw_bar(ctx, spec, width, height),
    }
}

pub fn clear(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, width, height);
}

/// Pie on the left, legend on the right. Slices start at 12 o'clock and run
/// clockwise in series order.
fn draw_pie(ctx: &CanvasRenderingContext2d, spec: &ChartSpec, width: f64, height: f64) {
    let total = spec.total();
    let pie_w = width * 0.6;
    let radius = (pie_w.min(height) / 2.0 - 10.0).max(1.0);
    let (cx, cy) = (pie_w / 2.0, height / 2.0);

    if total <= 0.0 {
        ctx.set_stroke_style_str(AXIS);
        ctx.begin_path();
        let _ = ctx.arc(cx, cy, radius, 0.0, TAU);
        ctx.stroke();
    } else {
        let mut start = -FRAC_PI_2;
        for (i, (_, value)) in spec.points().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                continue;
            }
            let sweep = value / total * TAU;
            ctx.set_fill_style_str(spec.color(i));
            ctx.begin_path();
            ctx.move_to(cx, cy);
            let _ = ctx.arc(cx, cy, radius, start, start + sweep);
            ctx.close_path();
            ctx.fill();
            ctx.set_stroke_style_str(BACKGROUND);
            ctx.set_line_width(1.0);
            ctx.stroke();
            start += sweep;
        }
    }

    draw_legend(ctx, spec, pie_w + 10.0, (height - spec.labels.len() as f64 * LEGEND_ROW).max(0.0) / 2.0);
}

fn draw_legend(ctx: &CanvasRenderingContext2d, spec: &ChartSpec, x: f64, top: f64) {
    ctx.set_font("12px sans-serif");
    for (i, (label, value)) in spec.points().enumerate() {
        let y = top + i as f64 * LEGEND_ROW;
        ctx.set_fill_style_str(spec.color(i));
        ctx.fill_rect(x, y, 12.0, 12.0);
        ctx.set_fill_style_str(TEXT);
        let _ = ctx.fill_text(&format!("{label} ({value})"), x + 18.0, y + 10.0);
    }
}

/// Vertical bars with a zero baseline. Negative values hang below it.
fn draw_bar(ctx: &CanvasRenderingContext2d, spec: &ChartSpec, width: f64, height: f64) {
    let (left, right, top, bottom) = (40.0, 10.0, 24.0, 28.0);
    let plot_w = (width - left - right).max(1.0);
    let plot_h = (height - top - bottom).max(1.0);

    let finite = spec.series.iter().copied().filter(|v| v.is_finite());
    let max = finite.clone().fold(0.0_f64, f64::max);
    let min = finite.fold(0.0_f64, f64::min);
    let span = if max - min > 0.0 { max - min } else { 1.0 };
    let y_of = |v: f64| top + (max - v) / span * plot_h;
    let zero_y = y_of(0.0);

    ctx.set_stroke_style_str(AXIS);
    ctx.set_line_width(1.0);
    ctx.begin_path();
    ctx.move_to(left, top);
    ctx.line_to(left, top + plot_h);
    ctx.move_to(left, zero_y);
    ctx.line_to(left + plot_w, zero_y);
    ctx.stroke();

    ctx.set_font("10px sans-serif");
    ctx.set_fill_style_str(TEXT);
    let _ = ctx.fill_text(&format_tick(max), 2.0, top + 4.0);
    let _ = ctx.fill_text(&format_tick(min), 2.0, top + plot_h);

    if let Some(label) = &spec.series_label {
        ctx.set_fill_style_str(spec.color(0));
        ctx.fill_rect(left, 6.0, 12.0, 12.0);
        ctx.set_fill_style_str(TEXT);
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(label, left + 18.0, 16.0);
    }

    let n = spec.series.len().max(1) as f64;
    let slot_w = plot_w / n;
    let bar_w = slot_w * 0.7;
    ctx.set_font("10px sans-serif");
    for (i, (label, value)) in spec.points().enumerate() {
        let x = left + i as f64 * slot_w + (slot_w - bar_w) / 2.0;
        if value.is_finite() {
            let y = y_of(value);
            ctx.set_fill_style_str(spec.color(i));
            ctx.fill_rect(x, y.min(zero_y), bar_w, (y - zero_y).abs());
        }
        ctx.set_fill_style_str(TEXT);
        let text_w = ctx.measure_text(label).map(|m| m.width()).unwrap_or(0.0);
        let _ = ctx.fill_text(label, x + (bar_w - text_w) / 2.0, height - 10.0);
    }
}

fn format_tick(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}
