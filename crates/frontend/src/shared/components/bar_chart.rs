//! Canvas bar chart.
//!
//! The canvas element and its 2d context are reused across redraws; every
//! redraw clears the full surface first, so no stale drawing survives a
//! filter change.

use leptos::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const BAR_COLOR: &str = "#4c7dd0";
const AXIS_COLOR: &str = "#adb5bd";
const TEXT_COLOR: &str = "#495057";
const PADDING: f64 = 32.0;

#[component]
pub fn BarChart(
    /// Chart title
    title: &'static str,
    /// Label -> total pairs, already sorted by label
    #[prop(into)]
    series: Signal<Vec<(String, f64)>>,
) -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    Effect::new(move |_| {
        let data = series.get();
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        if let Err(err) = draw(&canvas, &data) {
            log::error!("Chart redraw failed: {:?}", err);
        }
    });

    view! {
        <div class="chart-card">
            <h3 class="chart-card__title">{title}</h3>
            <canvas node_ref=canvas_ref width="480" height="260"></canvas>
        </div>
    }
}

fn draw(canvas: &HtmlCanvasElement, series: &[(String, f64)]) -> Result<(), JsValue> {
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Dispose of the previous drawing before building the new one
    ctx.clear_rect(0.0, 0.0, width, height);

    ctx.set_font("11px sans-serif");
    ctx.set_text_align("center");

    if series.is_empty() {
        ctx.set_fill_style_str(TEXT_COLOR);
        ctx.fill_text("No data", width / 2.0, height / 2.0)?;
        return Ok(());
    }

    let plot_width = width - PADDING * 2.0;
    let plot_height = height - PADDING * 2.0;
    let max_value = series
        .iter()
        .map(|(_, value)| *value)
        .fold(f64::MIN, f64::max)
        .max(1.0);

    let slot = plot_width / series.len() as f64;
    let bar_width = slot * 0.6;

    for (i, (label, value)) in series.iter().enumerate() {
        let bar_height = (value.max(0.0) / max_value) * plot_height;
        let x = PADDING + slot * i as f64 + (slot - bar_width) / 2.0;
        let y = height - PADDING - bar_height;

        ctx.set_fill_style_str(BAR_COLOR);
        ctx.fill_rect(x, y, bar_width, bar_height);

        ctx.set_fill_style_str(TEXT_COLOR);
        let center = x + bar_width / 2.0;
        ctx.fill_text(&truncate(label, 12), center, height - PADDING + 14.0)?;
        ctx.fill_text(&format!("{:.0}", value), center, (y - 4.0).max(10.0))?;
    }

    // Baseline
    ctx.set_stroke_style_str(AXIS_COLOR);
    ctx.begin_path();
    ctx.move_to(PADDING, height - PADDING);
    ctx.line_to(width - PADDING, height - PADDING);
    ctx.stroke();

    Ok(())
}

fn truncate(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        label.to_string()
    } else {
        let head: String = label.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}\u{2026}", head)
    }
}
