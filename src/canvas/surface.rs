use lab_core::{ChartSlot, ChartSpec, ChartSurface};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use crate::canvas::chart_renderer;

const FALLBACK_SIZE: (u32, u32) = (400, 300);

/// Draws charts into the page's canvases, looked up by slot id.
#[derive(Default)]
pub struct CanvasSurface;

/// The canvas a chart was drawn into, kept so it can be wiped again.
pub struct DrawnChart {
    canvas: Option<HtmlCanvasElement>,
}

fn canvas_for(slot: ChartSlot) -> Option<HtmlCanvasElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(slot.canvas_id())?
        .dyn_into::<HtmlCanvasElement>()
        .ok()
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas.get_context("2d").ok()??.dyn_into::<CanvasRenderingContext2d>().ok()
}

/// Match the backing store to the displayed size. Hidden sections report a
/// zero rect, in which case the previous size (or a fallback) is kept.
fn fit(canvas: &HtmlCanvasElement) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    let (w, h) = (rect.width() as u32, rect.height() as u32);
    if w > 0 && h > 0 {
        if canvas.width() != w || canvas.height() != h {
            canvas.set_width(w);
            canvas.set_height(h);
        }
    } else if canvas.width() == 0 || canvas.height() == 0 {
        canvas.set_width(FALLBACK_SIZE.0);
        canvas.set_height(FALLBACK_SIZE.1);
    }
    (canvas.width() as f64, canvas.height() as f64)
}

impl ChartSurface for CanvasSurface {
    type Chart = DrawnChart;

    fn is_mounted(&self, slot: ChartSlot) -> bool {
        canvas_for(slot).is_some()
    }

    fn mount(&mut self, slot: ChartSlot, spec: &ChartSpec) -> DrawnChart {
        let Some(canvas) = canvas_for(slot) else {
            log::error!("Canvas {} vanished before drawing", slot.canvas_id());
            return DrawnChart { canvas: None };
        };
        let (w, h) = fit(&canvas);
        match context_2d(&canvas) {
            Some(ctx) => chart_renderer::draw_chart(&ctx, spec, w, h),
            None => log::error!("No 2d context for {}", slot.canvas_id()),
        }
        DrawnChart { canvas: Some(canvas) }
    }

    fn destroy(&mut self, _slot: ChartSlot, chart: DrawnChart) {
        let Some(canvas) = chart.canvas else { return };
        if let Some(ctx) = context_2d(&canvas) {
            chart_renderer::clear(&ctx, canvas.width() as f64, canvas.height() as f64);
        }
    }
}
