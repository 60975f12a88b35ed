use glyphfield_core::AtlasLayout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::to_js_error;

/// Wait for `font_family` to load, then rasterize `glyphs` into a grid canvas
/// (white glyphs on transparent, one per cell). Resolves with the canvas for
/// the host to wrap in a texture.
#[wasm_bindgen(js_name = prepareAtlasCanvas)]
pub async fn prepare_atlas_canvas(
    glyphs: String,
    font_family: String,
    grid_cols: u32,
    cell_size: u32,
) -> Result<HtmlCanvasElement, JsValue> {
    let layout = AtlasLayout::new(&glyphs, grid_cols, cell_size).map_err(to_js_error)?;
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let font = layout.font_spec(&font_family);

    JsFuture::from(document.fonts().load(&font)).await?;
    log::info!("font loaded: {}", font_family);

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    let (width, height) = layout.canvas_size();
    canvas.set_width(width);
    canvas.set_height(height);

    let ctx = canvas
        .get_context("2d")?
        .ok_or("2d canvas context unavailable")?
        .dyn_into::<CanvasRenderingContext2d>()?;
    ctx.set_font(&font);
    ctx.set_text_align("center");
    #[allow(deprecated)]
    ctx.set_fill_style(&JsValue::from_str("#ffffff"));

    let max_width = layout.cell_size() as f64;
    for (i, glyph) in layout.glyphs().iter().enumerate() {
        if let Some((x, y)) = layout.glyph_anchor(i) {
            ctx.fill_text_with_max_width(&glyph.to_string(), x as f64, y as f64, max_width)?;
        }
    }

    log::info!(
        "atlas rasterized: {} glyphs, {}x{} cells",
        layout.glyph_count(),
        layout.grid_cols(),
        layout.grid_rows()
    );
    Ok(canvas)
}
