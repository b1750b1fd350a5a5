use crate::constants::*;
use crate::options::{option_key, OptionSource};
use decor_core::Viewport;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
}

/// Window width in CSS pixels, the input to the responsive policy.
pub fn viewport_width_css() -> f32 {
    web::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(decor_core::MOBILE_BREAKPOINT_PX as f64) as f32
}

pub fn hardware_is_low_power() -> bool {
    web::window()
        .map(|w| w.navigator().hardware_concurrency())
        .map(|cores| cores > 0.0 && cores <= LOW_POWER_MAX_CORES)
        .unwrap_or(false)
}

/// Options read from `data-*` attributes of a mount element.
pub struct AttributeSource<'a>(pub &'a web::Element);

impl OptionSource for AttributeSource<'_> {
    fn raw(&self, attr: &str) -> Option<String> {
        self.0.get_attribute(attr)
    }
}

/// Options from a JS object keyed in camelCase, falling back to the host's
/// `data-*` attributes for anything the object leaves out.
pub struct JsOptions<'a> {
    pub object: &'a JsValue,
    pub host: &'a web::Element,
}

impl OptionSource for JsOptions<'_> {
    fn raw(&self, attr: &str) -> Option<String> {
        let from_object = if self.object.is_object() {
            js_sys::Reflect::get(self.object, &JsValue::from_str(&option_key(attr)))
                .ok()
                .and_then(|v| {
                    if let Some(s) = v.as_string() {
                        Some(s)
                    } else if let Some(n) = v.as_f64() {
                        Some(n.to_string())
                    } else {
                        v.as_bool().map(|b| b.to_string())
                    }
                })
        } else {
            None
        };
        from_object.or_else(|| AttributeSource(self.host).raw(attr))
    }
}

/// The canvas a renderer attached to `host`, if any.
pub fn host_canvas(host: &web::Element) -> Option<web::HtmlCanvasElement> {
    host.query_selector("canvas")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
}

/// Create a transparent, non-interactive canvas inside `host`.
///
/// With `size_css` the canvas gets that fixed CSS size; otherwise it fills
/// the host. The backing store follows the device pixel ratio.
pub fn create_canvas(
    host: &web::HtmlElement,
    size_css: Option<(f64, f64)>,
) -> anyhow::Result<(web::HtmlCanvasElement, Viewport)> {
    let document = window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let style = canvas.style();
    let (w, h) = match size_css {
        Some((w, h)) => (format!("{w}px"), format!("{h}px")),
        None => ("100%".to_string(), "100%".to_string()),
    };
    _ = style.set_property("width", &w);
    _ = style.set_property("height", &h);
    _ = style.set_property("display", "block");
    _ = style.set_property("pointer-events", "none");
    host.append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("attach canvas: {:?}", e))?;
    let viewport = match size_css {
        Some((w, h)) => {
            let vp = Viewport::from_css(w, h, device_pixel_ratio());
            canvas.set_width(vp.width);
            canvas.set_height(vp.height);
            vp
        }
        None => sync_canvas_backing_size(&canvas),
    };
    Ok((canvas, viewport))
}

/// Maintain canvas internal pixel size to match CSS size * devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> Viewport {
    let rect = canvas.get_bounding_client_rect();
    let vp = Viewport::from_css(rect.width(), rect.height(), device_pixel_ratio());
    if canvas.width() != vp.width {
        canvas.set_width(vp.width);
    }
    if canvas.height() != vp.height {
        canvas.set_height(vp.height);
    }
    vp
}

#[inline]
pub fn detach(canvas: &web::HtmlCanvasElement) {
    canvas.remove();
}

pub fn mark_fallback(host: &web::Element) {
    _ = host.class_list().add_1(FALLBACK_CLASS);
}

pub fn clear_fallback(host: &web::Element) {
    _ = host.class_list().remove_1(FALLBACK_CLASS);
}

/// Every element carrying `data-decor`, with its declared kind.
pub fn decor_hosts(document: &web::Document) -> Vec<(String, web::HtmlElement)> {
    let mut out = Vec::new();
    let Ok(list) = document.query_selector_all(&format!("[{DECOR_ATTR}]")) else {
        return out;
    };
    for i in 0..list.length() {
        let Some(node) = list.item(i) else { continue };
        let Ok(el) = node.dyn_into::<web::HtmlElement>() else {
            continue;
        };
        if let Some(kind) = el.get_attribute(DECOR_ATTR) {
            out.push((kind.trim().to_ascii_lowercase(), el));
        }
    }
    out
}
