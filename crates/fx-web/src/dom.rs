use fx_core::ContainerRect;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
}

/// Current bounding rectangle of `el` in CSS pixels.
pub fn container_rect(el: &web::Element) -> ContainerRect {
    let r = el.get_bounding_client_rect();
    ContainerRect::new(
        r.left() as f32,
        r.top() as f32,
        r.width() as f32,
        r.height() as f32,
    )
}

/// Backing-store size for a CSS-pixel rectangle on this display.
pub fn backing_size(rect: ContainerRect) -> (u32, u32) {
    let dpr = device_pixel_ratio();
    let w = (rect.width as f64 * dpr) as u32;
    let h = (rect.height as f64 * dpr) as u32;
    (w.max(1), h.max(1))
}

/// Create a canvas that fills `container` and append it.
pub fn attach_canvas(
    container: &web::HtmlElement,
    rect: ContainerRect,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let document = window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("not a canvas: {:?}", e))?;
    let style = canvas.style();
    style.set_property("display", "block").ok();
    style.set_property("width", "100%").ok();
    style.set_property("height", "100%").ok();
    let (w, h) = backing_size(rect);
    canvas.set_width(w);
    canvas.set_height(h);
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("append canvas: {:?}", e))?;
    Ok(canvas)
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, rect: ContainerRect) -> (u32, u32) {
    let (w, h) = backing_size(rect);
    canvas.set_width(w);
    canvas.set_height(h);
    (w, h)
}

/// Read option `key` from the container's `data-*` attributes.
#[inline]
pub fn data_option(el: &web::Element, key: &str) -> Option<String> {
    el.get_attribute(&fx_core::config::data_attribute(key))
}

/// Elements marked for automatic mounting.
pub fn marked_containers(document: &web::Document) -> Vec<web::HtmlElement> {
    let mut out = Vec::new();
    let selector = format!("[{}]", fx_core::config::data_attribute("effect"));
    let Ok(list) = document.query_selector_all(&selector) else {
        return out;
    };
    for i in 0..list.length() {
        if let Some(el) = list
            .get(i)
            .and_then(|n| n.dyn_into::<web::HtmlElement>().ok())
        {
            out.push(el);
        }
    }
    out
}
