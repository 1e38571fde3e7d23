#![cfg(target_arch = "wasm32")]
//! Browser front-end: binds hover effects to DOM containers.
//!
//! Containers carrying `data-hoverfx` are mounted automatically on start-up.
//! Pages that manage their own elements use the `HoverEffect` class instead.

use std::cell::RefCell;

use fx_core::config::data_attribute;
use fx_core::EffectConfig;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod asset;
mod dom;
mod frame;
mod listeners;
mod surface;
mod timer;

pub use surface::EffectSurface;

#[cfg(test)]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

thread_local! {
    // Surfaces created by auto-mount live as long as the page.
    static AUTO_MOUNTED: RefCell<Vec<EffectSurface>> = const { RefCell::new(Vec::new()) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("fx-web starting");

    if let Err(e) = auto_mount() {
        log::error!("auto-mount error: {:?}", e);
    }
    Ok(())
}

fn config_for(el: &web::Element) -> Result<EffectConfig, fx_core::FxError> {
    EffectConfig::from_attributes(|key| dom::data_option(el, key))
}

fn auto_mount() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let containers = dom::marked_containers(&document);
    for el in containers {
        let Some(url) = dom::data_option(&el, "image") else {
            log::warn!(
                "[surface] {} without {}; skipped",
                data_attribute("effect"),
                data_attribute("image")
            );
            continue;
        };
        let config = match config_for(&el) {
            Ok(c) => c,
            Err(e) => {
                log::error!("[surface] {}", e);
                continue;
            }
        };
        keep_if_mounted(EffectSurface::new(el, config), &url);
    }
    let mounted = AUTO_MOUNTED.with(|list| list.borrow().len());
    log::info!("[surface] auto-mounted {} container(s)", mounted);
    Ok(())
}

/// Park `surface` for the page lifetime only when its mount went through.
fn keep_if_mounted(surface: EffectSurface, url: &str) -> bool {
    if !surface.mount(url) {
        return false;
    }
    AUTO_MOUNTED.with(|list| list.borrow_mut().push(surface));
    true
}

/// Script-facing handle for one container.
#[wasm_bindgen]
pub struct HoverEffect {
    surface: EffectSurface,
}

#[wasm_bindgen]
impl HoverEffect {
    /// `effect` overrides the container's `data-hoverfx` attribute.
    #[wasm_bindgen(constructor)]
    pub fn new(container: web::HtmlElement, effect: Option<String>) -> Result<HoverEffect, JsValue> {
        let mut config = config_for(&container).map_err(|e| JsValue::from_str(&e.to_string()))?;
        if let Some(name) = effect {
            config.kind = name
                .parse()
                .map_err(|e: fx_core::FxError| JsValue::from_str(&e.to_string()))?;
        }
        Ok(HoverEffect {
            surface: EffectSurface::new(container, config),
        })
    }

    pub fn mount(&self, url: &str) -> bool {
        self.surface.mount(url)
    }

    #[wasm_bindgen(js_name = setImage)]
    pub fn set_image(&self, url: &str) -> bool {
        self.surface.set_image(url)
    }

    pub fn unmount(&self) -> bool {
        self.surface.unmount()
    }

    pub fn state(&self) -> String {
        self.surface.state().as_str().to_string()
    }

    #[wasm_bindgen(js_name = listenerCount)]
    pub fn listener_count(&self) -> u32 {
        self.surface.listener_count() as u32
    }

    pub fn diagnostics(&self) -> u32 {
        self.surface.diagnostics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    fn auto_mounted() -> usize {
        AUTO_MOUNTED.with(|list| list.borrow().len())
    }

    #[wasm_bindgen_test]
    fn only_mounted_surfaces_are_kept() {
        let document = dom::window_document().unwrap();
        let detached: web::HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
        let before = auto_mounted();
        assert!(!keep_if_mounted(
            EffectSurface::new(detached, EffectConfig::default()),
            "data:text/plain,a"
        ));
        assert_eq!(auto_mounted(), before);

        let attached: web::HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
        document.body().unwrap().append_child(&attached).unwrap();
        assert!(keep_if_mounted(
            EffectSurface::new(attached, EffectConfig::default()),
            "data:text/plain,b"
        ));
        assert_eq!(auto_mounted(), before + 1);

        let kept = AUTO_MOUNTED.with(|list| list.borrow_mut().pop()).unwrap();
        assert!(kept.unmount());
    }
}
