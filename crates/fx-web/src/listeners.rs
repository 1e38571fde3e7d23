use fx_core::PointerEventKind;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type PointerHandler = Closure<dyn FnMut(web::PointerEvent)>;

/// Pointer listeners attached to one element. Closures are kept so the exact
/// same function objects can be removed again.
pub struct ListenerSet {
    target: web::EventTarget,
    entries: Vec<(PointerEventKind, PointerHandler)>,
}

impl ListenerSet {
    pub fn new(target: web::EventTarget) -> Self {
        Self {
            target,
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, kind: PointerEventKind, handler: impl FnMut(web::PointerEvent) + 'static) {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>);
        if let Err(e) = self
            .target
            .add_event_listener_with_callback(kind.dom_name(), closure.as_ref().unchecked_ref())
        {
            log::warn!("[pointer] add {} failed: {:?}", kind.dom_name(), e);
            return;
        }
        self.entries.push((kind, closure));
    }

    pub fn remove_all(&mut self) {
        for (kind, closure) in self.entries.drain(..) {
            if let Err(e) = self
                .target
                .remove_event_listener_with_callback(kind.dom_name(), closure.as_ref().unchecked_ref())
            {
                log::warn!("[pointer] remove {} failed: {:?}", kind.dom_name(), e);
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.remove_all();
    }
}
