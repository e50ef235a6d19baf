//! WASM bindings for partsim.
//!
//! This module provides JavaScript-friendly bindings so a web component can
//! delegate its pin table and input handling to Rust.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmPart } from 'partsim';
//!
//! await init();
//!
//! const pot = new WasmPart('slide-potentiometer');
//! pot.mount();
//!
//! tip.addEventListener('mousedown', () => {
//!   const m = sliderCase.getScreenCTM();
//!   pot.set_layout(m.a, m.b, m.c, m.d, m.e, m.f);
//!   pot.set_zoom(Number(getComputedStyle(document.body).zoom) || 1);
//!   pot.pointer_down();
//! });
//! window.addEventListener('mousemove', (e) => pot.pointer_move(e.pageX, e.pageY));
//! window.addEventListener('mouseup', () => pot.pointer_up());
//!
//! const id = pot.subscribe((value) => {
//!   element.dispatchEvent(new InputEvent('input', { detail: value }));
//! });
//! ```

use std::cell::RefCell;

use js_sys::Function;
use log::warn;
use wasm_bindgen::prelude::*;

use crate::control::{
    ControlConfig, ControlHandle, ElementEvent, Key, SharedLayout, SubscriptionId,
};
use crate::error::PartsError;
use crate::geometry::Point;
use crate::parts::{Part, PartKind};
use crate::viewport::{Viewport, ViewportEvent};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn js_error(e: PartsError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible part instance.
///
/// Owns the part, the page's viewport and the anchor layout. Every method
/// takes `&self`, so a change callback may call back into the same
/// instance (read `value`, unmount, ...) while a change is being announced.
#[wasm_bindgen]
pub struct WasmPart {
    part: RefCell<Box<dyn Part>>,
    viewport: Viewport,
    layout: SharedLayout,
}

#[wasm_bindgen]
impl WasmPart {
    /// Create a part by catalog name with the default 0..100 range.
    #[wasm_bindgen(constructor)]
    pub fn new(name: &str) -> Result<WasmPart, JsValue> {
        Self::with_range(name, 0.0, 100.0, 2.0)
    }

    /// Create a part with a custom range and keyboard step.
    #[wasm_bindgen]
    pub fn with_range(name: &str, min: f64, max: f64, step: f64) -> Result<WasmPart, JsValue> {
        let kind = PartKind::from_name(name).map_err(js_error)?;
        let config = ControlConfig::new().with_range(min, max).with_step(step);
        config.validate().map_err(js_error)?;
        let layout = SharedLayout::new();
        Ok(WasmPart {
            part: RefCell::new(kind.build(config, layout.clone())),
            viewport: Viewport::new(),
            layout,
        })
    }

    /// Pin table as JSON (`[{name, x, y, number, signals}]`).
    #[wasm_bindgen]
    pub fn pin_info_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.part.borrow().pin_info().as_slice())
            .map_err(|e| js_error(e.into()))
    }

    /// Current value.
    #[wasm_bindgen(getter)]
    pub fn value(&self) -> f64 {
        self.part.borrow().value()
    }

    /// Set the value programmatically (clamped).
    #[wasm_bindgen]
    pub fn set_value(&self, value: f64) {
        if let Some(control) = self.control() {
            control.update(|c| c.set_value(value));
        }
    }

    /// Change the value range; the current value is re-clamped.
    #[wasm_bindgen]
    pub fn set_range(&self, min: f64, max: f64) {
        if let Some(control) = self.control() {
            control.update(|c| c.set_range(min, max));
        }
    }

    /// Call `callback(value)` after every accepted value change.
    ///
    /// The callback runs after the part has been updated, so it may read
    /// `value` or call back into this part. Returns an id for
    /// [`Self::unsubscribe`].
    #[wasm_bindgen]
    pub fn subscribe(&self, callback: Function) -> Result<u32, JsValue> {
        let control = self.control().ok_or_else(|| {
            JsValue::from_str(&format!("part '{}' has no value", self.part.borrow().kind()))
        })?;
        let id = control.subscribe(move |value| {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_f64(value)) {
                warn!("change callback threw: {:?}", e);
            }
        });
        u32::try_from(id.0).map_err(|_| {
            control.unsubscribe(id);
            JsValue::from_str("subscription ids exhausted")
        })
    }

    /// Remove a callback registered with [`Self::subscribe`]. Returns
    /// `false` if it was not registered.
    #[wasm_bindgen]
    pub fn unsubscribe(&self, id: u32) -> bool {
        self.control()
            .map(|control| control.unsubscribe(SubscriptionId(u64::from(id))))
            .unwrap_or(false)
    }

    /// Report the anchor's screen CTM (DOMMatrix a..f).
    #[wasm_bindgen]
    pub fn set_layout(&self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.layout.set_ctm(Some([a, b, c, d, e, f]));
    }

    /// Mark the anchor as detached (no geometry).
    #[wasm_bindgen]
    pub fn clear_layout(&self) {
        self.layout.set_ctm(None);
    }

    /// Report the display zoom.
    #[wasm_bindgen]
    pub fn set_zoom(&self, zoom: f64) {
        self.layout.set_zoom(Some(zoom));
    }

    /// Element inserted into the document.
    #[wasm_bindgen]
    pub fn mount(&self) -> Result<(), JsValue> {
        self.with_part(|part, viewport| part.connect(viewport))
    }

    /// Element removed from the document.
    #[wasm_bindgen]
    pub fn unmount(&self) -> Result<(), JsValue> {
        self.with_part(|part, _| part.disconnect())
    }

    /// Whether the part is mounted.
    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.part.borrow().is_connected()
    }

    /// Mouse down on the control element.
    #[wasm_bindgen]
    pub fn pointer_down(&self) {
        self.element_event(ElementEvent::MouseDown);
    }

    /// Window mousemove.
    #[wasm_bindgen]
    pub fn pointer_move(&self, page_x: f64, page_y: f64) {
        self.viewport
            .dispatch(&ViewportEvent::PointerMove(Point::new(page_x, page_y)));
    }

    /// Window mouseup.
    #[wasm_bindgen]
    pub fn pointer_up(&self) {
        self.viewport.dispatch(&ViewportEvent::PointerUp);
    }

    /// Window mouseleave.
    #[wasm_bindgen]
    pub fn pointer_leave(&self) {
        self.viewport.dispatch(&ViewportEvent::PointerLeave);
    }

    /// Touch start on the control element.
    #[wasm_bindgen]
    pub fn touch_start(&self) {
        self.element_event(ElementEvent::TouchStart);
    }

    /// Touch move; `coords` is a flat `[x0, y0, x1, y1, ...]` list of target
    /// touches. Only the first touch is used.
    #[wasm_bindgen]
    pub fn touch_move(&self, coords: &[f64]) {
        let touches = coords
            .chunks_exact(2)
            .map(|xy| Point::new(xy[0], xy[1]))
            .collect();
        self.element_event(ElementEvent::TouchMove { touches });
    }

    /// Touch end on the control element.
    #[wasm_bindgen]
    pub fn touch_end(&self) {
        self.element_event(ElementEvent::TouchEnd);
    }

    /// Key down on the control element, by DOM key name.
    #[wasm_bindgen]
    pub fn key_down(&self, key: &str) {
        let key = Key::from_name(key).unwrap_or(Key::Other);
        self.element_event(ElementEvent::KeyDown(key));
    }

    /// Key up on the control element.
    #[wasm_bindgen]
    pub fn key_up(&self) {
        self.element_event(ElementEvent::KeyUp);
    }

    /// Edit from the hidden range input (`event.target.value`).
    #[wasm_bindgen]
    pub fn direct_input(&self, text: &str) {
        if let Some(control) = self.control() {
            control.update(|c| c.handle_proxy_input(text));
        }
    }
}

impl WasmPart {
    fn element_event(&self, event: ElementEvent) {
        if let Some(control) = self.control() {
            control.update(|c| c.handle_element_event(&event));
        }
    }

    // the part borrow ends here; notifications run without it
    fn control(&self) -> Option<ControlHandle> {
        self.part.borrow().control()
    }

    fn with_part(&self, f: impl FnOnce(&mut dyn Part, &Viewport)) -> Result<(), JsValue> {
        let mut part = self
            .part
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("part is busy"))?;
        f(&mut **part, &self.viewport);
        Ok(())
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Catalog names of all parts, comma separated.
#[wasm_bindgen]
pub fn part_names() -> String {
    PartKind::ALL
        .iter()
        .map(|k| k.name())
        .collect::<Vec<_>>()
        .join(",")
}
