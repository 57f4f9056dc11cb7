//! Browser host
//!
//! Mounts a crowd onto a `<canvas>`: loads the sprite sheet, sizes the
//! backing store, runs the `requestAnimationFrame` loop and tracks window
//! resizes. The loop is either fully running or fully stopped; `unmount`
//! cancels the pending frame, removes listeners and frees the callbacks.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::FrameClock;
use crate::error::CrowdError;
use crate::renderer::paint;
use crate::settings::Settings;
use crate::sim::{Crowd, SpriteAtlas, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopPhase {
    /// Waiting for the sprite sheet
    Loading,
    Running,
    /// Sheet failed to load; the canvas stays blank
    Failed,
    Stopped,
}

type FrameCallback = Closure<dyn FnMut(f64)>;
type FrameSlot = RefCell<Option<FrameCallback>>;

/// Current page scroll offset
fn scroll_y() -> f32 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0) as f32
}

/// Mutable state shared by the callbacks
struct Host {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    settings: Settings,
    crowd: Option<Crowd<HtmlImageElement>>,
    clock: FrameClock,
    phase: LoopPhase,
    frame_request: Option<i32>,
}

impl Host {
    fn measure(&self) -> Stage {
        let ratio = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        Stage::new(
            self.canvas.client_width() as f32,
            self.canvas.client_height() as f32,
            ratio as f32,
        )
    }

    /// Match the backing store to the layout size and restart the crowd
    fn resize(&mut self) {
        let stage = self.measure();
        let (width, height) = stage.backing_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        if let Some(crowd) = self.crowd.as_mut() {
            crowd.resize(stage);
        }
    }

    /// Slice the loaded sheet and build the crowd
    fn start(&mut self, image: HtmlImageElement) -> Result<(), CrowdError> {
        let size = Vec2::new(image.natural_width() as f32, image.natural_height() as f32);
        let atlas = SpriteAtlas::new(image, size, self.settings.rows, self.settings.cols)?;
        let seed = self
            .settings
            .seed
            .unwrap_or_else(|| js_sys::Date::now() as u64);
        self.crowd = Some(Crowd::new(
            atlas,
            &self.settings,
            self.measure(),
            scroll_y(),
            seed,
        )?);
        self.resize();
        self.clock.reset();
        self.phase = LoopPhase::Running;
        log::info!("Crowd started with seed: {}", seed);
        Ok(())
    }

    /// One animation frame: simulate, then repaint
    fn frame(&mut self, time: f64) {
        let dt = self.clock.advance(time);
        let scroll_y = scroll_y();
        let Self { crowd, ctx, .. } = self;
        if let Some(crowd) = crowd.as_mut() {
            crowd.tick(scroll_y, dt);
            paint(crowd, ctx);
        }
    }
}

/// Schedule the next frame through the (weakly held) frame callback
fn request_frame(host: &Rc<RefCell<Host>>, slot: &Weak<FrameSlot>) {
    let Some(slot) = slot.upgrade() else {
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = slot.borrow();
    let Some(callback) = callback.as_ref() else {
        return;
    };
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(id) => host.borrow_mut().frame_request = Some(id),
        Err(e) => {
            log::warn!("requestAnimationFrame failed: {:?}", e);
            host.borrow_mut().phase = LoopPhase::Failed;
        }
    }
}

/// A crowd mounted on a canvas element
///
/// ```js
/// const crowd = new CrowdCanvas(canvas, JSON.stringify({ rows: 15, cols: 7 }));
/// // ...
/// crowd.unmount();
/// ```
#[wasm_bindgen]
pub struct CrowdCanvas {
    host: Rc<RefCell<Host>>,
    frame_callback: Rc<FrameSlot>,
    image: HtmlImageElement,
    on_load: Option<Closure<dyn FnMut()>>,
    on_error: Option<Closure<dyn FnMut()>>,
    on_resize: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

#[wasm_bindgen]
impl CrowdCanvas {
    /// Mount onto `canvas`; `settings_json` overrides any [`Settings`] field
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, settings_json: Option<String>) -> Result<CrowdCanvas, JsValue> {
        Self::mount(canvas, settings_json.as_deref()).map_err(|e| {
            log::error!("Crowd mount failed: {}", e);
            JsValue::from_str(&e.to_string())
        })
    }

    /// True while frames are being drawn
    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.host.borrow().phase == LoopPhase::Running
    }

    /// Stop the loop and release everything; safe to call twice
    pub fn unmount(&mut self) {
        let request = {
            let mut h = self.host.borrow_mut();
            if h.phase == LoopPhase::Stopped {
                return;
            }
            h.phase = LoopPhase::Stopped;
            if let Some(mut crowd) = h.crowd.take() {
                crowd.teardown();
            }
            let (width, height) = (h.canvas.width() as f64, h.canvas.height() as f64);
            h.ctx.clear_rect(0.0, 0.0, width, height);
            h.frame_request.take()
        };

        if let Some(window) = web_sys::window() {
            if let Some(id) = request {
                let _ = window.cancel_animation_frame(id);
            }
            if let Some(on_resize) = self.on_resize.take() {
                let _ = window
                    .remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
            }
        }

        self.image.set_onload(None);
        self.image.set_onerror(None);
        self.on_load = None;
        self.on_error = None;
        self.frame_callback.borrow_mut().take();

        log::info!("Crowd unmounted");
    }
}

impl CrowdCanvas {
    fn mount(canvas: HtmlCanvasElement, settings_json: Option<&str>) -> Result<Self, CrowdError> {
        let settings = match settings_json {
            Some(json) => Settings::from_json(json)?,
            None => Settings::default(),
        };

        let window = web_sys::window().ok_or_else(|| CrowdError::Platform("no window".into()))?;
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| CrowdError::Platform("no 2d context".into()))?;
        let image = HtmlImageElement::new()
            .map_err(|e| CrowdError::Platform(format!("image element: {:?}", e)))?;

        let src = settings.sprite_src.clone();
        let host = Rc::new(RefCell::new(Host {
            canvas,
            ctx,
            settings,
            crowd: None,
            clock: FrameClock::new(),
            phase: LoopPhase::Loading,
            frame_request: None,
        }));
        host.borrow_mut().resize();

        // Frame loop; re-schedules itself while running
        let frame_callback: Rc<FrameSlot> = Rc::new(RefCell::new(None));
        {
            let host = host.clone();
            let slot = Rc::downgrade(&frame_callback);
            *frame_callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                {
                    let mut h = host.borrow_mut();
                    h.frame_request = None;
                    if h.phase != LoopPhase::Running {
                        return;
                    }
                    h.frame(time);
                }
                request_frame(&host, &slot);
            }));
        }

        // Sprite sheet loaded: build the crowd and start drawing
        let on_load = {
            let host = host.clone();
            let slot = Rc::downgrade(&frame_callback);
            let image = image.clone();
            Closure::<dyn FnMut()>::new(move || {
                if host.borrow().phase != LoopPhase::Loading {
                    return;
                }
                let started = host.borrow_mut().start(image.clone());
                match started {
                    Ok(()) => request_frame(&host, &slot),
                    Err(e) => {
                        log::warn!("Crowd disabled: {}", e);
                        host.borrow_mut().phase = LoopPhase::Failed;
                    }
                }
            })
        };

        // No sheet, no crowd; nothing is retried
        let on_error = {
            let host = host.clone();
            let src = src.clone();
            Closure::<dyn FnMut()>::new(move || {
                log::warn!("Sprite sheet failed to load: {}", src);
                host.borrow_mut().phase = LoopPhase::Failed;
            })
        };

        let on_resize = {
            let host = host.clone();
            Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                host.borrow_mut().resize();
            })
        };
        window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            .map_err(|e| CrowdError::Platform(format!("resize listener: {:?}", e)))?;

        image.set_onload(Some(on_load.as_ref().unchecked_ref()));
        image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        image.set_src(&src);

        log::info!("Crowd mounted, loading {}", src);

        Ok(Self {
            host,
            frame_callback,
            image,
            on_load: Some(on_load),
            on_error: Some(on_error),
            on_resize: Some(on_resize),
        })
    }
}

impl Drop for CrowdCanvas {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Install logging and the panic hook once per page
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
