//! WASM browser host for **tileterm** using Canvas 2D.
//!
//! [`WebHost`] finds (or creates) a `<canvas>`, fetches the tileset image,
//! decodes it with [`TileAtlas::from_bytes`], and then drives a
//! [`TerminalApp`] from a single `requestAnimationFrame` callback. Each
//! frame is copied to the canvas with `putImageData`, scaled by the device
//! pixel ratio.
//!
//! # Quick start
//!
//! ```html
//! <canvas id="tileterm-canvas" tabindex="1"></canvas>
//! <script type="module">
//!   import init, { start } from './pkg/my_app.js';
//!   await init();
//!   start();
//! </script>
//! ```
//!
//! ```rust,ignore
//! use tileterm_web::{WebConfig, WebHost};
//! use wasm_bindgen::prelude::*;
//!
//! #[wasm_bindgen]
//! pub fn start() -> Result<(), JsValue> {
//!     WebHost::new(WebConfig::default()).run(MyApp::default())
//! }
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use tileterm_core::{AtlasConfig, Key, Runner, SurfaceConfig, TerminalApp};
use tileterm_tiles::{Backend, BackendKind, RasterFrame, TileAtlas, blit};

use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, ImageData, KeyboardEvent, Response, Window};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global `window`"))
}

fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no `document`"))
}

/// Translate a browser `KeyboardEvent.key` string to a tileterm [`Key`].
fn translate_key(key: &str) -> Option<Key> {
    match key {
        "ArrowDown" => Some(Key::ArrowDown),
        "ArrowUp" => Some(Key::ArrowUp),
        "ArrowLeft" => Some(Key::ArrowLeft),
        "ArrowRight" => Some(Key::ArrowRight),
        "Backspace" => Some(Key::Backspace),
        "Enter" => Some(Key::Enter),
        "Escape" => Some(Key::Escape),
        "Tab" => Some(Key::Tab),
        other => {
            let mut chars = other.chars();
            let first = chars.next()?;
            if chars.next().is_some() {
                // Multi-character string → a named key we don't forward
                return None;
            }
            Some(Key::Char(first))
        }
    }
}

/// Canvas pixel size for an output of `w × h` at `ratio`.
fn scaled_size(w: u32, h: u32, ratio: f64) -> (u32, u32) {
    let s = |v: u32| ((v as f64 * ratio).round() as u32).max(1);
    (s(w), s(h))
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for [`WebHost`].
#[derive(Clone, Debug)]
pub struct WebConfig {
    /// The `id` of the `<canvas>` element; created under `<body>` when
    /// missing (default: `"tileterm-canvas"`).
    pub canvas_id: String,
    /// Scale applied to the output. `None` uses `window.devicePixelRatio`.
    pub device_pixel_ratio: Option<f64>,
    /// Output size and cell grid.
    pub surface: SurfaceConfig,
    /// Tileset URL and geometry; `path` is fetched relative to the page.
    pub atlas: AtlasConfig,
    /// Which backend renders the cells.
    pub backend: BackendKind,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            canvas_id: "tileterm-canvas".into(),
            device_pixel_ratio: None,
            surface: SurfaceConfig::default(),
            atlas: AtlasConfig::default(),
            backend: BackendKind::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// WebHost
// ---------------------------------------------------------------------------

/// Runs a tileterm application inside an HTML canvas.
pub struct WebHost {
    config: WebConfig,
}

impl WebHost {
    pub fn new(config: WebConfig) -> Self {
        Self { config }
    }

    /// Set up the canvas, listeners and frame loop, and start fetching the
    /// atlas. Returns once everything is registered; the application is
    /// driven from browser callbacks after that.
    pub fn run<A>(self, app: A) -> Result<(), JsValue>
    where
        A: TerminalApp<Backend> + 'static,
    {
        let cfg = self.config;
        let canvas = canvas(&cfg.canvas_id)?;
        let ratio = match cfg.device_pixel_ratio {
            Some(r) => r,
            None => window()?.device_pixel_ratio(),
        };
        let (out_w, out_h) = (cfg.surface.output_width, cfg.surface.output_height);
        let (px_w, px_h) = scaled_size(out_w, out_h, ratio);
        canvas.set_width(px_w);
        canvas.set_height(px_h);
        let style = canvas.style();
        style.set_property("width", &format!("{out_w}px"))?;
        style.set_property("height", &format!("{out_h}px"))?;
        canvas.set_attribute("tabindex", "1")?;

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        ctx.set_image_smoothing_enabled(false);

        let shared = Rc::new(RefCell::new(Shared {
            runner: Runner::new(app, cfg.surface.clone()),
            ctx,
            ratio,
        }));

        listen_keys(&shared)?;
        start_frames(&shared)?;

        // --- atlas ----------------------------------------------------------
        let atlas = cfg.atlas;
        let kind = cfg.backend;
        wasm_bindgen_futures::spawn_local(async move {
            let geometry = atlas.geometry();
            let result = fetch_bytes(&atlas.path)
                .await
                .map_err(|e| format!("cannot fetch {}: {e:?}", atlas.path))
                .and_then(|bytes| TileAtlas::from_bytes(&bytes, geometry).map_err(|e| e.to_string()));
            let mut s = shared.borrow_mut();
            match result {
                Ok(atlas) => {
                    let backend = Backend::new(kind, Rc::new(atlas), s.runner.config());
                    if let Err(e) = s.runner.attach(backend) {
                        log::error!("{e}");
                    }
                }
                Err(e) => {
                    s.runner.fail(e);
                }
            }
        });
        Ok(())
    }
}

fn canvas(id: &str) -> Result<HtmlCanvasElement, JsValue> {
    let doc = document()?;
    if let Some(el) = doc.get_element_by_id(id) {
        return el.dyn_into::<HtmlCanvasElement>().map_err(|_| JsValue::from_str("element is not a canvas"));
    }
    let canvas = doc.create_element("canvas")?.dyn_into::<HtmlCanvasElement>()?;
    canvas.set_id(id);
    doc.body()
        .ok_or_else(|| JsValue::from_str("no `body`"))?
        .append_child(&canvas)?;
    Ok(canvas)
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, JsValue> {
    let resp: Response = JsFuture::from(window()?.fetch_with_str(url)).await?.dyn_into()?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", resp.status())));
    }
    let buf = JsFuture::from(resp.array_buffer()?).await?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

// ---------------------------------------------------------------------------
// Shared state used inside closures
// ---------------------------------------------------------------------------

struct Shared<A: TerminalApp<Backend>> {
    runner: Runner<A, Backend>,
    ctx: CanvasRenderingContext2d,
    ratio: f64,
}

impl<A: TerminalApp<Backend>> Shared<A> {
    /// One display refresh: tick the application and put the frame on the
    /// canvas.
    fn frame(&mut self) -> Result<(), JsValue> {
        if !self.runner.tick() {
            return Ok(());
        }
        let Some(term) = self.runner.surface_mut() else {
            return Ok(());
        };
        let frame = blit::scale_frame(term.backend_mut().frame(), self.ratio);
        let (w, h) = frame.dimensions();
        let data = ImageData::new_with_u8_clamped_array_and_sh(Clamped(frame.as_raw().as_slice()), w, h)?;
        self.ctx.put_image_data(&data, 0.0, 0.0)
    }
}

fn listen_keys<A: TerminalApp<Backend> + 'static>(shared: &Rc<RefCell<Shared<A>>>) -> Result<(), JsValue> {
    let shared = Rc::clone(shared);
    let closure = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
        if e.ctrl_key() || e.meta_key() || e.alt_key() {
            return;
        }
        if let Some(key) = translate_key(&e.key()) {
            e.prevent_default();
            shared.borrow_mut().runner.key(key);
        }
    });
    document()?.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    // Listeners live for the page.
    closure.forget();
    Ok(())
}

/// Register the one frame callback. It re-arms itself with the same
/// closure every refresh.
fn start_frames<A: TerminalApp<Backend> + 'static>(shared: &Rc<RefCell<Shared<A>>>) -> Result<(), JsValue> {
    let shared = Rc::clone(shared);
    let raf_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let raf_cb2 = Rc::clone(&raf_cb);

    *raf_cb.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
        if let Err(e) = shared.borrow_mut().frame() {
            log::warn!("frame failed: {e:?}");
        }
        let cb_ref = raf_cb2.borrow();
        if let (Some(cb), Ok(w)) = (cb_ref.as_ref(), window()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }));

    {
        let cb_ref = raf_cb.borrow();
        if let Some(cb) = cb_ref.as_ref() {
            window()?.request_animation_frame(cb.as_ref().unchecked_ref())?;
        }
    }
    // The closure owns a handle to itself; leak it for the page lifetime.
    std::mem::forget(raf_cb);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys() {
        assert_eq!(translate_key("Enter"), Some(Key::Enter));
        assert_eq!(translate_key("a"), Some(Key::Char('a')));
        assert_eq!(translate_key(" "), Some(Key::Char(' ')));
        assert_eq!(translate_key("Shift"), None);
    }

    #[test]
    fn canvas_size_follows_ratio() {
        assert_eq!(scaled_size(640, 480, 1.0), (640, 480));
        assert_eq!(scaled_size(640, 480, 2.0), (1280, 960));
        assert_eq!(scaled_size(1, 1, 0.1), (1, 1));
    }
}
