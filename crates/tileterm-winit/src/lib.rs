//! Winit host for tileterm.
//!
//! Opens a native window with [`winit`], decodes the tile atlas on a
//! background thread, and once it is ready drives a [`TerminalApp`] at the
//! display refresh rate, presenting each frame with [`softbuffer`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use tileterm_core::{TerminalApp, TerminalSurface};
//! use tileterm_tiles::Backend;
//! use tileterm_winit::{WinitConfig, WinitHost};
//!
//! struct Hello;
//!
//! impl TerminalApp<Backend> for Hello {
//!     fn ready(&mut self, term: &mut TerminalSurface<Backend>) {
//!         term.put_string(0, 0, "hello", None, None);
//!     }
//! }
//!
//! WinitHost::new(WinitConfig::default()).run(Hello).unwrap();
//! ```

mod input;
mod present;

use std::error::Error;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use tileterm_core::{AtlasConfig, Phase, Runner, SurfaceConfig, TerminalApp};
use tileterm_tiles::{Backend, BackendKind, PendingAtlas, RasterFrame, TileAtlas, blit};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the winit host.
#[derive(Clone, Debug)]
pub struct WinitConfig {
    /// Window title.
    pub title: String,
    /// Scale applied to the output when presenting. `None` uses the
    /// window's scale factor.
    pub device_pixel_ratio: Option<f64>,
    /// Output size and cell grid.
    pub surface: SurfaceConfig,
    /// Tileset image and its geometry.
    pub atlas: AtlasConfig,
    /// Which backend renders the cells.
    pub backend: BackendKind,
}

impl Default for WinitConfig {
    fn default() -> Self {
        Self {
            title: "tileterm".into(),
            device_pixel_ratio: None,
            surface: SurfaceConfig::default(),
            atlas: AtlasConfig::default(),
            backend: BackendKind::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// WinitHost
// ---------------------------------------------------------------------------

/// Owns the main-thread event loop and drives one application.
pub struct WinitHost {
    config: WinitConfig,
}

impl WinitHost {
    pub fn new(config: WinitConfig) -> Self {
        Self { config }
    }

    /// Run `app` until the window is closed.
    ///
    /// Returns the atlas error if the tileset could not be loaded.
    pub fn run<A>(self, app: A) -> Result<(), Box<dyn Error>>
    where
        A: TerminalApp<Backend>,
    {
        let event_loop = EventLoop::new()?;
        let runner = Runner::new(app, self.config.surface.clone());
        let mut host = HostApp::new(self.config, runner);
        event_loop.run_app(&mut host)?;
        match host.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// HostApp: ApplicationHandler
// ---------------------------------------------------------------------------

struct HostApp<A: TerminalApp<Backend>> {
    config: WinitConfig,
    runner: Runner<A, Backend>,
    pending: Option<PendingAtlas>,
    state: Option<HostState>,
    error: Option<Box<dyn Error>>,
}

struct HostState {
    window: Arc<Window>,
    surface: softbuffer::Surface<Arc<Window>, Arc<Window>>,
    ratio: f64,
}

impl<A: TerminalApp<Backend>> HostApp<A> {
    fn new(config: WinitConfig, runner: Runner<A, Backend>) -> Self {
        Self {
            config,
            runner,
            pending: None,
            state: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Box<dyn Error>> {
        let (w, h) = (self.config.surface.output_width, self.config.surface.output_height);
        let attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(w, h));
        let window = Arc::new(event_loop.create_window(attrs)?);
        let ratio = self
            .config
            .device_pixel_ratio
            .unwrap_or_else(|| window.scale_factor());

        let context = softbuffer::Context::new(window.clone())?;
        let surface = softbuffer::Surface::new(&context, window.clone())?;

        log::debug!("window {w}x{h} at ratio {ratio}");
        self.state = Some(HostState {
            window,
            surface,
            ratio,
        });
        self.pending = Some(TileAtlas::load(self.config.atlas.clone()));
        Ok(())
    }

    fn poll_atlas(&mut self, event_loop: &ActiveEventLoop) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        let Some(result) = pending.poll() else {
            return;
        };
        self.pending = None;
        match result {
            Ok(atlas) => {
                let backend = Backend::new(self.config.backend, Rc::new(atlas), self.runner.config());
                if let Err(e) = self.runner.attach(backend) {
                    self.abort(event_loop, Box::new(e));
                    return;
                }
                event_loop.set_control_flow(ControlFlow::Wait);
                if let Some(state) = self.state.as_ref() {
                    state.window.request_redraw();
                }
            }
            Err(e) => {
                self.runner.fail(&e);
                self.abort(event_loop, Box::new(e));
            }
        }
    }

    fn abort(&mut self, event_loop: &ActiveEventLoop, e: Box<dyn Error>) {
        self.error = Some(e);
        event_loop.exit();
    }

    /// Copy the current frame, scaled by the pixel ratio, to the window.
    fn present(&mut self) -> Result<(), Box<dyn Error>> {
        let (Some(state), Some(term)) = (self.state.as_mut(), self.runner.surface_mut()) else {
            return Ok(());
        };
        let frame = blit::scale_frame(term.backend_mut().frame(), state.ratio);
        let (w, h) = frame.dimensions();
        let (Some(nw), Some(nh)) = (NonZeroU32::new(w), NonZeroU32::new(h)) else {
            return Ok(());
        };
        state.surface.resize(nw, nh)?;
        let mut buf = state.surface.buffer_mut()?;
        present::blit_to_buffer(&frame, &mut buf, w as usize, h as usize);
        buf.present()?;
        Ok(())
    }
}

impl<A: TerminalApp<Backend>> ApplicationHandler for HostApp<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("cannot open window: {e}");
            self.abort(event_loop, e);
            return;
        }
        // Keep waking up until the atlas arrives.
        event_loop.set_control_flow(ControlFlow::Poll);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.runner.phase() == Phase::Loading {
            self.poll_atlas(event_loop);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if self.config.device_pixel_ratio.is_none() {
                    if let Some(state) = self.state.as_mut() {
                        state.ratio = scale_factor;
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if !self.runner.tick() {
                    return;
                }
                if let Err(e) = self.present() {
                    log::warn!("present failed: {e}");
                }
                if let Some(state) = self.state.as_ref() {
                    state.window.request_redraw();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(key) = input::translate_keyboard(&event) {
                    self.runner.key(key);
                }
            }

            _ => {}
        }
    }
}
