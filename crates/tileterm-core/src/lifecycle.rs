//! Application lifecycle: [`TerminalApp`], [`Runner`], [`Phase`].
//!
//! A host owns the platform pieces (window or canvas, refresh tick, atlas
//! decoding) and feeds the [`Runner`] three kinds of events: the atlas
//! finished loading (or failed), a display refresh happened, a key was
//! pressed. The runner turns those into calls on the application in a
//! fixed order:
//!
//! 1. atlas ready → surface allocated → [`TerminalApp::ready`] (once)
//! 2. every refresh after that → [`TerminalApp::frame`]
//!
//! Ticks and keys arriving before the surface exists are dropped.

use std::fmt;

use crate::backend::SurfaceBackend;
use crate::config::SurfaceConfig;
use crate::error::SurfaceError;
use crate::input::Key;
use crate::surface::TerminalSurface;

/// The application side of a terminal.
///
/// Registered once with a [`Runner`]; the frame hook is a standing
/// subscription for the lifetime of the surface.
pub trait TerminalApp<B: SurfaceBackend> {
    /// Called exactly once, when the cell grid and backend are allocated
    /// and safe to mutate.
    fn ready(&mut self, term: &mut TerminalSurface<B>);

    /// Called once per display refresh, after `ready`.
    fn frame(&mut self, _term: &mut TerminalSurface<B>) {}

    /// Called for each key press, after `ready`.
    fn key(&mut self, _term: &mut TerminalSurface<B>, _key: Key) {}
}

/// Where a [`Runner`] is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the tile atlas.
    Loading,
    /// Surface allocated; ticks are delivered.
    Ready,
    /// The atlas failed to load; the surface will never exist.
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Loading => "loading",
            Phase::Ready => "ready",
            Phase::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Sequences atlas-ready, surface-ready and frame ticks for one
/// application.
pub struct Runner<A, B>
where
    A: TerminalApp<B>,
    B: SurfaceBackend,
{
    app: A,
    config: SurfaceConfig,
    surface: Option<TerminalSurface<B>>,
    failure: Option<SurfaceError>,
    ticks: u64,
}

impl<A, B> Runner<A, B>
where
    A: TerminalApp<B>,
    B: SurfaceBackend,
{
    pub fn new(app: A, config: SurfaceConfig) -> Self {
        Self {
            app,
            config,
            surface: None,
            failure: None,
            ticks: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.surface.is_some() {
            Phase::Ready
        } else if self.failure.is_some() {
            Phase::Failed
        } else {
            Phase::Loading
        }
    }

    #[inline]
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// The atlas is ready and `backend` has been built over it: allocate
    /// the surface and fire [`TerminalApp::ready`].
    ///
    /// Fails with [`SurfaceError::AlreadyReady`] on any call after the
    /// first, or after [`fail`](Self::fail).
    pub fn attach(&mut self, backend: B) -> Result<(), SurfaceError> {
        if self.phase() != Phase::Loading {
            return Err(SurfaceError::AlreadyReady);
        }
        let mut surface = TerminalSurface::new(self.config.clone(), backend);
        self.app.ready(&mut surface);
        self.surface = Some(surface);
        log::debug!("runner: {}", self.phase());
        Ok(())
    }

    /// The atlas could not be loaded. The runner stays failed and the
    /// error is returned for the host to surface.
    pub fn fail(&mut self, reason: impl fmt::Display) -> SurfaceError {
        let err = SurfaceError::LoadFailed(reason.to_string());
        log::error!("{err}");
        if self.surface.is_none() {
            self.failure = Some(err.clone());
        }
        err
    }

    /// The failure recorded by [`fail`](Self::fail), if any.
    pub fn failure(&self) -> Option<&SurfaceError> {
        self.failure.as_ref()
    }

    /// One display refresh. Returns `false` (and does nothing) until the
    /// surface is ready.
    pub fn tick(&mut self) -> bool {
        match self.surface.as_mut() {
            Some(surface) => {
                self.ticks += 1;
                self.app.frame(surface);
                true
            }
            None => false,
        }
    }

    /// Forward a key press. Returns `false` until the surface is ready.
    pub fn key(&mut self, key: Key) -> bool {
        match self.surface.as_mut() {
            Some(surface) => {
                self.app.key(surface, key);
                true
            }
            None => false,
        }
    }

    /// Number of frame ticks delivered so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn app(&self) -> &A {
        &self.app
    }

    #[inline]
    pub fn surface(&self) -> Option<&TerminalSurface<B>> {
        self.surface.as_ref()
    }

    #[inline]
    pub fn surface_mut(&mut self) -> Option<&mut TerminalSurface<B>> {
        self.surface.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::PixelTarget;
    use crate::cell::{Cell, Glyph};
    use crate::color::Color;
    use crate::geom::Range;

    struct Null;

    impl PixelTarget for Null {
        fn plot(&mut self, _: i32, _: i32, _: Color) {}
    }

    impl SurfaceBackend for Null {
        fn paint_cell(&mut self, _: i32, _: i32, _: Range, _: Cell) {}
        fn clear_draw(&mut self) {}
    }

    /// Records the order of hook calls.
    #[derive(Default)]
    struct Log {
        events: Vec<String>,
    }

    impl<B: SurfaceBackend> TerminalApp<B> for Log {
        fn ready(&mut self, term: &mut TerminalSurface<B>) {
            term.put_string(0, 0, "hi", None, None);
            self.events.push("ready".into());
        }

        fn frame(&mut self, _term: &mut TerminalSurface<B>) {
            self.events.push("frame".into());
        }

        fn key(&mut self, term: &mut TerminalSurface<B>, key: Key) {
            if let Key::Char(c) = key {
                term.put_char(0, 1, c, None, None);
            }
            self.events.push(format!("key {key:?}"));
        }
    }

    fn runner() -> Runner<Log, Null> {
        Runner::new(Log::default(), SurfaceConfig::default().with_grid_size(10, 4))
    }

    #[test]
    fn ticks_before_ready_are_dropped() {
        let mut r = runner();
        assert_eq!(r.phase(), Phase::Loading);
        assert!(!r.tick());
        assert!(!r.key(Key::Char('x')));
        assert!(r.app().events.is_empty());
        assert_eq!(r.ticks(), 0);
        assert!(r.surface().is_none());
    }

    #[test]
    fn ready_precedes_frames() {
        let mut r = runner();
        r.attach(Null).unwrap();
        assert_eq!(r.phase(), Phase::Ready);
        assert!(r.tick());
        assert!(r.tick());
        assert!(r.key(Key::Char('z')));
        assert_eq!(r.app().events, ["ready", "frame", "frame", "key Char('z')"]);
        assert_eq!(r.ticks(), 2);

        let s = r.surface().unwrap();
        assert_eq!(s.get_char(1, 0), Ok(Glyph::from('i')));
        assert_eq!(s.get_char(0, 1), Ok(Glyph::from('z')));
    }

    #[test]
    fn ready_fires_once() {
        let mut r = runner();
        r.attach(Null).unwrap();
        assert_eq!(r.attach(Null), Err(SurfaceError::AlreadyReady));
        assert_eq!(r.app().events, ["ready"]);
    }

    #[test]
    fn failure_is_explicit_and_final() {
        let mut r = runner();
        let err = r.fail("tileset.png: not found");
        assert_eq!(err, SurfaceError::LoadFailed("tileset.png: not found".into()));
        assert_eq!(r.phase(), Phase::Failed);
        assert_eq!(r.failure(), Some(&err));
        assert_eq!(r.attach(Null), Err(SurfaceError::AlreadyReady));
        assert!(!r.tick());
        assert!(r.app().events.is_empty());
    }
}
