//! Keyboard-echo REPL shared by the tileterm demos.
//!
//! Echoes typed characters at a blinking cursor, wraps at the right edge,
//! scrolls when the cursor runs off the bottom, and draws a few raster
//! shapes over the text on startup.

use tileterm_core::{Color, Key, Point, SurfaceBackend, TerminalApp, TerminalSurface};

pub const WIDTH: i32 = 80;
pub const HEIGHT: i32 = 30;

/// Frames per cursor blink cycle; the cursor shows for the first half.
const BLINK: u64 = 60;
const CURSOR: char = '_';

/// The echo REPL. Works over any backend.
#[derive(Debug, Default)]
pub struct EchoRepl {
    cur: Point,
    /// Where the cursor was last drawn, so it can be hidden again.
    last: Point,
    chars: u32,
    frames: u64,
    started: bool,
}

impl EchoRepl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor cell.
    pub fn cursor(&self) -> Point {
        self.cur
    }

    fn newline<B: SurfaceBackend>(&mut self, term: &mut TerminalSurface<B>) {
        self.cur.x = 0;
        self.cur.y += 1;
        if self.cur.y >= term.height() {
            self.cur.y -= 1;
            term.scroll_up(1, None, None);
        }
    }

    fn blank_at<B: SurfaceBackend>(term: &TerminalSurface<B>, p: Point) -> bool {
        term.get_char(p.x, p.y).map_or(true, |g| g.is_blank())
    }

    fn backspace<B: SurfaceBackend>(&mut self, term: &mut TerminalSurface<B>) {
        if self.chars == 0 || self.cur == Point::new(0, 0) {
            return;
        }
        let w = term.width();
        term.put_char(self.cur.x, self.cur.y, 0u32, None, None);
        self.cur.x -= 1;
        if self.cur.x < 0 {
            // Back onto the previous line, just past its last glyph.
            self.cur.x = w - 1;
            self.cur.y -= 1;
            while Self::blank_at(term, self.cur) && self.cur.x > 0 {
                self.cur.x -= 1;
            }
            if !Self::blank_at(term, self.cur) && self.cur.x < w - 1 {
                self.cur.x += 1;
            }
        }
        term.put_char(self.cur.x, self.cur.y, 0u32, None, None);
        self.chars -= 1;
    }
}

impl<B: SurfaceBackend> TerminalApp<B> for EchoRepl {
    fn ready(&mut self, term: &mut TerminalSurface<B>) {
        term.put_string(0, 0, "Type anything.", Some(Color::RED), Some(Color::BLUE));
        term.put_string(0, 1, "--------------", None, None);
        self.cur = Point::new(0, 2);
        self.started = true;

        term.draw_rect(20, 20, 200, 100, Some(Color::BLUE));
        term.fill_rect(21, 21, 199, 99, Some(Color::GREEN));
        term.draw_pixel(50, 50, Some(Color::BLACK));
        term.fill_ellipse(100, 100, 50, 100, None);
        log::info!("echo repl ready on a {}x{} grid", term.width(), term.height());
    }

    fn frame(&mut self, term: &mut TerminalSurface<B>) {
        if !self.started {
            return;
        }
        match self.frames % BLINK {
            0 => {
                term.put_char(self.cur.x, self.cur.y, CURSOR, None, None);
                self.last = self.cur;
            }
            n if n == BLINK / 2 => term.put_char(self.last.x, self.last.y, ' ', None, None),
            _ => {}
        }
        self.frames += 1;
    }

    fn key(&mut self, term: &mut TerminalSurface<B>, key: Key) {
        if !self.started {
            return;
        }
        match key {
            Key::Enter => {
                term.put_char(self.cur.x, self.cur.y, 0u32, None, None);
                self.newline(term);
                self.chars += 1;
            }
            Key::Backspace => self.backspace(term),
            Key::Char(c) => {
                term.put_char(self.cur.x, self.cur.y, c, None, None);
                self.cur.x += 1;
                if self.cur.x >= term.width() {
                    self.newline(term);
                }
                self.chars += 1;
            }
            _ => return,
        }
        // Show the cursor right away at its new spot.
        self.frames = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileterm_core::{Cell, PixelTarget, Range, Runner, SurfaceConfig};

    struct Null;

    impl PixelTarget for Null {
        fn plot(&mut self, _x: i32, _y: i32, _color: Color) {}
    }

    impl SurfaceBackend for Null {
        fn paint_cell(&mut self, _col: i32, _row: i32, _area: Range, _cell: Cell) {}
        fn clear_draw(&mut self) {}
    }

    fn ready(width: i32, height: i32) -> Runner<EchoRepl, Null> {
        let config = SurfaceConfig::default().with_grid_size(width, height);
        let mut runner = Runner::new(EchoRepl::new(), config);
        runner.attach(Null).unwrap();
        runner
    }

    fn typed(runner: &mut Runner<EchoRepl, Null>, text: &str) {
        for c in text.chars() {
            let key = if c == '\n' { Key::Enter } else { Key::Char(c) };
            runner.key(key);
        }
    }

    fn row(runner: &Runner<EchoRepl, Null>, y: i32) -> String {
        let term = runner.surface().unwrap();
        (0..term.width())
            .map(|x| match term.get_char(x, y).unwrap() {
                g if g.is_blank() => '.',
                g => g.to_char().unwrap_or('?'),
            })
            .collect()
    }

    #[test]
    fn banner_in_red_on_blue() {
        let runner = ready(20, 5);
        let term = runner.surface().unwrap();
        assert_eq!(term.get_char(0, 0), Ok('T'.into()));
        assert_eq!(term.get_char_fg(0, 0), Ok(Color::RED));
        assert_eq!(term.get_char_bg(0, 0), Ok(Color::BLUE));
        assert_eq!(runner.app().cursor(), Point::new(0, 2));
    }

    #[test]
    fn typing_echoes_and_enter_starts_a_line() {
        let mut runner = ready(8, 5);
        typed(&mut runner, "hi\nyo");
        assert_eq!(row(&runner, 2), "hi......");
        assert_eq!(row(&runner, 3), "yo......");
        assert_eq!(runner.app().cursor(), Point::new(2, 3));
    }

    #[test]
    fn wraps_and_scrolls_at_the_bottom() {
        let mut runner = ready(4, 4);
        typed(&mut runner, "abcdefgh");
        // Row 2 filled, row 3 filled, the cursor ran off and scrolled once.
        assert_eq!(row(&runner, 1), "abcd");
        assert_eq!(row(&runner, 2), "efgh");
        assert_eq!(row(&runner, 3), "....");
        assert_eq!(runner.app().cursor(), Point::new(0, 3));
        assert_eq!(row(&runner, 0), "----");
    }

    #[test]
    fn backspace_returns_to_end_of_previous_line() {
        let mut runner = ready(8, 6);
        typed(&mut runner, "abc\n");
        assert_eq!(runner.app().cursor(), Point::new(0, 3));
        runner.key(Key::Backspace);
        assert_eq!(runner.app().cursor(), Point::new(3, 2));
        runner.key(Key::Backspace);
        assert_eq!(runner.app().cursor(), Point::new(2, 2));
        assert_eq!(row(&runner, 2), "ab......");
    }

    #[test]
    fn backspace_with_nothing_typed_is_ignored() {
        let mut runner = ready(8, 4);
        runner.key(Key::Backspace);
        assert_eq!(runner.app().cursor(), Point::new(0, 2));
        assert_eq!(row(&runner, 1), "--------");
    }

    #[test]
    fn cursor_blinks() {
        let mut runner = ready(8, 4);
        runner.tick();
        assert_eq!(runner.surface().unwrap().get_char(0, 2), Ok('_'.into()));
        for _ in 0..30 {
            runner.tick();
        }
        assert_eq!(runner.surface().unwrap().get_char(0, 2), Ok(' '.into()));
    }

    #[test]
    fn arrows_are_ignored() {
        let mut runner = ready(8, 4);
        runner.key(Key::ArrowLeft);
        assert_eq!(runner.app().cursor(), Point::new(0, 2));
    }
}
