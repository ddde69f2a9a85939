//! Keyboard-echo REPL in a native window.
//!
//! Run: cargo run --bin echo-repl -- [scene|canvas] [tileset.png]

use tileterm_core::{AtlasConfig, SurfaceConfig};
use tileterm_demos::{EchoRepl, HEIGHT, WIDTH};
use tileterm_tiles::BackendKind;
use tileterm_winit::{WinitConfig, WinitHost};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let backend = match args.next().map(|s| s.parse::<BackendKind>()) {
        Some(Ok(kind)) => kind,
        Some(Err(e)) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
        None => BackendKind::default(),
    };
    let mut atlas = AtlasConfig::default();
    if let Some(path) = args.next() {
        atlas = atlas.with_path(path);
    }

    let host = WinitHost::new(WinitConfig {
        title: "tileterm echo".into(),
        surface: SurfaceConfig::default().with_grid_size(WIDTH, HEIGHT),
        atlas,
        backend,
        ..Default::default()
    });

    if let Err(e) = host.run(EchoRepl::new()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
