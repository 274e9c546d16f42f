//! ASCII torus - a rotating surface rendered as terminal ASCII art.
//!
//! Runs until the process is interrupted.
//!
//! Usage:
//!   ascii_torus          - spin the donut
//!   ascii_torus --ring   - spin the bare generating ring instead

use ascii_torus::animation::Animation;
use ascii_torus::renderer::{RenderConfig, Renderer};
use ascii_torus::surface::Surface;
use ascii_torus::terminal::TerminalDisplay;
use log::{info, trace};
use std::time::Duration;

/// Pause between frames.
const FRAME_DELAY: Duration = Duration::from_millis(30);

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let surface = if args.iter().any(|a| a == "--ring") {
        Surface::ring()
    } else {
        Surface::torus()
    };

    let config = RenderConfig::default();
    info!(
        "rendering {:?} at {}x{}, viewer distance {}",
        surface, config.width, config.height, config.viewer_distance
    );

    let mut animation = Animation::new(Renderer::new(config, surface));

    let mut terminal = match TerminalDisplay::new() {
        Ok(terminal) => terminal,
        Err(e) => {
            eprintln!("Failed to initialize terminal: {}", e);
            std::process::exit(1);
        }
    };

    loop {
        let (a, b) = animation.angles();
        trace!("frame at A={:.3} B={:.3}", a, b);

        let frame = animation.tick();
        if let Err(e) = terminal.draw(&frame) {
            drop(terminal);
            eprintln!("Terminal write failed: {}", e);
            std::process::exit(1);
        }

        std::thread::sleep(FRAME_DELAY);
    }
}
