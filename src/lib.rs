//! ASCII torus renderer
//!
//! This library renders a rotating parametric surface (a torus, or its bare
//! generating ring) as ASCII art: surface samples are rotated, perspective
//! projected, composited through a depth buffer, and quantized into a glyph
//! ramp for terminal display.

pub mod animation;
pub mod renderer;
pub mod surface;
pub mod terminal;

pub use animation::Animation;
pub use renderer::{Frame, RenderConfig, Renderer};
pub use surface::Surface;
pub use terminal::TerminalDisplay;

/// Glyph ramp indexed by quantized luminance, dimmest to brightest.
pub const LUMINANCE_RAMP: &str = ".,-~:;=!*#$@";

/// Glyph for cells no sample projected onto.
pub const BACKGROUND_GLYPH: char = ' ';

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_runs_dim_to_bright() {
        assert_eq!(LUMINANCE_RAMP.len(), 12);
        assert_eq!(LUMINANCE_RAMP.chars().next(), Some('.'));
        assert_eq!(LUMINANCE_RAMP.chars().last(), Some('@'));
        assert!(!LUMINANCE_RAMP.contains(BACKGROUND_GLYPH));
    }
}
