//! Frame scheduling.
//!
//! Owns the pair of rotation angles and advances them one frame at a time,
//! decoupled from any particular host loop. A real-time timer and a test
//! harness calling [`Animation::tick`] N times drive it the same way.

use std::f64::consts::TAU;

use crate::renderer::{Frame, Renderer};

/// Per-frame increment of the rotation angle about the x axis.
pub const A_STEP: f64 = 0.08;

/// Per-frame increment of the rotation angle about the z axis.
pub const B_STEP: f64 = 0.04;

/// Driver-side animation state. The renderer treats the angles as
/// read-only inputs; only `tick` mutates them, between frames.
pub struct Animation {
    renderer: Renderer,
    a: f64,
    b: f64,
}

impl Animation {
    pub fn new(renderer: Renderer) -> Self {
        Self {
            renderer,
            a: 0.0,
            b: 0.0,
        }
    }

    /// Render the next frame and advance the rotation.
    ///
    /// Angles wrap into [0, 2π) to keep their precision stable over long
    /// runs.
    pub fn tick(&mut self) -> Frame {
        let frame = self.renderer.render_frame_parallel(self.a, self.b);
        self.a = (self.a + A_STEP) % TAU;
        self.b = (self.b + B_STEP) % TAU;
        frame
    }

    /// Current rotation angles `(A, B)`.
    pub fn angles(&self) -> (f64, f64) {
        (self.a, self.b)
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RenderConfig;
    use crate::surface::Surface;

    fn ring_animation() -> Animation {
        Animation::new(Renderer::new(RenderConfig::default(), Surface::ring()))
    }

    #[test]
    fn test_tick_advances_angles() {
        let mut animation = ring_animation();
        assert_eq!(animation.angles(), (0.0, 0.0));
        animation.tick();
        let (a, b) = animation.angles();
        assert!((a - A_STEP).abs() < 1e-12);
        assert!((b - B_STEP).abs() < 1e-12);
    }

    #[test]
    fn test_angles_stay_wrapped() {
        let mut animation = ring_animation();
        for _ in 0..200 {
            animation.tick();
        }
        let (a, b) = animation.angles();
        assert!((0.0..TAU).contains(&a));
        assert!((0.0..TAU).contains(&b));
    }

    #[test]
    fn test_first_frame_matches_direct_render() {
        let mut animation = ring_animation();
        let reference = Renderer::new(RenderConfig::default(), Surface::ring());
        assert_eq!(animation.tick(), reference.render_frame(0.0, 0.0));
    }
}
