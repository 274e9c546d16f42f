//! The frame rasterizer.
//!
//! Sweeps the full sample domain, projects each sample to integer screen
//! coordinates with a perspective divide, composites overlapping samples
//! through an inverse-depth buffer, and quantizes luminance into glyphs.

use std::f64::consts::TAU;

use log::debug;
use nalgebra::Vector3;
use rayon::prelude::*;

use crate::surface::{Rotation, Sample, Surface};
use crate::{BACKGROUND_GLYPH, LUMINANCE_RAMP};

/// Samples closer to the projection plane than this are discarded instead
/// of fed to the perspective divide. Unreachable for the default geometry
/// (viewer distance 5 against radial extent 3), kept as a guard.
const MIN_DEPTH: f64 = 1e-6;

/// Gain applied to luminance before quantizing into the glyph ramp.
const LUMINANCE_GAIN: f64 = 8.0;

/// Fixed rendering parameters. All values are set once at startup; the
/// renderer derives its projection scale from them at construction time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Character-grid width.
    pub width: usize,
    /// Character-grid height.
    pub height: usize,
    /// Distance from the viewer to the surface center.
    pub viewer_distance: f64,
    /// Step size of the cross-section sweep.
    pub theta_step: f64,
    /// Step size of the central-axis sweep (torus only).
    pub phi_step: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            viewer_distance: 5.0,
            theta_step: 0.04,
            phi_step: 0.02,
        }
    }
}

/// A completed character-grid frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Frame {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Glyph at `(x, y)`; `(0, 0)` is the top-left cell.
    pub fn get(&self, x: usize, y: usize) -> char {
        self.cells[y * self.width + x]
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks_exact(self.width)
    }
}

/// Per-pass scratch: the inverse-depth buffer and glyph grid for one frame.
/// Inverse depth zero means "infinitely far".
struct RasterTarget {
    width: usize,
    height: usize,
    depth: Vec<f64>,
    cells: Vec<char>,
}

impl RasterTarget {
    fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            depth: vec![0.0; width * height],
            cells: vec![BACKGROUND_GLYPH; width * height],
        }
    }

    /// Depth-test a sample into a cell. Strictly greater inverse depth
    /// wins; an exact tie keeps the earlier writer.
    fn plot(&mut self, x: usize, y: usize, ooz: f64, glyph: char) {
        let index = y * self.width + x;
        if ooz > self.depth[index] {
            self.depth[index] = ooz;
            self.cells[index] = glyph;
        }
    }

    /// Fold another target into this one. Callers merge in sweep order so
    /// exact depth ties resolve the same way as a sequential pass.
    fn merge(&mut self, other: RasterTarget) {
        let incoming = other.depth.into_iter().zip(other.cells);
        for (index, (ooz, glyph)) in incoming.enumerate() {
            if ooz > self.depth[index] {
                self.depth[index] = ooz;
                self.cells[index] = glyph;
            }
        }
    }

    fn into_frame(self) -> Frame {
        Frame {
            width: self.width,
            height: self.height,
            cells: self.cells,
        }
    }
}

/// Rasterizes frames of one surface at a fixed configuration.
///
/// Stateless across frames: the rotation angles are read-only inputs and
/// every buffer is created and discarded within a single render call, so
/// rendering the same angles twice yields the same grid.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RenderConfig,
    surface: Surface,
    scale: f64,
}

impl Renderer {
    /// Build a renderer, deriving the projection scale from the screen
    /// width, the viewer distance, and the surface's radial extent.
    pub fn new(config: RenderConfig, surface: Surface) -> Self {
        let scale =
            config.width as f64 * config.viewer_distance * 2.0 / (8.0 * surface.radial_extent());
        debug!("projection scale {:.4} for {:?}", scale, surface);
        Self {
            config,
            surface,
            scale,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Projection scale derived at construction.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Render one frame at rotation angles `(a, b)`, sequentially.
    pub fn render_frame(&self, a: f64, b: f64) -> Frame {
        let rotation = Rotation::new(a, b);
        let mut target = RasterTarget::blank(self.config.width, self.config.height);
        for step in 0..steps_in_turn(self.config.theta_step) {
            self.rasterize_theta(step as f64 * self.config.theta_step, &rotation, &mut target);
        }
        target.into_frame()
    }

    /// Render one frame with the `theta` sweep split across rayon workers.
    ///
    /// Each worker rasterizes into its own buffers, which are then merged
    /// in sweep order; the output is identical to [`Renderer::render_frame`].
    pub fn render_frame_parallel(&self, a: f64, b: f64) -> Frame {
        let rotation = Rotation::new(a, b);
        let steps = steps_in_turn(self.config.theta_step);
        let workers = rayon::current_num_threads().max(1);
        let chunk = ((steps + workers - 1) / workers).max(1);

        let indices: Vec<usize> = (0..steps).collect();
        let targets: Vec<RasterTarget> = indices
            .par_chunks(chunk)
            .map(|chunk| {
                let mut target = RasterTarget::blank(self.config.width, self.config.height);
                for &step in chunk {
                    self.rasterize_theta(
                        step as f64 * self.config.theta_step,
                        &rotation,
                        &mut target,
                    );
                }
                target
            })
            .collect();

        let mut merged = RasterTarget::blank(self.config.width, self.config.height);
        for target in targets {
            merged.merge(target);
        }
        merged.into_frame()
    }

    /// Project a viewer-translated position to integer screen coordinates.
    ///
    /// `None` when the point falls outside the grid or sits at or behind
    /// the projection plane; out-of-bounds samples are discarded, never
    /// wrapped or clamped.
    pub fn project(&self, position: &Vector3<f64>) -> Option<(usize, usize)> {
        if position.z < MIN_DEPTH {
            return None;
        }
        let ooz = 1.0 / position.z;
        let xp = (self.config.width as f64 / 2.0 + self.scale * ooz * position.x).floor();
        let yp = (self.config.height as f64 / 2.0 - self.scale * ooz * position.y).floor();
        if xp < 0.0 || yp < 0.0 || xp >= self.config.width as f64 || yp >= self.config.height as f64
        {
            return None;
        }
        Some((xp as usize, yp as usize))
    }

    fn rasterize_theta(&self, theta: f64, rotation: &Rotation, target: &mut RasterTarget) {
        if self.surface.has_sweep() {
            for step in 0..steps_in_turn(self.config.phi_step) {
                let phi = step as f64 * self.config.phi_step;
                let sample = self
                    .surface
                    .sample(theta, phi, rotation, self.config.viewer_distance);
                self.rasterize_sample(sample, target);
            }
        } else {
            let sample = self
                .surface
                .sample(theta, 0.0, rotation, self.config.viewer_distance);
            self.rasterize_sample(sample, target);
        }
    }

    fn rasterize_sample(&self, sample: Sample, target: &mut RasterTarget) {
        if let Some((x, y)) = self.project(&sample.position) {
            let ooz = 1.0 / sample.position.z;
            target.plot(x, y, ooz, glyph_for(sample.luminance));
        }
    }
}

/// Number of fixed-size steps that sweep a full turn.
fn steps_in_turn(step: f64) -> usize {
    (TAU / step).ceil() as usize
}

/// Map a luminance value onto the glyph ramp.
///
/// The scaled value truncates toward zero before clamping, so anything at
/// or below zero lands on the dimmest glyph and anything past the ramp on
/// the brightest.
pub fn glyph_for(luminance: f64) -> char {
    let last = LUMINANCE_RAMP.len() as i64 - 1;
    let index = (luminance * LUMINANCE_GAIN) as i64;
    LUMINANCE_RAMP.as_bytes()[index.clamp(0, last) as usize] as char
}
