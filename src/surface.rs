//! Surface definitions and the geometry/shading sampler.
//!
//! A surface is walked by sweep parameters: `theta` traces the generating
//! cross-section circle, and `phi` (torus only) sweeps that circle around
//! the central axis. Each sample yields a rotated, viewer-translated 3D
//! position plus a luminance value against a fixed directional light.

use nalgebra::{Rotation3, Vector3};

/// Light direction the luminance model dots surface normals against.
/// Deliberately unnormalized: its magnitude feeds the glyph quantization.
pub fn light_direction() -> Vector3<f64> {
    Vector3::new(0.0, 1.0, -1.0)
}

/// The parametric surface being rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    /// Donut: a circle of `minor_radius` swept around the central axis at
    /// distance `major_radius`, parameterized by `theta` and `phi`.
    Torus { minor_radius: f64, major_radius: f64 },
    /// Degenerate case: just the generating circle, parameterized by
    /// `theta` alone. The sampler ignores `phi`.
    Ring { radius: f64 },
}

impl Surface {
    /// The standard demo torus (minor radius 1, major radius 2).
    pub fn torus() -> Self {
        Surface::Torus {
            minor_radius: 1.0,
            major_radius: 2.0,
        }
    }

    /// The standard demo ring (radius 1).
    pub fn ring() -> Self {
        Surface::Ring { radius: 1.0 }
    }

    /// Furthest distance of any surface point from the origin. The
    /// projection scale is derived from it, and the viewer distance must
    /// exceed it to keep every sample in front of the projection plane.
    pub fn radial_extent(&self) -> f64 {
        match *self {
            Surface::Torus {
                minor_radius,
                major_radius,
            } => minor_radius + major_radius,
            Surface::Ring { radius } => radius,
        }
    }

    /// Whether the `phi` sweep applies (torus) or not (ring).
    pub fn has_sweep(&self) -> bool {
        matches!(self, Surface::Torus { .. })
    }

    /// Sample the surface at `(theta, phi)` under `rotation`, translated by
    /// `viewer_distance` along the depth axis.
    ///
    /// This is the production path: the sweep and both rigid rotations are
    /// fused into one closed-form expression per coordinate, using the trig
    /// factors precomputed in [`Rotation`]. It matches
    /// [`Surface::sample_explicit`] to floating-point tolerance.
    ///
    /// Pure function of its inputs; no side effects.
    pub fn sample(&self, theta: f64, phi: f64, rotation: &Rotation, viewer_distance: f64) -> Sample {
        let (sin_theta, cos_theta) = theta.sin_cos();
        let Rotation {
            sin_a,
            cos_a,
            sin_b,
            cos_b,
            ..
        } = *rotation;

        match *self {
            Surface::Torus {
                minor_radius,
                major_radius,
            } => {
                let (sin_phi, cos_phi) = phi.sin_cos();
                let circle_x = major_radius + minor_radius * cos_theta;
                let circle_y = minor_radius * sin_theta;

                let x = circle_x * (cos_b * cos_phi - sin_a * sin_b * sin_phi)
                    - circle_y * cos_a * sin_b;
                let y = circle_x * (sin_b * cos_phi + sin_a * cos_b * sin_phi)
                    + circle_y * cos_a * cos_b;
                let z = viewer_distance + circle_y * sin_a - circle_x * cos_a * sin_phi;

                let luminance = cos_theta * cos_phi * sin_b
                    + cos_b * (sin_theta * cos_a + cos_theta * sin_a * sin_phi)
                    - sin_theta * sin_a
                    + cos_theta * cos_a * sin_phi;

                Sample {
                    position: Vector3::new(x, y, z),
                    luminance,
                }
            }
            Surface::Ring { radius } => {
                let x = radius * (cos_theta * cos_b - sin_theta * cos_a * sin_b);
                let y = radius * (cos_theta * sin_b + sin_theta * cos_a * cos_b);
                let z = viewer_distance + radius * sin_theta * sin_a;

                let luminance = cos_theta * sin_b + sin_theta * cos_a * cos_b - sin_theta * sin_a;

                Sample {
                    position: Vector3::new(x, y, z),
                    luminance,
                }
            }
        }
    }

    /// Sample via the explicit multi-step rotation path: base cross-section
    /// point, sweep about the central axis by `phi`, then the rigid frame
    /// rotation. The surface normal takes the same rotations before the dot
    /// product with the light.
    ///
    /// Reference implementation for the fused form in [`Surface::sample`].
    pub fn sample_explicit(
        &self,
        theta: f64,
        phi: f64,
        rotation: &Rotation,
        viewer_distance: f64,
    ) -> Sample {
        let normal = Vector3::new(theta.cos(), theta.sin(), 0.0);
        let (base, normal) = match *self {
            Surface::Torus {
                minor_radius,
                major_radius,
            } => {
                let base = Vector3::new(
                    major_radius + minor_radius * theta.cos(),
                    minor_radius * theta.sin(),
                    0.0,
                );
                let sweep = Rotation3::from_axis_angle(&Vector3::y_axis(), phi);
                (sweep * base, sweep * normal)
            }
            Surface::Ring { radius } => (normal * radius, normal),
        };

        let rigid = rotation.rigid();
        let mut position = rigid * base;
        position.z += viewer_distance;
        let luminance = (rigid * normal).dot(&light_direction());

        Sample {
            position,
            luminance,
        }
    }
}

/// Per-frame rotation state: the two rigid-rotation angles with their trig
/// factors computed once per frame rather than once per sample.
#[derive(Debug, Clone, Copy)]
pub struct Rotation {
    a: f64,
    b: f64,
    sin_a: f64,
    cos_a: f64,
    sin_b: f64,
    cos_b: f64,
}

impl Rotation {
    pub fn new(a: f64, b: f64) -> Self {
        let (sin_a, cos_a) = a.sin_cos();
        let (sin_b, cos_b) = b.sin_cos();
        Self {
            a,
            b,
            sin_a,
            cos_a,
            sin_b,
            cos_b,
        }
    }

    /// The composed rigid rotation: `A` about the x axis, then `B` about z.
    pub fn rigid(&self) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::z_axis(), self.b)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), self.a)
    }
}

/// One sampled surface point: viewer-translated position plus luminance.
/// Ephemeral; produced per `(theta, phi)` pair and consumed immediately by
/// the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub position: Vector3<f64>,
    pub luminance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    const TOLERANCE: f64 = 1e-9;
    const VIEWER: f64 = 5.0;

    fn angles(n: usize) -> impl Iterator<Item = f64> {
        (0..n).map(move |i| i as f64 * TAU / n as f64)
    }

    #[test]
    fn test_torus_fused_matches_explicit() {
        let surface = Surface::torus();
        for a in angles(5) {
            for b in angles(5) {
                let rotation = Rotation::new(a, b);
                for theta in angles(17) {
                    for phi in angles(13) {
                        let fused = surface.sample(theta, phi, &rotation, VIEWER);
                        let explicit = surface.sample_explicit(theta, phi, &rotation, VIEWER);
                        assert!(
                            (fused.position - explicit.position).norm() < TOLERANCE,
                            "position diverged at theta={}, phi={}, a={}, b={}",
                            theta,
                            phi,
                            a,
                            b
                        );
                        assert!((fused.luminance - explicit.luminance).abs() < TOLERANCE);
                    }
                }
            }
        }
    }

    #[test]
    fn test_ring_fused_matches_explicit() {
        let surface = Surface::ring();
        for a in angles(7) {
            for b in angles(7) {
                let rotation = Rotation::new(a, b);
                for theta in angles(29) {
                    let fused = surface.sample(theta, 0.0, &rotation, VIEWER);
                    let explicit = surface.sample_explicit(theta, 0.0, &rotation, VIEWER);
                    assert!((fused.position - explicit.position).norm() < TOLERANCE);
                    assert!((fused.luminance - explicit.luminance).abs() < TOLERANCE);
                }
            }
        }
    }

    #[test]
    fn test_sweep_offset_composes() {
        // Rotating the cross-section ahead of time and shortening the sweep
        // by the same amount lands on the same surface point.
        let surface = Surface::torus();
        let rotation = Rotation::new(0.6, 1.9);
        for theta in angles(9) {
            for phi in angles(9) {
                for delta in angles(7) {
                    let base = Vector3::new(2.0 + theta.cos(), theta.sin(), 0.0);
                    let pre = Rotation3::from_axis_angle(&Vector3::y_axis(), delta) * base;
                    let swept = Rotation3::from_axis_angle(&Vector3::y_axis(), phi - delta) * pre;
                    let mut expected = rotation.rigid() * swept;
                    expected.z += VIEWER;

                    let sample = surface.sample(theta, phi, &rotation, VIEWER);
                    assert!(
                        (sample.position - expected).norm() < TOLERANCE,
                        "offset {} broke the sweep at theta={}, phi={}",
                        delta,
                        theta,
                        phi
                    );
                }
            }
        }
    }

    #[test]
    fn test_luminance_at_rest() {
        // With no rigid rotation the torus luminance reduces to
        // sin(theta) + cos(theta)*sin(phi), and the ring's to sin(theta).
        let rotation = Rotation::new(0.0, 0.0);
        let torus = Surface::torus();
        let ring = Surface::ring();
        for theta in angles(11) {
            for phi in angles(11) {
                let expected = theta.sin() + theta.cos() * phi.sin();
                let sample = torus.sample(theta, phi, &rotation, VIEWER);
                assert!((sample.luminance - expected).abs() < TOLERANCE);
            }
            let sample = ring.sample(theta, 0.0, &rotation, VIEWER);
            assert!((sample.luminance - theta.sin()).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_samples_stay_in_front_of_projection_plane() {
        let surface = Surface::torus();
        let clearance = VIEWER - surface.radial_extent();
        for a in angles(6) {
            for b in angles(6) {
                let rotation = Rotation::new(a, b);
                for theta in angles(31) {
                    for phi in angles(37) {
                        let sample = surface.sample(theta, phi, &rotation, VIEWER);
                        assert!(sample.position.z >= clearance - TOLERANCE);
                    }
                }
            }
        }
    }

    #[test]
    fn test_radial_extent() {
        assert_eq!(Surface::torus().radial_extent(), 3.0);
        assert_eq!(Surface::ring().radial_extent(), 1.0);
        assert!(Surface::torus().has_sweep());
        assert!(!Surface::ring().has_sweep());
    }

    #[test]
    fn test_sample_is_deterministic() {
        let surface = Surface::torus();
        let rotation = Rotation::new(1.2, 0.7);
        let first = surface.sample(0.5, 1.5, &rotation, VIEWER);
        let second = surface.sample(0.5, 1.5, &rotation, VIEWER);
        assert_eq!(first, second);
    }
}
