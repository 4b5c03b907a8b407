// src/surface/path.rs
//
// The current-path model shared by the rasterizing surfaces.
// Records path operations as they are issued and flattens them into polylines
// when the surface strokes or fills.

use std::f32::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    ClosePath,
    Ellipse {
        x: f32,
        y: f32,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        start_angle: f32,
        end_angle: f32,
    },
}

impl PathOp {
    pub fn is_finite(&self) -> bool {
        match *self {
            PathOp::MoveTo(x, y) | PathOp::LineTo(x, y) => x.is_finite() && y.is_finite(),
            PathOp::ClosePath => true,
            PathOp::Ellipse {
                x,
                y,
                radius_x,
                radius_y,
                rotation,
                start_angle,
                end_angle,
            } => [x, y, radius_x, radius_y, rotation, start_angle, end_angle]
                .iter()
                .all(|v| v.is_finite()),
        }
    }
}

/// A flattened run of connected points
#[derive(Debug, Clone, PartialEq)]
pub struct Subpath {
    pub points: Vec<(f32, f32)>,
    pub closed: bool,
}

impl Subpath {
    fn starting_at(point: (f32, f32)) -> Self {
        Self {
            points: vec![point],
            closed: false,
        }
    }

    /// Consecutive point pairs, including the closing edge for closed subpaths
    pub fn segments(&self) -> Vec<((f32, f32), (f32, f32))> {
        let mut segments: Vec<_> = self.points.windows(2).map(|w| (w[0], w[1])).collect();
        if self.closed && self.points.len() > 2 {
            if let (Some(&last), Some(&first)) = (self.points.last(), self.points.first()) {
                segments.push((last, first));
            }
        }
        segments
    }
}

#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    ops: Vec<PathOp>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Records `op`. Operations with non-finite arguments are dropped, as a
    /// canvas ignores them.
    pub fn push(&mut self, op: PathOp) {
        if op.is_finite() {
            self.ops.push(op);
        }
    }

    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Flattens the recorded operations. Ellipses are sampled with
    /// `arc_resolution` points per full turn.
    pub fn flatten(&self, arc_resolution: usize) -> Vec<Subpath> {
        let mut subpaths: Vec<Subpath> = Vec::new();
        let mut current: Option<Subpath> = None;

        for op in &self.ops {
            match *op {
                PathOp::MoveTo(x, y) => {
                    if let Some(done) = current.take() {
                        subpaths.push(done);
                    }
                    current = Some(Subpath::starting_at((x, y)));
                }
                PathOp::LineTo(x, y) => match current.as_mut() {
                    Some(subpath) => subpath.points.push((x, y)),
                    // a line with no current point behaves as a move
                    None => current = Some(Subpath::starting_at((x, y))),
                },
                PathOp::ClosePath => {
                    if let Some(mut done) = current.take() {
                        let start = done.points[0];
                        done.closed = true;
                        subpaths.push(done);
                        current = Some(Subpath::starting_at(start));
                    }
                }
                PathOp::Ellipse {
                    x,
                    y,
                    radius_x,
                    radius_y,
                    rotation,
                    start_angle,
                    end_angle,
                } => {
                    let points = sample_ellipse(
                        (x, y),
                        (radius_x, radius_y),
                        rotation,
                        start_angle,
                        end_angle,
                        arc_resolution,
                    );
                    match current.as_mut() {
                        Some(subpath) => subpath.points.extend(points),
                        None => {
                            current = Some(Subpath {
                                points,
                                closed: false,
                            })
                        }
                    }
                }
            }
        }

        if let Some(done) = current {
            subpaths.push(done);
        }
        subpaths
    }
}

fn sample_ellipse(
    (cx, cy): (f32, f32),
    (rx, ry): (f32, f32),
    rotation: f32,
    start_angle: f32,
    end_angle: f32,
    arc_resolution: usize,
) -> Vec<(f32, f32)> {
    let sweep = end_angle - start_angle;
    let steps = ((arc_resolution.max(4) as f32) * sweep.abs() / (2.0 * PI))
        .ceil()
        .max(1.0) as usize;

    let (sin_rot, cos_rot) = rotation.sin_cos();
    (0..=steps)
        .map(|i| {
            let t = start_angle + sweep * (i as f32 / steps as f32);
            let (sin_t, cos_t) = t.sin_cos();
            let px = rx * cos_t;
            let py = ry * sin_t;
            (
                cx + px * cos_rot - py * sin_rot,
                cy + px * sin_rot + py * cos_rot,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_and_lines() {
        let mut path = PathBuilder::new();
        path.push(PathOp::MoveTo(0.0, 0.0));
        path.push(PathOp::LineTo(10.0, 0.0));
        path.push(PathOp::LineTo(10.0, 10.0));

        let subpaths = path.flatten(32);
        assert_eq!(subpaths.len(), 1);
        assert_eq!(subpaths[0].points, vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        assert!(!subpaths[0].closed);
        assert_eq!(subpaths[0].segments().len(), 2);
    }

    #[test]
    fn test_close_path_adds_closing_segment() {
        let mut path = PathBuilder::new();
        path.push(PathOp::MoveTo(0.0, 0.0));
        path.push(PathOp::LineTo(10.0, 0.0));
        path.push(PathOp::LineTo(10.0, 10.0));
        path.push(PathOp::ClosePath);

        let subpaths = path.flatten(32);
        // the closed triangle plus the new subpath opened at its start point
        assert_eq!(subpaths.len(), 2);
        assert!(subpaths[0].closed);
        assert_eq!(subpaths[0].segments().len(), 3);
        assert_eq!(subpaths[1].points, vec![(0.0, 0.0)]);
    }

    #[test]
    fn test_full_ellipse_returns_to_start() {
        let mut path = PathBuilder::new();
        path.push(PathOp::Ellipse {
            x: 50.0,
            y: 50.0,
            radius_x: 10.0,
            radius_y: 10.0,
            rotation: 0.0,
            start_angle: 0.0,
            end_angle: 2.0 * PI,
        });

        let subpaths = path.flatten(16);
        assert_eq!(subpaths.len(), 1);
        let points = &subpaths[0].points;
        assert_eq!(points.len(), 17);

        let first = points[0];
        let last = points[points.len() - 1];
        assert!((first.0 - 60.0).abs() < 1e-4 && (first.1 - 50.0).abs() < 1e-4);
        assert!((last.0 - first.0).abs() < 1e-3 && (last.1 - first.1).abs() < 1e-3);

        for (x, y) in points {
            let r = ((x - 50.0).powi(2) + (y - 50.0).powi(2)).sqrt();
            assert!((r - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_non_finite_ops_are_dropped() {
        let mut path = PathBuilder::new();
        path.push(PathOp::MoveTo(f32::NAN, 0.0));
        path.push(PathOp::LineTo(1.0, f32::INFINITY));
        path.push(PathOp::Ellipse {
            x: 0.0,
            y: 0.0,
            radius_x: f32::NAN,
            radius_y: 1.0,
            rotation: 0.0,
            start_angle: 0.0,
            end_angle: PI,
        });
        assert!(path.is_empty());

        path.push(PathOp::MoveTo(1.0, 2.0));
        assert_eq!(path.ops(), &[PathOp::MoveTo(1.0, 2.0)]);
    }

    #[test]
    fn test_line_without_move_starts_subpath() {
        let mut path = PathBuilder::new();
        path.push(PathOp::LineTo(3.0, 4.0));
        path.push(PathOp::LineTo(5.0, 6.0));

        let subpaths = path.flatten(32);
        assert_eq!(subpaths[0].points, vec![(3.0, 4.0), (5.0, 6.0)]);
    }
}
