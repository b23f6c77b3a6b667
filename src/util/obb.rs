// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Oriented bounding box fitting.
//!
//! Boxes only ever rotate about the vertical axis, so the minimal enclosing
//! box is found in two dimensions: the smallest-area rectangle around the
//! XY convex hull (one side is always collinear with a hull edge), extruded
//! over the Z range of the points.

use super::geometry::{box_corners, BoxParams};
use nalgebra::{Point2, Point3, Rotation3, Vector2, Vector3};

/// Pairs of corner indices forming the 12 edges of a box whose corners are
/// ordered like [`box_corners`] (top face, then bottom face).
pub const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// A box with arbitrary rotation about +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    pub center: Point3<f64>,
    /// Full side lengths along the box's local X, Y and Z axes.
    pub extent: Vector3<f64>,
    pub yaw: f64,
}

impl OrientedBox {
    /// Smallest vertical-axis oriented box enclosing `points`.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_points(points: &[Point3<f64>]) -> Option<Self> {
        let (min_z, max_z) = points.iter().fold(None, |acc: Option<(f64, f64)>, p| {
            Some(match acc {
                Some((lo, hi)) => (lo.min(p.z), hi.max(p.z)),
                None => (p.z, p.z),
            })
        })?;

        let planar: Vec<Point2<f64>> = points.iter().map(|p| Point2::new(p.x, p.y)).collect();
        let hull = convex_hull(&planar);

        let mut best = Footprint::aligned(&hull, 0.0);
        for (i, a) in hull.iter().enumerate() {
            let edge = hull[(i + 1) % hull.len()] - *a;
            if edge.norm_squared() == 0.0 {
                continue;
            }
            let candidate = Footprint::aligned(&hull, edge.y.atan2(edge.x));
            if candidate.area() < best.area() {
                best = candidate;
            }
        }

        let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), best.angle);
        let local_center = Vector3::new(
            (best.min.x + best.max.x) / 2.0,
            (best.min.y + best.max.y) / 2.0,
            0.0,
        );
        let planar_center = rotation * local_center;

        Some(Self {
            center: Point3::new(planar_center.x, planar_center.y, (min_z + max_z) / 2.0),
            extent: Vector3::new(best.max.x - best.min.x, best.max.y - best.min.y, max_z - min_z),
            yaw: best.angle,
        })
    }

    /// The 8 corners, ordered like [`box_corners`].
    pub fn corners(&self) -> [Point3<f64>; 8] {
        box_corners(&BoxParams {
            height: self.extent.z,
            width: self.extent.x,
            length: self.extent.y,
            x: self.center.x,
            y: self.center.y,
            z: self.center.z,
            yaw: self.yaw,
        })
    }

    pub fn volume(&self) -> f64 {
        self.extent.x * self.extent.y * self.extent.z
    }
}

/// Axis-aligned bounds of a hull expressed in a frame rotated by `angle`.
struct Footprint {
    angle: f64,
    min: Vector2<f64>,
    max: Vector2<f64>,
}

impl Footprint {
    fn aligned(hull: &[Point2<f64>], angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        let mut min = Vector2::repeat(f64::INFINITY);
        let mut max = Vector2::repeat(f64::NEG_INFINITY);

        for p in hull {
            // Rotate by -angle into the candidate frame
            let local = Vector2::new(cos * p.x + sin * p.y, -sin * p.x + cos * p.y);
            min = min.inf(&local);
            max = max.sup(&local);
        }

        Self { angle, min, max }
    }

    fn area(&self) -> f64 {
        let size = self.max - self.min;
        size.x * size.y
    }
}

/// Convex hull in counter-clockwise order (Andrew's monotone chain).
///
/// Collinear and duplicate points are dropped. Fewer than three input
/// points are returned as-is after deduplication.
fn convex_hull(points: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();

    if sorted.len() < 3 {
        return sorted;
    }

    let cross = |o: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>| {
        (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
    };

    let mut lower: Vec<Point2<f64>> = Vec::new();
    for p in &sorted {
        while lower.len() >= 2 && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }

    let mut upper: Vec<Point2<f64>> = Vec::new();
    for p in sorted.iter().rev() {
        while upper.len() >= 2 && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sorted(mut corners: Vec<Point3<f64>>) -> Vec<Point3<f64>> {
        corners.sort_by(|a, b| {
            a.x.total_cmp(&b.x)
                .then(a.y.total_cmp(&b.y))
                .then(a.z.total_cmp(&b.z))
        });
        corners
    }

    #[test]
    fn test_fit_recovers_rotated_box() {
        let params = BoxParams {
            height: 2.0,
            width: 3.0,
            length: 8.0,
            x: 20.0,
            y: -5.0,
            z: 1.0,
            yaw: 0.6,
        };
        let corners = box_corners(&params);
        let fitted = OrientedBox::from_points(&corners).unwrap();

        assert_relative_eq!(fitted.volume(), 48.0, epsilon = 1e-9);
        assert_relative_eq!(fitted.center.x, 20.0, epsilon = 1e-9);
        assert_relative_eq!(fitted.center.y, -5.0, epsilon = 1e-9);
        assert_relative_eq!(fitted.center.z, 1.0, epsilon = 1e-9);

        let expected = sorted(corners.to_vec());
        let actual = sorted(fitted.corners().to_vec());
        for (e, a) in expected.iter().zip(&actual) {
            assert_relative_eq!(e.x, a.x, epsilon = 1e-5);
            assert_relative_eq!(e.y, a.y, epsilon = 1e-5);
            assert_relative_eq!(e.z, a.z, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_fit_axis_aligned_points() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(4.0, 2.0, 1.0),
            Point3::new(0.0, 2.0, 1.0),
            Point3::new(2.0, 1.0, 0.5),
        ];
        let fitted = OrientedBox::from_points(&points).unwrap();

        assert_relative_eq!(fitted.volume(), 8.0, epsilon = 1e-9);
        assert_relative_eq!(fitted.center.x, 2.0, epsilon = 1e-9);
        assert_relative_eq!(fitted.center.y, 1.0, epsilon = 1e-9);
        assert_relative_eq!(fitted.center.z, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(OrientedBox::from_points(&[]).is_none());

        let single = OrientedBox::from_points(&[Point3::new(1.0, 2.0, 3.0)]).unwrap();
        assert_relative_eq!(single.center.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(single.center.y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(single.center.z, 3.0, epsilon = 1e-12);
        assert_eq!(single.volume(), 0.0);
    }

    #[test]
    fn test_convex_hull_drops_interior_points() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
            Point2::new(0.0, 0.0),
        ];
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Point2::new(1.0, 1.0)));
    }
}
