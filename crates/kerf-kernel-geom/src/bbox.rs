//! Axis-aligned bounds of curves.

use kerf_kernel_math::{Bound3, Point3, Vec3};

use crate::curve::{Arc3, Curve3};

/// Tight axis-aligned bounds of `curve`.
///
/// For arcs, the axis extremes of the supporting circle are included only
/// when they fall within the arc's span.
pub fn curve_bounds(curve: &Curve3) -> Bound3 {
    match curve {
        Curve3::Line(line) => Bound3::new(line.start, line.end),
        Curve3::Arc(arc) => arc_bounds(arc),
    }
}

/// [`curve_bounds`] clamped into `limits` (typically the part's box).
pub fn curve_bounds_within(curve: &Curve3, limits: &Bound3) -> Bound3 {
    curve_bounds(curve).clamped_to(limits)
}

fn arc_bounds(arc: &Arc3) -> Bound3 {
    let mut b = Bound3::from_points([arc.start(), arc.end()]);
    let n = arc.axis().into_inner();
    let full = arc.is_circle();
    for axis in [Vec3::x(), Vec3::y(), Vec3::z()] {
        // Direction within the arc plane that maximizes this coordinate.
        let along = axis - n * axis.dot(&n);
        let Some(dir) = along.try_normalize(1e-12) else {
            continue;
        };
        for extreme in [arc.center() + dir * arc.radius(), arc.center() - dir * arc.radius()] {
            if full || within_span(arc, &extreme) {
                b.include_point(&extreme);
            }
        }
    }
    b
}

fn within_span(arc: &Arc3, p: &Point3) -> bool {
    arc.angle_from_start(p) <= arc.sweep()
}
