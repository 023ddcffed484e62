//! Ear-clipping triangulation for the concave arrow outlines.

use beebot_core::Point;

/// Splits a simple polygon into triangles.
///
/// Works for either winding order. Collinear vertices are dropped rather than
/// producing zero-area triangles. Self-intersecting input yields a partial
/// result instead of looping.
#[must_use]
pub fn triangulate(vertices: &[Point]) -> Vec<[Point; 3]> {
    if vertices.len() < 3 {
        return Vec::new();
    }
    let winding = doubled_area(vertices).signum();
    if winding == 0 {
        return Vec::new();
    }

    let mut remaining = vertices.to_vec();
    let mut triangles = Vec::with_capacity(vertices.len() - 2);

    while remaining.len() > 3 {
        let count = remaining.len();
        let corner = |index: usize| {
            (
                remaining[(index + count - 1) % count],
                remaining[index],
                remaining[(index + 1) % count],
            )
        };

        let ear = (0..count).find(|&index| {
            let (prev, current, next) = corner(index);
            let direction = turn(prev, current, next);
            direction == 0
                || (direction.signum() == winding
                    && !remaining.iter().any(|&other| {
                        other != prev
                            && other != current
                            && other != next
                            && in_triangle(other, prev, current, next)
                    }))
        });

        let Some(index) = ear else {
            break;
        };
        let (prev, current, next) = corner(index);
        if turn(prev, current, next) != 0 {
            triangles.push([prev, current, next]);
        }
        let _ = remaining.remove(index);
    }

    if let [a, b, c] = remaining[..] {
        if turn(a, b, c) != 0 {
            triangles.push([a, b, c]);
        }
    }

    triangles
}

/// Twice the signed area enclosed by the polygon.
pub(crate) fn doubled_area(vertices: &[Point]) -> i64 {
    vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(a, b)| i64::from(a.x) * i64::from(b.y) - i64::from(b.x) * i64::from(a.y))
        .sum()
}

fn turn(a: Point, b: Point, c: Point) -> i64 {
    let (abx, aby) = (i64::from(b.x - a.x), i64::from(b.y - a.y));
    let (bcx, bcy) = (i64::from(c.x - b.x), i64::from(c.y - b.y));
    abx * bcy - aby * bcx
}

fn in_triangle(point: Point, a: Point, b: Point, c: Point) -> bool {
    let d1 = turn(a, b, point).signum();
    let d2 = turn(b, c, point).signum();
    let d3 = turn(c, a, point).signum();
    let has_negative = d1 < 0 || d2 < 0 || d3 < 0;
    let has_positive = d1 > 0 || d2 > 0 || d3 > 0;
    !(has_negative && has_positive)
}
