//! Even-odd ray casting against a ring.
//!
//! Works directly in (lat, lon): `x` is latitude and `y` is longitude. An
//! edge counts as crossed when it straddles the point's `y` under the
//! half-open rule `[low, high)` and its intercept at that `y` lies below
//! the point's `x`. The half-open rule keeps a shared vertex from being
//! counted by both of its edges, so points exactly on the boundary have no
//! guaranteed answer.

use crate::models::GeoPoint;

use super::RingBoundary;

/// Whether `point` lies inside `ring`
pub fn contains(point: GeoPoint, ring: &RingBoundary) -> bool {
    ring.envelope_covers(point) && ray_cast(point, ring)
}

fn ray_cast(point: GeoPoint, ring: &RingBoundary) -> bool {
    let (x, y) = (point.lat, point.lon);
    let mut inside = false;

    for (current, previous) in ring.edges() {
        if crosses(x, y, current, previous) {
            inside = !inside;
        }
    }

    inside
}

#[inline]
fn crosses(x: f64, y: f64, current: GeoPoint, previous: GeoPoint) -> bool {
    let (xp, yp) = (current.lat, current.lon);
    let (xp_prev, yp_prev) = (previous.lat, previous.lon);

    // Horizontal in this frame; the straddle test below can never hold
    if yp == yp_prev {
        return false;
    }

    let straddles = (yp <= y && y < yp_prev) || (yp_prev <= y && y < yp);
    straddles && x > (xp_prev - xp) * (y - yp) / (yp_prev - yp) + xp
}
