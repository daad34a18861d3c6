use crate::types::LonLat;

/// Largest step, in degrees on either axis, allowed between two drawn points.
pub const INTERPOLATION_THRESHOLD: f64 = 5.0;

/// Densifies a line so that consecutive points are at most
/// [`INTERPOLATION_THRESHOLD`] degrees apart in longitude and in latitude.
pub fn interpolate(coordinates: &[LonLat]) -> Vec<LonLat> {
    interpolate_with_threshold(coordinates, INTERPOLATION_THRESHOLD)
}

pub fn interpolate_with_threshold(coordinates: &[LonLat], threshold: f64) -> Vec<LonLat> {
    let mut output = Vec::with_capacity(coordinates.len());

    for (i, point) in coordinates.iter().enumerate() {
        if i == 0 {
            output.push(*point);
            continue;
        }

        let previous = &coordinates[i - 1];
        if previous.exceeds_gap(point, threshold) {
            // The run starts with `previous`, which is already in the output.
            let run = bisect(vec![*previous, *point], threshold);
            output.extend_from_slice(&run[1..]);
        } else {
            output.push(*point);
        }
    }

    output
}

// Inserts a midpoint into every oversized gap, then repeats until a pass adds nothing.
// Each pass halves every remaining gap, so this converges in log2(gap / threshold) passes.
fn bisect(points: Vec<LonLat>, threshold: f64) -> Vec<LonLat> {
    let mut next = Vec::with_capacity(points.len() * 2);

    for pair in points.windows(2) {
        next.push(pair[0]);
        if pair[0].exceeds_gap(&pair[1], threshold) {
            next.push(pair[0].midpoint(&pair[1]));
        }
    }
    if let Some(last) = points.last() {
        next.push(*last);
    }

    // Non-finite gaps never shrink; stop instead of recursing forever.
    if next.len() > points.len() && next.iter().all(|p| p.lon.is_finite() && p.lat.is_finite()) {
        bisect(next, threshold)
    } else {
        next
    }
}
