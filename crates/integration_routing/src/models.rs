//! Provider-neutral route models

use domain::value_objects::Coordinate;

/// Walking route from a foot-routing provider
#[derive(Debug, Clone, PartialEq)]
pub struct FootRoute {
    /// Route length in metres
    pub distance_m: f64,
    /// Walking time in seconds
    pub duration_s: f64,
    /// Path, latitude first
    pub geometry: Vec<Coordinate>,
}

/// Road route from a general routing provider
///
/// There is intentionally no duration: the provider's value is a driving
/// time and must not leak into walking estimates.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadRoute {
    /// Route length in metres
    pub distance_m: f64,
    /// Path, latitude first
    pub geometry: Vec<Coordinate>,
}

/// Flip GeoJSON `[lng, lat, ..]` positions into coordinates
pub(crate) fn flip_positions(positions: &[Vec<f64>]) -> Result<Vec<Coordinate>, String> {
    positions
        .iter()
        .map(|pos| match pos.as_slice() {
            [lng, lat, ..] => Coordinate::from_lng_lat(*lng, *lat).map_err(|e| e.to_string()),
            _ => Err(format!("position needs two values, got {}", pos.len())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_lng_lat() {
        let points = flip_positions(&[vec![-83.74, 42.28], vec![-83.75, 42.29, 250.0]]).unwrap();
        assert_eq!(points.len(), 2);
        assert!((points[0].lat() - 42.28).abs() < f64::EPSILON);
        assert!((points[1].lng() + 83.75).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_short_positions() {
        assert!(flip_positions(&[vec![1.0]]).is_err());
    }

    #[test]
    fn rejects_out_of_range() {
        // latitude 200 after flipping
        assert!(flip_positions(&[vec![10.0, 200.0]]).is_err());
    }
}
