use geo::{Distance, Haversine, Point};

/// great-circle distance between two points using the haversine formula
/// on the mean earth radius.
///
/// # Arguments
///
/// * `src_point` - origin as (x=longitude, y=latitude) in degrees
/// * `dst_point` - destination as (x=longitude, y=latitude) in degrees
///
/// # Returns
///
/// * the distance as a length, zero when both points are equal
pub fn compute_haversine(src_point: Point<f64>, dst_point: Point<f64>) -> uom::si::f64::Length {
    uom::si::f64::Length::new::<uom::si::length::meter>(Haversine.distance(src_point, dst_point))
}

/// great-circle distance in kilometers, see [`compute_haversine`].
pub fn haversine_km(src_point: Point<f64>, dst_point: Point<f64>) -> f64 {
    compute_haversine(src_point, dst_point).get::<uom::si::length::kilometer>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_degree_longitude_at_equator() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        let km = haversine_km(a, b);
        assert!((km - 111.19).abs() < 0.5, "got {km}");
    }

    #[test]
    fn test_distance_is_symmetric_and_zero_on_self() {
        let oakland = Point::new(-122.27, 37.82);
        let berkeley = Point::new(-122.2727, 37.8715);
        let there = haversine_km(oakland, berkeley);
        let back = haversine_km(berkeley, oakland);
        assert!((there - back).abs() < 1e-9);
        assert!(there > 5.0 && there < 6.0, "got {there}");
        assert_eq!(haversine_km(oakland, oakland), 0.0);
    }
}
