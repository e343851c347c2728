use crate::geo::array::PlanarPoint;

const EQUATORIAL_RADIUS_M: f64 = 6_378_137.0;
const FLATTENING: f64 = 1.0 / 298.257_223_563;
const ECC_SQ: f64 = 2.0 * FLATTENING - FLATTENING * FLATTENING;
const SCALE_FACTOR: f64 = 0.9996;
const FALSE_EASTING_M: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH_M: f64 = 10_000_000.0;

/// UTM zone covering the given longitude.
pub fn zone_for(lon_deg: f64) -> u8 {
    (((lon_deg + 180.0) / 6.0).floor() as u8) + 1
}

/// WGS84 geodetic coordinates to UTM easting/northing in meters. The zone
/// is derived from the longitude, so nearby survey points project into a
/// consistent plane.
pub fn to_utm(lat_deg: f64, lon_deg: f64) -> PlanarPoint {
    let zone = zone_for(lon_deg);
    let lat = lat_deg.to_radians();
    let central_meridian = ((zone as f64 - 1.0) * 6.0 - 180.0 + 3.0).to_radians();
    let delta = lon_deg.to_radians() - central_meridian;

    let n = EQUATORIAL_RADIUS_M / (1.0 - ECC_SQ * lat.sin().powi(2)).sqrt();
    let t = lat.tan();
    let c = ECC_SQ * lat.cos().powi(2) / (1.0 - ECC_SQ);
    let a = lat.cos() * delta;

    let m = EQUATORIAL_RADIUS_M
        * ((1.0 - ECC_SQ / 4.0 - 3.0 * ECC_SQ.powi(2) / 64.0) * lat
            - (3.0 * ECC_SQ / 8.0 + 3.0 * ECC_SQ.powi(2) / 32.0) * (2.0 * lat).sin()
            + (15.0 * ECC_SQ.powi(2) / 256.0) * (4.0 * lat).sin());

    let easting =
        FALSE_EASTING_M + SCALE_FACTOR * n * (a + (1.0 - t * t + c) * a.powi(3) / 6.0);
    let false_northing = if lat_deg < 0.0 {
        FALSE_NORTHING_SOUTH_M
    } else {
        0.0
    };
    let northing = false_northing
        + SCALE_FACTOR
            * (m + n
                * t
                * (a.powi(2) / 2.0
                    + (5.0 - t * t + 9.0 * c + 4.0 * c.powi(2)) * a.powi(4) / 24.0));

    PlanarPoint::new(easting, northing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_follows_longitude() {
        assert_eq!(zone_for(-122.4194), 10);
        assert_eq!(zone_for(0.0), 31);
        assert_eq!(zone_for(139.6917), 54);
    }

    #[test]
    fn central_meridian_on_the_equator_maps_to_the_false_origin() {
        // Longitude 3.0 is the central meridian of zone 31.
        let point = to_utm(0.0, 3.0);
        assert!((point.x - 500_000.0).abs() < 1e-6);
        assert!(point.y.abs() < 1e-6);
    }

    #[test]
    fn northern_midlatitude_point_stays_in_plausible_bounds() {
        let point = to_utm(48.1173, 11.5167);
        assert!(point.x > 100_000.0 && point.x < 900_000.0);
        assert!(point.y > 0.0 && point.y < 10_000_000.0);
    }

    #[test]
    fn southern_hemisphere_uses_the_southern_false_northing() {
        let point = to_utm(-33.9249, 18.4241);
        assert!(point.y > 5_000_000.0 && point.y < 10_000_000.0);
    }

    #[test]
    fn small_latitude_steps_project_to_metric_distances() {
        let base = to_utm(48.0, 11.5167);
        let north = to_utm(48.001, 11.5167);
        let meters = north.y - base.y;
        // One millidegree of latitude is roughly 111 m of northing.
        assert!((meters - 111.2).abs() < 2.0, "northing step {}", meters);
    }
}
