//! Unit tests for ft-core primitives.

#[cfg(test)]
mod ids {
    use crate::StopIdx;

    #[test]
    fn position_roundtrip() {
        let id = StopIdx::at(42);
        assert_eq!(id, StopIdx(42));
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn ordering() {
        assert!(StopIdx(0) < StopIdx(1));
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(StopIdx::default(), StopIdx::INVALID);
        assert!(!StopIdx::default().is_valid());
        assert!(StopIdx::at(0).is_valid());
        assert_eq!(StopIdx::MAX_STOPS, StopIdx::INVALID.index());
    }

    #[test]
    fn display() {
        assert_eq!(StopIdx(7).to_string(), "stop #7");
        assert_eq!(StopIdx::INVALID.to_string(), "stop #<invalid>");
    }
}

#[cfg(test)]
mod geo {
    use std::f64::consts::{FRAC_PI_2, PI};

    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::{CoreError, GeoPoint, Haversine, SphericalPoint, haversine_m};

    fn deg(lat: f64, lon: f64) -> SphericalPoint {
        SphericalPoint::try_from_degrees(lat, lon).unwrap()
    }

    fn random_point(rng: &mut SmallRng) -> SphericalPoint {
        let lat = rng.gen_range(-90.0..=90.0);
        let lon = rng.gen_range(-179.999_999..=180.0);
        deg(lat, lon)
    }

    #[test]
    fn zero_distance() {
        let p = deg(50.408_76, 4.172_45);
        assert!(haversine_m(p, p) <= 1e-9);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111.195 km on the mean sphere.
        let d = haversine_m(deg(30.0, -88.0), deg(31.0, -88.0));
        assert!((d - 111_195.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn equator_thousand_metres() {
        // 0.009° of longitude at the equator ≈ 1000 m.
        let d = haversine_m(deg(0.0, 0.0), deg(0.0, 0.009));
        assert!((d - 1_000.75).abs() < 1.0, "got {d}");
    }

    #[test]
    fn brussels_charleroi() {
        let d = haversine_m(deg(50.408_76, 4.172_45), deg(50.863_666, 4.329_612));
        assert!((d - 51_700.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn antipodal_is_half_circumference() {
        let d = haversine_m(deg(0.0, 0.0), deg(0.0, 180.0));
        assert!((d - PI * crate::EARTH_RADIUS_M).abs() < 1e-3, "got {d}");
    }

    #[test]
    fn custom_radius_scales_linearly() {
        let (a, b) = (deg(10.0, 10.0), deg(11.0, 12.0));
        let unit = Haversine::new(1.0).distance(a, b);
        let earth = Haversine::EARTH.distance(a, b);
        assert!((earth - unit * crate::EARTH_RADIUS_M).abs() < 1e-6);
    }

    #[test]
    fn symmetry_random() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let (a, b) = (random_point(&mut rng), random_point(&mut rng));
            assert_eq!(haversine_m(a, b), haversine_m(b, a));
        }
    }

    #[test]
    fn identity_random() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..1_000 {
            let a = random_point(&mut rng);
            assert!(haversine_m(a, a) <= 1e-9);
        }
    }

    #[test]
    fn triangle_inequality_random() {
        let mut rng = SmallRng::seed_from_u64(13);
        for _ in 0..2_000 {
            let (a, b, c) = (
                random_point(&mut rng),
                random_point(&mut rng),
                random_point(&mut rng),
            );
            let lhs = haversine_m(a, c);
            let rhs = haversine_m(a, b) + haversine_m(b, c);
            assert!(lhs <= rhs + 1e-3, "{lhs} > {rhs}");
        }
    }

    #[test]
    fn rejects_out_of_range_degrees() {
        for (lat, lon) in [(90.1, 0.0), (-90.1, 0.0), (0.0, -180.0), (0.0, 180.5)] {
            let err = SphericalPoint::try_from_degrees(lat, lon).unwrap_err();
            assert!(matches!(err, CoreError::InvalidCoordinate { .. }), "({lat}, {lon})");
        }
    }

    #[test]
    fn rejects_non_finite() {
        assert!(SphericalPoint::try_from_degrees(f64::NAN, 0.0).is_err());
        assert!(SphericalPoint::try_from_degrees(0.0, f64::INFINITY).is_err());
        assert!(SphericalPoint::try_new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn boundaries_accepted() {
        let north = deg(90.0, 180.0);
        assert_eq!(north.lat(), FRAC_PI_2);
        assert_eq!(north.lon(), PI);
        assert!(SphericalPoint::try_from_degrees(-90.0, -179.5).is_ok());
        assert!(SphericalPoint::try_new(-FRAC_PI_2, PI).is_ok());
        assert!(SphericalPoint::try_new(0.0, -PI).is_err());
    }

    #[test]
    fn unit_vector_roundtrip() {
        let p = deg(48.8566, 2.3522);
        let q = SphericalPoint::from_unit_vector(p.to_unit_vector()).unwrap();
        assert!(haversine_m(p, q) < 1e-6);
    }

    #[test]
    fn unit_vector_degenerate() {
        assert!(SphericalPoint::from_unit_vector([0.0, 0.0, 0.0]).is_none());
        // −x axis is longitude ±π; must come back as +π.
        let p = SphericalPoint::from_unit_vector([-1.0, -0.0, 0.0]).unwrap();
        assert_eq!(p.lon(), PI);
    }

    #[test]
    fn geopoint_distance_matches_spherical() {
        let (a, b) = (GeoPoint::new(30.0, -88.0), GeoPoint::new(31.0, -88.0));
        assert_eq!(a.distance_m(b).unwrap(), haversine_m(deg(30.0, -88.0), deg(31.0, -88.0)));
    }

    #[test]
    fn geopoint_distance_rejects_invalid() {
        let a = GeoPoint::new(30.0, -88.0);
        assert!(matches!(
            GeoPoint::new(100.0, 0.0).distance_m(a),
            Err(CoreError::InvalidCoordinate { .. })
        ));
        assert!(a.distance_m(GeoPoint::new(0.0, f64::NAN)).is_err());
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, FootpathConfig, IndexConfig};

    #[test]
    fn defaults() {
        let cfg = IndexConfig::default();
        assert_eq!(cfg.leaf_size, 40);
        assert_eq!(cfg.sphere_radius_m, 6_371_000.0);
        assert!(cfg.validate().is_ok());
        assert!(FootpathConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_leaf_size_rejected() {
        let cfg = IndexConfig { leaf_size: 0, ..IndexConfig::default() };
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn bad_sphere_radius_rejected() {
        let cfg = IndexConfig { sphere_radius_m: -1.0, ..IndexConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = IndexConfig { sphere_radius_m: f64::NAN, ..IndexConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn bad_walk_speed_rejected() {
        let cfg = FootpathConfig { walk_speed_mps: 0.0, ..FootpathConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn walk_secs_truncates() {
        let cfg = FootpathConfig { max_walk_m: 500.0, walk_speed_mps: 1.4 };
        // 100 / 1.4 = 71.43 → 71
        assert_eq!(cfg.walk_secs(100.0), 71);
        assert_eq!(FootpathConfig::default().walk_secs(499.9), 499);
    }
}
