//! Tests for geodesy properties, wire types and configuration loading.

use std::io::Write;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{load_config, ConfigError, GuidanceConfig};
use crate::constants::*;
use crate::geodesy::{bearing, destination, distance};
use crate::types::{GeoPoint, InterceptorSnapshot, TargetState, TrackFix};

fn random_point(rng: &mut ChaCha8Rng) -> GeoPoint {
    GeoPoint::new(rng.gen_range(-80.0..80.0), rng.gen_range(-180.0..180.0), 0.0)
}

// ---- Geodesy ----

#[test]
fn test_distance_to_self_is_zero() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..500 {
        let p = random_point(&mut rng);
        assert_eq!(distance(&p, &p), 0.0, "distance({p:?}, itself) should be 0");
    }
}

#[test]
fn test_distance_is_symmetric() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..500 {
        let a = random_point(&mut rng);
        let b = random_point(&mut rng);
        let ab = distance(&a, &b);
        let ba = distance(&b, &a);
        assert!((ab - ba).abs() < 1e-6, "asymmetric: {ab} vs {ba}");
    }
}

#[test]
fn test_destination_roundtrip_distance() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..500 {
        let a = random_point(&mut rng);
        let d = rng.gen_range(0.0..2_000_000.0);
        let theta = rng.gen_range(0.0..360.0);
        let b = destination(&a, d, theta);
        let back = distance(&a, &b);
        assert!(
            (back - d).abs() < 1e-3,
            "round trip from {a:?} d={d:.3} θ={theta:.3}: got {back:.6}"
        );
    }
}

#[test]
fn test_destination_follows_bearing() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..200 {
        let a = random_point(&mut rng);
        let theta = rng.gen_range(0.0..360.0);
        let b = destination(&a, 10_000.0, theta);
        let got = bearing(&a, &b);
        let diff = crate::geodesy::wrap_degrees(got - theta).abs();
        assert!(diff < 1e-6, "bearing {got:.9} should match {theta:.9}");
    }
}

#[test]
fn test_bearing_range() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..500 {
        let a = random_point(&mut rng);
        let b = random_point(&mut rng);
        let brg = bearing(&a, &b);
        assert!((0.0..360.0).contains(&brg), "bearing out of range: {brg}");
    }
}

// ---- Wire types ----

#[test]
fn test_snapshot_field_names() {
    let snap = InterceptorSnapshot {
        lat: 37.5,
        lon: 126.5,
        alt: 1000.0,
        heading: 45.0,
        speed: 800.0,
        distance_to_target: 12_345.0,
        active: true,
    };
    let value = serde_json::to_value(snap).unwrap();
    let obj = value.as_object().unwrap();
    for key in ["lat", "lon", "alt", "heading", "speed", "distance_to_target", "active"] {
        assert!(obj.contains_key(key), "missing field {key}");
    }
    assert_eq!(obj.len(), 7);

    let back: InterceptorSnapshot = serde_json::from_value(value).unwrap();
    assert_eq!(back, snap);
}

#[test]
fn test_track_fix_altitude_units() {
    let feet: TrackFix = serde_json::from_str(
        r#"{"t": 0.0, "latitude": 37.0, "longitude": 127.0, "altitude_feet": 10000.0}"#,
    )
    .unwrap();
    assert!((feet.altitude_m() - 3048.0).abs() < 1e-9);

    let both: TrackFix = serde_json::from_str(
        r#"{"t": 1.0, "latitude": 37.0, "longitude": 127.0,
            "altitude_meters": 3000.0, "altitude_feet": 10000.0}"#,
    )
    .unwrap();
    assert_eq!(both.altitude_m(), 3000.0);

    let none: TrackFix =
        serde_json::from_str(r#"{"t": 2.0, "latitude": 37.0, "longitude": 127.0}"#).unwrap();
    assert_eq!(none.target(), TargetState::new(37.0, 127.0, 0.0));
}

#[test]
fn test_target_position_conversion() {
    let target = TargetState::new(35.0, 129.0, 9000.0);
    let p = target.position();
    assert_eq!(p, GeoPoint::new(35.0, 129.0, 9000.0));
    assert_eq!(TargetState::from(p), target);
}

// ---- Configuration ----

#[test]
fn test_default_config_matches_reference_values() {
    let c = GuidanceConfig::default();
    assert_eq!(c.origin, GeoPoint::new(37.4602, 126.4407, 0.0));
    assert_eq!(c.speed_mps, 800.0);
    assert_eq!(c.navigation_constant, 4.0);
    assert_eq!(c.max_turn_rate_deg_s, 30.0);
    assert_eq!(c.altitude_gain, 2.0);
    assert_eq!(c.sub_step_secs, 0.01);
    assert_eq!(c.stale_gap_secs, 1.0);
    assert_eq!(c.hit_threshold_m, 5.0);
    assert_eq!(c.max_substeps, MAX_SUBSTEPS);
    assert!(c.validate().is_ok());
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let c = GuidanceConfig::from_toml_str(
        r#"
        speed_mps = 1000.0
        navigation_constant = 3.0

        [origin]
        lat = 35.1795
        lon = 128.9382
        alt = 5.0
        "#,
    )
    .unwrap();
    assert_eq!(c.speed_mps, 1000.0);
    assert_eq!(c.navigation_constant, 3.0);
    assert_eq!(c.origin, GeoPoint::new(35.1795, 128.9382, 5.0));
    assert_eq!(c.max_turn_rate_deg_s, PN_MAX_TURN_RATE_DEG);
    assert_eq!(c.hit_threshold_m, HIT_THRESHOLD_M);
}

#[test]
fn test_config_toml_roundtrip() {
    let c = GuidanceConfig::default();
    let text = toml::to_string(&c).unwrap();
    let back = GuidanceConfig::from_toml_str(&text).unwrap();
    assert_eq!(back, c);
}

#[test]
fn test_invalid_config_rejected() {
    let err = GuidanceConfig::from_toml_str("sub_step_secs = 0.0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "got {err:?}");

    let err = GuidanceConfig::from_toml_str("speed_mps = -5.0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "got {err:?}");

    let err = GuidanceConfig::from_toml_str("max_substeps = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "got {err:?}");

    let err = GuidanceConfig::from_toml_str("speed_mps = \"fast\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
}

#[test]
fn test_load_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_turn_rate_deg_s = 45.0").unwrap();
    let c = load_config(file.path()).unwrap();
    assert_eq!(c.max_turn_rate_deg_s, 45.0);

    let missing = load_config(file.path().with_extension("missing"));
    assert!(matches!(missing, Err(ConfigError::Io(_))));
}
