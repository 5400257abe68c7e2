//! Drive a guidance session from a recorded target track on a simulated clock.

use std::fs;
use std::path::Path;

use anyhow::{bail, ensure, Context};
use serde::Serialize;

use intercept_app::InterceptSession;
use intercept_core::{GuidanceConfig, InterceptorSnapshot, TrackFix};
use intercept_sim::{GuidanceEngine, ManualClock, UpdateKind};

/// Outcome of one replay run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub polls: u64,
    pub elapsed_secs: f64,
    pub min_distance_m: f64,
    pub final_distance_m: f64,
    pub hit: bool,
}

/// Load a JSON array of track fixes, ordered by time.
pub fn load_track(path: &Path) -> anyhow::Result<Vec<TrackFix>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading track {}", path.display()))?;
    let mut track: Vec<TrackFix> =
        serde_json::from_str(&text).with_context(|| format!("parsing track {}", path.display()))?;
    track.sort_by(|a, b| a.t.total_cmp(&b.t));
    Ok(track)
}

/// Latest fix at or before `t`, falling back to the first fix.
fn fix_at(track: &[TrackFix], t: f64) -> &TrackFix {
    let idx = track.partition_point(|f| f.t <= t);
    &track[idx.saturating_sub(1)]
}

/// Launch at the first fix and poll the session every `poll_secs` until the
/// track ends or the interceptor reaches the target. `emit` sees every snapshot.
pub fn replay<F>(
    track: &[TrackFix],
    config: GuidanceConfig,
    poll_secs: f64,
    mut emit: F,
) -> anyhow::Result<ReplaySummary>
where
    F: FnMut(&InterceptorSnapshot) -> anyhow::Result<()>,
{
    ensure!(
        poll_secs.is_finite() && poll_secs > 0.0,
        "poll interval must be positive and finite, got {poll_secs}"
    );
    // Longer polls land on the stale-gap branch every time and never integrate.
    ensure!(
        poll_secs <= config.stale_gap_secs,
        "poll interval {poll_secs} s exceeds the stale gap of {} s",
        config.stale_gap_secs
    );
    let (Some(first), Some(last)) = (track.first(), track.last()) else {
        bail!("track is empty");
    };

    let hit_threshold = config.hit_threshold_m;
    let clock = ManualClock::new();
    let session = InterceptSession::from_engine(GuidanceEngine::with_clock(config, clock.clone()));
    session.launch()?;

    let mut summary = ReplaySummary {
        polls: 0,
        elapsed_secs: 0.0,
        min_distance_m: f64::MAX,
        final_distance_m: f64::MAX,
        hit: false,
    };

    loop {
        let t = first.t + summary.elapsed_secs;
        let target = fix_at(track, t).target();
        let Some(snapshot) = session.update(&target)? else {
            bail!("session went inactive mid-replay");
        };
        emit(&snapshot)?;

        summary.polls += 1;
        summary.final_distance_m = snapshot.distance_to_target;
        summary.min_distance_m = summary.min_distance_m.min(snapshot.distance_to_target);

        let reached = matches!(
            session.status()?.last_update,
            UpdateKind::Integrated { hit: true, .. }
        );
        if reached || snapshot.distance_to_target < hit_threshold {
            summary.hit = true;
            break;
        }
        if t >= last.t {
            break;
        }

        clock.advance(poll_secs);
        summary.elapsed_secs += poll_secs;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use intercept_core::geodesy::destination;

    use super::*;

    fn fix(t: f64, lat: f64, lon: f64, alt_m: f64) -> TrackFix {
        TrackFix {
            t,
            latitude: lat,
            longitude: lon,
            altitude_meters: Some(alt_m),
            altitude_feet: None,
        }
    }

    #[test]
    fn test_fix_at_picks_latest_past_fix() {
        let track = vec![fix(0.0, 1.0, 0.0, 0.0), fix(5.0, 2.0, 0.0, 0.0), fix(9.0, 3.0, 0.0, 0.0)];
        assert_eq!(fix_at(&track, -1.0).latitude, 1.0);
        assert_eq!(fix_at(&track, 0.0).latitude, 1.0);
        assert_eq!(fix_at(&track, 4.9).latitude, 1.0);
        assert_eq!(fix_at(&track, 5.0).latitude, 2.0);
        assert_eq!(fix_at(&track, 100.0).latitude, 3.0);
    }

    #[test]
    fn test_empty_track_is_an_error() {
        let result = replay(&[], GuidanceConfig::default(), 0.1, |_| Ok(()));
        assert!(result.is_err());
    }

    #[test]
    fn test_unusable_poll_intervals_are_errors() {
        let origin = GuidanceConfig::default().origin;
        let p = destination(&origin, 20_000.0, 0.0);
        let track = vec![fix(0.0, p.lat, p.lon, 0.0), fix(60.0, p.lat, p.lon, 0.0)];

        for poll in [0.0, -0.1, f64::NAN, f64::INFINITY, 1e30] {
            let result = replay(&track, GuidanceConfig::default(), poll, |_| Ok(()));
            assert!(result.is_err(), "poll {poll} should be rejected");
        }
    }

    #[test]
    fn test_poll_beyond_stale_gap_is_an_error() {
        let origin = GuidanceConfig::default().origin;
        let p = destination(&origin, 20_000.0, 0.0);
        let track = vec![fix(0.0, p.lat, p.lon, 0.0), fix(60.0, p.lat, p.lon, 0.0)];

        let err = replay(&track, GuidanceConfig::default(), 2.0, |_| Ok(())).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains('2') && msg.contains("stale gap of 1 s"), "{msg}");

        // Exactly at the gap still integrates.
        let summary = replay(&track, GuidanceConfig::default(), 1.0, |_| Ok(())).unwrap();
        assert!(summary.min_distance_m < 19_000.0, "{summary:?}");
    }

    #[test]
    fn test_replay_reaches_stationary_target() {
        let origin = GuidanceConfig::default().origin;
        let p = destination(&origin, 8_000.0, 60.0);
        let track = vec![fix(0.0, p.lat, p.lon, 2_000.0), fix(60.0, p.lat, p.lon, 2_000.0)];

        let mut emitted = 0;
        let summary = replay(&track, GuidanceConfig::default(), 0.1, |snap| {
            assert!(snap.active);
            emitted += 1;
            Ok(())
        })
        .unwrap();

        assert!(summary.hit, "{summary:?}");
        assert_eq!(summary.polls, emitted);
        assert!(summary.elapsed_secs < 20.0, "{summary:?}");
    }

    #[test]
    fn test_replay_stops_at_track_end() {
        let origin = GuidanceConfig::default().origin;
        let p = destination(&origin, 500_000.0, 0.0);
        let track = vec![fix(10.0, p.lat, p.lon, 9_000.0), fix(12.0, p.lat, p.lon, 9_000.0)];

        let summary = replay(&track, GuidanceConfig::default(), 0.5, |_| Ok(())).unwrap();

        assert!(!summary.hit);
        assert_eq!(summary.polls, 5);
        assert!(summary.final_distance_m < 500_000.0);
    }

    #[test]
    fn test_load_track_sorts_by_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("track.json");
        fs::write(
            &path,
            r#"[
                {"t": 2.0, "latitude": 37.6, "longitude": 126.6, "altitude_feet": 30000.0},
                {"t": 0.0, "latitude": 37.5, "longitude": 126.5, "altitude_meters": 9000.0}
            ]"#,
        )
        .unwrap();

        let track = load_track(&path).unwrap();

        assert_eq!(track.len(), 2);
        assert_eq!(track[0].t, 0.0);
        assert!((track[1].altitude_m() - 9_144.0).abs() < 1e-9);
    }
}
