//! Unit tests for fm-motion.

use fm_core::{GeoPoint, Planar, Timestamp};

use crate::{EventLog, MotionBuilder, MotionEvent, Speed};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn t(secs: f64) -> Timestamp {
    Timestamp::from_secs(secs)
}

fn pt(lat: f64, lon: f64) -> GeoPoint {
    GeoPoint::new(lat, lon)
}

/// Flat-plane builder (1 unit per degree) that records every event.
fn planar(points: Vec<GeoPoint>, speed: f64) -> MotionBuilder<Planar, EventLog> {
    MotionBuilder::new(points, Speed::mps(speed))
        .metric(Planar)
        .observer(EventLog::default())
}

fn assert_near(a: GeoPoint, b: GeoPoint) {
    assert!(
        (a.lat - b.lat).abs() < 1e-9 && (a.lon - b.lon).abs() < 1e-9,
        "expected {b}, got {a}"
    );
}

fn segments(log: &EventLog) -> usize {
    log.count(|e| matches!(e, MotionEvent::Segment { .. }))
}

fn ends(log: &EventLog) -> usize {
    log.count(|e| matches!(e, MotionEvent::End { .. }))
}

// ── Path ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod path {
    use super::*;
    use crate::{MotionError, Path};

    #[test]
    fn rejects_fewer_than_two_points() {
        assert_eq!(Path::new(vec![], &Planar), Err(MotionError::InvalidPath { got: 0 }));
        assert_eq!(
            Path::new(vec![pt(0.0, 0.0)], &Planar),
            Err(MotionError::InvalidPath { got: 1 })
        );
    }

    #[test]
    fn rejects_non_finite_waypoint() {
        let result = Path::new(vec![pt(0.0, 0.0), pt(f64::NAN, 1.0)], &Planar);
        assert_eq!(result, Err(MotionError::NonFiniteWaypoint { index: 1 }));
    }

    #[test]
    fn lengths_and_offsets() {
        let path = Path::new(vec![pt(0.0, 0.0), pt(0.0, 3.0), pt(4.0, 3.0)], &Planar).unwrap();
        assert_eq!(path.segment_count(), 2);
        assert_eq!(path.segment_length(0), 3.0);
        assert_eq!(path.segment_length(1), 4.0);
        assert_eq!(path.segment_offset(1), 3.0);
        assert_eq!(path.total_length(), 7.0);
        assert_eq!(path.last(), pt(4.0, 3.0));
    }

    #[test]
    fn duplicate_points_are_tolerated() {
        let path = Path::new(vec![pt(0.0, 0.0), pt(0.0, 0.0), pt(0.0, 1.0)], &Planar).unwrap();
        assert_eq!(path.segment_length(0), 0.0);
        assert_eq!(path.total_length(), 1.0);
    }
}

// ── Speed ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod speed {
    use super::*;
    use crate::MotionError;

    #[test]
    fn unit_conversions() {
        assert!((Speed::kmh(36.0).as_mps() - 10.0).abs() < 1e-12);
        assert!((Speed::knots(1.0).as_mps() - 0.514_444).abs() < 1e-6);
    }

    #[test]
    fn validate_rejects_non_positive_and_nan() {
        assert!(Speed::mps(0.1).validate().is_ok());
        assert_eq!(Speed::mps(0.0).validate(), Err(MotionError::InvalidSpeed(0.0)));
        assert_eq!(Speed::mps(-3.0).validate(), Err(MotionError::InvalidSpeed(-3.0)));
        assert!(Speed::mps(f64::NAN).validate().is_err());
        assert!(Speed::mps(f64::INFINITY).validate().is_err());
    }
}

// ── MotionController ──────────────────────────────────────────────────────────

#[cfg(test)]
mod controller {
    use super::*;
    use crate::{MotionController, MotionError, MotionOptions, MotionState};
    use fm_core::{Haversine, Metric};

    #[test]
    fn flat_unit_path_scenario() {
        let mut ctl = planar(vec![pt(0.0, 0.0), pt(0.0, 1.0)], 1.0).build(t(0.0)).unwrap();
        assert!(ctl.is_ready());
        ctl.start(t(0.0));

        let frame = ctl.tick(t(0.5));
        assert_near(frame.position, pt(0.0, 0.5));
        assert_eq!(frame.state, MotionState::Moving);

        let frame = ctl.tick(t(1.0));
        assert_eq!(frame.position, pt(0.0, 1.0));
        assert!(ctl.is_ended());
        assert_eq!(ends(ctl.observer()), 1);
    }

    #[test]
    fn constant_speed_on_single_segment() {
        let start = pt(0.0, 0.0);
        let mut ctl = planar(vec![start, pt(0.0, 10.0)], 2.5).autoplay(true).build(t(0.0)).unwrap();
        let frame = ctl.tick(t(3.0));
        assert!((Planar.distance(start, frame.position) - 7.5).abs() < 1e-9);
    }

    #[test]
    fn segment_boundary_lands_on_waypoint() {
        let mut ctl = planar(vec![pt(0.0, 0.0), pt(0.0, 1.0), pt(0.0, 3.0)], 1.0)
            .autoplay(true)
            .build(t(0.0))
            .unwrap();

        let frame = ctl.tick(t(1.0));
        assert_eq!(frame.position, pt(0.0, 1.0));
        assert_eq!(frame.segment, 1);
        assert_eq!(segments(ctl.observer()), 1);
        assert!(ctl.is_moving());

        let frame = ctl.tick(t(2.0));
        assert_near(frame.position, pt(0.0, 2.0));
        assert_eq!(segments(ctl.observer()), 1);
        assert_eq!(
            ctl.observer().events.last(),
            Some(&MotionEvent::Segment { index: 1 })
        );
    }

    #[test]
    fn overshoot_resolves_to_final_waypoint_once() {
        let mut ctl = planar(vec![pt(0.0, 0.0), pt(0.0, 1.0), pt(0.0, 3.0)], 1.0)
            .autoplay(true)
            .build(t(0.0))
            .unwrap();

        let frame = ctl.tick(t(1_000.0));
        assert_eq!(frame.position, pt(0.0, 3.0));
        assert_eq!(frame.state, MotionState::Ended);
        assert_eq!(segments(ctl.observer()), 1);
        assert_eq!(ends(ctl.observer()), 1);

        ctl.tick(t(2_000.0));
        assert_eq!(ends(ctl.observer()), 1);
    }

    #[test]
    fn zero_length_segments_take_no_time() {
        let mut ctl = planar(
            vec![pt(0.0, 0.0), pt(0.0, 1.0), pt(0.0, 1.0), pt(0.0, 2.0)],
            1.0,
        )
        .autoplay(true)
        .build(t(0.0))
        .unwrap();

        let frame = ctl.tick(t(1.5));
        assert_near(frame.position, pt(0.0, 1.5));
        assert_eq!(frame.segment, 2);
        assert_eq!(segments(ctl.observer()), 2);
    }

    #[test]
    fn irregular_frame_pacing_matches_single_tick() {
        let points = vec![pt(0.0, 0.0), pt(0.0, 1.0), pt(1.0, 1.0), pt(1.0, 3.0)];
        let mut jittery = planar(points.clone(), 1.3).autoplay(true).build(t(0.0)).unwrap();
        let mut single = planar(points, 1.3).autoplay(true).build(t(0.0)).unwrap();

        for now in [0.013, 0.05, 0.051, 0.2, 0.9, 0.91, 1.4, 2.03, 2.5, 2.9] {
            jittery.tick(t(now));
        }
        let a = jittery.frame().position;
        let b = single.tick(t(2.9)).position;
        assert_eq!(jittery.segment_index(), 2);
        assert!((a.lat - b.lat).abs() < 1e-12 && (a.lon - b.lon).abs() < 1e-12);
        assert_eq!(segments(jittery.observer()), segments(single.observer()));
    }

    #[test]
    fn start_is_noop_while_moving() {
        let mut ctl = planar(vec![pt(0.0, 0.0), pt(0.0, 1.0)], 1.0).build(t(0.0)).unwrap();
        ctl.start(t(0.0));
        ctl.start(t(0.3));
        assert_eq!(ctl.observer().count(|e| matches!(e, MotionEvent::Start { .. })), 1);
        assert_near(ctl.tick(t(0.5)).position, pt(0.0, 0.5));
    }

    #[test]
    fn pause_is_noop_unless_moving() {
        let mut ctl = planar(vec![pt(0.0, 0.0), pt(0.0, 1.0)], 1.0).build(t(0.0)).unwrap();
        ctl.pause(t(1.0));
        assert!(ctl.is_ready());
        assert!(ctl.observer().events.is_empty());
    }

    #[test]
    fn pause_and_resume_skip_no_distance() {
        let mut ctl = planar(vec![pt(0.0, 0.0), pt(0.0, 10.0)], 1.0).build(t(0.0)).unwrap();
        ctl.start(t(0.0));
        ctl.pause(t(2.0));
        assert!(ctl.is_paused());
        assert_near(ctl.position(), pt(0.0, 2.0));

        // Frames keep arriving while paused; nothing moves.
        assert_near(ctl.tick(t(5.0)).position, pt(0.0, 2.0));

        ctl.start(t(7.0));
        assert_near(ctl.tick(t(8.0)).position, pt(0.0, 3.0));
        assert_eq!(
            ctl.observer().events,
            vec![
                MotionEvent::Start { at: t(0.0) },
                MotionEvent::Pause { at: t(2.0) },
                MotionEvent::Start { at: t(7.0) },
            ]
        );
    }

    #[test]
    fn speed_change_keeps_displayed_position() {
        let mut ctl = planar(vec![pt(0.0, 0.0), pt(0.0, 8.0)], 1.0).autoplay(true).build(t(0.0)).unwrap();
        assert_near(ctl.tick(t(2.0)).position, pt(0.0, 2.0));

        ctl.set_speed(Speed::mps(4.0), t(2.0)).unwrap();
        assert_near(ctl.position(), pt(0.0, 2.0));
        assert_near(ctl.tick(t(2.0)).position, pt(0.0, 2.0));
        assert_near(ctl.tick(t(3.0)).position, pt(0.0, 6.0));
    }

    #[test]
    fn speed_change_while_paused() {
        let mut ctl = planar(vec![pt(0.0, 0.0), pt(0.0, 10.0)], 1.0).autoplay(true).build(t(0.0)).unwrap();
        ctl.pause(t(2.0));
        ctl.set_speed(Speed::mps(2.0), t(5.0)).unwrap();
        assert_near(ctl.tick(t(5.5)).position, pt(0.0, 2.0));

        ctl.start(t(6.0));
        assert_near(ctl.tick(t(7.0)).position, pt(0.0, 4.0));
    }

    #[test]
    fn set_speed_rejects_invalid_and_keeps_old() {
        let mut ctl = planar(vec![pt(0.0, 0.0), pt(0.0, 1.0)], 1.0).build(t(0.0)).unwrap();
        assert_eq!(
            ctl.set_speed(Speed::mps(0.0), t(0.0)),
            Err(MotionError::InvalidSpeed(0.0))
        );
        assert_eq!(ctl.speed(), Speed::mps(1.0));
    }

    #[test]
    fn construction_rejects_bad_inputs() {
        let short = planar(vec![pt(0.0, 0.0)], 1.0).build(t(0.0));
        assert!(matches!(short, Err(MotionError::InvalidPath { got: 1 })));

        let slow = planar(vec![pt(0.0, 0.0), pt(0.0, 1.0)], -1.0).build(t(0.0));
        assert!(matches!(slow, Err(MotionError::InvalidSpeed(_))));
    }

    #[test]
    fn autoplay_starts_on_construction() {
        let ctl = planar(vec![pt(0.0, 0.0), pt(0.0, 1.0)], 1.0).autoplay(true).build(t(0.0)).unwrap();
        assert!(ctl.is_moving());
        assert_eq!(ctl.observer().events, vec![MotionEvent::Start { at: t(0.0) }]);
    }

    #[test]
    fn looping_restarts_instead_of_ending() {
        let mut ctl = planar(vec![pt(0.0, 0.0), pt(0.0, 1.0)], 1.0).looping(true).build(t(0.0)).unwrap();
        ctl.start(t(0.0));

        let frame = ctl.tick(t(1.5));
        assert_eq!(frame.state, MotionState::Moving);
        assert_eq!(frame.position, pt(0.0, 0.0));
        assert_eq!(
            ctl.observer_mut().drain(),
            vec![
                MotionEvent::Start { at: t(0.0) },
                MotionEvent::End { at: t(1.5) },
                MotionEvent::Reset { at: t(1.5) },
                MotionEvent::Start { at: t(1.5) },
            ]
        );

        assert_near(ctl.tick(t(2.0)).position, pt(0.0, 0.5));
        assert!(!ctl.is_ended());
        assert!(ctl.observer().events.is_empty());
    }

    #[test]
    fn start_after_end_replays_without_loop() {
        let mut ctl = planar(vec![pt(0.0, 0.0), pt(0.0, 1.0)], 1.0).autoplay(true).build(t(0.0)).unwrap();
        ctl.tick(t(5.0));
        assert!(ctl.is_ended());

        ctl.start(t(6.0));
        assert!(ctl.is_moving());
        assert_eq!(ctl.position(), pt(0.0, 0.0));
        assert_near(ctl.tick(t(6.5)).position, pt(0.0, 0.5));
    }

    #[test]
    fn reset_returns_to_ready_at_first_point() {
        let mut ctl = planar(vec![pt(0.0, 0.0), pt(0.0, 1.0), pt(0.0, 2.0)], 1.0).build(t(0.0)).unwrap();
        ctl.start(t(0.0));
        ctl.tick(t(1.5));
        ctl.reset(t(1.6));

        assert!(ctl.is_ready());
        assert_eq!(ctl.segment_index(), 0);
        assert_eq!(ctl.position(), pt(0.0, 0.0));
        assert_eq!(
            ctl.observer().events.last(),
            Some(&MotionEvent::Reset { at: t(1.6) })
        );
        // Ready controllers do not advance.
        assert_eq!(ctl.tick(t(9.0)).position, pt(0.0, 0.0));
    }

    #[test]
    fn reset_with_autoplay_restarts() {
        let mut ctl = planar(vec![pt(0.0, 0.0), pt(0.0, 4.0)], 1.0).autoplay(true).build(t(0.0)).unwrap();
        ctl.tick(t(3.0));
        ctl.reset(t(3.0));
        assert!(ctl.is_moving());
        assert_near(ctl.tick(t(4.0)).position, pt(0.0, 1.0));
    }

    #[test]
    fn heading_follows_segments_when_tracked() {
        let points = vec![pt(0.0, 0.0), pt(1.0, 0.0), pt(1.0, 1.0)];
        let mut ctl = planar(points.clone(), 1.0).track_heading(true).autoplay(true).build(t(0.0)).unwrap();
        assert!((ctl.heading().unwrap() - 0.0).abs() < 1e-9);

        let frame = ctl.tick(t(1.5));
        assert!((frame.heading.unwrap() - 90.0).abs() < 1e-9);

        let mut untracked = planar(points, 1.0).autoplay(true).build(t(0.0)).unwrap();
        assert_eq!(untracked.tick(t(1.5)).heading, None);
    }

    #[test]
    fn progress_is_fraction_of_total_length() {
        let mut ctl = planar(vec![pt(0.0, 0.0), pt(0.0, 1.0), pt(0.0, 4.0)], 1.0).build(t(0.0)).unwrap();
        assert_eq!(ctl.progress(t(0.0)), 0.0);
        ctl.start(t(0.0));
        ctl.tick(t(2.0));
        assert!((ctl.progress(t(2.0)) - 0.5).abs() < 1e-12);
        ctl.tick(t(10.0));
        assert_eq!(ctl.progress(t(10.0)), 1.0);
    }

    #[test]
    fn channel_observer_forwards_events() {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut ctl = MotionBuilder::new(vec![pt(0.0, 0.0), pt(0.0, 1.0)], Speed::mps(1.0))
            .metric(Planar)
            .observer(tx)
            .build(t(0.0))
            .unwrap();
        ctl.start(t(0.0));
        ctl.tick(t(2.0));

        let events: Vec<MotionEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![MotionEvent::Start { at: t(0.0) }, MotionEvent::End { at: t(2.0) }]
        );
    }

    #[test]
    fn great_circle_half_way() {
        let a = pt(51.90, 4.00);
        let b = pt(51.90, 4.10);
        let len = Haversine.distance(a, b);
        let speed = Speed::knots(10.0);

        let options = MotionOptions { autoplay: true, ..MotionOptions::default() };
        let mut ctl = MotionController::new(vec![a, b], speed, options, t(0.0)).unwrap();
        let half_time = len / 2.0 / speed.as_mps();
        let frame = ctl.tick(t(half_time));

        let covered = Haversine.distance(a, frame.position);
        assert!((covered / len - 0.5).abs() < 0.005, "covered {covered} of {len}");
    }
}

// ── Fleet ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod fleet {
    use super::*;
    use crate::{Fleet, MotionController, MotionError};
    use fm_core::AssetId;

    fn ctl(len: f64) -> MotionController<Planar, EventLog> {
        planar(vec![pt(0.0, 0.0), pt(0.0, len)], 1.0).build(t(0.0)).unwrap()
    }

    #[test]
    fn tick_all_in_ascending_id_order() {
        let mut fleet = Fleet::new();
        fleet.insert(AssetId(9), ctl(10.0));
        fleet.insert(AssetId(2), ctl(1.0));
        fleet.start_all(t(0.0));
        assert_eq!(fleet.moving_count(), 2);

        let frames = fleet.tick_all(t(2.0));
        let ids: Vec<AssetId> = frames.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![AssetId(2), AssetId(9)]);
        assert!(fleet.get(AssetId(2)).unwrap().is_ended());
        assert_near(frames[1].1.position, pt(0.0, 2.0));
        assert_eq!(fleet.moving_count(), 1);
    }

    #[test]
    fn set_speed_all_validates_once() {
        let mut fleet = Fleet::new();
        fleet.insert(AssetId(0), ctl(10.0));
        fleet.insert(AssetId(1), ctl(10.0));

        let err = fleet.set_speed_all(Speed::mps(-1.0), t(0.0));
        assert!(matches!(err, Err(MotionError::InvalidSpeed(_))));
        assert!(fleet.iter().all(|(_, c)| c.speed() == Speed::mps(1.0)));

        fleet.set_speed_all(Speed::mps(2.0), t(0.0)).unwrap();
        assert!(fleet.iter().all(|(_, c)| c.speed() == Speed::mps(2.0)));
    }

    #[test]
    fn pause_all_and_remove() {
        let mut fleet = Fleet::new();
        fleet.insert(AssetId(0), ctl(10.0));
        fleet.insert(AssetId(1), ctl(10.0));
        fleet.start_all(t(0.0));
        fleet.pause_all(t(1.0));
        assert_eq!(fleet.moving_count(), 0);
        assert!(fleet.get_mut(AssetId(1)).unwrap().is_paused());

        assert!(fleet.remove(AssetId(0)).is_some());
        assert_eq!(fleet.len(), 1);
        assert!(!fleet.is_empty());
    }
}
