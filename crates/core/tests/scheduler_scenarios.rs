//! End-to-end behaviour of the movement scheduler.

mod support;

use std::time::Duration;

use chrono::NaiveTime;
use support::*;
use tikus_domain::{
    PatternKind, Point, SchedulerConfig, SchedulerEvent, SchedulerState, StopReason, WorkHours,
};

fn jiggle_config() -> SchedulerConfig {
    SchedulerConfig::builder()
        .idle_timeout(Duration::from_secs(5))
        .movement_interval(Duration::from_millis(500))
        .fixed_interval()
        .pattern(PatternKind::Jiggle)
        .build()
        .unwrap()
}

fn office_hours() -> WorkHours {
    WorkHours::restricted(
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        0..=4,
    )
}

/// Idle grows from 0 to 6s in 100ms samples: moves at 5.0, 5.5 and 6.0s,
/// then genuine input stops the session until the timeout recurs.
#[test]
fn test_jiggle_session_follows_idle_timeline() {
    let input = FakeInput::at(Point::new(500.0, 500.0));
    let mut scheduler = build(jiggle_config(), input.clone());
    let start = monday(12, 0);

    let mut moved_at = Vec::new();
    for step in 0..=60u64 {
        let now = start + chrono::Duration::milliseconds(step as i64 * 100);
        scheduler.feed_activity(idle(now, step * 100));
        if tick_and_apply(&mut scheduler, &input, now).is_some() {
            moved_at.push(step * 100);
        }
    }
    assert_eq!(moved_at, vec![5_000, 5_500, 6_000]);
    assert_eq!(scheduler.state(), SchedulerState::Moving);

    // The user touches the mouse
    let touch = start + chrono::Duration::milliseconds(6_100);
    scheduler.feed_activity(idle(touch, 50));
    assert_eq!(scheduler.state(), SchedulerState::Monitoring);

    for step in 1..50u64 {
        let now = touch + chrono::Duration::milliseconds(step as i64 * 100);
        scheduler.feed_activity(idle(now, step * 100));
        assert!(scheduler.tick(now).is_none(), "moved after only {}ms idle", step * 100);
    }

    let recurred = touch + chrono::Duration::seconds(5);
    scheduler.feed_activity(idle(recurred, 5_000));
    assert!(scheduler.tick(recurred).is_some());

    let events = scheduler.drain_events();
    assert_eq!(count_started(&events), 2);
    assert!(events.contains(&SchedulerEvent::MovementStopped { reason: StopReason::UserActivity }));
    assert_eq!(scheduler.statistics().move_count, 4);
}

/// Saturday 10:00 with a long idle never starts a session.
#[test]
fn test_weekend_blocks_movement() {
    let config = SchedulerConfig::builder()
        .idle_timeout(Duration::from_secs(60))
        .work_hours(office_hours())
        .build()
        .unwrap();
    let input = FakeInput::at(Point::new(100.0, 100.0));
    let mut scheduler = build(config, input);

    let mut now = saturday(10, 0);
    for _ in 0..100 {
        scheduler.feed_activity(idle(now, 3_600_000));
        assert!(scheduler.tick(now).is_none());
        now += chrono::Duration::seconds(30);
    }
    assert_eq!(scheduler.state(), SchedulerState::Monitoring);
    assert!(scheduler.drain_events().is_empty());
}

/// An overnight window written as 22:00-06:00 is taken literally and never opens.
#[test]
fn test_overnight_window_never_opens() {
    let night = WorkHours::restricted(
        NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
        0..=6,
    );
    let config = SchedulerConfig::builder()
        .idle_timeout(Duration::from_secs(1))
        .work_hours(night)
        .build()
        .unwrap();
    let mut scheduler = build(config, FakeInput::at(Point::new(10.0, 10.0)));

    for hour in [21, 22, 23, 0, 3, 5, 6, 12] {
        let now = monday(hour, 30);
        scheduler.feed_activity(idle(now, 10_000));
        assert!(scheduler.tick(now).is_none(), "moved at {hour}:30");
    }
}

/// The gate closing mid-session ends it; the next working day restarts it.
#[test]
fn test_session_ends_when_work_hours_close() {
    let config = SchedulerConfig::builder()
        .idle_timeout(Duration::from_secs(60))
        .movement_interval(Duration::from_secs(10))
        .fixed_interval()
        .work_hours(office_hours())
        .build()
        .unwrap();
    let input = FakeInput::at(Point::new(800.0, 600.0));
    let mut scheduler = build(config, input.clone());

    let before_close = monday(17, 59);
    scheduler.feed_activity(idle(before_close, 120_000));
    assert!(tick_and_apply(&mut scheduler, &input, before_close).is_some());

    let closed = monday(18, 0);
    scheduler.feed_activity(idle(closed, 180_000));
    assert!(scheduler.tick(closed).is_none());
    assert_eq!(scheduler.state(), SchedulerState::Monitoring);

    let events = scheduler.drain_events();
    assert_eq!(
        events.last(),
        Some(&SchedulerEvent::MovementStopped { reason: StopReason::OutsideWorkHours })
    );

    let tuesday = monday(9, 0) + chrono::Duration::days(1);
    scheduler.feed_activity(idle(tuesday, 54_000_000));
    assert!(scheduler.tick(tuesday).is_some());
}

/// Pausing mid-session suppresses every later tick, whatever the idle time.
#[test]
fn test_paused_scheduler_never_moves() {
    let input = FakeInput::at(Point::new(500.0, 500.0));
    let mut scheduler = build(jiggle_config(), input.clone());
    let mut now = monday(12, 0);

    scheduler.feed_activity(idle(now, 10_000));
    assert!(tick_and_apply(&mut scheduler, &input, now).is_some());

    scheduler.set_paused(true);
    for step in 0..200u64 {
        now += chrono::Duration::milliseconds(250);
        scheduler.feed_activity(idle(now, 10_000 + step * 250));
        assert!(scheduler.tick(now).is_none());
    }
    assert_eq!(scheduler.state(), SchedulerState::Paused);
    assert_eq!(scheduler.statistics().move_count, 1);
}

/// Moves are clamped to the monitor that holds the cursor.
#[test]
fn test_clamp_uses_monitor_under_cursor() {
    let config = SchedulerConfig::builder()
        .idle_timeout(Duration::from_secs(1))
        .movement_interval(Duration::from_secs(1))
        .movement_range(400.0)
        .fixed_interval()
        .build()
        .unwrap();
    let input = FakeInput::at(Point::new(3100.0, 1000.0));
    let mut scheduler = build_with(config, input.clone(), std::sync::Arc::new(DualMonitors));
    let mut now = monday(12, 0);

    for _ in 0..200 {
        scheduler.feed_activity(idle(now, 5_000));
        if let Some(command) = tick_and_apply(&mut scheduler, &input, now) {
            assert!(RIGHT.contains(command.to), "{:?} left the right monitor", command.to);
        }
        now += chrono::Duration::seconds(1);
    }
}

/// With the shipped adaptive bands the interval stretches as idle time grows.
#[test]
fn test_adaptive_interval_stretches_with_idle() {
    let config = SchedulerConfig::builder().idle_timeout(Duration::from_secs(300)).build().unwrap();
    let input = FakeInput::at(Point::new(500.0, 500.0));
    let mut scheduler = build(config, input.clone());
    let start = monday(12, 0);

    scheduler.feed_activity(idle(start, 300_000));
    tick_and_apply(&mut scheduler, &input, start).unwrap();
    assert_eq!(scheduler.next_move_at(), Some(start + chrono::Duration::seconds(30)));

    let later = start + chrono::Duration::seconds(1_500);
    scheduler.feed_activity(idle(later, 1_800_000));
    tick_and_apply(&mut scheduler, &input, later).unwrap();
    assert_eq!(scheduler.next_move_at(), Some(later + chrono::Duration::seconds(120)));
}

/// An hour spent paused does not count toward the timeout once resumed; the
/// backend keeps counting throughout, so only the post-pause growth matters.
#[test]
fn test_paused_hour_not_counted_after_resume() {
    let config = SchedulerConfig::builder()
        .idle_timeout(Duration::from_secs(300))
        .fixed_interval()
        .build()
        .unwrap();
    let input = FakeInput::at(Point::new(500.0, 500.0));
    let mut scheduler = build(config, input.clone());
    let start = monday(12, 0);

    scheduler.feed_activity(idle(start, 10_000));
    scheduler.set_paused(true);
    for minute in 1..=60u64 {
        let now = start + chrono::Duration::minutes(minute as i64);
        scheduler.feed_activity(idle(now, 10_000 + minute * 60_000));
        assert!(scheduler.tick(now).is_none());
    }
    scheduler.set_paused(false);

    let resumed = start + chrono::Duration::seconds(3_601);
    scheduler.feed_activity(idle(resumed, 3_611_000));
    assert!(tick_and_apply(&mut scheduler, &input, resumed).is_none());
    assert_eq!(scheduler.state(), SchedulerState::Monitoring);
    assert_eq!(scheduler.idle(), Duration::from_secs(11));

    // 290 more seconds complete the 300s timeout
    let due = resumed + chrono::Duration::seconds(289);
    scheduler.feed_activity(idle(due, 3_900_000));
    assert_eq!(scheduler.idle(), Duration::from_secs(300));
    assert!(tick_and_apply(&mut scheduler, &input, due).is_some());
    assert_eq!(scheduler.state(), SchedulerState::Moving);
}

/// Genuine input after a resume clears the paused span; later readings count
/// in full again.
#[test]
fn test_input_after_resume_restores_raw_readings() {
    let input = FakeInput::at(Point::new(500.0, 500.0));
    let mut scheduler = build(jiggle_config(), input);
    let start = monday(12, 0);

    scheduler.feed_activity(idle(start, 1_000));
    scheduler.set_paused(true);
    scheduler.feed_activity(idle(start, 600_000));
    scheduler.set_paused(false);
    scheduler.feed_activity(idle(start, 601_000));
    assert_eq!(scheduler.idle(), Duration::from_secs(2));

    scheduler.feed_activity(idle(start, 200));
    scheduler.feed_activity(idle(start, 5_000));
    assert_eq!(scheduler.idle(), Duration::from_secs(5));
}

/// A timeout below one second still yields a single session per idle episode.
#[test]
fn test_sub_second_timeout_starts_one_session() {
    let config = SchedulerConfig::builder()
        .idle_timeout(Duration::from_millis(300))
        .movement_interval(Duration::from_millis(100))
        .fixed_interval()
        .build()
        .unwrap();
    let input = FakeInput::at(Point::new(500.0, 500.0));
    let mut scheduler = build(config, input.clone());
    let start = monday(12, 0);

    for step in 0..=20u64 {
        let now = start + chrono::Duration::milliseconds(step as i64 * 100);
        scheduler.feed_activity(idle(now, step * 100));
        tick_and_apply(&mut scheduler, &input, now);
    }

    let events = scheduler.drain_events();
    assert_eq!(count_started(&events), 1);
    assert!(!events.iter().any(|e| matches!(e, SchedulerEvent::MovementStopped { .. })));
    assert_eq!(scheduler.state(), SchedulerState::Moving);
}
