use glam::Vec2;

use scrollchart::animation::{
    AnimationId, AnimationProperty, AnimationValue, MORPH_DURATION, POINTS_CLEAR_DURATION,
    RIDE_DURATION, SCROLL_PROGRESS_DURATION,
};
use scrollchart::path::Path;
use scrollchart::primitives::{Primitive, PrimitiveKind, PrimitiveStyle};
use scrollchart::scheduler::{
    AnimationScheduler, CompletionAction, DatasetAnimationRequest, SchedulerState,
};
use scrollchart::DatasetRole;

fn primitive(kind: PrimitiveKind, opacity: f32) -> Primitive {
    Primitive {
        kind,
        geometry: Path::rect(Vec2::ZERO, 10.0, 10.0),
        anchor: Vec2::ZERO,
        style: PrimitiveStyle::default(),
        z_order: 0.0,
        opacity,
    }
}

fn curve_path() -> Path {
    Path::rect(Vec2::ZERO, 10.0, 0.0)
}

#[test]
fn test_curve_schedules_ride_when_marker_present() {
    let mut scheduler = AnimationScheduler::new();
    let curve = [primitive(PrimitiveKind::Curve, 1.0)];
    let marker = [primitive(PrimitiveKind::SelectedMarker, 1.0)];
    let requests = [
        DatasetAnimationRequest {
            dataset: 0,
            role: DatasetRole::Curve,
            repeat_count: 1,
            target_opacity: 1.0,
            primitives: &curve,
            morph_starts: &[],
        },
        DatasetAnimationRequest {
            dataset: 3,
            role: DatasetRole::SelectedPoint,
            repeat_count: 0,
            target_opacity: 1.0,
            primitives: &marker,
            morph_starts: &[],
        },
    ];

    let path = curve_path();
    let scheduled = scheduler.schedule(&requests, Some(&path), 1.0);
    assert_eq!(scheduled.len(), 1);
    let ride = &scheduled[0].primary;
    assert_eq!(ride.property, AnimationProperty::Ride);
    assert_eq!(ride.duration, RIDE_DURATION);
    assert!(!ride.removed_on_completion);
    assert!(scheduled[0].fade.is_none());
    assert_eq!(scheduler.state(), SchedulerState::Animating);
}

#[test]
fn test_no_ride_without_marker() {
    let mut scheduler = AnimationScheduler::new();
    let curve = [primitive(PrimitiveKind::Curve, 1.0)];
    let requests = [DatasetAnimationRequest {
        dataset: 0,
        role: DatasetRole::Curve,
        repeat_count: 1,
        target_opacity: 1.0,
        primitives: &curve,
        morph_starts: &[],
    }];

    let path = curve_path();
    let scheduled = scheduler.schedule(&requests, Some(&path), 1.0);
    assert!(scheduled.is_empty());
    assert_eq!(scheduler.state(), SchedulerState::Idle);
}

#[test]
fn test_bars_morph_from_collapsed_strips() {
    let mut scheduler = AnimationScheduler::new();
    let bars: Vec<Primitive> = (0..3).map(|_| primitive(PrimitiveKind::Bar, 1.0)).collect();
    let starts: Vec<Path> = (0..3).map(|_| Path::rect(Vec2::ZERO, 10.0, 1.0)).collect();
    let requests = [DatasetAnimationRequest {
        dataset: 5,
        role: DatasetRole::Bar {
            column_index: 1,
            column_count: 6,
        },
        repeat_count: 1,
        target_opacity: 1.0,
        primitives: &bars,
        morph_starts: &starts,
    }];

    let scheduled = scheduler.schedule(&requests, None, 1.0);
    assert_eq!(scheduled.len(), 3);
    for (i, anim) in scheduled.iter().enumerate() {
        assert_eq!(anim.primary.property, AnimationProperty::Path);
        assert_eq!(anim.primary.duration, MORPH_DURATION);
        assert!(anim.primary.removed_on_completion);
        assert_eq!(anim.primary.layer_index, i);
        assert_eq!(anim.primary.from, AnimationValue::Path(starts[i].clone()));
        assert_eq!(
            anim.primary.to,
            AnimationValue::Path(bars[i].geometry.clone())
        );
    }
}

#[test]
fn test_invisible_target_gets_fade_wrap() {
    let mut scheduler = AnimationScheduler::new();
    let bars = [primitive(PrimitiveKind::Bar, 0.0)];
    let starts = [Path::rect(Vec2::ZERO, 10.0, 1.0)];
    let requests = [DatasetAnimationRequest {
        dataset: 5,
        role: DatasetRole::Bar {
            column_index: 1,
            column_count: 6,
        },
        repeat_count: 1,
        target_opacity: 1.0,
        primitives: &bars,
        morph_starts: &starts,
    }];

    let scheduled = scheduler.schedule(&requests, None, 1.0);
    let fade = scheduled[0].fade.as_ref().unwrap();
    assert_eq!(fade.property, AnimationProperty::Opacity);
    assert_eq!(fade.from, AnimationValue::Scalar(0.0));
    assert_eq!(fade.to, AnimationValue::Scalar(1.0));
    assert_eq!(scheduler.running_count(), 2);
}

#[test]
fn test_zero_repeat_schedules_nothing() {
    let mut scheduler = AnimationScheduler::new();
    let bars = [primitive(PrimitiveKind::Bar, 1.0)];
    let starts = [Path::rect(Vec2::ZERO, 10.0, 1.0)];
    let requests = [DatasetAnimationRequest {
        dataset: 5,
        role: DatasetRole::Bar {
            column_index: 1,
            column_count: 6,
        },
        repeat_count: 0,
        target_opacity: 1.0,
        primitives: &bars,
        morph_starts: &starts,
    }];

    assert!(scheduler.schedule(&requests, None, 1.0).is_empty());
}

fn schedule_ride(scheduler: &mut AnimationScheduler, page_count: f32) -> AnimationId {
    let curve = [primitive(PrimitiveKind::Curve, 1.0)];
    let marker = [primitive(PrimitiveKind::SelectedMarker, 1.0)];
    let requests = [
        DatasetAnimationRequest {
            dataset: 0,
            role: DatasetRole::Curve,
            repeat_count: 1,
            target_opacity: 1.0,
            primitives: &curve,
            morph_starts: &[],
        },
        DatasetAnimationRequest {
            dataset: 3,
            role: DatasetRole::SelectedPoint,
            repeat_count: 0,
            target_opacity: 1.0,
            primitives: &marker,
            morph_starts: &[],
        },
    ];
    let path = curve_path();
    scheduler.schedule(&requests, Some(&path), page_count)[0]
        .primary
        .id
}

#[test]
fn test_ride_completion_chains_scroll_once() {
    let mut scheduler = AnimationScheduler::new();
    let ride_id = schedule_ride(&mut scheduler, 3.0);

    let actions = scheduler.on_animation_completed(ride_id);
    assert_eq!(
        actions,
        vec![CompletionAction::ScrollToPage {
            page: 1.0,
            duration: SCROLL_PROGRESS_DURATION,
        }]
    );
    assert!(scheduler.is_scroll_done());
    assert_eq!(scheduler.state(), SchedulerState::Idle);

    // A later ride completion does not re-trigger the scroll.
    let second = schedule_ride(&mut scheduler, 3.0);
    assert!(scheduler.on_animation_completed(second).is_empty());

    scheduler.reset_latches();
    let third = schedule_ride(&mut scheduler, 3.0);
    assert_eq!(scheduler.on_animation_completed(third).len(), 1);
}

#[test]
fn test_scroll_completion_fades_points_once() {
    let mut scheduler = AnimationScheduler::new();
    let points: Vec<Primitive> = (0..4)
        .map(|_| primitive(PrimitiveKind::PointMarker, 1.0))
        .collect();
    let requests = [DatasetAnimationRequest {
        dataset: 1,
        role: DatasetRole::Points,
        repeat_count: 0,
        target_opacity: 1.0,
        primitives: &points,
        morph_starts: &[],
    }];
    scheduler.schedule(&requests, None, 1.0);

    let actions = scheduler.on_scroll_completed();
    assert_eq!(actions.len(), 1);
    let CompletionAction::FadeOutPoints(fades) = &actions[0] else {
        panic!("expected a fade batch");
    };
    assert_eq!(fades.len(), 4);
    for (i, fade) in fades.iter().enumerate() {
        assert_eq!(fade.dataset, 1);
        assert_eq!(fade.layer_index, i);
        assert_eq!(fade.property, AnimationProperty::Opacity);
        assert_eq!(fade.to, AnimationValue::Scalar(0.0));
        assert_eq!(fade.duration, POINTS_CLEAR_DURATION);
    }

    assert!(scheduler.on_scroll_completed().is_empty());
}

#[test]
fn test_regeneration_deferred_until_drain() {
    let mut scheduler = AnimationScheduler::new();
    let bars: Vec<Primitive> = (0..2).map(|_| primitive(PrimitiveKind::Bar, 1.0)).collect();
    let starts: Vec<Path> = (0..2).map(|_| Path::rect(Vec2::ZERO, 10.0, 1.0)).collect();
    let requests = [DatasetAnimationRequest {
        dataset: 5,
        role: DatasetRole::Bar {
            column_index: 1,
            column_count: 6,
        },
        repeat_count: 1,
        target_opacity: 1.0,
        primitives: &bars,
        morph_starts: &starts,
    }];
    let scheduled = scheduler.schedule(&requests, None, 1.0);
    assert_eq!(scheduler.running_count(), 2);

    assert!(!scheduler.begin_regeneration(false));
    assert_eq!(scheduler.state(), SchedulerState::PendingRegeneration);

    let first = scheduler.on_animation_completed(scheduled[0].primary.id);
    assert!(first.is_empty());

    let second = scheduler.on_animation_completed(scheduled[1].primary.id);
    assert_eq!(second, vec![CompletionAction::RegenerationReady]);
    assert_eq!(scheduler.state(), SchedulerState::Idle);
}

#[test]
fn test_forced_regeneration_supersedes_animations() {
    let mut scheduler = AnimationScheduler::new();
    let bars: Vec<Primitive> = (0..2).map(|_| primitive(PrimitiveKind::Bar, 1.0)).collect();
    let starts: Vec<Path> = (0..2).map(|_| Path::rect(Vec2::ZERO, 10.0, 1.0)).collect();
    let requests = [DatasetAnimationRequest {
        dataset: 5,
        role: DatasetRole::Bar {
            column_index: 1,
            column_count: 6,
        },
        repeat_count: 1,
        target_opacity: 1.0,
        primitives: &bars,
        morph_starts: &starts,
    }];
    let scheduled = scheduler.schedule(&requests, None, 1.0);

    assert!(scheduler.begin_regeneration(true));
    assert_eq!(scheduler.running_count(), 0);
    // Completions from the superseded cycle are stale and ignored.
    assert!(scheduler.on_animation_completed(scheduled[0].primary.id).is_empty());
}

#[test]
fn test_single_running_animation_does_not_block() {
    let mut scheduler = AnimationScheduler::new();
    schedule_ride(&mut scheduler, 1.0);
    assert_eq!(scheduler.running_count(), 1);
    assert!(scheduler.begin_regeneration(false));
}

#[test]
fn test_position_slide_descriptor() {
    let mut animator = scrollchart::animation::Animator::new();
    let slide = animator.position(Vec2::ZERO, Vec2::new(400.0, 0.0), 0, 0, 1.2);
    assert_eq!(slide.property, AnimationProperty::Position);
    assert_eq!(slide.from, AnimationValue::Point(Vec2::ZERO));
    assert_eq!(slide.to, AnimationValue::Point(Vec2::new(400.0, 0.0)));
    assert!(!slide.removed_on_completion);
}

#[test]
fn test_ride_progress_samples_the_path() {
    let mut scheduler = AnimationScheduler::new();
    assert!(scheduler.ride_point_at(0.5).is_none());
    schedule_ride(&mut scheduler, 1.0);

    let path = curve_path();
    assert_eq!(scheduler.ride_point_at(0.0), path.point_at(0.0));
    assert_eq!(scheduler.ride_point_at(1.0), path.point_at(1.0));
}
