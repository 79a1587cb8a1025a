use glam::Vec2;

use scrollchart::layout_cache::LayoutCache;
use scrollchart::Viewport;

fn points(seed: f32) -> Vec<Vec2> {
    (0..5).map(|i| Vec2::new(i as f32, seed + i as f32)).collect()
}

#[test]
fn test_second_observation_hits() {
    let viewport = Viewport::new(400.0, 200.0);
    let mut cache = LayoutCache::default();
    let pts = points(1.0);

    assert!(!cache.observe(viewport, &pts));
    assert!(cache.observe(viewport, &pts));
    assert_eq!(cache.cached_points(viewport, &pts), Some(&pts));
}

#[test]
fn test_viewport_change_misses() {
    let mut cache = LayoutCache::default();
    let pts = points(1.0);

    assert!(!cache.observe(Viewport::new(400.0, 200.0), &pts));
    assert!(!cache.observe(Viewport::new(400.0, 201.0), &pts));
}

#[test]
fn test_point_change_misses() {
    let viewport = Viewport::new(400.0, 200.0);
    let mut cache = LayoutCache::default();

    assert!(!cache.observe(viewport, &points(1.0)));
    assert!(!cache.observe(viewport, &points(2.0)));
    // A miss breaks the hit streak.
    assert!(!cache.is_stable());
}

#[test]
fn test_stability_needs_repeated_hits() {
    let viewport = Viewport::new(400.0, 200.0);
    let mut cache = LayoutCache::default();
    let pts = points(1.0);

    cache.observe(viewport, &pts);
    assert!(!cache.is_stable());
    cache.observe(viewport, &pts);
    assert!(!cache.is_stable());
    cache.observe(viewport, &pts);
    assert!(cache.is_stable());
}

#[test]
fn test_lru_eviction_at_capacity() {
    let viewport = Viewport::new(400.0, 200.0);
    let mut cache = LayoutCache::with_capacity(2);

    cache.observe(viewport, &points(1.0));
    cache.observe(viewport, &points(2.0));
    cache.observe(viewport, &points(3.0));
    assert_eq!(cache.len(), 2);

    // The oldest layout was evicted and observes as a miss again.
    assert!(!cache.observe(viewport, &points(1.0)));
    assert!(cache.observe(viewport, &points(1.0)));
}

#[test]
fn test_clear_resets_everything() {
    let viewport = Viewport::new(400.0, 200.0);
    let mut cache = LayoutCache::default();
    let pts = points(1.0);

    cache.observe(viewport, &pts);
    cache.observe(viewport, &pts);
    cache.observe(viewport, &pts);
    cache.clear();
    assert!(cache.is_empty());
    assert!(!cache.is_stable());
    assert!(!cache.observe(viewport, &pts));
}
