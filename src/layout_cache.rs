//! Layout memoization. A regeneration is skipped when the viewport and the
//! scaled point set hash to a layout already seen.

use std::num::NonZeroUsize;

use glam::Vec2;
use lru::LruCache;
use tracing::debug;

use crate::data_types::Viewport;
use crate::utils::hash_points;

pub const DEFAULT_CAPACITY: usize = 64;

pub struct LayoutCache {
    entries: LruCache<u64, Vec<Vec2>>,
    consecutive_hits: u32,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl LayoutCache {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            consecutive_hits: 0,
        }
    }

    /// Combined fingerprint of the viewport and the flattened point set.
    pub fn fingerprint(viewport: Viewport, points: &[Vec2]) -> u64 {
        viewport.hash() ^ hash_points(points)
    }

    /// Records one layout observation. Returns `true` on a hit, meaning the
    /// exact same layout was produced before and regeneration can be
    /// skipped. A miss stores the point set and breaks the hit streak.
    pub fn observe(&mut self, viewport: Viewport, points: &[Vec2]) -> bool {
        let key = Self::fingerprint(viewport, points);
        if self.entries.get(&key).is_some() {
            self.consecutive_hits += 1;
            debug!(key, hits = self.consecutive_hits, "layout cache hit");
            true
        } else {
            self.consecutive_hits = 0;
            self.entries.put(key, points.to_vec());
            debug!(key, len = self.entries.len(), "layout cache miss");
            false
        }
    }

    pub fn cached_points(&mut self, viewport: Viewport, points: &[Vec2]) -> Option<&Vec<Vec2>> {
        self.entries.get(&Self::fingerprint(viewport, points))
    }

    /// The layout has settled once the same fingerprint has hit more than
    /// once in a row.
    pub fn is_stable(&self) -> bool {
        self.consecutive_hits > 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.consecutive_hits = 0;
    }
}
