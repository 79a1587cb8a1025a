//! Transition descriptors handed to the host for playback.
//!
//! The engine never advances a clock itself; it emits descriptors, the
//! host plays them and reports completions back through the scene.

use glam::Vec2;

use crate::path::Path;

/// Marker ride along the full curve.
pub const RIDE_DURATION: f32 = 10.0;
/// Bar growth from the collapsed strip.
pub const MORPH_DURATION: f32 = 0.5;
/// Fade wrapped around a primary transition.
pub const FADE_GROUP_DURATION: f32 = 1.0;
/// Point markers fading out after the ride settles.
pub const POINTS_CLEAR_DURATION: f32 = 4.0;
/// Scroll-to-page transition chained to the ride completion.
pub const SCROLL_PROGRESS_DURATION: f32 = 1.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationProperty {
    Path,
    Position,
    Opacity,
    /// Synthetic `[0, 1]` progress driving a marker along a path.
    Ride,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AnimationValue {
    Scalar(f32),
    Point(Vec2),
    Path(Path),
}

/// One transition on one primitive. Created per regeneration cycle and
/// discarded once its completion fires.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationDescriptor {
    pub id: AnimationId,
    pub dataset: usize,
    pub layer_index: usize,
    pub property: AnimationProperty,
    pub from: AnimationValue,
    pub to: AnimationValue,
    pub duration: f32,
    /// Whether the host drops the transition state on completion; varies
    /// by kind and must be preserved per kind.
    pub removed_on_completion: bool,
}

/// A primary transition, optionally wrapped in a concurrent fade-in group
/// when the target primitive is currently invisible.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledAnimation {
    pub primary: AnimationDescriptor,
    pub fade: Option<AnimationDescriptor>,
}

/// Builds the per-kind transitions. Ids are unique within an animator's
/// lifetime, which the scene shares across regeneration cycles.
#[derive(Default)]
pub struct Animator {
    next_id: u64,
    /// Path the current ride runs along, kept for progress sampling.
    ride_path: Option<Path>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> AnimationId {
        self.next_id += 1;
        AnimationId(self.next_id)
    }

    /// Ride animation: a synthetic progress property moves the target
    /// primitive along `path` from start to end.
    pub fn ride_along_path(
        &mut self,
        path: &Path,
        dataset: usize,
        layer_index: usize,
        duration: f32,
    ) -> AnimationDescriptor {
        self.ride_path = Some(path.clone());
        AnimationDescriptor {
            id: self.next_id(),
            dataset,
            layer_index,
            property: AnimationProperty::Ride,
            from: AnimationValue::Scalar(0.0),
            to: AnimationValue::Scalar(1.0),
            duration,
            removed_on_completion: false,
        }
    }

    /// Where the riding marker sits at `progress` of the current ride.
    pub fn ride_point_at(&self, progress: f32) -> Option<Vec2> {
        self.ride_path.as_ref().and_then(|p| p.point_at(progress))
    }

    pub fn path_morph(
        &mut self,
        from: Path,
        to: Path,
        dataset: usize,
        layer_index: usize,
        duration: f32,
    ) -> AnimationDescriptor {
        AnimationDescriptor {
            id: self.next_id(),
            dataset,
            layer_index,
            property: AnimationProperty::Path,
            from: AnimationValue::Path(from),
            to: AnimationValue::Path(to),
            duration,
            removed_on_completion: true,
        }
    }

    pub fn opacity(
        &mut self,
        from: f32,
        to: f32,
        dataset: usize,
        layer_index: usize,
        duration: f32,
    ) -> AnimationDescriptor {
        AnimationDescriptor {
            id: self.next_id(),
            dataset,
            layer_index,
            property: AnimationProperty::Opacity,
            from: AnimationValue::Scalar(from),
            to: AnimationValue::Scalar(to),
            duration,
            removed_on_completion: false,
        }
    }

    /// Position slide used by the scroll-to-page transition.
    pub fn position(
        &mut self,
        from: Vec2,
        to: Vec2,
        dataset: usize,
        layer_index: usize,
        duration: f32,
    ) -> AnimationDescriptor {
        AnimationDescriptor {
            id: self.next_id(),
            dataset,
            layer_index,
            property: AnimationProperty::Position,
            from: AnimationValue::Point(from),
            to: AnimationValue::Point(to),
            duration,
            removed_on_completion: false,
        }
    }

    /// Wraps `primary` in a fade group when the target is invisible;
    /// otherwise the primary transition plays alone.
    pub fn compose(
        &mut self,
        primary: AnimationDescriptor,
        current_opacity: f32,
        target_opacity: f32,
    ) -> ScheduledAnimation {
        let fade = if current_opacity == 0.0 {
            Some(self.opacity(
                0.0,
                target_opacity,
                primary.dataset,
                primary.layer_index,
                FADE_GROUP_DURATION,
            ))
        } else {
            None
        };
        ScheduledAnimation { primary, fade }
    }
}
