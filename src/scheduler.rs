//! Decides, per primitive and per dataset, which transition plays on a
//! regeneration cycle, and sequences completions.

use tracing::{debug, warn};

use crate::animation::{
    AnimationDescriptor, AnimationId, AnimationProperty, Animator, ScheduledAnimation,
    MORPH_DURATION, POINTS_CLEAR_DURATION, RIDE_DURATION, SCROLL_PROGRESS_DURATION,
};
use crate::data_types::DatasetRole;
use crate::path::Path;
use crate::primitives::Primitive;

/// Regeneration lifecycle. Completions arriving while a rebuild is blocked
/// queue at most one pending request instead of reentering the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Animating,
    PendingRegeneration,
}

/// What a completion unlocked; the scene acts on these in order.
#[derive(Clone, Debug, PartialEq)]
pub enum CompletionAction {
    /// The ride finished; the host should scroll to this page. Fired once.
    ScrollToPage {
        page: f32,
        duration: f32,
    },
    /// Fade the point markers out after the ride/scroll settles.
    FadeOutPoints(Vec<AnimationDescriptor>),
    /// All animations drained and a regeneration request was queued.
    RegenerationReady,
}

/// One dataset's input to a scheduling pass.
pub struct DatasetAnimationRequest<'a> {
    pub dataset: usize,
    pub role: DatasetRole,
    pub repeat_count: u32,
    pub target_opacity: f32,
    pub primitives: &'a [Primitive],
    pub morph_starts: &'a [Path],
}

struct InFlight {
    id: AnimationId,
    property: AnimationProperty,
}

pub struct AnimationScheduler {
    animator: Animator,
    state: SchedulerState,
    in_flight: Vec<InFlight>,
    pending_regeneration: bool,
    /// Set exactly once when the first ride completes; re-entrant
    /// completions after that are no-ops.
    scroll_done: bool,
    points_fade_done: bool,
    /// Points dataset observed during the last pass, for the clear fade.
    points_target: Option<(usize, usize)>,
    page_count: f32,
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            animator: Animator::new(),
            state: SchedulerState::Idle,
            in_flight: Vec::new(),
            pending_regeneration: false,
            scroll_done: false,
            points_fade_done: false,
            points_target: None,
            page_count: 1.0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn running_count(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_scroll_done(&self) -> bool {
        self.scroll_done
    }

    /// Where the riding marker sits at `progress` of the current ride.
    pub fn ride_point_at(&self, progress: f32) -> Option<glam::Vec2> {
        self.animator.ride_point_at(progress)
    }

    /// Gate consulted before a rebuild. More than one in-flight animation
    /// blocks regeneration unless forced; a blocked request is queued
    /// (one slot, later requests collapse into it).
    pub fn begin_regeneration(&mut self, forced: bool) -> bool {
        if forced || self.in_flight.len() <= 1 {
            self.pending_regeneration = false;
            if forced {
                // Forced teardown supersedes whatever was playing.
                self.in_flight.clear();
                self.state = SchedulerState::Idle;
            }
            true
        } else {
            debug!(
                running = self.in_flight.len(),
                "regeneration deferred, animations in flight"
            );
            self.pending_regeneration = true;
            self.state = SchedulerState::PendingRegeneration;
            false
        }
    }

    /// Builds the transition set for one regeneration cycle.
    pub fn schedule(
        &mut self,
        requests: &[DatasetAnimationRequest<'_>],
        curve_path: Option<&Path>,
        page_count: f32,
    ) -> Vec<ScheduledAnimation> {
        self.page_count = page_count;
        self.points_target = requests
            .iter()
            .find(|r| r.role == DatasetRole::Points && !r.primitives.is_empty())
            .map(|r| (r.dataset, r.primitives.len()));
        let has_ride_target = requests.iter().any(|r| {
            r.role == DatasetRole::SelectedPoint && !r.primitives.is_empty()
        });

        let mut scheduled = Vec::new();
        for req in requests {
            if req.repeat_count == 0 {
                debug!(dataset = req.dataset, "dataset does not animate its layers");
                continue;
            }
            match req.role {
                DatasetRole::Curve => {
                    let Some(path) = curve_path else {
                        warn!(dataset = req.dataset, "ride requested without a curve path");
                        continue;
                    };
                    if !has_ride_target || req.primitives.is_empty() {
                        continue;
                    }
                    let primary =
                        self.animator
                            .ride_along_path(path, req.dataset, 0, RIDE_DURATION);
                    let current = req.primitives[0].opacity;
                    scheduled.push(self.animator.compose(primary, current, req.target_opacity));
                }
                DatasetRole::Bar { .. } => {
                    for (layer_index, primitive) in req.primitives.iter().enumerate() {
                        let Some(start) = req.morph_starts.get(layer_index) else {
                            continue;
                        };
                        let primary = self.animator.path_morph(
                            start.clone(),
                            primitive.geometry.clone(),
                            req.dataset,
                            layer_index,
                            MORPH_DURATION,
                        );
                        scheduled.push(self.animator.compose(
                            primary,
                            primitive.opacity,
                            req.target_opacity,
                        ));
                    }
                }
                // Point markers, segments and selection markers play no
                // transition of their own.
                _ => {}
            }
        }

        for anim in &scheduled {
            self.track(&anim.primary);
            if let Some(fade) = &anim.fade {
                self.track(fade);
            }
        }
        self.state = if self.in_flight.is_empty() {
            SchedulerState::Idle
        } else {
            SchedulerState::Animating
        };
        scheduled
    }

    fn track(&mut self, descriptor: &AnimationDescriptor) {
        self.in_flight.push(InFlight {
            id: descriptor.id,
            property: descriptor.property,
        });
    }

    /// Host reports a descriptor finished. Returns follow-up actions:
    /// the one-shot scroll chained to the ride, and the drained-queue
    /// signal for a deferred regeneration.
    pub fn on_animation_completed(&mut self, id: AnimationId) -> Vec<CompletionAction> {
        let Some(pos) = self.in_flight.iter().position(|a| a.id == id) else {
            // Stale completion from a superseded cycle.
            return Vec::new();
        };
        let finished = self.in_flight.remove(pos);
        let mut actions = Vec::new();

        if finished.property == AnimationProperty::Ride && !self.scroll_done {
            self.scroll_done = true;
            actions.push(CompletionAction::ScrollToPage {
                page: 1.0_f32.min(self.page_count),
                duration: SCROLL_PROGRESS_DURATION,
            });
        }

        if self.in_flight.is_empty() {
            if self.pending_regeneration {
                self.pending_regeneration = false;
                self.state = SchedulerState::Idle;
                actions.push(CompletionAction::RegenerationReady);
            } else {
                self.state = SchedulerState::Idle;
            }
        }
        actions
    }

    /// Host reports the chained scroll transition settled; fades the point
    /// markers out, once.
    pub fn on_scroll_completed(&mut self) -> Vec<CompletionAction> {
        if self.points_fade_done {
            return Vec::new();
        }
        let Some((dataset, count)) = self.points_target else {
            return Vec::new();
        };
        self.points_fade_done = true;
        let descriptors = (0..count)
            .map(|layer_index| {
                self.animator
                    .opacity(1.0, 0.0, dataset, layer_index, POINTS_CLEAR_DURATION)
            })
            .collect();
        vec![CompletionAction::FadeOutPoints(descriptors)]
    }

    /// Clears the one-shot latches, e.g. when the chart is rebuilt from
    /// scratch for a new data set.
    pub fn reset_latches(&mut self) {
        self.scroll_done = false;
        self.points_fade_done = false;
    }
}
