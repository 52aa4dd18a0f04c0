//! Time-boxed value interpolation.
//!
//! An [`Animation`] reads a starting value from its target morph, then on
//! every frame writes an eased value between the start and `start + delta`.
//! Once its deadline passes it writes the exact destination, runs its
//! completion callback once and becomes inactive. Animations are stepped by
//! the world after morph stepping and before repaint.

use std::{
    f64::consts::{FRAC_PI_2, PI},
    fmt,
    str::FromStr,
    time::{Duration, Instant},
};

use crate::{
    Context, NodeId, ReadContext,
    core::{Core, context::CoreContext, id::AnimationId},
    error::{Error, Result},
};

/// Reads the animated value from the target morph.
pub type Getter = Box<dyn Fn(&dyn ReadContext) -> f64>;
/// Writes an animated value to the target morph.
pub type Setter = Box<dyn FnMut(&mut dyn Context, f64)>;
/// Runs once, after the destination value has been written.
pub type OnComplete = Box<dyn FnOnce(&mut dyn Context)>;

/// Maps elapsed time (`0.0..=1.0`) to progress (`0.0` at the start, `1.0` at
/// the destination).
#[derive(Clone, Copy, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Ease in and out along a sine curve.
    #[default]
    Sinusoidal,
    /// Ease in and out, quadratic.
    Quadratic,
    /// Ease in and out, cubic.
    Cubic,
    /// Overshoot and settle.
    Elastic,
    /// Ease in only, sine.
    SineIn,
    /// Ease in only, quadratic.
    QuadIn,
    /// Ease in only, cubic.
    CubicIn,
    /// Ease out only, sine.
    SineOut,
    /// Ease out only, quadratic.
    QuadOut,
    /// Ease out only, cubic.
    CubicOut,
    /// A caller-supplied curve.
    Custom(fn(f64) -> f64),
}

impl Easing {
    /// Progress at elapsed fraction `t`.
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::Sinusoidal => (1.0 - (t * PI).cos()) / 2.0,
            Self::Quadratic => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    (4.0 - 2.0 * t) * t - 1.0
                }
            }
            Self::Cubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    (t - 1.0) * (2.0 * t - 2.0) * (2.0 * t - 2.0) + 1.0
                }
            }
            Self::Elastic => {
                if t <= 0.0 {
                    0.0
                } else {
                    (0.04 - 0.04 / t) * (25.0 * t).sin() + 1.0
                }
            }
            Self::SineIn => 1.0 - (t * FRAC_PI_2).cos(),
            Self::QuadIn => t * t,
            Self::CubicIn => t * t * t,
            Self::SineOut => (t * FRAC_PI_2).sin(),
            Self::QuadOut => t * (2.0 - t),
            Self::CubicOut => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Self::Custom(f) => f(t),
        }
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Linear => "linear",
            Self::Sinusoidal => "sinusoidal",
            Self::Quadratic => "quadratic",
            Self::Cubic => "cubic",
            Self::Elastic => "elastic",
            Self::SineIn => "sine_in",
            Self::QuadIn => "quad_in",
            Self::CubicIn => "cubic_in",
            Self::SineOut => "sine_out",
            Self::QuadOut => "quad_out",
            Self::CubicOut => "cubic_out",
            Self::Custom(_) => "custom",
        };
        f.write_str(name)
    }
}

impl FromStr for Easing {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "linear" => Self::Linear,
            "sinusoidal" => Self::Sinusoidal,
            "quadratic" => Self::Quadratic,
            "cubic" => Self::Cubic,
            "elastic" => Self::Elastic,
            "sine_in" => Self::SineIn,
            "quad_in" => Self::QuadIn,
            "cubic_in" => Self::CubicIn,
            "sine_out" => Self::SineOut,
            "quad_out" => Self::QuadOut,
            "cubic_out" => Self::CubicOut,
            _ => return Err(Error::Invalid(format!("unknown easing: {s}"))),
        })
    }
}

/// A time-boxed interpolation of one value of one morph.
pub struct Animation {
    /// The morph whose value is animated.
    target: NodeId,
    /// Reads the starting value.
    getter: Getter,
    /// Writes interpolated values.
    setter: Setter,
    /// Total change over the animation.
    delta: f64,
    /// Total running time.
    duration: Duration,
    /// Progress curve.
    easing: Easing,
    /// Completion callback, consumed on natural completion.
    on_complete: Option<OnComplete>,
    /// Value read when started.
    start_value: f64,
    /// `start_value + delta`.
    destination: f64,
    /// When the destination is reached.
    end_time: Option<Instant>,
    /// Cleared exactly once, on completion or cancellation.
    active: bool,
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("target", &self.target)
            .field("delta", &self.delta)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("destination", &self.destination)
            .field("active", &self.active)
            .finish()
    }
}

impl Animation {
    /// An animation of `target` changing by `delta` over `duration`.
    pub fn new(
        target: NodeId,
        getter: impl Fn(&dyn ReadContext) -> f64 + 'static,
        setter: impl FnMut(&mut dyn Context, f64) + 'static,
        delta: f64,
        duration: Duration,
    ) -> Self {
        Self {
            target,
            getter: Box::new(getter),
            setter: Box::new(setter),
            delta,
            duration,
            easing: Easing::default(),
            on_complete: None,
            start_value: 0.0,
            destination: delta,
            end_time: None,
            active: false,
        }
    }

    /// Set the progress curve.
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Run `f` once the destination has been written.
    pub fn on_complete(mut self, f: impl FnOnce(&mut dyn Context) + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// The animated morph.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// True until completed or cancelled.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The value written on completion.
    pub fn destination(&self) -> f64 {
        self.destination
    }

    /// The value the animation would write at `now`.
    pub fn value_at(&self, now: Instant) -> f64 {
        let Some(end) = self.end_time else {
            return self.start_value;
        };
        if now >= end || self.duration.is_zero() {
            return self.destination;
        }
        let remaining = (end - now).as_secs_f64() / self.duration.as_secs_f64();
        self.start_value + self.delta * self.easing.apply(1.0 - remaining)
    }

    /// Capture the starting value and arm the deadline.
    pub(crate) fn start(&mut self, core: &Core, now: Instant) {
        if let Some(ctx) = core.read_context(self.target) {
            self.start_value = (self.getter)(&ctx);
        }
        self.destination = self.start_value + self.delta;
        self.end_time = Some(now + self.duration);
        self.active = true;
    }

    /// Advance to `now`. Completes, running `on_complete`, once the deadline
    /// has passed.
    pub(crate) fn step(&mut self, core: &mut Core, now: Instant) {
        if !self.active {
            return;
        }
        if !core.nodes.contains_key(self.target) {
            self.active = false;
            return;
        }
        let value = self.value_at(now);
        let done = self.end_time.is_none_or(|end| now >= end);
        let mut ctx = CoreContext::new(core, self.target);
        (self.setter)(&mut ctx, value);
        if done {
            self.active = false;
            if let Some(f) = self.on_complete.take() {
                f(&mut ctx);
            }
        }
    }

    /// Jump to the destination and deactivate without running
    /// `on_complete`.
    pub(crate) fn finish(&mut self, core: &mut Core) {
        if !self.active {
            return;
        }
        self.active = false;
        if core.nodes.contains_key(self.target) {
            let mut ctx = CoreContext::new(core, self.target);
            (self.setter)(&mut ctx, self.destination);
        }
    }

    /// Deactivate without writing anything or running `on_complete`.
    pub(crate) fn cancel(&mut self) {
        self.active = false;
    }
}

/// The world's animation queue.
///
/// Each animation sits in a slot that is emptied while the animation runs,
/// so a completion callback can reach a companion animation through the
/// core without aliasing the one being stepped.
#[derive(Default)]
pub(crate) struct Animations {
    /// Queue entries in start order.
    slots: Vec<(AnimationId, Option<Animation>)>,
    /// Next id to hand out.
    next: u64,
}

impl Animations {
    /// Queue a started animation.
    pub(crate) fn push(&mut self, animation: Animation) -> AnimationId {
        let id = AnimationId(self.next);
        self.next += 1;
        self.slots.push((id, Some(animation)));
        id
    }

    /// Ids of everything queued, in start order.
    pub(crate) fn ids(&self) -> Vec<AnimationId> {
        self.slots.iter().map(|(id, _)| *id).collect()
    }

    /// Borrow an animation that is not currently running.
    pub(crate) fn get(&self, id: AnimationId) -> Option<&Animation> {
        self.slots
            .iter()
            .find(|(i, _)| *i == id)
            .and_then(|(_, a)| a.as_ref())
    }

    /// Mutably borrow an animation that is not currently running.
    pub(crate) fn get_mut(&mut self, id: AnimationId) -> Option<&mut Animation> {
        self.slots
            .iter_mut()
            .find(|(i, _)| *i == id)
            .and_then(|(_, a)| a.as_mut())
    }

    /// Take an animation out of its slot.
    pub(crate) fn take(&mut self, id: AnimationId) -> Option<Animation> {
        self.slots
            .iter_mut()
            .find(|(i, _)| *i == id)
            .and_then(|(_, a)| a.take())
    }

    /// Put an animation back into its slot.
    pub(crate) fn restore(&mut self, id: AnimationId, animation: Animation) {
        if let Some((_, slot)) = self.slots.iter_mut().find(|(i, _)| *i == id) {
            *slot = Some(animation);
        }
    }

    /// Every queued animation targeting `target`.
    pub(crate) fn targeting(&self, target: NodeId) -> Vec<AnimationId> {
        self.slots
            .iter()
            .filter(|(_, a)| a.as_ref().is_some_and(|a| a.target == target))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Drop inactive animations.
    pub(crate) fn prune(&mut self) {
        self.slots
            .retain(|(_, a)| a.as_ref().is_some_and(Animation::is_active));
    }

    /// Number of queued animations, active or not.
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}

/// Advance every queued animation once, then drop the finished ones.
/// Animations started during this pass first step on the next one.
pub(crate) fn step_animations(core: &mut Core, now: Instant) {
    for id in core.animations.ids() {
        let Some(mut animation) = core.animations.take(id) else {
            continue;
        };
        animation.step(core, now);
        core.animations.restore(id, animation);
    }
    core.animations.prune();
}
