//! # Tick-Driven Animations
//!
//! Every animation maps a tick count onto a value between its start and end
//! value and hands that value to an [`Animate`] target each tick. Ticks come
//! from the outer poll loop's monotonic counter; nothing here reads a clock.
//!
//! An animation is retired the first tick its value equals the end value.
//! Nothing loops or reverses on its own: an owner that wants the reverse
//! pushes a new animation.

/// Shape of the value curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Proportional to elapsed ticks.
    Linear,
    /// Smoothstep: slow at both ends, exact at both endpoints.
    #[default]
    Smooth,
}

/// Fixed point scale used by [`Interpolation::Smooth`].
const FIXED_ONE: i64 = 1 << 16;

/// Maps ticks onto values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interpolator {
    /// Curve shape.
    pub kind: Interpolation,
    /// First tick of the animation.
    pub start_time: u64,
    /// Length in ticks.
    pub duration: u64,
    /// Value at and before `start_time`.
    pub start_value: u32,
    /// Value at and after `start_time + duration`.
    pub end_value: u32,
}

impl Interpolator {
    /// The value at tick `now`, clamped to the endpoints outside the
    /// animation's interval.
    #[must_use]
    pub fn value_at(&self, now: u64) -> u32 {
        if now <= self.start_time {
            return self.start_value;
        }
        let elapsed = now - self.start_time;
        if elapsed >= self.duration {
            return self.end_value;
        }

        let start = i64::from(self.start_value);
        let delta = i64::from(self.end_value) - start;
        // elapsed < duration here, so the ratio stays below one.
        let value = match self.kind {
            Interpolation::Linear => {
                start + scale(delta, u128::from(elapsed), u128::from(self.duration))
            }
            Interpolation::Smooth => {
                let t = i64::try_from((u128::from(elapsed) << 16) / u128::from(self.duration))
                    .unwrap_or(FIXED_ONE);
                let t2 = t * t / FIXED_ONE;
                let t3 = t2 * t / FIXED_ONE;
                let eased = 3 * t2 - 2 * t3;
                start + delta * eased / FIXED_ONE
            }
        };
        u32::try_from(value.clamp(0, i64::from(u32::MAX))).unwrap_or(self.end_value)
    }
}

/// `delta * num / den` without intermediate overflow.
fn scale(delta: i64, num: u128, den: u128) -> i64 {
    let magnitude = u128::from(delta.unsigned_abs()) * num / den;
    let magnitude = i64::try_from(magnitude).unwrap_or(i64::MAX);
    if delta < 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Visual property an animation drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    /// Global picker opacity.
    Opacity,
    /// Horizontal picker offset. The first tick shifts the picker
    /// `distance` pixels right of its resting place; the animated value then
    /// moves it back left. Only the change in shift is applied each tick, so
    /// layout moves made between ticks are kept.
    HorizontalSlide {
        /// Total travel in pixels.
        distance: u32,
        /// Shift currently applied to the picker, zero before the first tick.
        shift: i64,
    },
    /// Frame index of the icon poof sequence.
    ImageIndexSweep,
}

/// Receives animated values.
pub trait Animate {
    /// Applies `value` to the property `kind` drives and queues a redraw of
    /// what changed.
    fn animate(&mut self, kind: &mut AnimationKind, value: u32);
}

/// A scheduled animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    /// What it drives.
    pub kind: AnimationKind,
    /// How it moves.
    pub interpolator: Interpolator,
}

impl Animation {
    /// Creates an animation.
    #[must_use]
    pub const fn new(kind: AnimationKind, interpolator: Interpolator) -> Self {
        Self { kind, interpolator }
    }
}

/// Runs animations in insertion order.
#[derive(Debug, Default)]
pub struct AnimationScheduler {
    animations: Vec<Animation>,
}

impl AnimationScheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            animations: Vec::new(),
        }
    }

    /// Appends an animation; it runs from the next tick.
    pub fn push(&mut self, animation: Animation) {
        self.animations.push(animation);
    }

    /// Live animations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    /// Returns true once every animation has retired.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Live animations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Animation> {
        self.animations.iter()
    }

    /// Advances every animation to tick `now` and returns how many retired.
    pub fn tick<T: Animate + ?Sized>(&mut self, now: u64, target: &mut T) -> usize {
        let before = self.animations.len();
        self.animations.retain_mut(|animation| {
            let value = animation.interpolator.value_at(now);
            target.animate(&mut animation.kind, value);
            let done = value == animation.interpolator.end_value;
            if done {
                tracing::debug!(kind = ?animation.kind, now, "animation finished");
            }
            !done
        });
        before - self.animations.len()
    }
}

impl<'a> IntoIterator for &'a AnimationScheduler {
    type Item = &'a Animation;
    type IntoIter = std::slice::Iter<'a, Animation>;

    fn into_iter(self) -> Self::IntoIter {
        self.animations.iter()
    }
}
