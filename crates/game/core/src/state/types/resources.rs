//! Resource pools tracked per unit (health, aura, movement points).
//!
//! Every pool is a [`ResourceMeter`] whose `current` value is kept inside
//! `[0, maximum]` by construction: all writes go through [`ResourceMeter::apply`]
//! or [`ResourceMeter::refill`].

/// Integer resource meter clamped to `[0, maximum]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    current: u32,
    maximum: u32,
}

impl ResourceMeter {
    /// Creates a meter, clamping `current` to `maximum`.
    pub const fn new(current: u32, maximum: u32) -> Self {
        let current = if current > maximum { maximum } else { current };
        Self { current, maximum }
    }

    /// Creates a meter at its maximum value.
    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    #[inline]
    pub const fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub const fn maximum(&self) -> u32 {
        self.maximum
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Adds a signed delta and clamps the result. Returns the new value.
    pub fn apply(&mut self, delta: i32) -> u32 {
        let next = i64::from(self.current) + i64::from(delta);
        self.current = next.clamp(0, i64::from(self.maximum)) as u32;
        self.current
    }

    /// Removes `amount` if available. Returns false (and leaves the meter
    /// untouched) when the pool holds less than `amount`.
    pub fn try_spend(&mut self, amount: u32) -> bool {
        if self.current < amount {
            return false;
        }
        self.current -= amount;
        true
    }

    /// Restores the meter to its maximum.
    pub fn refill(&mut self) {
        self.current = self.maximum;
    }
}

/// Classification of incoming damage, carried on damage events.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageKind {
    #[default]
    Physical,
    Fire,
    Frost,
    Lightning,
    Poison,
    Arcane,
    /// Ignores every mitigation the host may apply.
    True,
}

/// Result of a successful health mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HealthChange {
    pub previous: u32,
    pub current: u32,
    /// True only on the call that moved the unit from alive to defeated.
    pub defeated: bool,
}

impl HealthChange {
    /// Signed difference actually applied after clamping.
    pub fn delta(&self) -> i64 {
        i64::from(self.current) - i64::from(self.previous)
    }
}
