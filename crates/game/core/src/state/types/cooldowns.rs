//! Ability cooldown tracking.
//!
//! A [`CooldownTable`] maps ability ids to the number of turns remaining before
//! the ability may be used again. A missing key means "ready"; the table never
//! stores a zero.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

/// Stable identifier of an ability definition (e.g. `"fireball"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AbilityId(String);

impl AbilityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AbilityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AbilityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AbilityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns remaining per ability. Ordered for deterministic iteration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooldownTable {
    entries: BTreeMap<AbilityId, u32>,
}

impl CooldownTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or overwrites a cooldown. `turns <= 0` marks the ability ready.
    pub fn set(&mut self, ability: impl Into<AbilityId>, turns: i32) {
        let ability = ability.into();
        if turns <= 0 {
            self.entries.remove(&ability);
        } else {
            self.entries.insert(ability, turns as u32);
        }
    }

    /// Turns remaining, or 0 if the ability is ready.
    pub fn get(&self, ability: &str) -> u32 {
        self.entries.get(ability).copied().unwrap_or(0)
    }

    pub fn is_ready(&self, ability: &str) -> bool {
        !self.entries.contains_key(ability)
    }

    /// Advances every cooldown by one turn and drops the ones that finished.
    ///
    /// Returns the abilities that became ready, in id order.
    pub fn tick(&mut self) -> Vec<AbilityId> {
        let mut ready = Vec::new();
        self.entries.retain(|ability, turns| {
            *turns = turns.saturating_sub(1);
            if *turns == 0 {
                ready.push(ability.clone());
                false
            } else {
                true
            }
        });
        ready
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AbilityId, u32)> {
        self.entries.iter().map(|(ability, turns)| (ability, *turns))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
