//! Contacts: scheduled, directed, capacity-limited links between nodes.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Number of priority classes tracked in a contact's residual volume.
pub const PRIORITY_CLASSES: usize = 3;

/// An opaque identifier, numeric or symbolic.
///
/// Numbers order before names so that sets of identifiers iterate
/// deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Ident {
    Number(i64),
    Name(String),
}

pub type NodeId = Ident;
pub type ContactId = Ident;

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ident::Number(n) => write!(f, "{}", n),
            Ident::Name(name) => f.write_str(name),
        }
    }
}

/// Plan files may write numeric ids as floats (`1.0`); whole values are
/// accepted as numbers, anything with a fractional part is rejected.
impl<'de> Deserialize<'de> for Ident {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Integer(i64),
            Float(f64),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Integer(n) => Ok(Ident::Number(n)),
            // 2^63 is exactly representable, so the upper bound is exclusive.
            Raw::Float(x)
                if x.fract() == 0.0 && x >= i64::MIN as f64 && x < i64::MAX as f64 =>
            {
                Ok(Ident::Number(x as i64))
            }
            Raw::Float(x) => Err(de::Error::custom(format!(
                "identifier {x} is not a whole number"
            ))),
            Raw::Name(name) => Ok(Ident::Name(name)),
        }
    }
}

impl FromStr for Ident {
    type Err = Infallible;

    /// Strings made only of ASCII digits become numbers; anything else is a name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = s.parse::<i64>() {
                return Ok(Ident::Number(n));
            }
        }
        Ok(Ident::Name(s.to_string()))
    }
}

impl From<i64> for Ident {
    fn from(n: i64) -> Self {
        Ident::Number(n)
    }
}

impl From<i32> for Ident {
    fn from(n: i32) -> Self {
        Ident::Number(i64::from(n))
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Ident::Name(name.to_string())
    }
}

impl From<String> for Ident {
    fn from(name: String) -> Self {
        Ident::Name(name)
    }
}

/// A directed link usable only while open.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    pub id: ContactId,
    pub from: NodeId,
    pub to: NodeId,
    pub start: f64,
    pub end: f64,
    /// One-way light time.
    pub owlt: f64,
    pub rate: f64,
    residual_volume: [f64; PRIORITY_CLASSES],
}

impl Contact {
    /// Creates a validated contact with every priority class holding the
    /// full contact volume (`rate * (end - start)`).
    pub fn new(
        id: impl Into<ContactId>,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        start: f64,
        end: f64,
        owlt: f64,
        rate: f64,
    ) -> Result<Self, PlanError> {
        let id = id.into();
        let invalid = |reason: &str| PlanError::InvalidContact {
            id: id.clone(),
            reason: reason.to_string(),
        };

        if !(start.is_finite() && end.is_finite() && owlt.is_finite() && rate.is_finite()) {
            return Err(invalid("times, owlt and rate must be finite"));
        }
        if start >= end {
            return Err(invalid("start must precede end"));
        }
        if owlt < 0.0 {
            return Err(invalid("owlt must be non-negative"));
        }
        if rate < 0.0 {
            return Err(invalid("rate must be non-negative"));
        }

        let volume = rate * (end - start);
        Ok(Self {
            id,
            from: from.into(),
            to: to.into(),
            start,
            end,
            owlt,
            rate,
            residual_volume: [volume; PRIORITY_CLASSES],
        })
    }

    /// Total volume the contact can carry over its window.
    pub fn volume(&self) -> f64 {
        self.rate * (self.end - self.start)
    }

    pub fn residual_volume(&self) -> &[f64; PRIORITY_CLASSES] {
        &self.residual_volume
    }

    /// Largest residual volume over all priority classes.
    pub fn max_residual_volume(&self) -> f64 {
        self.residual_volume
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// A contact carries traffic only while some class has volume left.
    pub fn has_residual_volume(&self) -> bool {
        self.max_residual_volume() > 0.0
    }

    /// Reduces one priority class, clamping at zero.
    pub fn consume_volume(&mut self, priority: usize, amount: f64) -> Result<(), PlanError> {
        let slot = self
            .residual_volume
            .get_mut(priority)
            .ok_or(PlanError::InvalidPriority {
                priority,
                classes: PRIORITY_CLASSES,
            })?;
        *slot = (*slot - amount).max(0.0);
        Ok(())
    }

    /// Whether this contact is `other` traversed in the opposite direction.
    pub fn reverses(&self, other: &Contact) -> bool {
        self.from == other.to && self.to == other.from
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}→{}]", self.id, self.from, self.to)
    }
}
