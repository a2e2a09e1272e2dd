//! Identifier management using string interning for efficient string storage and comparison
//!
//! This module provides the [`Id`] type used as the stable key of every
//! technology node. Identifiers coming from JSON documents may be strings,
//! numbers or booleans; they are interned by their textual form so that
//! `1`, `1.0` and `"1"` name the same node.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Efficient identifier type using string interning
///
/// # Examples
///
/// ```
/// use techgraph_core::identifier::Id;
///
/// let writing = Id::new("Writing");
/// let same = Id::new("Writing");
///
/// assert_eq!(writing, same);
/// assert_eq!(writing, "Writing");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Creates an `Id` from an integer key, interned by its decimal form.
    ///
    /// # Examples
    ///
    /// ```
    /// use techgraph_core::identifier::Id;
    ///
    /// assert_eq!(Id::from_integer(42), Id::new("42"));
    /// ```
    pub fn from_integer(value: i64) -> Self {
        Self::new(&value.to_string())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        with_interner(|interner| {
            let str_value = interner
                .resolve(self.0)
                .expect("Symbol should exist in interner");
            write!(f, "{str_value}")
        })
    }
}

impl std::str::FromStr for Id {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .is_some_and(|self_str| self_str == other)
        })
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

struct IdVisitor;

impl de::Visitor<'_> for IdVisitor {
    type Value = Id;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number or boolean node identifier")
    }

    fn visit_str<E>(self, value: &str) -> Result<Id, E>
    where
        E: de::Error,
    {
        Ok(Id::new(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Id, E>
    where
        E: de::Error,
    {
        Ok(Id::from_integer(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Id, E>
    where
        E: de::Error,
    {
        Ok(Id::new(&value.to_string()))
    }

    /// Integral floats name the same node as the integer, so `1.0` is `1`.
    fn visit_f64<E>(self, value: f64) -> Result<Id, E>
    where
        E: de::Error,
    {
        const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;
        if value.fract() == 0.0 && value.abs() < EXACT_INTEGER_LIMIT {
            return Ok(Id::from_integer(value as i64));
        }
        Ok(Id::new(&value.to_string()))
    }

    fn visit_bool<E>(self, value: bool) -> Result<Id, E>
    where
        E: de::Error,
    {
        Ok(Id::new(if value { "true" } else { "false" }))
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(IdVisitor)
    }
}
