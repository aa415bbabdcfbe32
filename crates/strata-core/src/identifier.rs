//! Interned node identifiers.
//!
//! [`Id`] is a copyable handle to a string stored once in a process-wide
//! interner. Comparing and hashing an `Id` never touches the string itself,
//! which keeps the predecessor maps built during layout cheap.
//!
//! Ids are either supplied explicitly (for example a construct abbreviation
//! such as `PU`) or derived from a display name with [`derive_id`].

use std::{
    fmt,
    sync::{Mutex, OnceLock, PoisonError},
};

use serde::{Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Maximum number of characters kept by [`derive_id`].
pub const DERIVED_ID_MAX_LEN: usize = 15;

static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut interner)
}

/// Identifier of a node within a single diagram.
///
/// # Examples
///
/// ```
/// use strata_core::identifier::Id;
///
/// let pu = Id::new("PU");
/// assert_eq!(pu, "PU");
///
/// let derived = Id::derive("Perceived Ease of Use");
/// assert_eq!(derived, "Perceived-Ease-");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its identifier.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Derives an identifier from a display name using [`derive_id`].
    pub fn derive(display_name: &str) -> Self {
        Self::new(&derive_id(display_name))
    }

    /// Returns `true` for the empty identifier.
    ///
    /// Nodes carrying an empty id are left out of every layout.
    pub fn is_empty(&self) -> bool {
        self.with_str(str::is_empty)
    }

    /// Runs `f` with the string this id was interned from.
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        with_interner(|interner| f(interner.resolve(self.0).unwrap_or_default()))
    }
}

/// Turns a display name into an identifier string.
///
/// Leading and trailing whitespace is dropped, every inner run of whitespace
/// becomes a single `-`, and the result is truncated to
/// [`DERIVED_ID_MAX_LEN`] characters.
///
/// The rule is not injective: long names sharing a prefix collapse to the
/// same id. Collisions are detected when a diagram is assembled.
///
/// ```
/// use strata_core::identifier::derive_id;
///
/// assert_eq!(derive_id("Satisfaction"), "Satisfaction");
/// assert_eq!(derive_id("  Actual   Use "), "Actual-Use");
/// assert_eq!(derive_id("Continuance Intention"), "Continuance-Int");
/// ```
pub fn derive_id(display_name: &str) -> String {
    display_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(DERIVED_ID_MAX_LEN)
        .collect()
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.with_str(str::to_owned);
        f.write_str(&value)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.with_str(|value| value == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.with_str(str::to_owned);
        serializer.serialize_str(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_interns_once() {
        let a = Id::new("PEOU");
        let b = Id::new("PEOU");
        let c = Id::new("PU");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, "PEOU");
    }

    #[test]
    fn test_derive_replaces_whitespace_runs() {
        assert_eq!(derive_id("Attitude Toward Using"), "Attitude-Toward");
        assert_eq!(derive_id("Social\tInfluence"), "Social-Influenc");
        assert_eq!(derive_id("Trust"), "Trust");
    }

    #[test]
    fn test_derive_trims_surrounding_whitespace() {
        assert_eq!(derive_id(" Trust"), "Trust");
        assert_eq!(derive_id("Trust \n"), "Trust");
        assert_eq!(derive_id("   Perceived Usefulness"), "Perceived-Usefu");
    }

    #[test]
    fn test_derive_truncates_by_character() {
        // Multi-byte characters must not be split.
        let derived = derive_id("Überzeugung Ökonomie");
        assert_eq!(derived.chars().count(), DERIVED_ID_MAX_LEN);
        assert_eq!(derived, "Überzeugung-Öko");
    }

    #[test]
    fn test_derive_blank_name_is_empty() {
        assert_eq!(derive_id("   "), "");
        assert!(Id::derive(" \n ").is_empty());
        assert!(!Id::derive("Habit").is_empty());
    }

    #[test]
    fn test_derive_collision_on_shared_prefix() {
        assert_eq!(
            Id::derive("Perceived Usefulness X"),
            Id::derive("Perceived Usefulness Y")
        );
    }

    #[test]
    fn test_display_and_str_comparisons() {
        let id = Id::new("BI");
        assert_eq!(format!("{id}"), "BI");
        assert!(id == "BI");
        assert!(id != "AU");

        let name = String::from("BI");
        assert!(id == name.as_str());
    }
}
