//! Fruit type filtering.
//!
//! A [`FruitFilter`] is built from example locations, for instance the ones
//! a user picked, or from free-text names. A location matches when it shares
//! a type id or any name word with the filter. Words are split on commas and
//! spaces and compared case-insensitively.

use std::collections::BTreeSet;

use crate::model::FruitLocation;

/// Matches locations by type id or name word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FruitFilter {
    names: BTreeSet<String>,
    ids: BTreeSet<u32>,
}

impl FruitFilter {
    /// Builds a filter from the types of `locations`.
    pub fn from_locations<'a>(locations: impl IntoIterator<Item = &'a FruitLocation>) -> Self {
        let mut filter = Self::default();
        for location in locations {
            filter.ids.extend(location.type_ids.iter().copied());
            for name in location.type_names.iter().flatten() {
                filter.names.extend(words(name));
            }
        }
        filter
    }

    /// Builds a filter from free-text names such as `"apple"` or `"fig, black"`.
    pub fn from_names<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Self {
        let mut filter = Self::default();
        for name in names {
            filter.names.extend(words(name.as_ref()));
        }
        filter
    }

    /// Adds a type id to match.
    pub fn with_type_id(mut self, id: u32) -> Self {
        self.ids.insert(id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.ids.is_empty()
    }

    /// Name words joined for display.
    pub fn display_name(&self) -> String {
        self.names.iter().cloned().collect::<Vec<_>>().join(" ")
    }

    /// Returns true if `location` shares a name word or type id with the filter.
    pub fn matches(&self, location: &FruitLocation) -> bool {
        let name_match = location
            .type_names
            .iter()
            .flatten()
            .any(|name| self.matches_name(name));

        name_match || location.type_ids.iter().any(|id| self.ids.contains(id))
    }

    /// Returns true if any word of `name` is one of the filter's name words.
    pub fn matches_name(&self, name: &str) -> bool {
        words(name).any(|word| self.names.contains(&word))
    }
}

fn words(name: &str) -> impl Iterator<Item = String> + '_ {
    name.split([',', ' '])
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
}
