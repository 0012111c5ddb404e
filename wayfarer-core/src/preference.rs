//! Traveller preferences: the tags that steer scoring weights and path
//! strategy.
//!
//! A [`PreferenceSet`] is merged once per planning call from the traveller's
//! defaults and the request's overrides, then treated as immutable.

use std::collections::BTreeSet;
use std::str::FromStr;

use thiserror::Error;

use crate::PoiCategory;

/// A single routing preference.
///
/// Textual forms are `fastest`, `shortest`, `avoid_highway`, `avoid_toll`,
/// `economical` and any [`PoiCategory`] name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum Preference {
    /// Minimise travel time.
    Fastest,
    /// Minimise distance.
    Shortest,
    /// Stay off motorways.
    AvoidHighway,
    /// Stay off toll roads.
    AvoidToll,
    /// Favour cheaper journeys.
    Economical,
    /// Surface points of interest of this category along the route.
    Poi(PoiCategory),
}

/// Error returned when a preference tag is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown preference '{0}'")]
pub struct PreferenceParseError(pub String);

impl Preference {
    /// Return the preference's textual tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fastest => "fastest",
            Self::Shortest => "shortest",
            Self::AvoidHighway => "avoid_highway",
            Self::AvoidToll => "avoid_toll",
            Self::Economical => "economical",
            Self::Poi(category) => category.as_str(),
        }
    }
}

impl std::fmt::Display for Preference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preference {
    type Err = PreferenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fastest" => Ok(Self::Fastest),
            "shortest" => Ok(Self::Shortest),
            "avoid_highway" => Ok(Self::AvoidHighway),
            "avoid_toll" => Ok(Self::AvoidToll),
            "economical" => Ok(Self::Economical),
            other => PoiCategory::from_str(other)
                .map(Self::Poi)
                .map_err(|_| PreferenceParseError(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Preference {
    type Error = PreferenceParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Preference> for String {
    fn from(value: Preference) -> Self {
        value.as_str().to_owned()
    }
}

/// An ordered, duplicate-free set of preferences.
///
/// # Examples
/// ```
/// use wayfarer_core::{Preference, PreferenceSet};
///
/// let defaults = PreferenceSet::from_iter([Preference::Shortest, Preference::AvoidToll]);
/// let overrides = PreferenceSet::from_iter([Preference::Fastest]);
/// let merged = PreferenceSet::merged(&defaults, &overrides);
///
/// assert!(merged.contains(Preference::Fastest));
/// assert!(merged.contains(Preference::AvoidToll));
/// assert!(!merged.contains(Preference::Shortest));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PreferenceSet {
    tags: BTreeSet<Preference>,
}

impl PreferenceSet {
    /// Construct an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge traveller defaults with per-request overrides.
    ///
    /// The result is the union of both sets, except that an override naming
    /// `fastest` or `shortest` drops the other objective from the defaults.
    #[must_use]
    pub fn merged(defaults: &Self, overrides: &Self) -> Self {
        let overrides_objective =
            overrides.contains(Preference::Fastest) || overrides.contains(Preference::Shortest);
        defaults
            .iter()
            .filter(|tag| {
                !overrides_objective || !matches!(tag, Preference::Fastest | Preference::Shortest)
            })
            .chain(overrides.iter())
            .collect()
    }

    /// Add a preference while returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, preference: Preference) -> Self {
        self.tags.insert(preference);
        self
    }

    /// Report whether `preference` is present.
    #[must_use]
    pub fn contains(&self, preference: Preference) -> bool {
        self.tags.contains(&preference)
    }

    /// Iterate over the preferences in order.
    pub fn iter(&self) -> impl Iterator<Item = Preference> + '_ {
        self.tags.iter().copied()
    }

    /// POI categories requested by the traveller.
    #[must_use]
    pub fn poi_categories(&self) -> Vec<PoiCategory> {
        self.iter()
            .filter_map(|tag| match tag {
                Preference::Poi(category) => Some(category),
                _ => None,
            })
            .collect()
    }

    /// Report whether no preferences were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Derive the path-source strategy for this set.
    #[must_use]
    pub fn strategy(&self) -> RouteStrategy {
        RouteStrategy {
            shortest: self.contains(Preference::Shortest)
                && !self.contains(Preference::Fastest),
            avoid_tolls: self.contains(Preference::AvoidToll),
            avoid_highways: self.contains(Preference::AvoidHighway),
        }
    }
}

impl FromIterator<Preference> for PreferenceSet {
    fn from_iter<I: IntoIterator<Item = Preference>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}

impl FromStr for PreferenceSet {
    type Err = PreferenceParseError;

    /// Parse a comma-separated list such as `"fastest,avoid_toll,fuel"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(Preference::from_str)
            .collect()
    }
}

/// Routing constraints handed to a path source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteStrategy {
    /// Prefer distance over time.
    pub shortest: bool,
    /// Exclude toll roads.
    pub avoid_tolls: bool,
    /// Exclude motorways.
    pub avoid_highways: bool,
}
