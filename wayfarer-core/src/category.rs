//! Categories of roadside points of interest.
//!
//! The enum offers compile-time safety for POI preference lookups.
//!
//! # Examples
//! ```
//! use wayfarer_core::PoiCategory;
//!
//! assert_eq!(PoiCategory::Fuel.as_str(), "fuel");
//! assert_eq!(PoiCategory::RestArea.to_string(), "rest_area");
//! ```
/// A category of roadside point of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PoiCategory {
    /// Petrol and diesel stations.
    Fuel,
    /// Electric vehicle charging points.
    Charging,
    /// Restaurants, cafes and takeaways.
    Food,
    /// Car parks.
    Parking,
    /// Hotels and other overnight stays.
    Lodging,
    /// Motorway service and rest areas.
    RestArea,
    /// Viewpoints and scenic stops.
    Scenic,
}

impl PoiCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Fuel,
        Self::Charging,
        Self::Food,
        Self::Parking,
        Self::Lodging,
        Self::RestArea,
        Self::Scenic,
    ];

    /// Return the category as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use wayfarer_core::PoiCategory;
    ///
    /// assert_eq!(PoiCategory::Charging.as_str(), "charging");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fuel => "fuel",
            Self::Charging => "charging",
            Self::Food => "food",
            Self::Parking => "parking",
            Self::Lodging => "lodging",
            Self::RestArea => "rest_area",
            Self::Scenic => "scenic",
        }
    }
}

impl std::fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PoiCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == lowered)
            .ok_or_else(|| format!("unknown POI category '{s}'"))
    }
}
