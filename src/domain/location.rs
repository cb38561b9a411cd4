//! Tracked location metadata and caption selection.

use serde::{Deserialize, Serialize};

/// Country code whose locations are captioned by admin subdivision.
const US_COUNTRY: &str = "US";

/// A reporting region as listed in the bundled reference file.
///
/// Field names on the wire follow the feed (`proviceState` is spelled the
/// way the feed spells it).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackedLocation {
    /// Display title.
    #[serde(default)]
    pub title: String,

    /// Admin-level subdivision (a county, for US locations).
    #[serde(default)]
    pub admin: Option<String>,

    /// Province or state name. May be empty.
    #[serde(rename = "proviceState", default)]
    pub province_state: String,

    /// Country or region name.
    #[serde(rename = "countryRegion", default)]
    pub country_region: String,

    /// Latitude, kept as the feed's string.
    #[serde(default)]
    pub lat: String,

    /// Longitude, kept as the feed's string.
    #[serde(default)]
    pub long: String,
}

impl TrackedLocation {
    /// Returns the admin subdivision, treating an empty string as absent.
    #[must_use]
    pub fn admin_name(&self) -> Option<&str> {
        self.admin.as_deref().filter(|a| !a.is_empty())
    }

    /// Returns `true` if the location is within the US.
    #[must_use]
    pub fn is_us(&self) -> bool {
        self.country_region == US_COUNTRY
    }
}

/// Primary and secondary display labels for a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    /// Primary label.
    pub caption: String,
    /// Secondary label, only set when the primary one is a subdivision.
    pub subcaption: Option<String>,
}

impl Caption {
    /// Selects caption and subcaption from the administrative hierarchy.
    ///
    /// US locations are captioned by admin name with the state beneath it,
    /// falling back to the state alone. Elsewhere the province is the
    /// caption with the country beneath it, falling back to the country
    /// alone when the province is empty.
    #[must_use]
    pub fn for_location(location: &TrackedLocation) -> Self {
        if location.is_us() {
            match location.admin_name() {
                Some(admin) => Self {
                    caption: admin.to_string(),
                    subcaption: Some(location.province_state.clone()),
                },
                None => Self {
                    caption: location.province_state.clone(),
                    subcaption: None,
                },
            }
        } else if location.province_state.is_empty() {
            Self {
                caption: location.country_region.clone(),
                subcaption: None,
            }
        } else {
            Self {
                caption: location.province_state.clone(),
                subcaption: Some(location.country_region.clone()),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn location(admin: Option<&str>, province: &str, country: &str) -> TrackedLocation {
        TrackedLocation {
            title: String::new(),
            admin: admin.map(str::to_string),
            province_state: province.to_string(),
            country_region: country.to_string(),
            lat: "0".to_string(),
            long: "0".to_string(),
        }
    }

    #[test]
    fn us_county_uses_admin_then_state() {
        let c = Caption::for_location(&location(Some("Cook"), "Illinois", "US"));
        assert_eq!(c.caption, "Cook");
        assert_eq!(c.subcaption.as_deref(), Some("Illinois"));
    }

    #[test]
    fn us_state_without_admin_has_no_subcaption() {
        let c = Caption::for_location(&location(None, "New York", "US"));
        assert_eq!(c.caption, "New York");
        assert_eq!(c.subcaption, None);
    }

    #[test]
    fn us_empty_admin_counts_as_absent() {
        let c = Caption::for_location(&location(Some(""), "Texas", "US"));
        assert_eq!(c.caption, "Texas");
        assert_eq!(c.subcaption, None);
    }

    #[test]
    fn country_without_province() {
        let c = Caption::for_location(&location(None, "", "France"));
        assert_eq!(c.caption, "France");
        assert_eq!(c.subcaption, None);
    }

    #[test]
    fn province_with_country() {
        let c = Caption::for_location(&location(None, "Ontario", "Canada"));
        assert_eq!(c.caption, "Ontario");
        assert_eq!(c.subcaption.as_deref(), Some("Canada"));
    }

    #[test]
    fn non_us_ignores_admin() {
        let c = Caption::for_location(&location(Some("Somewhere"), "Ontario", "Canada"));
        assert_eq!(c.caption, "Ontario");
    }

    #[test]
    fn decodes_feed_field_names() {
        let json = r#"{"title":"Cook, Illinois","admin":"Cook","proviceState":"Illinois",
                       "countryRegion":"US","lat":"41.84","long":"-87.81"}"#;
        let Ok(loc) = serde_json::from_str::<TrackedLocation>(json) else {
            panic!("decode failed");
        };
        assert_eq!(loc.province_state, "Illinois");
        assert_eq!(loc.country_region, "US");
        assert_eq!(loc.admin_name(), Some("Cook"));
    }

    #[test]
    fn missing_admin_decodes_as_none() {
        let json = r#"{"title":"France","proviceState":"","countryRegion":"France","lat":"46","long":"2"}"#;
        let Ok(loc) = serde_json::from_str::<TrackedLocation>(json) else {
            panic!("decode failed");
        };
        assert_eq!(loc.admin, None);
    }
}
