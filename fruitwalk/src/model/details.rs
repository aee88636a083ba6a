//! Full record for a single location.

use std::fmt;

use chrono::Month;
use serde::{Deserialize, Deserializer};

/// Who owns the land a location sits on.
///
/// Sent by the server as an integer code 0 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyAccess {
    UserOwned,
    OwnerPermission,
    PublicLand,
    PublicOverhang,
    PrivateProperty,
}

impl PropertyAccess {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::UserOwned),
            1 => Some(Self::OwnerPermission),
            2 => Some(Self::PublicLand),
            3 => Some(Self::PublicOverhang),
            4 => Some(Self::PrivateProperty),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::UserOwned => "Posted by a Falling Fruit User",
            Self::OwnerPermission => "Owner permits access",
            Self::PublicLand => "Located on public land",
            Self::PublicOverhang => "Located on private property with public overhang",
            Self::PrivateProperty => "Warning: Located on private property",
        }
    }
}

impl fmt::Display for PropertyAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Detail record from the location details endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationDetails {
    pub id: u64,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub type_ids: Vec<u32>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Zero-based month the season starts
    #[serde(default)]
    pub season_start: Option<u8>,
    /// Zero-based month the season ends
    #[serde(default)]
    pub season_stop: Option<u8>,
    #[serde(default, deserialize_with = "access_code")]
    pub access: Option<PropertyAccess>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl LocationDetails {
    /// Human-readable fruiting season.
    ///
    /// Empty when the season is missing or out of range.
    pub fn fruiting_display(&self) -> String {
        let (Some(start), Some(stop)) = (self.season_start, self.season_stop) else {
            return String::new();
        };
        if start == 0 && stop == 11 {
            return String::from("Fruiting year round");
        }
        match (month_name(start), month_name(stop)) {
            (Some(from), Some(to)) => format!("Fruiting from {} to {}", from, to),
            _ => String::new(),
        }
    }
}

fn month_name(zero_based: u8) -> Option<&'static str> {
    let month = Month::try_from(zero_based.checked_add(1)?).ok()?;
    Some(month.name())
}

fn access_code<'de, D>(deserializer: D) -> Result<Option<PropertyAccess>, D::Error>
where
    D: Deserializer<'de>,
{
    let code: Option<u8> = Option::deserialize(deserializer)?;
    Ok(code.and_then(PropertyAccess::from_code))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": 1757043,
        "lat": 38.2282973,
        "lng": -122.64635269999997,
        "type_ids": [1],
        "user_id": 16365,
        "author": "Rebeca Abrams",
        "season_start": null,
        "season_stop": null,
        "access": 3,
        "description": null,
        "created_at": "2019-05-08T22:32:03.536Z",
        "updated_at": "2019-05-08T22:32:03.536Z",
        "address": null,
        "city": "Petaluma"
    }"#;

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let details: LocationDetails = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(details.id, 1757043);
        assert_eq!(details.author.as_deref(), Some("Rebeca Abrams"));
        assert_eq!(details.access, Some(PropertyAccess::PublicOverhang));
        assert_eq!(details.address, None);
        assert_eq!(details.fruiting_display(), "");
    }

    #[test]
    fn test_unknown_access_code_is_none() {
        let json = r#"{"id": 1, "lat": 0.0, "lng": 0.0, "access": 9}"#;
        let details: LocationDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.access, None);
    }

    #[test]
    fn test_fruiting_display() {
        let mut details: LocationDetails = serde_json::from_str(SAMPLE).unwrap();

        details.season_start = Some(0);
        details.season_stop = Some(11);
        assert_eq!(details.fruiting_display(), "Fruiting year round");

        details.season_start = Some(5);
        details.season_stop = Some(7);
        assert_eq!(details.fruiting_display(), "Fruiting from June to August");

        details.season_stop = Some(12);
        assert_eq!(details.fruiting_display(), "");
    }

    #[test]
    fn test_access_descriptions() {
        assert_eq!(
            PropertyAccess::from_code(4).map(|a| a.to_string()),
            Some(String::from("Warning: Located on private property"))
        );
        assert_eq!(PropertyAccess::from_code(5), None);
    }
}
