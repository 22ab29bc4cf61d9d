//! Launch site records as delivered by the data client

use crate::projection::is_valid_coordinate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One launch pad. Coordinates are optional: a record without usable
/// coordinates still deserializes and is dropped later by the scene builder.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LaunchSite {
    #[serde(default, deserialize_with = "nullable_string")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub locality: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub region: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub latitude: Option<f64>,
}

impl LaunchSite {
    /// (lon, lat) if both are present and in range
    pub fn coordinate(&self) -> Option<(f64, f64)> {
        match (self.longitude, self.latitude) {
            (Some(lon), Some(lat)) if is_valid_coordinate(lon, lat) => Some((lon, lat)),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn has_valid_coordinate(&self) -> bool {
        self.coordinate().is_some()
    }

    /// Tooltip text: name, then "locality, region" on a second line
    pub fn tooltip_text(&self) -> String {
        format!("{}\n{}, {}", self.name, self.locality, self.region)
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// Anything that isn't a JSON number counts as missing
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_api_record() {
        let json = r#"{
            "name": "CCSFS SLC 40",
            "full_name": "Cape Canaveral Space Force Station Space Launch Complex 40",
            "locality": "Cape Canaveral",
            "region": "Florida",
            "latitude": 28.5618571,
            "longitude": -80.577366,
            "status": "active",
            "id": "5e9e4501f509094ba4566f84"
        }"#;
        let site: LaunchSite = serde_json::from_str(json).unwrap();
        assert_eq!(site.name, "CCSFS SLC 40");
        assert_eq!(site.coordinate(), Some((-80.577366, 28.5618571)));
    }

    #[test]
    fn non_numeric_or_null_coordinates_are_missing() {
        let json = r#"{"name": "x", "latitude": "north", "longitude": null, "locality": null}"#;
        let site: LaunchSite = serde_json::from_str(json).unwrap();
        assert_eq!(site.latitude, None);
        assert_eq!(site.longitude, None);
        assert_eq!(site.locality, "");
        assert!(!site.has_valid_coordinate());
    }

    #[test]
    fn out_of_range_is_invalid() {
        let site = LaunchSite {
            id: "a".into(),
            name: "a".into(),
            locality: String::new(),
            region: String::new(),
            status: String::new(),
            longitude: Some(200.0),
            latitude: Some(10.0),
        };
        assert!(!site.has_valid_coordinate());
    }

    #[test]
    fn tooltip_text_has_two_lines() {
        let site = LaunchSite {
            id: "s".into(),
            name: "Starlink-10".into(),
            locality: "Cape Canaveral".into(),
            region: "Florida".into(),
            status: "active".into(),
            longitude: Some(-80.6),
            latitude: Some(28.6),
        };
        assert_eq!(site.tooltip_text(), "Starlink-10\nCape Canaveral, Florida");
    }
}
