//! Fire-station coverage mapping.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Maps one street address to the station that covers it.
///
/// Many addresses may share a station number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireStationMapping {
    pub address: String,
    /// Snapshots store this either as a JSON integer or a numeric string.
    #[serde(rename = "station", deserialize_with = "deserialize_station_number")]
    pub station_number: i32,
}

impl FireStationMapping {
    pub fn new(address: impl Into<String>, station_number: i32) -> Self {
        Self {
            address: address.into(),
            station_number,
        }
    }
}

fn deserialize_station_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawStation {
        Number(i32),
        Text(String),
    }

    match RawStation::deserialize(deserializer)? {
        RawStation::Number(value) => Ok(value),
        RawStation::Text(text) => text.trim().parse::<i32>().map_err(|_| {
            de::Error::custom(format!("invalid station number `{text}`"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::FireStationMapping;

    #[test]
    fn station_accepts_integer_and_numeric_string() {
        let from_int: FireStationMapping =
            serde_json::from_str(r#"{"address":"29 15th St","station":2}"#).unwrap();
        let from_text: FireStationMapping =
            serde_json::from_str(r#"{"address":"29 15th St","station":" 2 "}"#).unwrap();
        assert_eq!(from_int, from_text);
        assert_eq!(from_int.station_number, 2);
    }

    #[test]
    fn station_rejects_non_numeric_text() {
        let err = serde_json::from_str::<FireStationMapping>(
            r#"{"address":"29 15th St","station":"two"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid station number"));
    }
}
