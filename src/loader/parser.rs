use serde::de::DeserializeOwned;
use std::fs;

use crate::error::Result;

/// Parses a JSON file into a given type `T`.
///
/// Used for both the booking config and the reservation store file. Errors
/// convert into `crate::error::Error` variants: `IoError` if the file cannot
/// be read, `DeserializationError` if the JSON does not match `T`.
pub fn parse_json_file<T: DeserializeOwned>(file_path: &str) -> Result<T> {
    let data = fs::read_to_string(file_path)?;

    parse_json_str(&data)
}

/// Parses a JSON string into a given type `T`.
pub fn parse_json_str<T: DeserializeOwned>(data: &str) -> Result<T> {
    let parsed: T = serde_json::from_str(data)?;

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config_dto::BookingConfigDto;

    #[test]
    fn config_shape_round_trips_from_json() {
        let json = r#"{
            "slotGranularityMinutes": 30,
            "businessHours": {
                "weekday": { "open": 16, "close": 24 },
                "weekend": { "open": 14, "close": 26 },
                "holidays": [{ "month": 12, "day": 25 }]
            },
            "resources": [
                { "id": "sim-01", "category": "standard", "basePrice": 25.0 }
            ]
        }"#;

        let config: BookingConfigDto = parse_json_str(json).expect("valid config JSON");

        assert_eq!(config.slot_granularity_minutes, 30);
        assert_eq!(config.business_hours.holidays.len(), 1);
        assert_eq!(config.resources.len(), 1);
        assert!(config.pricing.group_discount.is_none());
        assert!(config.resources[0].features.is_empty());
    }

    #[test]
    fn malformed_json_is_a_deserialization_error() {
        let result = parse_json_str::<BookingConfigDto>("{ not json");
        assert!(result.is_err());
    }
}
