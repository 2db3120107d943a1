use serde::de::Error;
use serde::Deserialize;
use serde::Deserializer;

/// coordinates may be written as JSON numbers or as numeric strings
/// (values copied straight out of the trip CSV).
#[derive(Deserialize)]
#[serde(untagged)]
enum CoordinateValue {
    Number(f64),
    Text(String),
}

pub fn deserialize_coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match CoordinateValue::deserialize(deserializer)? {
        CoordinateValue::Number(value) => Ok(value),
        CoordinateValue::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| D::Error::custom(format!("Invalid coordinate '{text}': {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "deserialize_coordinate")]
        lat: f64,
    }

    #[test]
    fn test_number_and_string_coordinates() {
        let row: Row = serde_json::from_str(r#"{"lat": 37.5}"#).unwrap();
        assert_eq!(row.lat, 37.5);
        let row: Row = serde_json::from_str(r#"{"lat": " 37.804562 "}"#).unwrap();
        assert_eq!(row.lat, 37.804562);
    }

    #[test]
    fn test_non_numeric_coordinate() {
        let result = serde_json::from_str::<Row>(r#"{"lat": "north"}"#);
        assert!(result.is_err());
    }
}
