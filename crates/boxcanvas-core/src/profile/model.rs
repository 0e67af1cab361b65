//! User and weather records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a user in the public directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Postal address of a user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub suite: String,
    pub city: String,
    #[serde(default)]
    pub zipcode: String,
}

/// A user record as served by the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub website: String,
    pub address: Address,
}

impl User {
    /// City used for the weather lookup.
    pub fn city(&self) -> &str {
        &self.address.city
    }
}

/// A temperature reading for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub city: String,
    pub celsius: f64,
}

impl fmt::Display for WeatherReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}C", self.celsius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserialize_ignores_extra_fields() {
        let json = r#"{
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "zipcode": "92998-3874",
                "geo": { "lat": "-37.3159", "lng": "81.1496" }
            },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": { "name": "Romaguera-Crona" }
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, UserId(1));
        assert_eq!(user.name, "Leanne Graham");
        assert_eq!(user.phone, "1-770-736-8031 x56442");
        assert_eq!(user.city(), "Gwenborough");
    }

    #[test]
    fn test_user_missing_city_is_an_error() {
        let json = r#"{"id": 2, "name": "Ervin", "phone": "010", "address": {}}"#;
        assert!(serde_json::from_str::<User>(json).is_err());
    }

    #[test]
    fn test_weather_display() {
        let reading = WeatherReading {
            city: "Gwenborough".to_string(),
            celsius: 21.0,
        };
        assert_eq!(reading.to_string(), "21C");
    }
}
