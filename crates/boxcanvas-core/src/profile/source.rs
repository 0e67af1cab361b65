//! Data sources for the profile panel.
//!
//! Both sources are blocking; the loader calls them from worker threads.

use super::config::ProfileConfig;
use super::error::ProfileError;
use super::model::{User, UserId, WeatherReading};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;
use std::time::Duration;
use url::Url;

/// Looks up user records.
pub trait UserDirectory: Send + Sync {
    fn fetch_user(&self, id: UserId) -> Result<User, ProfileError>;
}

/// Reports the current temperature for a city.
pub trait WeatherService: Send + Sync {
    fn weather_for(&self, city: &str) -> Result<WeatherReading, ProfileError>;
}

/// User directory backed by a JSON HTTP API (`GET {base}/users/{id}`).
pub struct HttpUserDirectory {
    client: reqwest::blocking::Client,
    base: Url,
}

impl HttpUserDirectory {
    /// Build a directory client from configuration.
    pub fn new(config: &ProfileConfig) -> Result<Self, ProfileError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("boxcanvas/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut base = Url::parse(&config.user_api_base)?;
        // Url::join replaces the last segment unless the path ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self { client, base })
    }

    /// URL of a user record.
    pub fn user_url(&self, id: UserId) -> Result<Url, ProfileError> {
        Ok(self.base.join(&format!("users/{}", id))?)
    }
}

impl UserDirectory for HttpUserDirectory {
    fn fetch_user(&self, id: UserId) -> Result<User, ProfileError> {
        let url = self.user_url(id)?;
        log::debug!("GET {}", url);

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProfileError::Status(status.as_u16()));
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Weather service that makes up a plausible temperature after a delay.
pub struct SimulatedWeather {
    latency: Duration,
    counter: AtomicU32,
}

impl SimulatedWeather {
    /// Lowest temperature the service reports.
    pub const MIN_CELSIUS: f64 = -5.0;
    /// Highest temperature the service reports.
    pub const MAX_CELSIUS: f64 = 35.0;

    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            counter: AtomicU32::new(1),
        }
    }

    fn next_sample(&self, city: &str) -> u32 {
        let mut hasher = DefaultHasher::new();
        city.hash(&mut hasher);
        let counter = self.counter.fetch_add(1, Ordering::Relaxed);

        // splitmix32-style mixing of the call counter and the city
        let mut x = counter.wrapping_mul(0x9E3779B9) ^ (hasher.finish() as u32);
        x ^= x >> 16;
        x = x.wrapping_mul(0x85EBCA6B);
        x ^= x >> 13;
        x = x.wrapping_mul(0xC2B2AE35);
        x ^= x >> 16;
        x
    }
}

impl WeatherService for SimulatedWeather {
    fn weather_for(&self, city: &str) -> Result<WeatherReading, ProfileError> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        let span = (Self::MAX_CELSIUS - Self::MIN_CELSIUS) as u32 + 1;
        let celsius = Self::MIN_CELSIUS + (self.next_sample(city) % span) as f64;
        Ok(WeatherReading {
            city: city.to_string(),
            celsius,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_url_from_bare_host() {
        let directory = HttpUserDirectory::new(&ProfileConfig::default()).unwrap();
        assert_eq!(
            directory.user_url(UserId(3)).unwrap().as_str(),
            "https://jsonplaceholder.typicode.com/users/3"
        );
    }

    #[test]
    fn test_user_url_keeps_base_path() {
        let config = ProfileConfig {
            user_api_base: "http://localhost:8080/api".to_string(),
            ..Default::default()
        };
        let directory = HttpUserDirectory::new(&config).unwrap();
        assert_eq!(
            directory.user_url(UserId(1)).unwrap().as_str(),
            "http://localhost:8080/api/users/1"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ProfileConfig {
            user_api_base: "::nope::".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            HttpUserDirectory::new(&config),
            Err(ProfileError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_simulated_weather_range() {
        let weather = SimulatedWeather::new(Duration::ZERO);
        for _ in 0..200 {
            let reading = weather.weather_for("Gwenborough").unwrap();
            assert_eq!(reading.city, "Gwenborough");
            assert!(reading.celsius >= SimulatedWeather::MIN_CELSIUS);
            assert!(reading.celsius <= SimulatedWeather::MAX_CELSIUS);
            assert!((reading.celsius.fract()).abs() < f64::EPSILON);
        }
    }
}
