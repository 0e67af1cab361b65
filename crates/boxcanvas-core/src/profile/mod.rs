//! User profile and weather lookup shown next to the canvas.

mod config;
mod error;
mod loader;
mod model;
mod source;

pub use config::{ENV_FAILING_USER, ENV_TIMEOUT_MS, ENV_USER_API, ENV_WEATHER_LATENCY_MS, ProfileConfig};
pub use error::{ConfigError, ProfileError};
pub use loader::{ProfileEvent, ProfileLoader, ProfileView, WeatherView};
pub use model::{Address, User, UserId, WeatherReading};
pub use source::{HttpUserDirectory, SimulatedWeather, UserDirectory, WeatherService};
