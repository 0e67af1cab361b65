//! Background loading of a user profile and its weather reading.
//!
//! Fetches run on worker threads and report back over a channel. The UI
//! thread drains results with [`ProfileLoader::poll_events`] once per frame.

use super::config::ProfileConfig;
use super::error::ProfileError;
use super::model::{User, UserId, WeatherReading};
use super::source::{HttpUserDirectory, SimulatedWeather, UserDirectory, WeatherService};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

/// What the profile panel should display.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileView {
    /// No user chosen.
    Hidden,
    /// Waiting for the user record.
    LoadingUser(UserId),
    /// Loading the user failed; replaces the whole profile.
    Failed { id: UserId, message: String },
    /// User record available.
    Loaded { user: User, weather: WeatherView },
}

/// State of the weather line inside a loaded profile.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherView {
    Loading,
    Ready(WeatherReading),
    Failed(String),
}

/// Outcome applied by [`ProfileLoader::poll_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileEvent {
    UserLoaded { id: UserId },
    UserFailed { id: UserId, message: String },
    WeatherLoaded { id: UserId, reading: WeatherReading },
    WeatherFailed { id: UserId, message: String },
}

/// Results sent from worker threads.
enum WorkerResult {
    User {
        generation: u64,
        id: UserId,
        result: Result<User, ProfileError>,
    },
    Weather {
        generation: u64,
        id: UserId,
        result: Result<WeatherReading, ProfileError>,
    },
}

/// Loads a user record, then the weather for the user's city.
pub struct ProfileLoader {
    users: Arc<dyn UserDirectory>,
    weather: Arc<dyn WeatherService>,
    /// User rejected after a successful fetch.
    failing_user: Option<UserId>,
    view: ProfileView,
    /// Bumped whenever a new request supersedes the in-flight ones.
    generation: u64,
    user_cache: HashMap<UserId, User>,
    weather_cache: HashMap<UserId, WeatherReading>,
    result_tx: Sender<WorkerResult>,
    result_rx: Receiver<WorkerResult>,
}

impl ProfileLoader {
    /// Create a loader over the given sources.
    pub fn new(
        users: Arc<dyn UserDirectory>,
        weather: Arc<dyn WeatherService>,
        failing_user: Option<UserId>,
    ) -> Self {
        let (result_tx, result_rx) = channel();
        Self {
            users,
            weather,
            failing_user,
            view: ProfileView::Hidden,
            generation: 0,
            user_cache: HashMap::new(),
            weather_cache: HashMap::new(),
            result_tx,
            result_rx,
        }
    }

    /// Create a loader using the HTTP directory and simulated weather.
    pub fn from_config(config: &ProfileConfig) -> Result<Self, ProfileError> {
        let users = HttpUserDirectory::new(config)?;
        let weather = SimulatedWeather::new(config.weather_latency);
        Ok(Self::new(Arc::new(users), Arc::new(weather), config.failing_user))
    }

    /// Current view.
    pub fn view(&self) -> &ProfileView {
        &self.view
    }

    /// The chosen user, if any.
    pub fn current_user(&self) -> Option<UserId> {
        match &self.view {
            ProfileView::Hidden => None,
            ProfileView::LoadingUser(id) | ProfileView::Failed { id, .. } => Some(*id),
            ProfileView::Loaded { user, .. } => Some(user.id),
        }
    }

    /// Whether a fetch the view is waiting on is still in flight.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.view,
            ProfileView::LoadingUser(_)
                | ProfileView::Loaded {
                    weather: WeatherView::Loading,
                    ..
                }
        )
    }

    /// Choose the user to display. `None` hides the profile.
    ///
    /// Any previous error is dropped. A user record already fetched is
    /// reused without another request.
    pub fn choose_user(&mut self, id: Option<UserId>) {
        self.generation += 1;

        let Some(id) = id else {
            self.view = ProfileView::Hidden;
            return;
        };

        log::info!("Loading profile for user {}", id);
        match self.user_cache.get(&id).cloned() {
            Some(user) => self.show_user(user),
            None => {
                self.view = ProfileView::LoadingUser(id);
                self.spawn_user_fetch(id);
            }
        }
    }

    /// Fetch the weather again for the displayed user.
    ///
    /// Returns false if no user is loaded.
    pub fn refresh_weather(&mut self) -> bool {
        let ProfileView::Loaded { user, weather } = &mut self.view else {
            return false;
        };

        self.generation += 1;
        let id = user.id;
        let city = user.city().to_string();
        *weather = WeatherView::Loading;
        self.weather_cache.remove(&id);

        log::info!("Refreshing weather for {}", city);
        self.spawn_weather_fetch(id, city);
        true
    }

    /// Apply finished fetches (non-blocking).
    ///
    /// Results belonging to a superseded request are dropped.
    pub fn poll_events(&mut self) -> Vec<ProfileEvent> {
        let mut events = Vec::new();
        while let Ok(result) = self.result_rx.try_recv() {
            if let Some(event) = self.apply(result) {
                events.push(event);
            }
        }
        events
    }

    fn apply(&mut self, result: WorkerResult) -> Option<ProfileEvent> {
        match result {
            WorkerResult::User { generation, id, result } => {
                let result = self.check_user(id, result);

                if let Ok(user) = &result {
                    self.user_cache.insert(id, user.clone());
                }
                if generation != self.generation {
                    log::debug!("Dropping stale user response for {}", id);
                    return None;
                }

                match result {
                    Ok(user) => {
                        self.show_user(user);
                        Some(ProfileEvent::UserLoaded { id })
                    }
                    Err(err) => {
                        log::warn!("Failed to load user {}: {}", id, err);
                        let message = err.to_string();
                        self.view = ProfileView::Failed {
                            id,
                            message: message.clone(),
                        };
                        Some(ProfileEvent::UserFailed { id, message })
                    }
                }
            }
            WorkerResult::Weather { generation, id, result } => {
                if generation != self.generation {
                    log::debug!("Dropping stale weather response for {}", id);
                    return None;
                }
                let ProfileView::Loaded { weather, .. } = &mut self.view else {
                    return None;
                };

                match result {
                    Ok(reading) => {
                        self.weather_cache.insert(id, reading.clone());
                        *weather = WeatherView::Ready(reading.clone());
                        Some(ProfileEvent::WeatherLoaded { id, reading })
                    }
                    Err(err) => {
                        log::warn!("Failed to load weather for user {}: {}", id, err);
                        let message = err.to_string();
                        *weather = WeatherView::Failed(message.clone());
                        Some(ProfileEvent::WeatherFailed { id, message })
                    }
                }
            }
        }
    }

    /// The failing user is rejected whatever the directory answered.
    fn check_user(&self, id: UserId, result: Result<User, ProfileError>) -> Result<User, ProfileError> {
        if self.failing_user == Some(id) {
            return Err(ProfileError::UserDoesNotExist(id));
        }
        result
    }

    /// Display a fetched user and make sure its weather is on the way.
    fn show_user(&mut self, user: User) {
        let id = user.id;
        let city = user.city().to_string();
        let weather = match self.weather_cache.get(&id) {
            Some(reading) => WeatherView::Ready(reading.clone()),
            None => WeatherView::Loading,
        };
        let needs_fetch = weather == WeatherView::Loading;

        self.view = ProfileView::Loaded { user, weather };
        if needs_fetch {
            self.spawn_weather_fetch(id, city);
        }
    }

    fn spawn_user_fetch(&self, id: UserId) {
        let users = Arc::clone(&self.users);
        let tx = self.result_tx.clone();
        let generation = self.generation;

        thread::spawn(move || {
            log::debug!("Fetching user {}", id);
            let result = users.fetch_user(id);
            let _ = tx.send(WorkerResult::User { generation, id, result });
        });
    }

    fn spawn_weather_fetch(&self, id: UserId, city: String) {
        let weather = Arc::clone(&self.weather);
        let tx = self.result_tx.clone();
        let generation = self.generation;

        thread::spawn(move || {
            log::debug!("Fetching weather for {}", city);
            let result = weather.weather_for(&city);
            let _ = tx.send(WorkerResult::Weather { generation, id, result });
        });
    }
}
