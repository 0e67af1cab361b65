//! BoxCanvas Core Library
//!
//! Platform-agnostic state and logic for the BoxCanvas editor: keyed
//! state atoms, element geometry, selection handles and the profile loader.

pub mod canvas;
pub mod geometry;
pub mod input;
pub mod profile;
pub mod selection;
pub mod state;

pub use canvas::Canvas;
pub use geometry::{Element, ElementId, ElementStyle, Position, Size};
pub use input::InputState;
pub use profile::{ProfileConfig, ProfileError, ProfileLoader, ProfileView, UserId, WeatherView};
pub use selection::{Corner, Edge, Handle, HandleKind, ManipulationState};
pub use state::{Atom, AtomFamily};
