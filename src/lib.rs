//! Real-time 2D gravitational N-body simulation.
//!
//! The physics lives in [`crate::core`]; [`render`] and [`ui`] draw a
//! [`store::BodyStore`] into a terminal once per frame.

pub mod config;
pub mod core;
pub mod render;
pub mod store;
pub mod types;
pub mod ui;

pub use config::{PhysicsConfig, Profile, SpawnConfig, Summation, Timestep, Walls};
pub use crate::core::{update, PhysicsStep};
pub use store::{initialize, BodyStore};
pub use types::{Body, Trail, Vec2};
