//! Component definitions used by the demo.

use engine_component::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A 2D position component.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Position {
    /// Position in world units.
    pub value: Vec2,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            value: Vec2::new(x, y),
        }
    }
}

impl Component for Position {
    fn type_name() -> &'static str {
        "Position"
    }
}

/// Linear velocity in world units per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Velocity(pub Vec2);

impl Velocity {
    #[must_use]
    pub const fn from_xy(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    /// Magnitude of the velocity.
    #[must_use]
    pub fn speed(self) -> f32 {
        self.0.length()
    }
}

impl Component for Velocity {
    fn type_name() -> &'static str {
        "Velocity"
    }
}

/// A simple name tag component for logging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Name {
    /// The entity's display name.
    pub value: String,
}

impl Name {
    /// Create a new name component.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { value: name.into() }
    }
}

impl Component for Name {
    fn type_name() -> &'static str {
        "Name"
    }
}
