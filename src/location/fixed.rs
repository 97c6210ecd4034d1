//! Fixed location provider
//!
//! Always reports the same coordinate. Used when the machine has no usable
//! network location, or to pin the screen to a known place.

use crate::coord::Coordinate;
use crate::location::{LocationError, LocationProvider, Position, PositionOptions};

/// Provider that reports a configured coordinate
#[derive(Debug, Clone)]
pub struct FixedLocationProvider {
    coordinate: Coordinate,
}

impl FixedLocationProvider {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

impl LocationProvider for FixedLocationProvider {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Position, LocationError> {
        self.coordinate
            .validate()
            .map_err(|e| LocationError::InvalidPosition(e.to_string()))?;
        Ok(Position::now(self.coordinate))
    }
}
