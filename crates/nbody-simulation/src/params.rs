//! Simulation parameters, fixed for the duration of a run

use nbody_physics::{Error, Result, DEFAULT_SOFTENING_SQUARED, DEFAULT_TIME_STEP};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParams {
    /// Simulated time covered by one step (h)
    pub time_step: f64,
    /// Squared softening length added to every squared separation (e2)
    pub softening_squared: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP,
            softening_squared: DEFAULT_SOFTENING_SQUARED,
        }
    }
}

impl SimulationParams {
    pub fn new(time_step: f64, softening_squared: f64) -> Result<Self> {
        let params = Self {
            time_step,
            softening_squared,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "time step must be finite and > 0, got {}",
                self.time_step
            )));
        }
        validate_softening(self.softening_squared)
    }
}

pub(crate) fn validate_softening(softening_squared: f64) -> Result<()> {
    if !softening_squared.is_finite() || softening_squared < 0.0 {
        return Err(Error::InvalidInput(format!(
            "softening must be finite and >= 0, got {softening_squared}"
        )));
    }
    Ok(())
}
