use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or initializing a particle set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed particle data or simulation parameters.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Two particles share a position while softening is zero.
    #[error("numerical singularity: particles {first} and {second} coincide with zero softening")]
    NumericalSingularity { first: usize, second: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let e = Error::InvalidInput("mass of particle 3 must be > 0".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid input"));
        assert!(msg.contains("particle 3"));
    }

    #[test]
    fn test_singularity_names_both_particles() {
        let msg = Error::NumericalSingularity { first: 1, second: 4 }.to_string();
        assert!(msg.contains("1 and 4"));
    }
}
