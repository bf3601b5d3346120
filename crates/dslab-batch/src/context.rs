//! Component context used in log messages.

/// Holds the component name and the current round which serves as simulation time.
#[derive(Clone, Debug)]
pub struct SimulationContext {
    name: String,
    round: u64,
}

impl SimulationContext {
    /// Creates context for the component with the specified name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            round: 0,
        }
    }

    /// Returns the component name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current round.
    pub fn time(&self) -> u64 {
        self.round
    }

    pub(crate) fn set_time(&mut self, round: u64) {
        self.round = round;
    }
}
