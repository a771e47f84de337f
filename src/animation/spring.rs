/// Configuration for spring physics animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    /// Mass of the spring
    pub mass: f32,
    /// Stiffness of the spring
    pub stiffness: f32,
    /// Damping coefficient
    pub damping: f32,
    /// Velocity at the start of each animation, in distances per second
    pub initial_velocity: f32,
}

impl SpringConfig {
    /// Soft, slightly bouncy sweep used for the countdown ring
    pub const RING: Self = Self {
        mass: 1.0,
        stiffness: 20.0,
        damping: 10.0,
        initial_velocity: 6.0,
    };

    /// Quick response with little overshoot
    pub const SNAPPY: Self = Self {
        mass: 1.0,
        stiffness: 250.0,
        damping: 14.0,
        initial_velocity: 0.0,
    };

    /// Bouncy spring with more overshoot
    pub const BOUNCY: Self = Self {
        mass: 1.0,
        stiffness: 200.0,
        damping: 10.0,
        initial_velocity: 0.0,
    };

    pub const fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            mass: 1.0,
            stiffness,
            damping,
            initial_velocity: 0.0,
        }
    }

    pub const fn with_initial_velocity(mut self, velocity: f32) -> Self {
        self.initial_velocity = velocity;
        self
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::RING
    }
}

/// Largest integration step, in seconds
const MAX_STEP: f32 = 1.0 / 120.0;

/// State for spring physics simulation.
///
/// Position is normalized: 0.0 is the start value and 1.0 the target.
#[derive(Clone, Debug)]
pub struct SpringState {
    pub position: f32,
    pub velocity: f32,
    /// Elapsed time already simulated, in seconds
    pub last_t: f32,
}

impl SpringState {
    pub fn new(config: &SpringConfig) -> Self {
        Self {
            position: 0.0,
            velocity: config.initial_velocity,
            last_t: 0.0,
        }
    }

    /// Advance the simulation to `elapsed_secs` since the animation started.
    ///
    /// Large gaps between calls are integrated in small sub-steps, so the
    /// result does not depend on the caller's frame rate.
    pub fn step(&mut self, elapsed_secs: f32, config: &SpringConfig) -> f32 {
        let mut remaining = (elapsed_secs - self.last_t).max(0.0);
        self.last_t = self.last_t.max(elapsed_secs);

        while remaining > 1e-6 {
            let dt = remaining.min(MAX_STEP);
            remaining -= dt;

            // F = -k * x - c * v, semi-implicit Euler
            let displacement = self.position - 1.0;
            let force = -config.stiffness * displacement - config.damping * self.velocity;
            let acceleration = force / config.mass;

            self.velocity += acceleration * dt;
            self.position += self.velocity * dt;
        }

        self.position
    }

    /// Check if the spring has settled (position near target, velocity near zero)
    pub fn is_settled(&self, threshold: f32) -> bool {
        (self.position - 1.0).abs() < threshold && self.velocity.abs() < threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_spring_settles() {
        let config = SpringConfig::RING;
        let mut state = SpringState::new(&config);

        let position = state.step(4.0, &config);

        assert!(
            (position - 1.0).abs() < 0.01,
            "ring spring should settle within four seconds, got {}",
            position
        );
        assert!(state.is_settled(0.01));
    }

    #[test]
    fn test_step_is_frame_rate_independent() {
        let config = SpringConfig::RING;
        let mut coarse = SpringState::new(&config);
        let mut fine = SpringState::new(&config);

        coarse.step(0.5, &config);
        for i in 1..=30 {
            fine.step(i as f32 / 60.0, &config);
        }

        assert!((coarse.position - fine.position).abs() < 0.05);
    }

    #[test]
    fn test_bouncy_spring_overshoots() {
        let config = SpringConfig::BOUNCY;
        let mut state = SpringState::new(&config);

        let mut max_position: f32 = 0.0;
        for i in 0..120 {
            max_position = max_position.max(state.step(i as f32 / 60.0, &config));
        }

        assert!(
            max_position > 1.0,
            "bouncy spring should overshoot, max was {}",
            max_position
        );
    }

    #[test]
    fn test_initial_velocity_moves_immediately() {
        let config = SpringConfig::new(20.0, 10.0).with_initial_velocity(6.0);
        let mut state = SpringState::new(&config);
        assert!(state.step(0.05, &config) > 0.2);
    }
}
