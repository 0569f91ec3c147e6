use crate::ephemeris::{EphemerisError, Trajectory, Velocity};

/// Magnitude of a velocity triple, km/s.
pub fn speed(x_dot: f64, y_dot: f64, z_dot: f64) -> f64 {
    (x_dot * x_dot + y_dot * y_dot + z_dot * z_dot).sqrt()
}

impl Velocity {
    pub fn speed(&self) -> f64 {
        speed(self.x_dot, self.y_dot, self.z_dot)
    }
}

/// Mean speed over every state vector of the trajectory.
pub fn average_speed(trajectory: &Trajectory) -> Result<f64, EphemerisError> {
    if trajectory.is_empty() {
        return Err(EphemerisError::EmptyInput);
    }

    let total: f64 = trajectory.iter().map(|sv| sv.velocity.speed()).sum();
    let average = total / trajectory.len() as f64;
    log::info!(
        "average speed over {} state vectors: {:.2} km/s",
        trajectory.len(),
        average
    );
    Ok(average)
}
