use thiserror::Error;

use crate::constants::{ANGLE_MAX, ANGLE_MIN, FORCE_MAX};

/// Rejected throw or calibration input. Values are never clamped.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ThrowError {
    #[error("force {0} N outside (0, 300]")]
    ForceOutOfRange(f64),

    #[error("angle {0}° outside [15, 89]")]
    AngleOutOfRange(f64),
}

/// Accepts `(0, FORCE_MAX]`. NaN is rejected.
pub fn validate_force(force: f64) -> Result<(), ThrowError> {
    if force > 0.0 && force <= FORCE_MAX {
        Ok(())
    } else {
        Err(ThrowError::ForceOutOfRange(force))
    }
}

/// Accepts `[ANGLE_MIN, ANGLE_MAX]` degrees. NaN is rejected.
pub fn validate_angle(angle: f64) -> Result<(), ThrowError> {
    if (ANGLE_MIN..=ANGLE_MAX).contains(&angle) {
        Ok(())
    } else {
        Err(ThrowError::AngleOutOfRange(angle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_bounds() {
        assert_eq!(validate_force(0.0), Err(ThrowError::ForceOutOfRange(0.0)));
        assert!(validate_force(300.0001).is_err());
        assert!(validate_force(-5.0).is_err());
        assert!(validate_force(f64::NAN).is_err());
        assert!(validate_force(300.0).is_ok());
        assert!(validate_force(0.001).is_ok());
    }

    #[test]
    fn angle_bounds() {
        assert!(validate_angle(14.999).is_err());
        assert!(validate_angle(89.0001).is_err());
        assert!(validate_angle(f64::NAN).is_err());
        assert!(validate_angle(15.0).is_ok());
        assert!(validate_angle(89.0).is_ok());
    }

    #[test]
    fn messages_name_the_domain() {
        let msg = ThrowError::ForceOutOfRange(400.0).to_string();
        assert!(msg.contains("400"), "{msg}");
        assert!(msg.contains("300"), "{msg}");
        let msg = ThrowError::AngleOutOfRange(10.0).to_string();
        assert!(msg.contains("[15, 89]"), "{msg}");
    }
}
