use crate::{
    error::ArmError,
    model::{Angle, ServoPin, MAX_ANGLE},
};

/// Standard hobby servo frame: 50 Hz.
pub const SERVO_PERIOD_US: u32 = 20_000;

/// Linear mapping between servo angle and pulse width,
/// 0° at `min_pulse_us` and 180° at `max_pulse_us`.
///
/// Invariant: `min_pulse_us < max_pulse_us <= period_us`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseConversion {
    min_pulse_us: u16,
    max_pulse_us: u16,
    period_us: u32,
}

impl Default for PulseConversion {
    fn default() -> Self {
        Self {
            min_pulse_us: 600,
            max_pulse_us: 2400,
            period_us: SERVO_PERIOD_US,
        }
    }
}

impl PulseConversion {
    pub fn new(min_pulse_us: u16, max_pulse_us: u16) -> Result<Self, ArmError> {
        if min_pulse_us >= max_pulse_us || u32::from(max_pulse_us) > SERVO_PERIOD_US {
            return Err(ArmError::InvalidConfig(format!(
                "pulse range {min_pulse_us}..={max_pulse_us} us"
            )));
        }
        Ok(Self { min_pulse_us, max_pulse_us, ..Self::default() })
    }

    pub fn for_pin(pin: &ServoPin) -> Result<Self, ArmError> {
        Self::new(pin.min_pulse_us, pin.max_pulse_us)
    }

    pub fn min_pulse_us(&self) -> u16 {
        self.min_pulse_us
    }

    pub fn max_pulse_us(&self) -> u16 {
        self.max_pulse_us
    }

    pub fn period_us(&self) -> u32 {
        self.period_us
    }

    /// Pulse width in microseconds for an angle.
    pub fn angle_to_pulse_us(&self, angle: Angle) -> u16 {
        let span = u32::from(self.max_pulse_us - self.min_pulse_us);
        let offset = u32::from(angle.degrees()) * span / MAX_ANGLE as u32;
        self.min_pulse_us + offset as u16
    }

    /// Duty value for a PWM channel whose full scale is `max_duty`.
    pub fn angle_to_duty(&self, angle: Angle, max_duty: u16) -> u16 {
        let pulse = u32::from(self.angle_to_pulse_us(angle));
        (pulse * u32::from(max_duty) / self.period_us) as u16
    }
}
