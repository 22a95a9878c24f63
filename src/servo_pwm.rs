use embedded_hal::pwm::SetDutyCycle;

use crate::{
    actuator::ServoDriver,
    conversion::PulseConversion,
    error::ArmError,
    model::{Angle, ServoId},
};

/// Hobby servo driven from a 50 Hz PWM channel.
pub struct PwmServo<P> {
    servo: ServoId,
    channel: P,
    conversion: PulseConversion,
}

impl<P: SetDutyCycle> PwmServo<P> {
    pub fn new(servo: ServoId, channel: P, conversion: PulseConversion) -> Self {
        Self { servo, channel, conversion }
    }

    pub fn channel(&self) -> &P {
        &self.channel
    }

    /// Stops driving the output so the servo no longer holds position.
    pub fn detach(&mut self) -> Result<(), ArmError> {
        self.channel.set_duty_cycle_fully_off().map_err(|e| self.driver_error(e))
    }

    fn driver_error(&self, e: P::Error) -> ArmError {
        ArmError::Actuator { servo: self.servo.get(), reason: format!("{e:?}") }
    }
}

impl<P: SetDutyCycle + Send + 'static> ServoDriver for PwmServo<P> {
    fn write_angle(&mut self, angle: Angle) -> Result<(), ArmError> {
        let duty = self.conversion.angle_to_duty(angle, self.channel.max_duty_cycle());
        self.channel.set_duty_cycle(duty).map_err(|e| self.driver_error(e))
    }
}
