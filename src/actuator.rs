use tracing::warn;

use crate::{
    error::ArmError,
    model::{Angle, ServoId, ARM_SERVO_COUNT},
};

/// One physical position actuator.
pub trait ServoDriver: Send + 'static {
    fn write_angle(&mut self, angle: Angle) -> Result<(), ArmError>;
}

impl<D: ServoDriver + ?Sized> ServoDriver for Box<D> {
    fn write_angle(&mut self, angle: Angle) -> Result<(), ArmError> {
        (**self).write_angle(angle)
    }
}

/// The four arm joints, owned together. Remembers the last angle commanded to each.
pub struct ActuatorBank<D: ServoDriver> {
    drivers: [D; ARM_SERVO_COUNT],
    commanded: [Option<Angle>; ARM_SERVO_COUNT],
}

impl<D: ServoDriver> ActuatorBank<D> {
    pub fn new(drivers: [D; ARM_SERVO_COUNT]) -> Self {
        Self { drivers, commanded: [None; ARM_SERVO_COUNT] }
    }

    /// Moves one servo. A driver failure is logged and the commanded angle is
    /// left untouched; the interpreter carries on either way.
    pub fn move_servo(&mut self, servo: ServoId, angle: Angle) {
        let slot = servo.slot();
        match self.drivers[slot].write_angle(angle) {
            Ok(()) => self.commanded[slot] = Some(angle),
            Err(e) => warn!("servo {servo} move to {angle} failed: {e}"),
        }
    }

    pub fn move_all(&mut self, angles: [Angle; ARM_SERVO_COUNT]) {
        for (servo, angle) in ServoId::ALL.into_iter().zip(angles) {
            self.move_servo(servo, angle);
        }
    }

    pub fn commanded(&self, servo: ServoId) -> Option<Angle> {
        self.commanded[servo.slot()]
    }

    pub fn commanded_angles(&self) -> [Option<Angle>; ARM_SERVO_COUNT] {
        self.commanded
    }

    pub fn driver(&self, servo: ServoId) -> &D {
        &self.drivers[servo.slot()]
    }

    pub fn into_drivers(self) -> [D; ARM_SERVO_COUNT] {
        self.drivers
    }
}
