use std::time::Duration;

use embedded_hal::pwm::SetDutyCycle;

use crate::{
    actuator::{ActuatorBank, ServoDriver},
    conversion::PulseConversion,
    error::ArmError,
    interpreter::{Interpreter, InterpreterMode},
    model::{ServoId, ServoPin, ARM_SERVO_COUNT},
    servo_pwm::PwmServo,
    transport_serial::SerialTransport,
};

/// Static description of the arm hardware and how clients talk to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmConfig {
    /// Name the wireless link advertises.
    pub device_name: String,
    pub baudrate: u32,
    /// Outputs for servos 1..=4, in order.
    pub pins: [ServoPin; ARM_SERVO_COUNT],
    pub mode: InterpreterMode,
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            device_name: "ESP32-RobotArm".to_string(),
            baudrate: 115_200,
            pins: [ServoPin::new(18), ServoPin::new(19), ServoPin::new(21), ServoPin::new(22)],
            mode: InterpreterMode::DirectLine,
        }
    }
}

impl ArmConfig {
    pub fn validate(&self) -> Result<(), ArmError> {
        if self.device_name.is_empty() {
            return Err(ArmError::InvalidConfig("empty device name".into()));
        }
        if self.baudrate == 0 {
            return Err(ArmError::InvalidConfig("baudrate must be non-zero".into()));
        }
        for (i, pin) in self.pins.iter().enumerate() {
            if self.pins[..i].iter().any(|p| p.pin == pin.pin) {
                return Err(ArmError::InvalidConfig(format!("pin {} assigned twice", pin.pin)));
            }
            PulseConversion::for_pin(pin)?;
        }
        Ok(())
    }

    /// Angle/pulse mapping for each servo, in servo order.
    pub fn conversions(&self) -> Result<[PulseConversion; ARM_SERVO_COUNT], ArmError> {
        let [p1, p2, p3, p4] = &self.pins;
        Ok([
            PulseConversion::for_pin(p1)?,
            PulseConversion::for_pin(p2)?,
            PulseConversion::for_pin(p3)?,
            PulseConversion::for_pin(p4)?,
        ])
    }

    /// Attaches one PWM channel per servo, in servo order, using each pin's pulse range.
    pub fn pwm_bank<P>(&self, channels: [P; ARM_SERVO_COUNT]) -> Result<ActuatorBank<PwmServo<P>>, ArmError>
    where
        P: SetDutyCycle + Send + 'static,
    {
        self.validate()?;
        let [c1, c2, c3, c4] = self.conversions()?;
        let [s1, s2, s3, s4] = ServoId::ALL;
        let [h1, h2, h3, h4] = channels;
        let drivers = [
            PwmServo::new(s1, h1, c1),
            PwmServo::new(s2, h2, c2),
            PwmServo::new(s3, h3, c3),
            PwmServo::new(s4, h4, c4),
        ];
        Ok(ActuatorBank::new(drivers))
    }

    /// Opens the serial link at the configured baud rate.
    pub fn open_transport(&self, serial_port: &str, timeout: Duration) -> Result<SerialTransport, ArmError> {
        self.validate()?;
        SerialTransport::open(serial_port, self.baudrate, timeout)
    }

    pub fn interpreter<D: ServoDriver>(&self, bank: ActuatorBank<D>) -> Interpreter<D> {
        Interpreter::new(self.mode, bank)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ControlLoopConfig {
    pub poll_period: Duration,
    /// Largest read taken from the transport in one go.
    pub read_chunk: usize,
}

impl Default for ControlLoopConfig {
    fn default() -> Self {
        Self { poll_period: Duration::from_millis(10), read_chunk: 64 }
    }
}
