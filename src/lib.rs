pub mod actuator;
pub mod command;
pub mod config;
pub mod control_loop;
pub mod conversion;
pub mod error;
pub mod interpreter;
pub mod model;
pub mod protocol;
pub mod servo_pwm;
pub mod transport;
pub mod transport_serial;

pub use actuator::{ActuatorBank, ServoDriver};
pub use command::{Command, MenuSelection};
pub use config::{ArmConfig, ControlLoopConfig};
pub use control_loop::{service_transport, start_control_loop, ArmSnapshot, ControlLoopHandle};
pub use conversion::PulseConversion;
pub use error::ArmError;
pub use interpreter::{Interpreter, InterpreterMode, MenuState};
pub use model::{Angle, ServoId, ServoPin};
pub use servo_pwm::PwmServo;
pub use transport::ArmTransport;
pub use transport_serial::SerialTransport;
