use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArmError {
    #[error("serial/bus communication error")]
    Communication,
    #[error("servo {servo} driver error: {reason}")]
    Actuator { servo: u8, reason: String },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("control loop runtime: {0}")]
    Runtime(String),
    #[error("transport closed")]
    Closed,
}
