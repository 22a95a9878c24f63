use crate::error::ArmError;

/// Byte-stream link to the controlling client.
pub trait ArmTransport: Send + 'static {
    /// Copies whatever bytes are already available into `buf` without waiting.
    /// Returns `Ok(0)` when nothing has arrived.
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, ArmError>;

    /// Sends one response line; the implementation appends the terminator.
    fn write_line(&mut self, line: &str) -> Result<(), ArmError>;
}
