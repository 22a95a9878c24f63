use std::{convert::Infallible, thread, time::Duration};

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use robot_arm_controller::{
    start_control_loop, ArmConfig, ArmError, ArmTransport, ControlLoopConfig, InterpreterMode,
};
use tracing_subscriber::EnvFilter;

/// Plays back a fixed client session and prints the arm's replies.
struct ScriptedTransport {
    script: Vec<u8>,
}

impl ArmTransport for ScriptedTransport {
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, ArmError> {
        let n = buf.len().min(self.script.len());
        buf[..n].copy_from_slice(&self.script[..n]);
        self.script.drain(..n);
        Ok(n)
    }

    fn write_line(&mut self, line: &str) -> Result<(), ArmError> {
        println!("< {line}");
        Ok(())
    }
}

/// Stand-in for a 50 Hz PWM output with 14-bit resolution.
struct PrintChannel(u8);

impl ErrorType for PrintChannel {
    type Error = Infallible;
}

impl SetDutyCycle for PrintChannel {
    fn max_duty_cycle(&self) -> u16 {
        16_383
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        println!("  pin {} duty {duty}", self.0);
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = ArmConfig { mode: InterpreterMode::MenuDriven, ..ArmConfig::default() };
    println!("advertising as {}", cfg.device_name);

    let bank = cfg.pwm_bank(cfg.pins.map(|p| PrintChannel(p.pin)))?;
    let transport = ScriptedTransport { script: b"1\n3 400\n2\n-10 50 200 90\n7\n".to_vec() };

    let handle = start_control_loop(transport, cfg.interpreter(bank), ControlLoopConfig::default())?;
    thread::sleep(Duration::from_millis(100));
    let snap = handle.last_snapshot()?;
    println!("commanded angles at {}: {:?}", snap.timestamp_s, snap.angles);
    handle.join()?;
    Ok(())
}
