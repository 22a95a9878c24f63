use std::{
    sync::{Arc, Mutex},
    thread::JoinHandle,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use tokio::{runtime::Builder, time};
use tracing::{info, warn};

use crate::{
    actuator::ServoDriver,
    config::ControlLoopConfig,
    error::ArmError,
    interpreter::{Interpreter, MenuState},
    model::{Angle, ARM_SERVO_COUNT},
    transport::ArmTransport,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ArmSnapshot {
    /// Last angle commanded to each servo; `None` until the first move.
    pub angles: [Option<Angle>; ARM_SERVO_COUNT],
    pub state: MenuState,
    pub timestamp_s: f64,
}

impl ArmSnapshot {
    fn capture<D: ServoDriver>(interpreter: &Interpreter<D>) -> Self {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs_f64();
        Self {
            angles: interpreter.bank().commanded_angles(),
            state: interpreter.state(),
            timestamp_s: ts,
        }
    }
}

pub struct ControlLoopHandle {
    last_snapshot: Arc<Mutex<ArmSnapshot>>,
    stop: Arc<Mutex<bool>>,
    worker: Option<JoinHandle<()>>,
}

impl ControlLoopHandle {
    pub fn last_snapshot(&self) -> Result<ArmSnapshot, ArmError> {
        Ok(self.last_snapshot.lock().map_err(|_| ArmError::Closed)?.clone())
    }

    pub fn close(&self) {
        if let Ok(mut stop) = self.stop.lock() {
            *stop = true;
        }
    }

    /// Stops the loop and waits for the worker thread to exit.
    pub fn join(mut self) -> Result<(), ArmError> {
        self.close();
        match self.worker.take() {
            Some(worker) => worker.join().map_err(|_| ArmError::Closed),
            None => Ok(()),
        }
    }
}

impl Drop for ControlLoopHandle {
    fn drop(&mut self) {
        self.close();
    }
}

/// Moves everything the transport has delivered into the interpreter, runs it,
/// and writes the responses back. Returns the number of lines written.
pub fn service_transport<T: ArmTransport, D: ServoDriver>(
    transport: &mut T,
    interpreter: &mut Interpreter<D>,
    buf: &mut [u8],
) -> Result<usize, ArmError> {
    loop {
        let n = transport.read_available(buf)?;
        if n == 0 {
            break;
        }
        interpreter.feed(&buf[..n]);
    }

    if !interpreter.has_pending_input() {
        return Ok(0);
    }

    let responses = interpreter.step();
    for line in &responses {
        transport.write_line(line)?;
    }
    Ok(responses.len())
}

/// Greets the client, then polls the transport from a dedicated worker thread
/// until the handle is closed.
pub fn start_control_loop<T: ArmTransport, D: ServoDriver>(
    mut transport: T,
    mut interpreter: Interpreter<D>,
    cfg: ControlLoopConfig,
) -> Result<ControlLoopHandle, ArmError> {
    if cfg.read_chunk == 0 {
        return Err(ArmError::InvalidConfig("read_chunk must be non-zero".into()));
    }
    for line in interpreter.greeting() {
        transport.write_line(&line)?;
    }

    let runtime = Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|e| ArmError::Runtime(e.to_string()))?;

    let stop = Arc::new(Mutex::new(false));
    let stop_clone = Arc::clone(&stop);

    let snapshot = Arc::new(Mutex::new(ArmSnapshot::capture(&interpreter)));
    let snapshot_clone = Arc::clone(&snapshot);

    let worker = std::thread::spawn(move || {
        runtime.block_on(async move {
            info!(mode = ?interpreter.mode(), "control loop started");
            let mut interval = time::interval(cfg.poll_period);
            let mut buf = vec![0u8; cfg.read_chunk];

            loop {
                interval.tick().await;

                if let Err(e) = service_transport(&mut transport, &mut interpreter, &mut buf) {
                    warn!("transport error: {e}");
                }
                if let Ok(mut guard) = snapshot_clone.lock() {
                    *guard = ArmSnapshot::capture(&interpreter);
                }

                if *stop_clone.lock().unwrap_or_else(|p| p.into_inner()) {
                    break;
                }
            }
            info!("control loop stopped");
        });
    });

    Ok(ControlLoopHandle { last_snapshot: snapshot, stop, worker: Some(worker) })
}
