//! Turns buffered transport input into actuator moves and response lines.

use tracing::debug;

use crate::{
    actuator::{ActuatorBank, ServoDriver},
    command::{Command, MenuSelection},
    model::ARM_SERVO_COUNT,
    protocol::{self, Framing, InputBuffer},
};

/// How the client talks to the arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpreterMode {
    /// `<servo> <angle>` on every line.
    #[default]
    DirectLine,
    /// Pick an option from a menu first, then send its arguments.
    MenuDriven,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    AwaitingMenuSelection,
    AwaitingSingleUpdateArgs,
    AwaitingAllUpdateArgs,
}

impl MenuState {
    /// Tokens that must be buffered before this state can make progress.
    fn tokens_needed(self) -> usize {
        match self {
            MenuState::AwaitingMenuSelection => 1,
            MenuState::AwaitingSingleUpdateArgs => 2,
            MenuState::AwaitingAllUpdateArgs => ARM_SERVO_COUNT,
        }
    }
}

pub struct Interpreter<D: ServoDriver> {
    mode: InterpreterMode,
    state: MenuState,
    input: InputBuffer,
    bank: ActuatorBank<D>,
}

impl<D: ServoDriver> Interpreter<D> {
    pub fn new(mode: InterpreterMode, bank: ActuatorBank<D>) -> Self {
        let framing = match mode {
            InterpreterMode::DirectLine => Framing::Lines,
            InterpreterMode::MenuDriven => Framing::Tokens,
        };
        Self { mode, state: MenuState::default(), input: InputBuffer::new(framing), bank }
    }

    pub fn mode(&self) -> InterpreterMode {
        self.mode
    }

    /// Current menu state. Always `AwaitingMenuSelection` in direct-line mode.
    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn bank(&self) -> &ActuatorBank<D> {
        &self.bank
    }

    /// Lines sent once when the link comes up.
    pub fn greeting(&self) -> Vec<String> {
        let lines: &[&str] = match self.mode {
            InterpreterMode::DirectLine => &protocol::DIRECT_LINE_BANNER,
            InterpreterMode::MenuDriven => &protocol::MENU,
        };
        lines.iter().map(|l| l.to_string()).collect()
    }

    pub fn has_pending_input(&self) -> bool {
        self.input.is_available()
    }

    pub fn feed(&mut self, bytes: &[u8]) {
        self.input.push(bytes);
    }

    /// Processes every complete command in the buffer and returns the responses
    /// in order. Incomplete input stays buffered for the next call.
    pub fn step(&mut self) -> Vec<String> {
        let mut out = Vec::new();
        match self.mode {
            InterpreterMode::DirectLine => self.step_direct_line(&mut out),
            InterpreterMode::MenuDriven => self.step_menu(&mut out),
        }
        out
    }

    fn step_direct_line(&mut self, out: &mut Vec<String>) {
        while let Some(line) = self.input.read_line() {
            let (servo, angle) = protocol::scan_pair(&line);
            self.apply(Command::move_one(servo, angle), out);
        }
    }

    fn step_menu(&mut self, out: &mut Vec<String>) {
        while self.input.complete_tokens() >= self.state.tokens_needed() {
            self.state = match self.state {
                MenuState::AwaitingMenuSelection => self.select(out),
                MenuState::AwaitingSingleUpdateArgs => {
                    let servo = self.next_int();
                    let angle = self.next_int();
                    self.apply(Command::move_one(servo, angle), out);
                    push_lines(out, &protocol::MENU);
                    MenuState::AwaitingMenuSelection
                }
                MenuState::AwaitingAllUpdateArgs => {
                    let raw = [(); ARM_SERVO_COUNT].map(|_| self.next_int());
                    self.apply(Command::move_all(raw), out);
                    push_lines(out, &protocol::MENU);
                    MenuState::AwaitingMenuSelection
                }
            };
        }
    }

    fn select(&mut self, out: &mut Vec<String>) -> MenuState {
        let raw = self.next_int();
        match MenuSelection::from_raw(raw) {
            Some(MenuSelection::MoveOne) => {
                push_lines(out, &protocol::SINGLE_UPDATE_PROMPT);
                MenuState::AwaitingSingleUpdateArgs
            }
            Some(MenuSelection::MoveAll) => {
                push_lines(out, &protocol::ALL_UPDATE_PROMPT);
                MenuState::AwaitingAllUpdateArgs
            }
            None => {
                debug!("unknown menu selection {raw}");
                push_lines(out, &protocol::MENU);
                MenuState::AwaitingMenuSelection
            }
        }
    }

    // Only called once the state's token count is known to be buffered.
    fn next_int(&mut self) -> i32 {
        self.input.next_int().unwrap_or(0)
    }

    fn apply(&mut self, command: Command, out: &mut Vec<String>) {
        debug!(?command, "applying");
        match command {
            Command::MoveOne { servo, angle } => {
                self.bank.move_servo(servo, angle);
                out.push(protocol::servo_moved(servo, angle));
            }
            Command::MoveAll { angles } => {
                self.bank.move_all(angles);
                out.push(protocol::servos_moved(&angles));
            }
            Command::Invalid { raw_servo, angle } => {
                out.push(protocol::INVALID_SERVO.to_string());
                if self.mode == InterpreterMode::MenuDriven {
                    out.push(protocol::servo_moved(raw_servo, angle));
                }
            }
        }
    }
}

fn push_lines(out: &mut Vec<String>, lines: &[&str]) {
    out.extend(lines.iter().map(|l| l.to_string()));
}
