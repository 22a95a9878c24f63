//! Text protocol spoken over the serial link: lenient integer scanning,
//! line/token buffering and the exact response strings.

use std::collections::VecDeque;

use crate::model::{Angle, ARM_SERVO_COUNT};

/// Size of the firmware line buffer, terminator included.
pub const LINE_BUFFER_LEN: usize = 20;

pub const INVALID_SERVO: &str = "Invalid Servo Number!";
pub const MENU: [&str; 2] = ["1. Move 1 Servo", "2. Move All Servos"];
pub const DIRECT_LINE_BANNER: [&str; 2] = [
    "Enter command: <servo_number> <angle>",
    "Example: 1 90  (Moves Servo 1 to 90°)",
];
pub const SINGLE_UPDATE_PROMPT: [&str; 2] = [
    "Enter: <servo_number> <angle>",
    "Example: 2 45",
];
pub const ALL_UPDATE_PROMPT: [&str; 2] = [
    "Enter 4 angles: <servo1> <servo2> <servo3> <servo4>",
    "Example: 90 90 90 90",
];

pub fn servo_moved(servo: impl std::fmt::Display, angle: Angle) -> String {
    format!("Servo {servo} Moved {angle}")
}

pub fn servos_moved(angles: &[Angle; ARM_SERVO_COUNT]) -> String {
    let [a1, a2, a3, a4] = angles;
    format!("Servos Moved to {a1} {a2} {a3} {a4}")
}

/// Scans the first integer out of `text`, skipping any leading non-numeric
/// bytes. Returns 0 when no digits are present. Saturates at the `i32` bounds.
pub fn scan_int(text: &[u8]) -> i32 {
    let Some(start) = text.iter().position(u8::is_ascii_digit) else {
        return 0;
    };
    let negative = start > 0 && text[start - 1] == b'-';

    let mut value: i64 = 0;
    for digit in text[start..].iter().take_while(|b| b.is_ascii_digit()) {
        value = (value * 10 + i64::from(digit - b'0')).min(i64::from(i32::MAX) + 1);
    }
    if negative {
        value = -value;
    }
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Keeps only what fits in the firmware line buffer.
pub fn truncate_line(line: &[u8]) -> &[u8] {
    &line[..line.len().min(LINE_BUFFER_LEN - 1)]
}

/// Two whitespace-separated integers from one line; missing values decode as 0.
pub fn scan_pair(line: &[u8]) -> (i32, i32) {
    let mut tokens = truncate_line(line)
        .split(u8::is_ascii_whitespace)
        .filter(|t| !t.is_empty())
        .map(scan_int);
    let first = tokens.next().unwrap_or(0);
    let second = tokens.next().unwrap_or(0);
    (first, second)
}

/// What ends one unit of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// `\n`-terminated lines.
    #[default]
    Lines,
    /// Whitespace-separated tokens.
    Tokens,
}

impl Framing {
    fn is_terminator(self, b: u8) -> bool {
        match self {
            Framing::Lines => b == b'\n',
            Framing::Tokens => b.is_ascii_whitespace(),
        }
    }
}

/// Bytes received from the transport but not yet consumed by the interpreter.
///
/// An unterminated line or token never holds more than `LINE_BUFFER_LEN - 1`
/// bytes; anything past that is dropped until the next terminator.
#[derive(Debug, Default)]
pub struct InputBuffer {
    bytes: VecDeque<u8>,
    framing: Framing,
    // Length of the unterminated segment at the tail.
    open_len: usize,
}

impl InputBuffer {
    pub fn new(framing: Framing) -> Self {
        Self { framing, ..Self::default() }
    }

    pub fn push(&mut self, data: &[u8]) {
        for &b in data {
            if self.framing.is_terminator(b) {
                self.bytes.push_back(b);
                self.open_len = 0;
            } else if self.open_len < LINE_BUFFER_LEN - 1 {
                self.bytes.push_back(b);
                self.open_len += 1;
            }
        }
    }

    pub fn is_available(&self) -> bool {
        !self.bytes.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Pops one `\n`-terminated line, without the terminator or a trailing `\r`.
    /// Returns `None` until the terminator has arrived.
    pub fn read_line(&mut self) -> Option<Vec<u8>> {
        let end = self.bytes.iter().position(|b| *b == b'\n')?;
        let mut line: Vec<u8> = self.bytes.drain(..=end).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(line)
    }

    /// Pops the next whitespace-delimited token and scans it as an integer.
    ///
    /// A token is only complete once a delimiter follows it, so a number split
    /// across two reads is never consumed half-way. Returns `None` while no
    /// complete token is buffered; leading whitespace is discarded either way.
    pub fn next_int(&mut self) -> Option<i32> {
        while self.bytes.front().is_some_and(u8::is_ascii_whitespace) {
            self.bytes.pop_front();
        }
        let end = self.bytes.iter().position(u8::is_ascii_whitespace)?;
        let token: Vec<u8> = self.bytes.drain(..end).collect();
        Some(scan_int(&token))
    }

    /// Number of complete tokens currently buffered.
    pub fn complete_tokens(&self) -> usize {
        let mut count = 0;
        let mut in_token = false;
        for b in &self.bytes {
            if b.is_ascii_whitespace() {
                if in_token {
                    count += 1;
                }
                in_token = false;
            } else {
                in_token = true;
            }
        }
        count
    }
}
