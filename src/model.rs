use std::fmt;

/// Number of joints on the arm.
pub const ARM_SERVO_COUNT: usize = 4;

pub const MIN_ANGLE: i32 = 0;
pub const MAX_ANGLE: i32 = 180;

/// Index of one of the arm servos, always within `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServoId(u8);

impl ServoId {
    pub const ALL: [ServoId; ARM_SERVO_COUNT] = [ServoId(1), ServoId(2), ServoId(3), ServoId(4)];

    /// Validates a raw selector from the wire. Anything outside `1..=4` is rejected.
    pub fn new(raw: i32) -> Option<Self> {
        if (1..=ARM_SERVO_COUNT as i32).contains(&raw) {
            Some(Self(raw as u8))
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based slot in the actuator bank.
    pub fn slot(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl fmt::Display for ServoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Commanded servo angle in degrees, always within `0..=180`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Angle(u8);

impl Angle {
    pub const MIN: Angle = Angle(MIN_ANGLE as u8);
    pub const CENTER: Angle = Angle(90);
    pub const MAX: Angle = Angle(MAX_ANGLE as u8);

    /// Saturates any integer into the servo range.
    pub fn clamped(raw: i32) -> Self {
        Self(raw.clamp(MIN_ANGLE, MAX_ANGLE) as u8)
    }

    pub fn degrees(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Physical output a servo is attached to, with its pulse-width range in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServoPin {
    pub pin: u8,
    pub min_pulse_us: u16,
    pub max_pulse_us: u16,
}

impl ServoPin {
    pub const fn new(pin: u8) -> Self {
        Self { pin, min_pulse_us: 600, max_pulse_us: 2400 }
    }
}
