use crate::model::{Angle, ServoId, ARM_SERVO_COUNT};

/// A single parsed request, consumed as soon as it is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveOne { servo: ServoId, angle: Angle },
    MoveAll { angles: [Angle; ARM_SERVO_COUNT] },
    /// Selector outside `1..=4`. Carries the raw values so they can be echoed back.
    Invalid { raw_servo: i32, angle: Angle },
}

impl Command {
    /// Builds a single-servo command from raw wire integers. The angle is clamped
    /// before the selector is checked.
    pub fn move_one(raw_servo: i32, raw_angle: i32) -> Self {
        let angle = Angle::clamped(raw_angle);
        match ServoId::new(raw_servo) {
            Some(servo) => Command::MoveOne { servo, angle },
            None => Command::Invalid { raw_servo, angle },
        }
    }

    pub fn move_all(raw: [i32; ARM_SERVO_COUNT]) -> Self {
        Command::MoveAll { angles: raw.map(Angle::clamped) }
    }
}

/// Options offered by the menu-driven interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSelection {
    MoveOne,
    MoveAll,
}

impl MenuSelection {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            1 => Some(MenuSelection::MoveOne),
            2 => Some(MenuSelection::MoveAll),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_one_validates_selector_after_clamping() {
        assert_eq!(
            Command::move_one(3, 400),
            Command::MoveOne { servo: ServoId::new(3).unwrap(), angle: Angle::MAX }
        );
        assert_eq!(
            Command::move_one(7, -5),
            Command::Invalid { raw_servo: 7, angle: Angle::MIN }
        );
    }

    #[test]
    fn move_all_clamps_each_angle_independently() {
        let Command::MoveAll { angles } = Command::move_all([-10, 50, 200, 90]) else {
            panic!("expected MoveAll");
        };
        let degrees: Vec<u8> = angles.iter().map(|a| a.degrees()).collect();
        assert_eq!(degrees, vec![0, 50, 180, 90]);
    }

    #[test]
    fn menu_selection_only_knows_two_options() {
        assert_eq!(MenuSelection::from_raw(1), Some(MenuSelection::MoveOne));
        assert_eq!(MenuSelection::from_raw(2), Some(MenuSelection::MoveAll));
        assert_eq!(MenuSelection::from_raw(0), None);
        assert_eq!(MenuSelection::from_raw(3), None);
    }
}
