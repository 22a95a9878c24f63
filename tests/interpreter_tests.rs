use robot_arm_controller::{
    ActuatorBank, Angle, ArmError, Interpreter, InterpreterMode, MenuState, ServoDriver, ServoId,
};

#[derive(Default)]
struct RecordingServo {
    moves: Vec<u8>,
}

impl ServoDriver for RecordingServo {
    fn write_angle(&mut self, angle: Angle) -> Result<(), ArmError> {
        self.moves.push(angle.degrees());
        Ok(())
    }
}

fn interpreter(mode: InterpreterMode) -> Interpreter<RecordingServo> {
    Interpreter::new(mode, ActuatorBank::new(Default::default()))
}

fn send(interp: &mut Interpreter<RecordingServo>, text: &str) -> Vec<String> {
    interp.feed(text.as_bytes());
    interp.step()
}

fn moves(interp: &Interpreter<RecordingServo>) -> Vec<Vec<u8>> {
    ServoId::ALL.iter().map(|s| interp.bank().driver(*s).moves.clone()).collect()
}

fn degrees(interp: &Interpreter<RecordingServo>) -> Vec<Option<u8>> {
    interp.bank().commanded_angles().iter().map(|a| a.map(Angle::degrees)).collect()
}

const MENU: [&str; 2] = ["1. Move 1 Servo", "2. Move All Servos"];

#[test]
fn direct_line_moves_and_confirms() {
    let mut interp = interpreter(InterpreterMode::DirectLine);
    let out = send(&mut interp, "1 90\n");
    assert_eq!(out, vec!["Servo 1 Moved 90"]);
    assert_eq!(moves(&interp), vec![vec![90], vec![], vec![], vec![]]);
}

#[test]
fn direct_line_clamps_every_angle() {
    let mut interp = interpreter(InterpreterMode::DirectLine);
    for raw in [-500, -1, 0, 1, 179, 180, 181, 1000] {
        let out = send(&mut interp, &format!("2 {raw}\n"));
        let expected = raw.clamp(0, 180);
        assert_eq!(out, vec![format!("Servo 2 Moved {expected}")]);
        assert_eq!(interp.bank().driver(ServoId::new(2).unwrap()).moves.last(), Some(&(expected as u8)));
    }
}

#[test]
fn direct_line_rejects_unknown_servo_without_moving() {
    let mut interp = interpreter(InterpreterMode::DirectLine);
    for raw in [0, 5, -1, 99] {
        let out = send(&mut interp, &format!("{raw} 45\n"));
        assert_eq!(out, vec!["Invalid Servo Number!"]);
    }
    assert!(moves(&interp).iter().all(Vec::is_empty));
}

#[test]
fn direct_line_treats_garbage_as_zero() {
    let mut interp = interpreter(InterpreterMode::DirectLine);
    assert_eq!(send(&mut interp, "hello\n"), vec!["Invalid Servo Number!"]);
    assert_eq!(send(&mut interp, "4\n"), vec!["Servo 4 Moved 0"]);
    assert_eq!(send(&mut interp, "3 abc\n"), vec!["Servo 3 Moved 0"]);
}

#[test]
fn direct_line_waits_for_newline() {
    let mut interp = interpreter(InterpreterMode::DirectLine);
    assert!(send(&mut interp, "3 1").is_empty());
    assert!(moves(&interp).iter().all(Vec::is_empty));
    assert_eq!(send(&mut interp, "20\r\n4 30\n"), vec!["Servo 3 Moved 120", "Servo 4 Moved 30"]);
}

#[test]
fn repeated_command_is_idempotent() {
    let mut interp = interpreter(InterpreterMode::DirectLine);
    let first = send(&mut interp, "2 77\n");
    let state = degrees(&interp);
    let second = send(&mut interp, "2 77\n");
    assert_eq!(first, second);
    assert_eq!(state, degrees(&interp));
}

#[test]
fn menu_single_update_clamps_and_confirms() {
    let mut interp = interpreter(InterpreterMode::MenuDriven);
    let out = send(&mut interp, "1\n");
    assert_eq!(interp.state(), MenuState::AwaitingSingleUpdateArgs);
    assert!(!out.is_empty());

    let out = send(&mut interp, "3 400\n");
    assert_eq!(out[0], "Servo 3 Moved 180");
    assert_eq!(&out[1..], &MENU);
    assert_eq!(degrees(&interp), vec![None, None, Some(180), None]);
    assert_eq!(interp.state(), MenuState::AwaitingMenuSelection);
}

#[test]
fn menu_all_update_moves_every_servo_once() {
    let mut interp = interpreter(InterpreterMode::MenuDriven);
    send(&mut interp, "2\n");
    assert_eq!(interp.state(), MenuState::AwaitingAllUpdateArgs);

    let out = send(&mut interp, "-10 50 200 90\n");
    assert_eq!(out[0], "Servos Moved to 0 50 180 90");
    assert_eq!(moves(&interp), vec![vec![0], vec![50], vec![180], vec![90]]);
    assert_eq!(interp.state(), MenuState::AwaitingMenuSelection);
}

#[test]
fn menu_invalid_selection_redisplays_menu() {
    let mut interp = interpreter(InterpreterMode::MenuDriven);
    for raw in ["0", "3", "-1", "x"] {
        let out = send(&mut interp, &format!("{raw}\n"));
        assert_eq!(out, MENU);
        assert_eq!(interp.state(), MenuState::AwaitingMenuSelection);
    }
    assert!(moves(&interp).iter().all(Vec::is_empty));
}

#[test]
fn menu_invalid_servo_reports_and_echoes() {
    let mut interp = interpreter(InterpreterMode::MenuDriven);
    send(&mut interp, "1\n");
    let out = send(&mut interp, "7 20\n");
    assert_eq!(out[..2], ["Invalid Servo Number!", "Servo 7 Moved 20"]);
    assert!(moves(&interp).iter().all(Vec::is_empty));
    assert_eq!(interp.state(), MenuState::AwaitingMenuSelection);
}

#[test]
fn menu_suspends_on_partial_arguments() {
    let mut interp = interpreter(InterpreterMode::MenuDriven);
    send(&mut interp, "2\n10 20 ");
    assert_eq!(interp.state(), MenuState::AwaitingAllUpdateArgs);
    assert!(send(&mut interp, "30").is_empty());
    assert!(moves(&interp).iter().all(Vec::is_empty));

    let out = send(&mut interp, " 40\n");
    assert_eq!(out[0], "Servos Moved to 10 20 30 40");
}

#[test]
fn menu_tokens_may_span_lines_and_batch() {
    let mut interp = interpreter(InterpreterMode::MenuDriven);
    let out = send(&mut interp, "1 4\n135\n2 1 2 3 4\n");
    assert!(out.contains(&"Servo 4 Moved 135".to_string()));
    assert!(out.contains(&"Servos Moved to 1 2 3 4".to_string()));
    assert_eq!(moves(&interp), vec![vec![1], vec![2], vec![3], vec![135, 4]]);
}

#[test]
fn greeting_depends_on_mode() {
    let direct = interpreter(InterpreterMode::DirectLine);
    assert_eq!(direct.greeting()[0], "Enter command: <servo_number> <angle>");
    let menu = interpreter(InterpreterMode::MenuDriven);
    assert_eq!(menu.greeting(), MENU);
}

#[test]
fn repeated_menu_commands_are_idempotent() {
    let mut interp = interpreter(InterpreterMode::MenuDriven);
    let first = send(&mut interp, "1\n3 400\n");
    let state = degrees(&interp);
    assert_eq!(send(&mut interp, "1\n3 400\n"), first);
    assert_eq!(degrees(&interp), state);

    let first = send(&mut interp, "2\n-10 50 200 90\n");
    let state = degrees(&interp);
    assert_eq!(send(&mut interp, "2\n-10 50 200 90\n"), first);
    assert_eq!(degrees(&interp), state);
    assert_eq!(state, vec![Some(0), Some(50), Some(180), Some(90)]);
}

#[test]
fn driver_failure_still_confirms() {
    #[derive(Default)]
    struct StalledServo;

    impl ServoDriver for StalledServo {
        fn write_angle(&mut self, _angle: Angle) -> Result<(), ArmError> {
            Err(ArmError::Actuator { servo: 0, reason: "stalled".into() })
        }
    }

    let bank: ActuatorBank<StalledServo> = ActuatorBank::new(Default::default());
    let mut interp = Interpreter::new(InterpreterMode::DirectLine, bank);
    interp.feed(b"1 45\n");
    assert_eq!(interp.step(), vec!["Servo 1 Moved 45"]);
    assert_eq!(interp.bank().commanded_angles(), [None::<Angle>; 4]);
}

#[test]
fn direct_line_recovers_after_overlong_line() {
    let mut interp = interpreter(InterpreterMode::DirectLine);
    assert!(send(&mut interp, &"x".repeat(100_000)).is_empty());
    assert_eq!(send(&mut interp, "\n2 60\n"), vec!["Invalid Servo Number!", "Servo 2 Moved 60"]);
}

#[test]
fn direct_line_scans_raw_bytes() {
    let mut interp = interpreter(InterpreterMode::DirectLine);
    interp.feed(b"3\xFF\xFF\xFF\xFF\xFF\xFF 90\n");
    assert_eq!(interp.step(), vec!["Servo 3 Moved 90"]);
}
