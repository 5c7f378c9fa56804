use super::*;

#[test]
fn key_codes_map_to_commands() {
    assert_eq!(Command::from_key(27), Command::Quit);
    assert_eq!(Command::from_key(113), Command::Quit);
    assert_eq!(Command::from_key(97), Command::DecreaseOffset);
    assert_eq!(Command::from_key(100), Command::IncreaseOffset);
    assert_eq!(Command::from_key(32), Command::ToggleFreeze);
    assert_eq!(Command::from_key(-1), Command::None);
    assert_eq!(Command::from_key(120), Command::None);
}

#[test]
fn chars_share_the_key_layout() {
    assert_eq!(Command::from_char('q'), Command::Quit);
    assert_eq!(Command::from_char('\u{1b}'), Command::Quit);
    assert_eq!(Command::from_char(' '), Command::ToggleFreeze);
    assert_eq!(Command::from_char('é'), Command::None);
}

#[test]
fn no_input_is_idle() {
    assert_eq!(NoInput.poll_command(), Command::None);
}
