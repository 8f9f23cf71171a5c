use gridlock::terminal::{parse_command, TerminalCommand, TerminalRenderer};
use gridlock::{InputEvent, PointerButton, RenderAdapter, Session};

#[test]
fn parses_pointer_commands() {
    assert_eq!(
        parse_command("click 10 20.5"),
        Some(TerminalCommand::Event(InputEvent::Press {
            x: 10.0,
            y: 20.5,
            button: PointerButton::Primary
        }))
    );
    assert_eq!(
        parse_command("MOVE 1 2"),
        Some(TerminalCommand::Event(InputEvent::Motion { x: 1.0, y: 2.0 }))
    );
    assert_eq!(
        parse_command("resize 640 360"),
        Some(TerminalCommand::Event(InputEvent::Resize {
            width: 640.0,
            height: 360.0
        }))
    );
    assert_eq!(parse_command("click 10"), None);
    assert_eq!(parse_command("move a b"), None);
}

#[test]
fn parses_shortcuts() {
    assert_eq!(parse_command("4"), Some(TerminalCommand::Cell(4)));
    assert_eq!(parse_command(" 8 "), Some(TerminalCommand::Cell(8)));
    assert_eq!(parse_command("9"), None);
    assert_eq!(parse_command("new"), Some(TerminalCommand::Event(InputEvent::NewGame)));
    assert_eq!(parse_command("q"), Some(TerminalCommand::Event(InputEvent::Quit)));
    assert_eq!(parse_command(""), None);
    assert_eq!(parse_command("jump"), None);
}

#[test]
fn unchanged_frames_print_once() {
    let mut session = Session::local(0);
    let mut renderer = TerminalRenderer::new();
    session.step(16);
    session.render(&mut renderer);
    let first = renderer.last_printed().map(str::to_string);
    session.step(32);
    session.render(&mut renderer);
    assert_eq!(renderer.presented(), 2);
    assert_eq!(renderer.last_printed().map(str::to_string), first);
    let text = first.unwrap();
    assert!(text.starts_with("you: A   0   |   them: B   0"));
    assert!(text.contains(" 0  1  2 \n"));

    renderer.present_frame();
    assert_eq!(renderer.presented(), 3);
}
