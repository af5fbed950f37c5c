#![no_main]

use arbitrary::Arbitrary;
use bboard_core::event::{Event, KeyCode, KeyEvent, Modifiers};
use bboard_widgets::{EditOutcome, InlineEditSession};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Input {
    Char(char),
    Backspace,
    Delete,
    Left { shift: bool, ctrl: bool },
    Right { shift: bool, ctrl: bool },
    Home,
    End,
    SelectAll,
    Paste(String),
    Enter,
    Escape,
    Blur,
}

fn to_event(input: Input) -> Event {
    let with = |code, shift: bool, ctrl: bool| {
        let mut modifiers = Modifiers::NONE;
        if shift {
            modifiers |= Modifiers::SHIFT;
        }
        if ctrl {
            modifiers |= Modifiers::CTRL;
        }
        Event::Key(KeyEvent::new(code).with_modifiers(modifiers))
    };
    match input {
        Input::Char(c) => Event::key(KeyCode::Char(c)),
        Input::Backspace => Event::key(KeyCode::Backspace),
        Input::Delete => Event::key(KeyCode::Delete),
        Input::Left { shift, ctrl } => with(KeyCode::Left, shift, ctrl),
        Input::Right { shift, ctrl } => with(KeyCode::Right, shift, ctrl),
        Input::Home => Event::key(KeyCode::Home),
        Input::End => Event::key(KeyCode::End),
        Input::SelectAll => with(KeyCode::Char('a'), false, true),
        Input::Paste(text) => Event::Paste(text),
        Input::Enter => Event::key(KeyCode::Enter),
        Input::Escape => Event::key(KeyCode::Escape),
        Input::Blur => Event::blur(),
    }
}

fuzz_target!(|data: (String, Vec<Input>)| {
    let (initial, inputs) = data;
    if initial.len() > 256 || inputs.len() > 256 {
        return;
    }

    let mut session = InlineEditSession::new();
    session.start(&initial);
    for input in inputs {
        session.handle_event(&to_event(input));
        let field = session.field();
        assert!(field.cursor() <= field.value().len());
    }

    let cancelled = session.is_cancelled();
    let text = session.text().to_owned();
    match session.blur() {
        EditOutcome::Cancelled => assert!(cancelled),
        EditOutcome::Unchanged => assert_eq!(text, initial),
        EditOutcome::Committed(value) => {
            assert!(!cancelled);
            assert_ne!(value, initial);
            assert_eq!(value, text);
        }
        EditOutcome::Idle => panic!("a started session never blurs to Idle"),
    }
    assert!(!session.is_editing());
});
