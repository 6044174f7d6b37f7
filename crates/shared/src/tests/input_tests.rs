use super::*;

fn parse(token: &str) -> KeyInput {
    token.parse().expect("key token")
}

#[test]
fn parses_bare_key_names_and_aliases() {
    assert_eq!(parse("ArrowUp").key, Key::ArrowUp);
    assert_eq!(parse("down").key, Key::ArrowDown);
    assert_eq!(parse("LEFT").key, Key::ArrowLeft);
    assert_eq!(parse("arrowright").key, Key::ArrowRight);
    assert_eq!(parse("space").key, Key::Space);
    assert_eq!(parse("esc").key, Key::Escape);
    assert_eq!(parse("x"), KeyInput::new(Key::Char('x')));
    assert_eq!(parse("X").key, Key::Char('X'));
}

#[test]
fn unrecognized_names_become_other_keys() {
    assert_eq!(parse("Tab").key, Key::Other("Tab".to_string()));
    assert_eq!(parse("F5").key, Key::Other("F5".to_string()));
}

#[test]
fn parses_modifier_prefixes() {
    let input = parse("shift+ArrowDown");
    assert_eq!(input, KeyInput::shifted(Key::ArrowDown));

    let select_all = parse("ctrl+a");
    assert!(select_all.modifiers.ctrl);
    assert!(select_all.modifiers.command());

    let mac = parse("cmd+A");
    assert!(mac.modifiers.meta);
    assert_eq!(mac.key, Key::Char('A'));

    let combined = parse("Ctrl+Shift+up");
    assert_eq!(
        combined.modifiers,
        Modifiers {
            shift: true,
            ctrl: true,
            meta: false
        }
    );
}

#[test]
fn plus_key_can_be_named() {
    assert_eq!(parse("+").key, Key::Char('+'));
    let ctrl_plus = parse("ctrl++");
    assert_eq!(ctrl_plus.key, Key::Char('+'));
    assert!(ctrl_plus.modifiers.ctrl);
}

#[test]
fn rejects_unknown_modifiers_and_empty_tokens() {
    assert_eq!("".parse::<KeyInput>(), Err(GridError::EmptyKey));
    assert_eq!(
        "hyper+x".parse::<KeyInput>(),
        Err(GridError::UnknownModifier {
            modifier: "hyper".to_string(),
            token: "hyper+x".to_string(),
        })
    );
}

#[test]
fn display_round_trips_through_parse() {
    for token in ["ctrl+a", "shift+ArrowLeft", "space", "Escape", "x"] {
        let input = parse(token);
        assert_eq!(parse(&input.to_string()), input);
    }
}

#[test]
fn parses_sequences_separated_by_commas_or_whitespace() {
    let keys = parse_key_sequence("space, shift+down,x  ctrl+a\tEscape").expect("sequence");
    assert_eq!(
        keys,
        vec![
            KeyInput::new(Key::Space),
            KeyInput::shifted(Key::ArrowDown),
            KeyInput::new(Key::Char('x')),
            KeyInput::with_modifiers(Key::Char('a'), Modifiers::CTRL),
            KeyInput::new(Key::Escape),
        ]
    );
    assert!(parse_key_sequence("space,bogus+x").is_err());
    assert!(parse_key_sequence("").expect("empty").is_empty());
}
