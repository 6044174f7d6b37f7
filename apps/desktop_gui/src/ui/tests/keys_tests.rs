use super::*;

#[test]
fn arrows_and_navigation_keys_map_directly() {
    assert_eq!(
        translate(egui::Key::ArrowDown, egui::Modifiers::NONE),
        KeyInput::new(Key::ArrowDown)
    );
    assert_eq!(
        translate(egui::Key::Space, egui::Modifiers::NONE),
        KeyInput::new(Key::Space)
    );
    assert_eq!(
        translate(egui::Key::Escape, egui::Modifiers::NONE),
        KeyInput::new(Key::Escape)
    );
}

#[test]
fn shift_is_carried_through() {
    assert_eq!(
        translate(egui::Key::ArrowLeft, egui::Modifiers::SHIFT),
        KeyInput::shifted(Key::ArrowLeft)
    );
}

#[test]
fn letters_become_lowercase_chars() {
    assert_eq!(
        translate(egui::Key::X, egui::Modifiers::NONE),
        KeyInput::new(Key::Char('x'))
    );
    assert_eq!(
        translate(egui::Key::A, egui::Modifiers::CTRL),
        KeyInput::with_modifiers(Key::Char('a'), Modifiers::CTRL)
    );
}

#[test]
fn mac_command_maps_to_meta() {
    assert_eq!(
        translate(egui::Key::A, egui::Modifiers::MAC_CMD),
        KeyInput::with_modifiers(Key::Char('a'), Modifiers::META)
    );
}

#[test]
fn named_keys_pass_through_as_other() {
    assert_eq!(
        translate(egui::Key::Tab, egui::Modifiers::NONE),
        KeyInput::new(Key::Other("Tab".to_string()))
    );
}
