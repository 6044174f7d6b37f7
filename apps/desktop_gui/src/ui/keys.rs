//! Translation from egui key events to grid key input.

use shared::input::{Key, KeyInput, Modifiers};

pub fn translate(key: egui::Key, modifiers: egui::Modifiers) -> KeyInput {
    KeyInput::with_modifiers(
        translate_key(key),
        Modifiers {
            shift: modifiers.shift,
            ctrl: modifiers.ctrl,
            meta: modifiers.mac_cmd,
        },
    )
}

fn translate_key(key: egui::Key) -> Key {
    match key {
        egui::Key::ArrowUp => Key::ArrowUp,
        egui::Key::ArrowDown => Key::ArrowDown,
        egui::Key::ArrowLeft => Key::ArrowLeft,
        egui::Key::ArrowRight => Key::ArrowRight,
        egui::Key::Space => Key::Space,
        egui::Key::Escape => Key::Escape,
        other => {
            let name = other.name();
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Key::Char(ch.to_ascii_lowercase()),
                _ => Key::Other(name.to_string()),
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/keys_tests.rs"]
mod tests;
