use crate::game::Dir;
use winit::event::VirtualKeyCode;

/// Key codes the window loop watches for movement.
pub const MOVEMENT_KEYS: [VirtualKeyCode; 8] = [
    VirtualKeyCode::Up,
    VirtualKeyCode::W,
    VirtualKeyCode::Down,
    VirtualKeyCode::S,
    VirtualKeyCode::Left,
    VirtualKeyCode::A,
    VirtualKeyCode::Right,
    VirtualKeyCode::D,
];

/// Map a key identifier ("ArrowUp", "w", "D", ...) to a direction.
/// Case-insensitive; anything else is `None`.
pub fn parse_key(key: &str) -> Option<Dir> {
    match key.to_ascii_lowercase().as_str() {
        "arrowup" | "w" => Some(Dir::Up),
        "arrowdown" | "s" => Some(Dir::Down),
        "arrowleft" | "a" => Some(Dir::Left),
        "arrowright" | "d" => Some(Dir::Right),
        _ => None,
    }
}

pub fn key_name(code: VirtualKeyCode) -> Option<&'static str> {
    Some(match code {
        VirtualKeyCode::Up => "ArrowUp",
        VirtualKeyCode::Down => "ArrowDown",
        VirtualKeyCode::Left => "ArrowLeft",
        VirtualKeyCode::Right => "ArrowRight",
        VirtualKeyCode::W => "w",
        VirtualKeyCode::A => "a",
        VirtualKeyCode::S => "s",
        VirtualKeyCode::D => "d",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_wasd() {
        assert_eq!(parse_key("arrowup"), Some(Dir::Up));
        assert_eq!(parse_key("s"), Some(Dir::Down));
        assert_eq!(parse_key("a"), Some(Dir::Left));
        assert_eq!(parse_key("ArrowRight"), Some(Dir::Right));
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(parse_key("W"), Some(Dir::Up));
        assert_eq!(parse_key("ARROWLEFT"), Some(Dir::Left));
    }

    #[test]
    fn unknown_keys_ignored() {
        assert_eq!(parse_key("q"), None);
        assert_eq!(parse_key(" "), None);
        assert_eq!(parse_key(""), None);
    }

    #[test]
    fn every_movement_key_maps_to_a_direction() {
        for code in MOVEMENT_KEYS {
            let name = key_name(code).unwrap();
            assert!(parse_key(name).is_some(), "{name}");
        }
        assert_eq!(key_name(VirtualKeyCode::Escape), None);
    }
}
