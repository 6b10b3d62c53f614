use crossterm::event::KeyCode;

/// # Keymap
/// SUPER-CHIP input is generated with a hexadecimal keypad.
///
/// This original layout is mapped to the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
/// Letters match regardless of case so the keypad keeps working with caps lock on.
pub fn keymap(key: KeyCode) -> Option<u8> {
    let c = match key {
        KeyCode::Char(c) => c.to_ascii_lowercase(),
        _ => return None,
    };
    match c {
        'x' => Some(0x0),
        '1' => Some(0x1),
        '2' => Some(0x2),
        '3' => Some(0x3),
        'q' => Some(0x4),
        'w' => Some(0x5),
        'e' => Some(0x6),
        'a' => Some(0x7),
        's' => Some(0x8),
        'd' => Some(0x9),
        'z' => Some(0xA),
        'c' => Some(0xB),
        '4' => Some(0xC),
        'r' => Some(0xD),
        'f' => Some(0xE),
        'v' => Some(0xF),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_covers_keypad() {
        let mut keys: Vec<u8> = "1234qwerasdfzxcv"
            .chars()
            .filter_map(|c| keymap(KeyCode::Char(c)))
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, (0x0..=0xF).collect::<Vec<u8>>());
    }

    #[test]
    fn test_keymap_layout() {
        assert_eq!(keymap(KeyCode::Char('4')), Some(0xC));
        assert_eq!(keymap(KeyCode::Char('x')), Some(0x0));
        assert_eq!(keymap(KeyCode::Char('V')), Some(0xF));
    }

    #[test]
    fn test_keymap_ignores_other_keys() {
        assert_eq!(keymap(KeyCode::Char('5')), None);
        assert_eq!(keymap(KeyCode::Esc), None);
        assert_eq!(keymap(KeyCode::Enter), None);
    }
}
