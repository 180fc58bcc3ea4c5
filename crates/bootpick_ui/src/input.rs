//! Input events fed in by the outer poll loop.

/// Primary pointer button transitions.
///
/// A gesture is one `PrimaryDown`, any number of `PrimaryHold`, and one
/// `PrimaryUp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEvent {
    /// Button went down.
    PrimaryDown,
    /// Button is still held, pointer may have moved.
    PrimaryHold,
    /// Button was released.
    PrimaryUp,
}

impl PointerEvent {
    /// Returns true for the event that ends a gesture.
    #[must_use]
    pub const fn ends_gesture(self) -> bool {
        matches!(self, Self::PrimaryUp)
    }
}

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Enter/Return key.
    Enter,
    /// Space bar.
    Space,
    /// Escape key.
    Escape,
    /// Any other printable character.
    Char(char),
}

impl Key {
    /// Maps a firmware key stroke to a [`Key`].
    ///
    /// `scan_code` follows the UEFI simple text input numbering; a zero scan
    /// code means the stroke is carried by `unicode_char` alone.
    #[must_use]
    pub fn from_firmware(scan_code: u16, unicode_char: u16) -> Option<Self> {
        match scan_code {
            0x01 => Some(Self::Up),
            0x02 => Some(Self::Down),
            0x03 => Some(Self::Right),
            0x04 => Some(Self::Left),
            0x17 => Some(Self::Escape),
            0 => match char::from_u32(u32::from(unicode_char))? {
                '\r' => Some(Self::Enter),
                ' ' => Some(Self::Space),
                '\0' => None,
                other => Some(Self::Char(other)),
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firmware_key_mapping() {
        assert_eq!(Key::from_firmware(0x03, 0), Some(Key::Right));
        assert_eq!(Key::from_firmware(0x04, 0), Some(Key::Left));
        assert_eq!(Key::from_firmware(0x17, 0), Some(Key::Escape));
        assert_eq!(Key::from_firmware(0, u16::from(b'\r')), Some(Key::Enter));
        assert_eq!(Key::from_firmware(0, u16::from(b' ')), Some(Key::Space));
        assert_eq!(Key::from_firmware(0, u16::from(b'x')), Some(Key::Char('x')));
        assert_eq!(Key::from_firmware(0, 0), None);
        assert_eq!(Key::from_firmware(0x0B, 0), None);
    }
}
