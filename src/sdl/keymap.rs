use sdl2::keyboard::Scancode;

/// Map a physical key to its keypad index. The left-hand block of a QWERTY
/// keyboard stands in for the 4x4 hex pad:
///
/// ```text
/// 1 2 3 4        1 2 3 C
/// q w e r   ->   4 5 6 D
/// a s d f        7 8 9 E
/// z x c v        A 0 B F
/// ```
///
/// Anything else is not a keypad key and maps to `None`; callers drop those
/// events silently.
pub fn translate(scancode: Scancode) -> Option<u8> {
    match scancode {
        Scancode::Num1 => Some(0x1),
        Scancode::Num2 => Some(0x2),
        Scancode::Num3 => Some(0x3),
        Scancode::Num4 => Some(0xc),
        Scancode::Q => Some(0x4),
        Scancode::W => Some(0x5),
        Scancode::E => Some(0x6),
        Scancode::R => Some(0xd),
        Scancode::A => Some(0x7),
        Scancode::S => Some(0x8),
        Scancode::D => Some(0x9),
        Scancode::F => Some(0xe),
        Scancode::Z => Some(0xa),
        Scancode::X => Some(0x0),
        Scancode::C => Some(0xb),
        Scancode::V => Some(0xf),
        _ => None,
    }
}
