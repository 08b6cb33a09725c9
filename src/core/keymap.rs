/// Physical key to ASCII mapping for the input line.
///
/// Letters honor Shift for case (caps-lock is ignored); every other
/// printable key contributes its unshifted ASCII code whether or not
/// Shift is held. No keyboard-layout emulation: Shift+1 yields '1',
/// not '!'.

use winit::keyboard::KeyCode;

pub fn ascii_for_key(code: KeyCode, shift: bool) -> Option<char> {
    use KeyCode::*;

    let base = match code {
        Space => ' ',
        Quote => '\'',
        Comma => ',',
        Minus => '-',
        Period => '.',
        Slash => '/',
        Digit0 => '0',
        Digit1 => '1',
        Digit2 => '2',
        Digit3 => '3',
        Digit4 => '4',
        Digit5 => '5',
        Digit6 => '6',
        Digit7 => '7',
        Digit8 => '8',
        Digit9 => '9',
        Semicolon => ';',
        Equal => '=',
        KeyA => 'a',
        KeyB => 'b',
        KeyC => 'c',
        KeyD => 'd',
        KeyE => 'e',
        KeyF => 'f',
        KeyG => 'g',
        KeyH => 'h',
        KeyI => 'i',
        KeyJ => 'j',
        KeyK => 'k',
        KeyL => 'l',
        KeyM => 'm',
        KeyN => 'n',
        KeyO => 'o',
        KeyP => 'p',
        KeyQ => 'q',
        KeyR => 'r',
        KeyS => 's',
        KeyT => 't',
        KeyU => 'u',
        KeyV => 'v',
        KeyW => 'w',
        KeyX => 'x',
        KeyY => 'y',
        KeyZ => 'z',
        BracketLeft => '[',
        Backslash => '\\',
        BracketRight => ']',
        Backquote => '`',
        _ => return None,
    };

    if base.is_ascii_lowercase() && shift {
        Some(base.to_ascii_uppercase())
    } else {
        Some(base)
    }
}
