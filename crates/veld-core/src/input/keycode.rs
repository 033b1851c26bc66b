// Copyright 2026 the Veld contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the physical key code space shared by all input backends.

use serde::{Deserialize, Serialize};

use crate::event::Modifiers;

/// A physical key, identified by its traditional PC scan code.
///
/// Backends map their native key identifiers onto these values; keys a
/// backend cannot map become [`KeyCode::Unassigned`] rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[allow(missing_docs)] // Key names are self-describing.
pub enum KeyCode {
    /// Sentinel for keys a backend could not map.
    Unassigned = 0x00,
    Escape = 0x01,
    Digit1 = 0x02,
    Digit2 = 0x03,
    Digit3 = 0x04,
    Digit4 = 0x05,
    Digit5 = 0x06,
    Digit6 = 0x07,
    Digit7 = 0x08,
    Digit8 = 0x09,
    Digit9 = 0x0A,
    Digit0 = 0x0B,
    /// `-` on the main keyboard.
    Minus = 0x0C,
    Equals = 0x0D,
    Backspace = 0x0E,
    Tab = 0x0F,
    Q = 0x10,
    W = 0x11,
    E = 0x12,
    R = 0x13,
    T = 0x14,
    Y = 0x15,
    U = 0x16,
    I = 0x17,
    O = 0x18,
    P = 0x19,
    LBracket = 0x1A,
    RBracket = 0x1B,
    /// Enter on the main keyboard.
    Return = 0x1C,
    LControl = 0x1D,
    A = 0x1E,
    S = 0x1F,
    D = 0x20,
    F = 0x21,
    G = 0x22,
    H = 0x23,
    J = 0x24,
    K = 0x25,
    L = 0x26,
    Semicolon = 0x27,
    Apostrophe = 0x28,
    Grave = 0x29,
    LShift = 0x2A,
    Backslash = 0x2B,
    Z = 0x2C,
    X = 0x2D,
    C = 0x2E,
    V = 0x2F,
    B = 0x30,
    N = 0x31,
    M = 0x32,
    Comma = 0x33,
    /// `.` on the main keyboard.
    Period = 0x34,
    /// `/` on the main keyboard.
    Slash = 0x35,
    RShift = 0x36,
    /// `*` on the numeric keypad.
    Multiply = 0x37,
    LAlt = 0x38,
    Space = 0x39,
    CapsLock = 0x3A,
    F1 = 0x3B,
    F2 = 0x3C,
    F3 = 0x3D,
    F4 = 0x3E,
    F5 = 0x3F,
    F6 = 0x40,
    F7 = 0x41,
    F8 = 0x42,
    F9 = 0x43,
    F10 = 0x44,
    NumLock = 0x45,
    ScrollLock = 0x46,
    Numpad7 = 0x47,
    Numpad8 = 0x48,
    Numpad9 = 0x49,
    /// `-` on the numeric keypad.
    Subtract = 0x4A,
    Numpad4 = 0x4B,
    Numpad5 = 0x4C,
    Numpad6 = 0x4D,
    /// `+` on the numeric keypad.
    Add = 0x4E,
    Numpad1 = 0x4F,
    Numpad2 = 0x50,
    Numpad3 = 0x51,
    Numpad0 = 0x52,
    /// `.` on the numeric keypad.
    Decimal = 0x53,
    /// `<` `>` `|` on UK and German keyboards.
    Oem102 = 0x56,
    F11 = 0x57,
    F12 = 0x58,
    F13 = 0x64,
    F14 = 0x65,
    F15 = 0x66,
    Kana = 0x70,
    AbntC1 = 0x73,
    Convert = 0x79,
    NoConvert = 0x7B,
    Yen = 0x7D,
    AbntC2 = 0x7E,
    NumpadEquals = 0x8D,
    PrevTrack = 0x90,
    At = 0x91,
    Colon = 0x92,
    Underline = 0x93,
    Kanji = 0x94,
    Stop = 0x95,
    Ax = 0x96,
    Unlabeled = 0x97,
    NextTrack = 0x99,
    NumpadEnter = 0x9C,
    RControl = 0x9D,
    Mute = 0xA0,
    Calculator = 0xA1,
    PlayPause = 0xA2,
    MediaStop = 0xA4,
    VolumeDown = 0xAE,
    VolumeUp = 0xB0,
    WebHome = 0xB2,
    NumpadComma = 0xB3,
    /// `/` on the numeric keypad.
    Divide = 0xB5,
    SysRq = 0xB7,
    RAlt = 0xB8,
    Pause = 0xC5,
    Home = 0xC7,
    Up = 0xC8,
    PageUp = 0xC9,
    Left = 0xCB,
    Right = 0xCD,
    End = 0xCF,
    Down = 0xD0,
    PageDown = 0xD1,
    Insert = 0xD2,
    Delete = 0xD3,
    LWin = 0xDB,
    RWin = 0xDC,
    Apps = 0xDD,
    Power = 0xDE,
    Sleep = 0xDF,
    Wake = 0xE3,
    WebSearch = 0xE5,
    WebFavorites = 0xE6,
    WebRefresh = 0xE7,
    WebStop = 0xE8,
    WebForward = 0xE9,
    WebBack = 0xEA,
    MyComputer = 0xEB,
    Mail = 0xEC,
    MediaSelect = 0xED,
}

impl KeyCode {
    /// Returns the printable character for the key under the given
    /// modifiers, or `None` for unmapped combinations.
    ///
    /// Only the unmodified and shift-only layouts of a US keyboard are
    /// mapped; any other modifier combination yields `None`.
    pub fn to_char(self, modifiers: Modifiers) -> Option<char> {
        use KeyCode::*;
        if modifiers.is_empty() {
            match self {
                Digit1 | Numpad1 => Some('1'),
                Digit2 | Numpad2 => Some('2'),
                Digit3 | Numpad3 => Some('3'),
                Digit4 | Numpad4 => Some('4'),
                Digit5 | Numpad5 => Some('5'),
                Digit6 | Numpad6 => Some('6'),
                Digit7 | Numpad7 => Some('7'),
                Digit8 | Numpad8 => Some('8'),
                Digit9 | Numpad9 => Some('9'),
                Digit0 | Numpad0 => Some('0'),
                Minus | Subtract => Some('-'),
                Equals | NumpadEquals => Some('='),
                Q => Some('q'),
                W => Some('w'),
                E => Some('e'),
                R => Some('r'),
                T => Some('t'),
                Y => Some('y'),
                U => Some('u'),
                I => Some('i'),
                O => Some('o'),
                P => Some('p'),
                LBracket => Some('['),
                RBracket => Some(']'),
                A => Some('a'),
                S => Some('s'),
                D => Some('d'),
                F => Some('f'),
                G => Some('g'),
                H => Some('h'),
                J => Some('j'),
                K => Some('k'),
                L => Some('l'),
                Semicolon => Some(';'),
                Apostrophe => Some('\''),
                Grave => Some('`'),
                Backslash => Some('\\'),
                Z => Some('z'),
                X => Some('x'),
                C => Some('c'),
                V => Some('v'),
                B => Some('b'),
                N => Some('n'),
                M => Some('m'),
                Comma | NumpadComma => Some(','),
                Period | Decimal => Some('.'),
                Slash | Divide => Some('/'),
                Multiply => Some('*'),
                Space => Some(' '),
                Add => Some('+'),
                At => Some('@'),
                Colon => Some(':'),
                Underline => Some('_'),
                _ => None,
            }
        } else if modifiers == Modifiers::SHIFT {
            match self {
                Digit1 => Some('!'),
                Digit2 => Some('@'),
                Digit3 => Some('#'),
                Digit4 => Some('$'),
                Digit5 => Some('%'),
                Digit6 => Some('^'),
                Digit7 => Some('&'),
                Digit8 => Some('*'),
                Digit9 => Some('('),
                Digit0 => Some(')'),
                Minus => Some('_'),
                Equals => Some('+'),
                Q => Some('Q'),
                W => Some('W'),
                E => Some('E'),
                R => Some('R'),
                T => Some('T'),
                Y => Some('Y'),
                U => Some('U'),
                I => Some('I'),
                O => Some('O'),
                P => Some('P'),
                LBracket => Some('{'),
                RBracket => Some('}'),
                A => Some('A'),
                S => Some('S'),
                D => Some('D'),
                F => Some('F'),
                G => Some('G'),
                H => Some('H'),
                J => Some('J'),
                K => Some('K'),
                L => Some('L'),
                Semicolon => Some(':'),
                Apostrophe => Some('"'),
                Grave => Some('~'),
                Backslash => Some('|'),
                Z => Some('Z'),
                X => Some('X'),
                C => Some('C'),
                V => Some('V'),
                B => Some('B'),
                N => Some('N'),
                M => Some('M'),
                Comma => Some('<'),
                Period => Some('>'),
                Slash => Some('?'),
                Multiply => Some('*'),
                Space => Some(' '),
                _ => None,
            }
        } else {
            None
        }
    }

    /// Returns `true` for the sentinel value backends use for keys they
    /// cannot map.
    #[inline]
    pub fn is_unassigned(self) -> bool {
        self == KeyCode::Unassigned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmodified_chars() {
        assert_eq!(KeyCode::A.to_char(Modifiers::empty()), Some('a'));
        assert_eq!(KeyCode::Digit5.to_char(Modifiers::empty()), Some('5'));
        assert_eq!(KeyCode::Space.to_char(Modifiers::empty()), Some(' '));
        assert_eq!(KeyCode::Escape.to_char(Modifiers::empty()), None);
    }

    #[test]
    fn shifted_chars() {
        assert_eq!(KeyCode::A.to_char(Modifiers::SHIFT), Some('A'));
        assert_eq!(KeyCode::Digit1.to_char(Modifiers::SHIFT), Some('!'));
        assert_eq!(KeyCode::Slash.to_char(Modifiers::SHIFT), Some('?'));
        assert_eq!(KeyCode::F1.to_char(Modifiers::SHIFT), None);
    }

    #[test]
    fn other_modifier_combinations_unmapped() {
        assert_eq!(KeyCode::A.to_char(Modifiers::CTRL), None);
        assert_eq!(KeyCode::A.to_char(Modifiers::SHIFT | Modifiers::ALT), None);
    }

    #[test]
    fn unassigned_sentinel() {
        assert!(KeyCode::Unassigned.is_unassigned());
        assert!(!KeyCode::Q.is_unassigned());
        assert_eq!(KeyCode::Unassigned.to_char(Modifiers::empty()), None);
    }
}
