//! Key token notation: Keystroke, Modifiers, KeyCode
//!
//! The terminal backend hands us one token per key press. Plain characters
//! are themselves (`j`, `G`, `:`); named keys and chords use a bracketed
//! syntax (`<Up>`, `<Tab>`, `<C-w>`, `<S-Tab>`). A key sequence is just the
//! concatenation of its tokens, so `<C-w>w` is two key presses.

use std::fmt;

use super::config::KeymapError;

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b001);
    pub const SHIFT: Modifiers = Modifiers(0b010);
    pub const ALT: Modifiers = Modifiers(0b100);

    /// Create modifiers from individual flags
    pub const fn new(ctrl: bool, shift: bool, alt: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= 0b001;
        }
        if shift {
            bits |= 0b010;
        }
        if alt {
            bits |= 0b100;
        }
        Modifiers(bits)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b001 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b010 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b100 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// A key code representing a logical key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key, case preserved (`g` and `G` are different keys)
    Char(char),

    // Named keys
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,

    // Arrow keys
    Up,
    Down,
    Left,
    Right,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,
    Insert,

    // Function keys
    F(u8), // F1-F12
}

impl KeyCode {
    /// Name used inside a bracketed token, `None` for plain characters
    ///
    /// The angle brackets are spelled `lt` and `gt` so they never collide
    /// with the token delimiters.
    fn token_name(self) -> Option<String> {
        let name = match self {
            KeyCode::Char('<') => "lt",
            KeyCode::Char('>') => "gt",
            KeyCode::Char(_) => return None,
            KeyCode::Enter => "Enter",
            KeyCode::Escape => "Esc",
            KeyCode::Tab => "Tab",
            KeyCode::Backspace => "BS",
            KeyCode::Delete => "Del",
            KeyCode::Space => "Space",
            KeyCode::Up => "Up",
            KeyCode::Down => "Down",
            KeyCode::Left => "Left",
            KeyCode::Right => "Right",
            KeyCode::Home => "Home",
            KeyCode::End => "End",
            KeyCode::PageUp => "PageUp",
            KeyCode::PageDown => "PageDown",
            KeyCode::Insert => "Insert",
            KeyCode::F(n) => return Some(format!("F{}", n)),
        };
        Some(name.to_string())
    }

    /// Parse the key part of a bracketed token (`Tab`, `w`, `F5`)
    fn from_token_name(name: &str) -> Option<KeyCode> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(KeyCode::Char(c));
        }

        match name.to_lowercase().as_str() {
            "enter" | "cr" | "return" => Some(KeyCode::Enter),
            "esc" | "escape" => Some(KeyCode::Escape),
            "tab" => Some(KeyCode::Tab),
            "bs" | "backspace" => Some(KeyCode::Backspace),
            "del" | "delete" => Some(KeyCode::Delete),
            "space" => Some(KeyCode::Space),
            "lt" => Some(KeyCode::Char('<')),
            "gt" => Some(KeyCode::Char('>')),
            "up" => Some(KeyCode::Up),
            "down" => Some(KeyCode::Down),
            "left" => Some(KeyCode::Left),
            "right" => Some(KeyCode::Right),
            "home" => Some(KeyCode::Home),
            "end" => Some(KeyCode::End),
            "pageup" => Some(KeyCode::PageUp),
            "pagedown" => Some(KeyCode::PageDown),
            "insert" => Some(KeyCode::Insert),
            lower => {
                let n: u8 = lower.strip_prefix('f')?.parse().ok()?;
                (1..=12).contains(&n).then_some(KeyCode::F(n))
            }
        }
    }
}

/// A single keystroke: a key with modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl Keystroke {
    pub const fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    /// Create a keystroke with no modifiers
    pub const fn key(key: KeyCode) -> Self {
        Self {
            key,
            mods: Modifiers::NONE,
        }
    }

    /// Create a plain character keystroke
    pub const fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    /// Encode this keystroke as the token the resolution engine consumes
    ///
    /// A bare `<` would start every bracketed binding, so it is always
    /// written `<lt>`.
    pub fn to_token(&self) -> String {
        match self.key {
            KeyCode::Char(c) if c != '<' && self.mods.is_empty() => return c.to_string(),
            _ => {}
        }

        let mut token = String::from("<");
        if self.mods.ctrl() {
            token.push_str("C-");
        }
        if self.mods.shift() {
            token.push_str("S-");
        }
        if self.mods.alt() {
            token.push_str("M-");
        }
        match self.key.token_name() {
            Some(name) => token.push_str(&name),
            None => {
                if let KeyCode::Char(c) = self.key {
                    token.push(c);
                }
            }
        }
        token.push('>');
        token
    }

    /// Parse a single token (`j`, `<Up>`, `<C-w>`)
    pub fn parse_token(token: &str) -> Result<Keystroke, KeymapError> {
        let invalid = || KeymapError::InvalidKey(token.to_string());

        let Some(inner) = token.strip_prefix('<').and_then(|t| t.strip_suffix('>')) else {
            let mut chars = token.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Keystroke::char(c)),
                _ => Err(invalid()),
            };
        };

        let mut mods = Modifiers::NONE;
        let mut rest = inner;
        // Modifier prefixes are a single letter followed by '-'; `<->` is the minus key
        while let Some((prefix, tail)) = rest.split_once('-') {
            if tail.is_empty() {
                break;
            }
            let modifier = match prefix {
                "C" | "c" => Modifiers::CTRL,
                "S" | "s" => Modifiers::SHIFT,
                "M" | "m" | "A" | "a" => Modifiers::ALT,
                _ => break,
            };
            mods = mods | modifier;
            rest = tail;
        }

        let key = KeyCode::from_token_name(rest).ok_or_else(invalid)?;
        Ok(Keystroke::new(key, mods))
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_token())
    }
}

/// Split a key sequence into its tokens
///
/// A `<` opens a bracketed token only when a matching `>` closes it before
/// the next `<`; otherwise it is an ordinary character. This never fails,
/// so arbitrary input always splits into something.
pub fn split_tokens(sequence: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = sequence;

    while let Some(c) = rest.chars().next() {
        let len = (c == '<')
            .then(|| bracketed_len(rest))
            .flatten()
            .unwrap_or(c.len_utf8());
        let (token, tail) = rest.split_at(len);
        tokens.push(token);
        rest = tail;
    }

    tokens
}

/// Length of the bracketed token at the start of `s`, if there is one
fn bracketed_len(s: &str) -> Option<usize> {
    let body = &s[1..];
    let close = body.find('>')?;
    // `<>` is two characters, not an empty token
    if close == 0 || body[..close].contains('<') {
        return None;
    }
    Some(close + 2)
}

/// Rewrite every lone `<` in a sequence as `<lt>`
///
/// Sequences written by hand may contain a bare `<`; keystrokes arrive as
/// `<lt>`, so stored bindings use that spelling.
pub fn normalize_sequence(sequence: &str) -> String {
    split_tokens(sequence)
        .into_iter()
        .map(|token| if token == "<" { "<lt>" } else { token })
        .collect()
}

/// Human-readable rendering of a key sequence: tokens separated by spaces
pub fn display_sequence(sequence: &str) -> String {
    split_tokens(sequence).join(" ")
}
