//! Helix key notation.
//!
//! A command is a sequence of keys: single characters are typed as-is, and
//! named or modified keys are written in angle brackets (`<esc>`, `<A-s>`,
//! `<C-x>`, `<S-tab>`). A `<` that is never closed is a literal `<`.

use std::fmt;
use std::ops::Range;

use bitflags::bitflags;

/// A single key press.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Represents a key.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum KeyCode {
    Backspace,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    Delete,
    Insert,
    /// `KeyCode::F(1)` represents the F1 key.
    F(u8),
    Char(char),
    Null,
    Esc,
}

bitflags! {
    /// Key modifiers (shift, control, alt, super).
    #[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
    pub struct KeyModifiers: u8 {
        const SHIFT = 0b0000_0001;
        const CONTROL = 0b0000_0010;
        const ALT = 0b0000_0100;
        const SUPER = 0b0000_1000;
    }
}

mod names {
    pub(super) const BACKSPACE: &str = "backspace";
    pub(super) const RET: &str = "ret";
    pub(super) const ENTER: &str = "enter";
    pub(super) const LEFT: &str = "left";
    pub(super) const RIGHT: &str = "right";
    pub(super) const UP: &str = "up";
    pub(super) const DOWN: &str = "down";
    pub(super) const HOME: &str = "home";
    pub(super) const END: &str = "end";
    pub(super) const PAGEUP: &str = "pageup";
    pub(super) const PAGEDOWN: &str = "pagedown";
    pub(super) const TAB: &str = "tab";
    pub(super) const DELETE: &str = "del";
    pub(super) const INSERT: &str = "ins";
    pub(super) const NULL: &str = "null";
    pub(super) const ESC: &str = "esc";
    pub(super) const SPACE: &str = "space";
    pub(super) const MINUS: &str = "minus";
    pub(super) const LESS_THAN: &str = "lt";
    pub(super) const GREATER_THAN: &str = "gt";
}

/// Error returned when a key sequence cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason} (at bytes {}..{})", span.start, span.end)]
pub struct KeyParseError {
    /// What is wrong with the key.
    pub reason: String,
    /// Byte range of the offending key within the command.
    pub span: Range<usize>,
}

/// Parse a command in Helix key notation.
///
/// # Errors
///
/// Returns `KeyParseError` for unknown key names, unknown or repeated
/// modifiers, and `-` combined with modifiers.
///
/// ```
/// use golf_examples::{KeyCode, KeyModifiers, parse_keys};
///
/// let keys = parse_keys("%<A-s>ms\"").unwrap();
/// assert_eq!(keys.len(), 5);
/// assert_eq!(keys[1].code, KeyCode::Char('s'));
/// assert_eq!(keys[1].modifiers, KeyModifiers::ALT);
/// ```
pub fn parse_keys(command: &str) -> Result<Vec<KeyEvent>, KeyParseError> {
    let mut keys = Vec::new();
    let mut chars = command.char_indices();

    while let Some((start, c)) = chars.next() {
        match c {
            '<' => match command[start..].find('>') {
                Some(close) => {
                    let end = start + close + 1;
                    keys.push(parse_key(&command[start + 1..end - 1], start..end)?);
                    // Skip to the closing bracket.
                    while chars.next().is_some_and(|(i, _)| i + 1 < end) {}
                }
                None => keys.push(KeyEvent::char('<')),
            },
            other => keys.push(KeyEvent::char(other)),
        }
    }

    Ok(keys)
}

/// Parse the contents of one `<...>` group.
fn parse_key(s: &str, span: Range<usize>) -> Result<KeyEvent, KeyParseError> {
    let error = |reason: String| KeyParseError {
        reason,
        span: span.clone(),
    };

    if s == "-" {
        return Ok(KeyEvent::char('-'));
    }

    let mut tokens: Vec<&str> = s.split('-').collect();
    let code_token = tokens.pop().unwrap_or_default();

    let mut code = match code_token {
        names::BACKSPACE => KeyCode::Backspace,
        names::RET | names::ENTER => KeyCode::Enter,
        names::LEFT => KeyCode::Left,
        names::RIGHT => KeyCode::Right,
        names::UP => KeyCode::Up,
        names::DOWN => KeyCode::Down,
        names::HOME => KeyCode::Home,
        names::END => KeyCode::End,
        names::PAGEUP => KeyCode::PageUp,
        names::PAGEDOWN => KeyCode::PageDown,
        names::TAB => KeyCode::Tab,
        names::DELETE => KeyCode::Delete,
        names::INSERT => KeyCode::Insert,
        names::NULL => KeyCode::Null,
        names::ESC => KeyCode::Esc,
        names::SPACE => KeyCode::Char(' '),
        names::MINUS => KeyCode::Char('-'),
        names::LESS_THAN => KeyCode::Char('<'),
        names::GREATER_THAN => KeyCode::Char('>'),
        single if single.chars().count() == 1 => {
            KeyCode::Char(single.chars().next().unwrap_or_default())
        }
        function if function.len() > 1 && function.starts_with('F') => {
            let number: u8 = function[1..]
                .parse()
                .map_err(|_| error(format!("Invalid key code '{function}'")))?;
            if !(1..=24).contains(&number) {
                return Err(error(format!("Invalid function key {number}")));
            }
            KeyCode::F(number)
        }
        // An empty last token means the key was `-` itself, e.g. `A--`.
        "" if tokens.last().is_some_and(|t| t.is_empty()) => {
            let prefix = s.trim_end_matches('-');
            return Err(error(format!(
                "Key '-' cannot be used with modifiers, use '{prefix}-{}' instead",
                names::MINUS
            )));
        }
        "" => return Err(error(format!("Missing key code in '<{s}>'"))),
        invalid => return Err(error(format!("Invalid key code '{invalid}'"))),
    };

    let mut modifiers = KeyModifiers::empty();
    for token in tokens {
        let flag = match token {
            "S" | "shift" => KeyModifiers::SHIFT,
            "A" | "alt" => KeyModifiers::ALT,
            "C" | "ctrl" => KeyModifiers::CONTROL,
            "Meta" | "Cmd" | "Win" => KeyModifiers::SUPER,
            _ => return Err(error(format!("Invalid key modifier '{token}-'"))),
        };
        if modifiers.contains(flag) {
            return Err(error(format!("Repeated key modifier '{token}-'")));
        }
        modifiers.insert(flag);
    }

    // `S-r` and `R` are the same key.
    if let KeyCode::Char(ch) = code
        && ch.is_ascii_lowercase()
        && modifiers.contains(KeyModifiers::SHIFT)
    {
        code = KeyCode::Char(ch.to_ascii_uppercase());
        modifiers.remove(KeyModifiers::SHIFT);
    }

    Ok(KeyEvent { code, modifiers })
}

impl KeyEvent {
    /// An unmodified character key.
    #[must_use]
    pub const fn char(ch: char) -> Self {
        Self {
            code: KeyCode::Char(ch),
            modifiers: KeyModifiers::empty(),
        }
    }
}

/// Helix notation, e.g. `<A-s>`, `<esc>`, `x`.
impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.code {
            KeyCode::Char(ch) if self.modifiers.is_empty() => {
                return match ch {
                    '<' => write!(f, "<{}>", names::LESS_THAN),
                    '>' => write!(f, "<{}>", names::GREATER_THAN),
                    ch => write!(f, "{ch}"),
                };
            }
            KeyCode::Char(' ') => names::SPACE.to_owned(),
            KeyCode::Char('-') => names::MINUS.to_owned(),
            KeyCode::Char(ch) => ch.to_string(),
            KeyCode::F(n) => format!("F{n}"),
            KeyCode::Backspace => names::BACKSPACE.to_owned(),
            KeyCode::Enter => names::RET.to_owned(),
            KeyCode::Left => names::LEFT.to_owned(),
            KeyCode::Right => names::RIGHT.to_owned(),
            KeyCode::Up => names::UP.to_owned(),
            KeyCode::Down => names::DOWN.to_owned(),
            KeyCode::Home => names::HOME.to_owned(),
            KeyCode::End => names::END.to_owned(),
            KeyCode::PageUp => names::PAGEUP.to_owned(),
            KeyCode::PageDown => names::PAGEDOWN.to_owned(),
            KeyCode::Tab => names::TAB.to_owned(),
            KeyCode::Delete => names::DELETE.to_owned(),
            KeyCode::Insert => names::INSERT.to_owned(),
            KeyCode::Null => names::NULL.to_owned(),
            KeyCode::Esc => names::ESC.to_owned(),
        };
        f.write_str("<")?;
        for (flag, prefix) in [
            (KeyModifiers::SUPER, "Meta-"),
            (KeyModifiers::SHIFT, "S-"),
            (KeyModifiers::ALT, "A-"),
            (KeyModifiers::CONTROL, "C-"),
        ] {
            if self.modifiers.contains(flag) {
                f.write_str(prefix)?;
            }
        }
        write!(f, "{name}>")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent { code, modifiers }
    }

    #[test]
    fn test_plain_characters() {
        assert_eq!(
            parse_keys("%s\"").unwrap(),
            vec![KeyEvent::char('%'), KeyEvent::char('s'), KeyEvent::char('"')]
        );
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(
            parse_keys("<esc><ret><enter><space><minus><lt><gt><tab><F12>").unwrap(),
            vec![
                key(KeyCode::Esc, KeyModifiers::empty()),
                key(KeyCode::Enter, KeyModifiers::empty()),
                key(KeyCode::Enter, KeyModifiers::empty()),
                KeyEvent::char(' '),
                KeyEvent::char('-'),
                KeyEvent::char('<'),
                KeyEvent::char('>'),
                key(KeyCode::Tab, KeyModifiers::empty()),
                key(KeyCode::F(12), KeyModifiers::empty()),
            ]
        );
    }

    #[test]
    fn test_modifiers() {
        assert_eq!(
            parse_keys("<A-s><C-x><S-tab><A-C-j><alt-J>").unwrap(),
            vec![
                key(KeyCode::Char('s'), KeyModifiers::ALT),
                key(KeyCode::Char('x'), KeyModifiers::CONTROL),
                key(KeyCode::Tab, KeyModifiers::SHIFT),
                key(KeyCode::Char('j'), KeyModifiers::ALT | KeyModifiers::CONTROL),
                key(KeyCode::Char('J'), KeyModifiers::ALT),
            ]
        );
    }

    #[test]
    fn test_shift_lowercase_normalized() {
        assert_eq!(
            parse_keys("<C-S-r>").unwrap(),
            vec![key(KeyCode::Char('R'), KeyModifiers::CONTROL)]
        );
    }

    #[test]
    fn test_unclosed_angle_is_literal() {
        assert_eq!(
            parse_keys("a<b").unwrap(),
            vec![KeyEvent::char('a'), KeyEvent::char('<'), KeyEvent::char('b')]
        );
    }

    #[test]
    fn test_bare_minus_and_gt() {
        assert_eq!(
            parse_keys("->").unwrap(),
            vec![KeyEvent::char('-'), KeyEvent::char('>')]
        );
        assert_eq!(parse_keys("<->").unwrap(), vec![KeyEvent::char('-')]);
    }

    #[test]
    fn test_multibyte_characters() {
        assert_eq!(
            parse_keys("é<A-ß>").unwrap(),
            vec![
                KeyEvent::char('é'),
                key(KeyCode::Char('ß'), KeyModifiers::ALT)
            ]
        );
    }

    #[test]
    fn test_invalid_key_code() {
        let err = parse_keys("ab<escape>").unwrap_err();
        assert_eq!(err.reason, "Invalid key code 'escape'");
        assert_eq!(err.span, 2..10);
    }

    #[test]
    fn test_invalid_modifier() {
        let err = parse_keys("<X-s>").unwrap_err();
        assert_eq!(err.reason, "Invalid key modifier 'X-'");
    }

    #[test]
    fn test_repeated_modifier() {
        let err = parse_keys("<A-alt-s>").unwrap_err();
        assert_eq!(err.reason, "Repeated key modifier 'alt-'");
    }

    #[test]
    fn test_minus_with_modifier() {
        let err = parse_keys("<A-->").unwrap_err();
        assert_eq!(
            err.reason,
            "Key '-' cannot be used with modifiers, use 'A-minus' instead"
        );
    }

    #[test]
    fn test_function_key_range() {
        assert!(parse_keys("<F24>").is_ok());
        assert_eq!(
            parse_keys("<F25>").unwrap_err().reason,
            "Invalid function key 25"
        );
        assert_eq!(parse_keys("<F0>").unwrap_err().reason, "Invalid function key 0");
        assert_eq!(
            parse_keys("<Fx>").unwrap_err().reason,
            "Invalid key code 'Fx'"
        );
    }

    #[test]
    fn test_missing_code() {
        assert_eq!(
            parse_keys("<A->").unwrap_err().reason,
            "Missing key code in '<A->'"
        );
    }

    #[test]
    fn test_display_helix_notation() {
        let keys = parse_keys("x<A-s><esc><S-tab><lt><C-space>").unwrap();
        let shown: Vec<String> = keys.iter().map(ToString::to_string).collect();
        assert_eq!(
            shown,
            vec!["x", "<A-s>", "<esc>", "<S-tab>", "<lt>", "<C-space>"]
        );
    }
}
