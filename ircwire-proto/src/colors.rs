//! An extension trait that provides the ability to strip IRC colors from a string
use std::borrow::Cow;

const COLOR: char = '\x03';
const FORMATTING: [char; 5] = [
    '\x02', // bold
    '\x0F', // reset
    '\x16', // reverse
    '\x1D', // italic
    '\x1F', // underline
];

#[derive(Clone, Copy, PartialEq, Debug)]
enum ParserState {
    Text,
    ColorCode,
    Foreground1,
    Foreground2,
    Comma,
    Background1,
}

/// An extension trait giving strings a function to strip IRC colors
pub trait FormattedStringExt {
    /// Returns true if the string contains color, bold, underline, reverse, italics or reset codes
    fn is_formatted(&self) -> bool;

    /// Returns the string with all color, bold, underline, reverse, italics and reset codes
    /// stripped
    fn strip_formatting(&self) -> Cow<str>;
}

impl FormattedStringExt for str {
    fn is_formatted(&self) -> bool {
        self.contains(|c: char| c == COLOR || FORMATTING.contains(&c))
    }

    fn strip_formatting(&self) -> Cow<str> {
        if !self.is_formatted() {
            return Cow::Borrowed(self);
        }

        let mut result = String::with_capacity(self.len());
        let mut state = ParserState::Text;
        let mut rest = self.chars();
        let mut cur = rest.next();

        while let Some(c) = cur {
            // The character after `c`, needed to decide whether a comma starts a background.
            let next = rest.clone().next();
            let digit = c.is_ascii_digit();
            let consumed = match state {
                ParserState::Text => {
                    if c == COLOR {
                        state = ParserState::ColorCode;
                    } else if !FORMATTING.contains(&c) {
                        result.push(c);
                    }
                    true
                }
                ParserState::ColorCode if digit => {
                    state = ParserState::Foreground1;
                    true
                }
                ParserState::Foreground1 if digit => {
                    state = ParserState::Foreground2;
                    true
                }
                ParserState::Foreground1 | ParserState::Foreground2
                    if c == ',' && next.map_or(false, |n| n.is_ascii_digit()) =>
                {
                    state = ParserState::Comma;
                    true
                }
                ParserState::Comma if digit => {
                    state = ParserState::Background1;
                    true
                }
                ParserState::Background1 if digit => {
                    state = ParserState::Text;
                    true
                }
                // Not part of a color code: look at the same character again as text.
                _ => {
                    state = ParserState::Text;
                    false
                }
            };
            if consumed {
                cur = rest.next();
            }
        }

        Cow::Owned(result)
    }
}

impl FormattedStringExt for String {
    fn is_formatted(&self) -> bool {
        (&self[..]).is_formatted()
    }
    fn strip_formatting(&self) -> Cow<str> {
        (&self[..]).strip_formatting()
    }
}

/// Strips IRC text formatting codes from `text`.
///
/// # Example
/// ```
/// # use ircwire_proto::strip_control_codes;
/// assert_eq!(strip_control_codes("\x02bold\x02 \x034,12red\x03!"), "bold red!");
/// ```
pub fn strip_control_codes(text: &str) -> String {
    text.strip_formatting().into_owned()
}
