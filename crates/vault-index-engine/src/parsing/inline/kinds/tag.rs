use crate::parsing::inline::token::{Action, TokenKind, Tokenizer};

/// Hashtag inline type with owned delimiter constant.
pub struct Hashtag;

impl Hashtag {
    /// The marker that opens a tag.
    pub const MARKER: char = '#';

    /// Characters allowed in a tag name.
    pub fn is_data(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '/' | '-')
    }

    /// A tag name needs at least one of these, so `#123` stays text.
    pub fn is_non_digit(c: char) -> bool {
        c.is_ascii_alphabetic() || matches!(c, '_' | '/' | '-')
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    OpenMarker,
    ConsumeMarker,
    CloseMarker,
    OpenData,
    ConsumeData,
    CloseTag,
    Done,
}

/// Recognizes `#name`.
///
/// Emits `Tag > TagMarker, TagData`. Fails when the name is empty or made
/// only of digits.
#[derive(Debug)]
pub struct TagTokenizer {
    state: State,
    has_non_digit: bool,
}

impl TagTokenizer {
    pub fn new() -> Self {
        Self {
            state: State::Start,
            has_non_digit: false,
        }
    }
}

impl Default for TagTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for TagTokenizer {
    fn step(&mut self, code: Option<char>) -> Action {
        match self.state {
            State::Start => {
                self.state = State::OpenMarker;
                Action::Enter(TokenKind::Tag)
            }
            State::OpenMarker => {
                self.state = State::ConsumeMarker;
                Action::Enter(TokenKind::TagMarker)
            }
            State::ConsumeMarker => {
                if code != Some(Hashtag::MARKER) {
                    return Action::Fail;
                }
                self.state = State::CloseMarker;
                Action::Consume
            }
            State::CloseMarker => {
                self.state = State::OpenData;
                Action::Exit(TokenKind::TagMarker)
            }
            State::OpenData => {
                self.state = State::ConsumeData;
                Action::Enter(TokenKind::TagData)
            }
            State::ConsumeData => match code {
                Some(c) if Hashtag::is_data(c) => {
                    if Hashtag::is_non_digit(c) {
                        self.has_non_digit = true;
                    }
                    Action::Consume
                }
                _ if !self.has_non_digit => Action::Fail,
                _ => {
                    self.state = State::CloseTag;
                    Action::Exit(TokenKind::TagData)
                }
            },
            State::CloseTag => {
                self.state = State::Done;
                Action::Exit(TokenKind::Tag)
            }
            State::Done => Action::Succeed,
        }
    }
}
