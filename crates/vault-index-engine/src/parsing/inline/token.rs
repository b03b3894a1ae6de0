//! Shared vocabulary for the extension tokenizers.
//!
//! A tokenizer is a state machine with a single transition function,
//! [`Tokenizer::step`], mapping the current character to one [`Action`].
//! [`tokenize`] drives it over a [`Cursor`] and records the spans it opens
//! and closes. Failure restores the cursor, so a rejected candidate leaves
//! no trace.

use super::cursor::Cursor;

/// Which node a wiki tokenizer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WikiFlavor {
    /// `[[target|alias]]`
    Link,
    /// `![[target|alias]]`
    Embed,
}

/// Span kinds emitted by the tokenizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Tag,
    TagMarker,
    TagData,
    Wiki(WikiFlavor),
    WikiMarker,
    WikiData,
    WikiTarget,
    WikiAliasMarker,
    WikiAlias,
}

/// What a tokenizer wants done with the current character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Advance past the current character.
    Consume,
    /// Open a span at the current position; the character is offered again.
    Enter(TokenKind),
    /// Close a span at the current position; the character is offered again.
    Exit(TokenKind),
    /// Abandon the candidate.
    Fail,
    /// Commit the match; the current character is not part of it.
    Succeed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenEvent {
    Enter { kind: TokenKind, at: usize },
    Exit { kind: TokenKind, at: usize },
}

pub trait Tokenizer {
    /// Transition on `code`, which is `None` at end of input.
    fn step(&mut self, code: Option<char>) -> Action;
}

/// Runs `tokenizer` from the cursor position.
///
/// On success the cursor sits just past the match and the recorded events
/// are returned. On failure the cursor is restored and `None` is returned.
pub fn tokenize<T: Tokenizer>(tokenizer: &mut T, cur: &mut Cursor<'_>) -> Option<Vec<TokenEvent>> {
    let saved = cur.clone();
    let mut events = vec![];

    loop {
        let code = cur.peek();
        match tokenizer.step(code) {
            Action::Consume => {
                if cur.bump().is_none() {
                    // consuming end of input is a tokenizer bug; treat as no match
                    *cur = saved;
                    return None;
                }
            }
            Action::Enter(kind) => events.push(TokenEvent::Enter { kind, at: cur.pos() }),
            Action::Exit(kind) => events.push(TokenEvent::Exit { kind, at: cur.pos() }),
            Action::Fail => {
                log::trace!("inline candidate at {} backtracked", saved.pos());
                *cur = saved;
                return None;
            }
            Action::Succeed => return Some(events),
        }
    }
}
