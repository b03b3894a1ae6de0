use crate::parsing::inline::token::{Action, TokenKind, Tokenizer, WikiFlavor};

/// Wiki link inline type with owned delimiter constants.
pub struct WikiLink;

impl WikiLink {
    pub const OPEN: &'static str = "[[";
    pub const CLOSE: &'static str = "]]";
    pub const ALIAS: &'static str = "|";
}

/// Wiki embed inline type; shares the close and alias markers with [`WikiLink`].
pub struct WikiEmbed;

impl WikiEmbed {
    pub const OPEN: &'static str = "![[";
}

impl WikiFlavor {
    /// The start marker for this flavor.
    pub fn open_marker(self) -> &'static str {
        match self {
            WikiFlavor::Link => WikiLink::OPEN,
            WikiFlavor::Embed => WikiEmbed::OPEN,
        }
    }

    /// The character that triggers this tokenizer.
    pub fn trigger(self) -> char {
        match self {
            WikiFlavor::Link => '[',
            WikiFlavor::Embed => '!',
        }
    }
}

fn is_line_ending(code: Option<char>) -> bool {
    matches!(code, None | Some('\n') | Some('\r'))
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Character `n` of a marker, if the marker is that long.
fn marker_char(marker: &str, n: usize) -> Option<char> {
    marker.chars().nth(n)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    OpenStartMarker,
    ConsumeStart,
    ConsumeData,
    OpenTarget,
    ConsumeTarget,
    OpenAliasMarker,
    ConsumeAliasMarker,
    OpenAlias,
    ConsumeAlias,
    CloseData,
    OpenEndMarker,
    ConsumeEnd,
    CloseWiki,
    Done,
}

/// Recognizes `[[target]]`, `[[target|alias]]` and the `![[...]]` embed form.
///
/// Emits `Wiki > WikiMarker, WikiData > (WikiTarget, WikiAliasMarker?,
/// WikiAlias?), WikiMarker`. Targets and aliases must sit on one line and
/// contain at least one non-whitespace character.
#[derive(Debug)]
pub struct WikiTokenizer {
    flavor: WikiFlavor,
    state: State,
    has_target: bool,
    has_alias: bool,
    start_cursor: usize,
    alias_cursor: usize,
    end_cursor: usize,
}

impl WikiTokenizer {
    pub fn new(flavor: WikiFlavor) -> Self {
        Self {
            flavor,
            state: State::Start,
            has_target: false,
            has_alias: false,
            start_cursor: 0,
            alias_cursor: 0,
            end_cursor: 0,
        }
    }

    pub fn link() -> Self {
        Self::new(WikiFlavor::Link)
    }

    pub fn embed() -> Self {
        Self::new(WikiFlavor::Embed)
    }

    fn at_alias_marker(&self, code: Option<char>) -> bool {
        code.is_some() && code == marker_char(WikiLink::ALIAS, self.alias_cursor)
    }

    fn at_end_marker(&self, code: Option<char>) -> bool {
        code.is_some() && code == marker_char(WikiLink::CLOSE, self.end_cursor)
    }
}

impl Tokenizer for WikiTokenizer {
    fn step(&mut self, code: Option<char>) -> Action {
        let open = self.flavor.open_marker();

        match self.state {
            State::Start => {
                if code.is_none() || code != marker_char(open, 0) {
                    return Action::Fail;
                }
                self.state = State::OpenStartMarker;
                Action::Enter(TokenKind::Wiki(self.flavor))
            }
            State::OpenStartMarker => {
                self.state = State::ConsumeStart;
                Action::Enter(TokenKind::WikiMarker)
            }
            State::ConsumeStart => {
                if self.start_cursor == open.chars().count() {
                    self.state = State::ConsumeData;
                    return Action::Exit(TokenKind::WikiMarker);
                }
                if code.is_none() || code != marker_char(open, self.start_cursor) {
                    return Action::Fail;
                }
                self.start_cursor += 1;
                Action::Consume
            }
            State::ConsumeData => {
                if is_line_ending(code) {
                    return Action::Fail;
                }
                self.state = State::OpenTarget;
                Action::Enter(TokenKind::WikiData)
            }
            State::OpenTarget => {
                self.state = State::ConsumeTarget;
                Action::Enter(TokenKind::WikiTarget)
            }
            State::ConsumeTarget => {
                if self.at_alias_marker(code) {
                    if !self.has_target {
                        return Action::Fail;
                    }
                    self.state = State::OpenAliasMarker;
                    return Action::Exit(TokenKind::WikiTarget);
                }
                if self.at_end_marker(code) {
                    if !self.has_target {
                        return Action::Fail;
                    }
                    self.state = State::CloseData;
                    return Action::Exit(TokenKind::WikiTarget);
                }
                match code {
                    None | Some('\n') | Some('\r') => Action::Fail,
                    Some(c) => {
                        if !is_space(c) {
                            self.has_target = true;
                        }
                        Action::Consume
                    }
                }
            }
            State::OpenAliasMarker => {
                self.state = State::ConsumeAliasMarker;
                Action::Enter(TokenKind::WikiAliasMarker)
            }
            State::ConsumeAliasMarker => {
                if self.alias_cursor == WikiLink::ALIAS.chars().count() {
                    self.state = State::OpenAlias;
                    return Action::Exit(TokenKind::WikiAliasMarker);
                }
                if !self.at_alias_marker(code) {
                    return Action::Fail;
                }
                self.alias_cursor += 1;
                Action::Consume
            }
            State::OpenAlias => {
                self.state = State::ConsumeAlias;
                Action::Enter(TokenKind::WikiAlias)
            }
            State::ConsumeAlias => {
                if self.at_end_marker(code) {
                    if !self.has_alias {
                        return Action::Fail;
                    }
                    self.state = State::CloseData;
                    return Action::Exit(TokenKind::WikiAlias);
                }
                match code {
                    None | Some('\n') | Some('\r') => Action::Fail,
                    Some(c) => {
                        if !is_space(c) {
                            self.has_alias = true;
                        }
                        Action::Consume
                    }
                }
            }
            State::CloseData => {
                self.state = State::OpenEndMarker;
                Action::Exit(TokenKind::WikiData)
            }
            State::OpenEndMarker => {
                self.state = State::ConsumeEnd;
                Action::Enter(TokenKind::WikiMarker)
            }
            State::ConsumeEnd => {
                if self.end_cursor == WikiLink::CLOSE.chars().count() {
                    self.state = State::CloseWiki;
                    return Action::Exit(TokenKind::WikiMarker);
                }
                if !self.at_end_marker(code) {
                    return Action::Fail;
                }
                self.end_cursor += 1;
                Action::Consume
            }
            State::CloseWiki => {
                self.state = State::Done;
                Action::Exit(TokenKind::Wiki(self.flavor))
            }
            State::Done => Action::Succeed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::inline::{
        cursor::Cursor,
        token::{TokenEvent, tokenize},
    };
    use rstest::rstest;

    fn run(tokenizer: WikiTokenizer, s: &str) -> (Option<Vec<TokenEvent>>, usize) {
        let mut cur = Cursor::new(s, 0);
        let mut tokenizer = tokenizer;
        let events = tokenize(&mut tokenizer, &mut cur);
        (events, cur.pos())
    }

    /// Byte ranges of every closed span of `kind`.
    fn spans(events: &[TokenEvent], kind: TokenKind) -> Vec<(usize, usize)> {
        let mut open = vec![];
        let mut out = vec![];
        for ev in events {
            match *ev {
                TokenEvent::Enter { kind: k, at } if k == kind => open.push(at),
                TokenEvent::Exit { kind: k, at } if k == kind => {
                    out.push((open.pop().unwrap(), at));
                }
                _ => {}
            }
        }
        out
    }

    #[test]
    fn target_only() {
        let (events, end) = run(WikiTokenizer::link(), "[[Note]] tail");
        let events = events.unwrap();
        assert_eq!(end, 8);
        assert_eq!(spans(&events, TokenKind::WikiTarget), vec![(2, 6)]);
        assert!(spans(&events, TokenKind::WikiAlias).is_empty());
        assert_eq!(
            spans(&events, TokenKind::WikiMarker),
            vec![(0, 2), (6, 8)]
        );
        assert_eq!(
            spans(&events, TokenKind::Wiki(WikiFlavor::Link)),
            vec![(0, 8)]
        );
    }

    #[test]
    fn target_and_alias() {
        let (events, end) = run(WikiTokenizer::link(), "[[Note|Shown]]");
        let events = events.unwrap();
        assert_eq!(end, 14);
        assert_eq!(spans(&events, TokenKind::WikiTarget), vec![(2, 6)]);
        assert_eq!(spans(&events, TokenKind::WikiAliasMarker), vec![(6, 7)]);
        assert_eq!(spans(&events, TokenKind::WikiAlias), vec![(7, 12)]);
        assert_eq!(spans(&events, TokenKind::WikiData), vec![(2, 12)]);
    }

    #[test]
    fn embed_uses_bang_marker() {
        let (events, end) = run(WikiTokenizer::embed(), "![[img.png|Caption]]");
        let events = events.unwrap();
        assert_eq!(end, 20);
        assert_eq!(spans(&events, TokenKind::WikiTarget), vec![(3, 10)]);
        assert_eq!(
            spans(&events, TokenKind::Wiki(WikiFlavor::Embed)),
            vec![(0, 20)]
        );
    }

    #[test]
    fn backslashes_stay_in_target_span() {
        let (events, _) = run(WikiTokenizer::link(), r"[[Note\\]]");
        assert_eq!(spans(&events.unwrap(), TokenKind::WikiTarget), vec![(2, 8)]);
    }

    #[rstest]
    #[case("[[]]")]
    #[case("[[   ]]")]
    #[case("[[|alias]]")]
    #[case("[[Note|]]")]
    #[case("[[Note|  ]]")]
    #[case("[[Note")]
    #[case("[[Note\nmore]]")]
    #[case("[[Note|Shown\n]]")]
    #[case("[Note]]")]
    #[case("[[Note]x]")]
    #[case("[[")]
    fn link_rejects(#[case] input: &str) {
        let (events, pos) = run(WikiTokenizer::link(), input);
        assert!(events.is_none(), "{input:?} should not match");
        assert_eq!(pos, 0);
    }

    #[rstest]
    #[case("[[Note]]")]
    #[case("![Note]]")]
    #[case("!![[Note]]")]
    fn embed_rejects(#[case] input: &str) {
        let (events, _) = run(WikiTokenizer::embed(), input);
        assert!(events.is_none(), "{input:?} should not be an embed");
    }
}
