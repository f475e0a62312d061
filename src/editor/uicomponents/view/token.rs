/// A classified piece of a row. `Word` holds a maximal run of
/// non-whitespace characters; `Whitespace` holds exactly one space or tab.
/// Two whitespace characters next to each other are two tokens, never one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    Whitespace(char),
}

impl Token {
    pub fn char_len(&self) -> usize {
        match self {
            Self::Word(text) => text.chars().count(),
            Self::Whitespace(_) => 1,
        }
    }

    pub const fn is_whitespace(&self) -> bool {
        matches!(self, Self::Whitespace(_))
    }

    pub const fn is_tab(&self) -> bool {
        matches!(self, Self::Whitespace('\t'))
    }

    pub fn push_text_onto(&self, out: &mut String) {
        match self {
            Self::Word(text) => out.push_str(text),
            Self::Whitespace(c) => out.push(*c),
        }
    }
}

/// Splits `text` into tokens in a single left-to-right scan.
/// Concatenating the tokens in order reproduces `text` exactly.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        if c == ' ' || c == '\t' {
            if !current.is_empty() {
                tokens.push(Token::Word(std::mem::take(&mut current)));
            }
            tokens.push(Token::Whitespace(c));
        } else {
            current.push(c);
        }
    }

    if !current.is_empty() {
        tokens.push(Token::Word(current));
    }

    tokens
}
