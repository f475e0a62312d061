use crate::prelude::*;

use super::buffer::EditError;
use super::token::{tokenize, Token};

/// One editable line, stored as an ordered token sequence.
///
/// Invariants: concatenating the tokens reproduces the row text exactly,
/// no token is empty, and two `Word` tokens are never adjacent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Row {
    tokens: Vec<Token>,
}

impl Row {
    pub fn from(text: &str) -> Self {
        Self {
            tokens: tokenize(text),
        }
    }

    /// Builds a row from tokens that already satisfy the row invariants
    /// (a tail produced by `split_off` or `tail_from` qualifies).
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn text(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            token.push_text_onto(&mut out);
        }
        out
    }

    pub fn char_len(&self) -> usize {
        self.tokens.iter().map(Token::char_len).sum()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    //
    // Coordinate mapping
    //

    /// Returns the index of the token containing character column `cx` and
    /// the offset within it. `(token_count, 0)` means end of row. The
    /// returned offset is always strictly less than the token's length.
    pub fn char_to_token(&self, cx: CharIndex) -> (usize, usize) {
        let mut consumed = 0;
        for (index, token) in self.tokens.iter().enumerate() {
            let len = token.char_len();
            if consumed + len <= cx {
                consumed += len;
            } else {
                return (index, cx - consumed);
            }
        }
        (self.tokens.len(), 0)
    }

    /// Character column to rendered column: a tab advances the rendered
    /// counter to the next multiple of `TAB_WIDTH` while counting as one
    /// character; everything else is one cell per character.
    pub fn cx_to_rx(&self, cx: CharIndex) -> ColIndex {
        let mut rx = 0;
        let mut consumed = 0;
        for token in &self.tokens {
            if token.is_tab() && consumed < cx {
                rx += TAB_WIDTH - (rx % TAB_WIDTH);
                consumed += 1;
            } else if consumed + token.char_len() < cx {
                rx += token.char_len();
                consumed += token.char_len();
            } else {
                return rx + (cx - consumed);
            }
        }
        rx
    }

    /// Rendered column back to character column. A rendered column inside
    /// a tab's expansion snaps to the tab's starting character column.
    pub fn rx_to_cx(&self, rx: ColIndex) -> CharIndex {
        let mut current_rx = 0;
        let mut consumed = 0;
        for token in &self.tokens {
            if token.is_tab() {
                let next_stop = current_rx + TAB_WIDTH - (current_rx % TAB_WIDTH);
                if next_stop > rx {
                    return consumed;
                }
                current_rx = next_stop;
                consumed += 1;
            } else if current_rx + token.char_len() < rx {
                current_rx += token.char_len();
                consumed += token.char_len();
            } else {
                return consumed + (rx - current_rx);
            }
        }
        consumed
    }

    //
    // Character edits
    //

    pub fn insert_char(&mut self, cx: CharIndex, c: char) {
        let (index, offset) = self.char_to_token(cx);

        if c == ' ' || c == '\t' {
            match self.tokens.get_mut(index) {
                Some(Token::Word(word)) if offset > 0 => {
                    // the cursor is inside a word: split it around the new
                    // whitespace token
                    let at = byte_index(word, offset);
                    let right = word.split_off(at);
                    self.tokens.insert(index + 1, Token::Word(right));
                    self.tokens.insert(index + 1, Token::Whitespace(c));
                }
                // offset is always 0 on whitespace tokens and at row end
                _ => self.tokens.insert(index, Token::Whitespace(c)),
            }
        } else {
            match self.tokens.get_mut(index) {
                Some(Token::Word(word)) => {
                    let at = byte_index(word, offset);
                    word.insert(at, c);
                }
                // at row end or just before a whitespace token: start a new
                // word, folding it into a preceding word if one is adjacent
                _ => {
                    self.tokens.insert(index, Token::Word(c.to_string()));
                    self.coalesce_around(index);
                }
            }
        }
    }

    /// Deletes the character at column `cx`. `EndOfRow` means the cursor
    /// sits past the last token; deleting there is a row join, which the
    /// caller performs through `Buffer::join_rows`.
    pub fn delete_char(&mut self, cx: CharIndex) -> Result<(), EditError> {
        let (index, offset) = self.char_to_token(cx);

        if index == self.tokens.len() {
            return Err(EditError::EndOfRow);
        }

        match &mut self.tokens[index] {
            Token::Whitespace(_) => {
                self.tokens.remove(index);
                self.coalesce_around(index);
            }
            Token::Word(word) => {
                // `char_to_token` guarantees offset < word length
                let at = byte_index(word, offset);
                word.remove(at);
                if word.is_empty() {
                    self.tokens.remove(index);
                }
            }
        }

        Ok(())
    }

    /// Merges the tokens on both sides of `index` when removing a
    /// whitespace token left two words adjacent.
    fn coalesce_around(&mut self, index: usize) {
        if index == 0 || index >= self.tokens.len() {
            return;
        }
        if self.tokens[index - 1].is_whitespace() || self.tokens[index].is_whitespace() {
            return;
        }
        if let Token::Word(right) = self.tokens.remove(index) {
            if let Token::Word(left) = &mut self.tokens[index - 1] {
                left.push_str(&right);
            }
        }
    }

    //
    // Tails and splits
    //

    /// Returns a copy of the token suffix starting at column `cx`, without
    /// modifying the row. A `Word` straddling `cx` contributes only its
    /// right piece.
    pub fn tail_from(&self, cx: CharIndex) -> Vec<Token> {
        let (index, offset) = self.char_to_token(cx);
        if index == self.tokens.len() {
            return Vec::new();
        }

        let first = match &self.tokens[index] {
            Token::Word(word) if offset > 0 => {
                Token::Word(word[byte_index(word, offset)..].to_string())
            }
            token => token.clone(),
        };

        let mut tail = Vec::with_capacity(self.tokens.len() - index);
        tail.push(first);
        tail.extend(self.tokens[index + 1..].iter().cloned());
        tail
    }

    /// Truncates the row at column `cx` and returns the removed suffix,
    /// splitting a straddled `Word` in two.
    pub fn split_off(&mut self, cx: CharIndex) -> Vec<Token> {
        let (index, offset) = self.char_to_token(cx);
        if index == self.tokens.len() {
            return Vec::new();
        }

        if offset > 0 {
            let mut tail = Vec::with_capacity(self.tokens.len() - index);
            if let Token::Word(word) = &mut self.tokens[index] {
                let at = byte_index(word, offset);
                tail.push(Token::Word(word.split_off(at)));
            }
            tail.extend(self.tokens.drain(index + 1..));
            tail
        } else {
            self.tokens.drain(index..).collect()
        }
    }

    /// Appends a token list, merging the seam when both sides are words so
    /// the maximal-run invariant keeps holding.
    pub fn append_tokens(&mut self, tail: Vec<Token>) {
        for token in tail {
            let merged = match (self.tokens.last_mut(), &token) {
                (Some(Token::Word(left)), Token::Word(right)) => {
                    left.push_str(right);
                    true
                }
                _ => false,
            };
            if !merged {
                self.tokens.push(token);
            }
        }
    }
}

fn byte_index(word: &str, char_offset: usize) -> usize {
    word.char_indices()
        .nth(char_offset)
        .map_or(word.len(), |(at, _)| at)
}

#[cfg(test)]
mod row_tests {
    use super::*;

    fn words(row: &Row) -> Vec<String> {
        row.tokens().iter().map(|t| {
            let mut s = String::new();
            t.push_text_onto(&mut s);
            s
        }).collect()
    }

    #[test]
    fn char_to_token_walks_and_returns_sentinel() {
        let row = Row::from("ab cd");
        assert_eq!(row.char_to_token(0), (0, 0));
        assert_eq!(row.char_to_token(1), (0, 1));
        assert_eq!(row.char_to_token(2), (1, 0));
        assert_eq!(row.char_to_token(3), (2, 0));
        assert_eq!(row.char_to_token(4), (2, 1));
        assert_eq!(row.char_to_token(5), (3, 0));
        assert_eq!(row.char_to_token(99), (3, 0));
    }

    #[test]
    fn tab_expansion_example() {
        let row = Row::from("a\tb");
        assert_eq!(words(&row), vec!["a", "\t", "b"]);
        assert_eq!(row.cx_to_rx(0), 0);
        assert_eq!(row.cx_to_rx(1), 1);
        assert_eq!(row.cx_to_rx(2), 4);
        assert_eq!(row.cx_to_rx(3), 5);
        assert_eq!(row.rx_to_cx(2), 1);
        assert_eq!(row.rx_to_cx(3), 1);
        assert_eq!(row.rx_to_cx(4), 2);
    }

    #[test]
    fn coordinate_round_trip_without_tabs() {
        let row = Row::from("one two  three");
        for cx in 0..=row.char_len() {
            assert_eq!(row.rx_to_cx(row.cx_to_rx(cx)), cx);
        }
    }

    #[test]
    fn round_trip_outside_tab_expansions() {
        let row = Row::from("\ta\tbc d");
        for cx in 0..=row.char_len() {
            assert_eq!(row.rx_to_cx(row.cx_to_rx(cx)), cx);
        }
    }

    #[test]
    fn insert_then_delete_is_identity() {
        let mut row = Row::from("ab cd");
        row.insert_char(2, 'x');
        assert_eq!(row.text(), "abx cd");
        assert_eq!(words(&row), vec!["abx", " ", "cd"]);

        assert_eq!(row.delete_char(2), Ok(()));
        assert_eq!(words(&row), vec!["ab", " ", "cd"]);
    }

    #[test]
    fn insert_whitespace_inside_word_splits_it() {
        let mut row = Row::from("abcd");
        row.insert_char(2, '\t');
        assert_eq!(row.text(), "ab\tcd");
        assert_eq!(words(&row), vec!["ab", "\t", "cd"]);
    }

    #[test]
    fn insert_whitespace_at_token_boundary() {
        let mut row = Row::from("ab cd");
        row.insert_char(2, ' ');
        assert_eq!(words(&row), vec!["ab", " ", " ", "cd"]);
    }

    #[test]
    fn insert_char_before_whitespace_starts_a_word() {
        let mut row = Row::from("ab cd");
        row.insert_char(2, 'x');
        assert_eq!(words(&row), vec!["abx", " ", "cd"]);
        let mut row = Row::from(" cd");
        row.insert_char(0, 'x');
        assert_eq!(words(&row), vec!["x", " ", "cd"]);
    }

    #[test]
    fn insert_char_at_end_appends_word() {
        let mut row = Row::from("ab ");
        row.insert_char(3, 'x');
        assert_eq!(words(&row), vec!["ab", " ", "x"]);
    }

    #[test]
    fn insert_char_at_end_of_word_extends_it() {
        let mut row = Row::from("ab");
        row.insert_char(2, 'x');
        assert_eq!(words(&row), vec!["abx"]);
    }

    #[test]
    fn deleting_whitespace_coalesces_words() {
        let mut row = Row::from("ab cd");
        assert_eq!(row.delete_char(2), Ok(()));
        assert_eq!(words(&row), vec!["abcd"]);
        assert_eq!(row.text(), "abcd");
    }

    #[test]
    fn deleting_whitespace_between_whitespace_does_not_coalesce() {
        let mut row = Row::from("a \tb");
        assert_eq!(row.delete_char(2), Ok(()));
        assert_eq!(words(&row), vec!["a", " ", "b"]);
    }

    #[test]
    fn deleting_last_char_of_word_drops_the_token() {
        let mut row = Row::from("a b");
        assert_eq!(row.delete_char(0), Ok(()));
        assert_eq!(words(&row), vec![" ", "b"]);
    }

    #[test]
    fn delete_past_end_signals_row_join() {
        let mut row = Row::from("ab");
        assert_eq!(row.delete_char(2), Err(EditError::EndOfRow));
        assert_eq!(row.text(), "ab");
    }

    #[test]
    fn tail_from_does_not_modify_the_row() {
        let row = Row::from("ab\tcd ef");
        let tail = row.tail_from(4);
        assert_eq!(row.text(), "ab\tcd ef");
        assert_eq!(Row::from_tokens(tail).text(), "d ef");
        assert!(row.tail_from(8).is_empty());
        assert!(row.tail_from(100).is_empty());
    }

    #[test]
    fn split_and_append_reconstruct_the_row() {
        for text in ["ab\tcd ef", " x ", "\t\tword", "one two"] {
            for cx in 0..=text.chars().count() {
                let original = Row::from(text);
                let mut left = original.clone();
                let tail = left.split_off(cx);
                left.append_tokens(tail);
                assert_eq!(left, original, "text {text:?} split at {cx}");
            }
        }
    }

    #[test]
    fn append_tokens_merges_word_seam() {
        let mut row = Row::from("ab");
        row.append_tokens(vec![Token::Word("cd".to_string()), Token::Whitespace(' ')]);
        assert_eq!(words(&row), vec!["abcd", " "]);
    }
}
