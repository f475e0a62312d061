use std::fs::{self, File};
use std::io::{Error, Write};

use thiserror::Error;

use crate::prelude::*;

use super::fileinfo::FileInfo;
use super::row::Row;
use super::token::Token;

/// Errors surfaced by row and character operations. No mutation ever
/// accompanies an `Err`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EditError {
    #[error("row index {0} is out of range")]
    OutOfRange(RowIndex),

    /// The column sits past the last token of the row. Deleting there is
    /// a request to join rows, answered with `Buffer::join_rows`.
    #[error("the column is past the last token of the row")]
    EndOfRow,
}

/// The document: an ordered sequence of token rows.
#[derive(Default)]
pub struct Buffer {
    rows: Vec<Row>,
    pub file_info: FileInfo,
    dirty: usize,
}

impl Buffer {
    //
    // File I/O shell (drives the store through insert_row / row text only)
    //

    pub fn load(file_name: &str) -> Result<Self, Error> {
        let contents = fs::read_to_string(file_name)?;

        let mut buffer = Self {
            file_info: FileInfo::from(file_name),
            ..Self::default()
        };
        for (index, line) in contents.lines().enumerate() {
            let _ = buffer.insert_row(index, line);
        }
        buffer.dirty = 0;

        Ok(buffer)
    }

    fn save_to_file(&self, file_info: &FileInfo) -> Result<(), Error> {
        if let Some(path) = file_info.get_path() {
            let mut file = File::create(path)?;
            for row in &self.rows {
                writeln!(file, "{}", row.text())?;
            }
        } else {
            #[cfg(debug_assertions)]
            {
                panic!("Attempting to save with no file path present");
            }
        }
        Ok(())
    }

    pub fn save(&mut self) -> Result<(), Error> {
        self.save_to_file(&self.file_info)?;
        self.dirty = 0;
        Ok(())
    }

    pub const fn is_file_loaded(&self) -> bool {
        self.file_info.has_path()
    }

    //
    // Row store
    //

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    pub fn row(&self, at: RowIndex) -> Option<&Row> {
        self.rows.get(at)
    }

    pub fn row_text(&self, at: RowIndex) -> Option<String> {
        self.rows.get(at).map(Row::text)
    }

    pub fn row_char_len(&self, at: RowIndex) -> usize {
        self.rows.get(at).map_or(0, Row::char_len)
    }

    pub fn insert_row(&mut self, at: RowIndex, text: &str) -> Result<(), EditError> {
        if at > self.rows.len() {
            return Err(EditError::OutOfRange(at));
        }
        self.rows.insert(at, Row::from(text));
        self.dirty += 1;
        Ok(())
    }

    pub fn delete_row(&mut self, at: RowIndex) -> Result<(), EditError> {
        if at >= self.rows.len() {
            return Err(EditError::OutOfRange(at));
        }
        self.rows.remove(at);
        self.dirty += 1;
        Ok(())
    }

    /// Non-destructive token suffix of row `at` starting at column `cx`.
    /// Empty when the index is invalid or `cx` is at or past the row end.
    pub fn tail_from(&self, at: RowIndex, cx: CharIndex) -> Vec<Token> {
        self.rows.get(at).map_or_else(Vec::new, |row| row.tail_from(cx))
    }

    pub fn append_tail(&mut self, at: RowIndex, tail: Vec<Token>) -> Result<(), EditError> {
        let row = self
            .rows
            .get_mut(at)
            .ok_or(EditError::OutOfRange(at))?;
        row.append_tokens(tail);
        self.dirty += 1;
        Ok(())
    }

    /// Splits row `at` at column `cx`: the row keeps the prefix and the
    /// suffix becomes a new row right below (the Enter key).
    pub fn split_row(&mut self, at: RowIndex, cx: CharIndex) -> Result<(), EditError> {
        let row = self
            .rows
            .get_mut(at)
            .ok_or(EditError::OutOfRange(at))?;
        let tail = row.split_off(cx);
        self.rows.insert(at + 1, Row::from_tokens(tail));
        self.dirty += 1;
        Ok(())
    }

    /// Joins row `at + 1` onto the end of row `at` as one atomic
    /// operation: tail, append, delete.
    pub fn join_rows(&mut self, at: RowIndex) -> Result<(), EditError> {
        if at + 1 >= self.rows.len() {
            return Err(EditError::OutOfRange(at + 1));
        }
        let tail = self.tail_from(at + 1, 0);
        self.append_tail(at, tail)?;
        self.delete_row(at + 1)
    }

    //
    // Character edits
    //

    pub fn insert_char(&mut self, at: RowIndex, cx: CharIndex, c: char) -> Result<(), EditError> {
        let row = self
            .rows
            .get_mut(at)
            .ok_or(EditError::OutOfRange(at))?;
        row.insert_char(cx, c);
        self.dirty += 1;
        Ok(())
    }

    pub fn delete_char(&mut self, at: RowIndex, cx: CharIndex) -> Result<(), EditError> {
        let row = self
            .rows
            .get_mut(at)
            .ok_or(EditError::OutOfRange(at))?;
        row.delete_char(cx)?;
        self.dirty += 1;
        Ok(())
    }
}
