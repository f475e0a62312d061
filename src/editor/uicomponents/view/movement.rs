use crate::prelude::*;

use super::buffer::Buffer;

/// The text cursor. Vertical moves may land on the virtual empty line one
/// past the last row, matching where new text gets typed at the end of
/// the document.
#[derive(Default, Copy, Clone)]
pub struct Movement {
    pub text_location: Location,
}

impl Movement {
    pub fn move_up(&mut self, buffer: &Buffer, step: usize) {
        self.text_location.line_index = self.text_location.line_index.saturating_sub(step);
        self.clamp_to_row(buffer);
    }

    pub fn move_down(&mut self, buffer: &Buffer, step: usize) {
        self.text_location.line_index = self
            .text_location
            .line_index
            .saturating_add(step)
            .min(buffer.height());
        self.clamp_to_row(buffer);
    }

    /// Left from column 0 wraps to the end of the previous row.
    pub fn move_left(&mut self, buffer: &Buffer) {
        if self.text_location.char_index > 0 {
            self.text_location.char_index -= 1;
        } else if self.text_location.line_index > 0 {
            self.text_location.line_index -= 1;
            self.text_location.char_index = buffer.row_char_len(self.text_location.line_index);
        }
    }

    /// Right past the row end wraps to the start of the next row.
    pub fn move_right(&mut self, buffer: &Buffer) {
        let row_len = buffer.row_char_len(self.text_location.line_index);
        if self.text_location.char_index < row_len {
            self.text_location.char_index += 1;
        } else if self.text_location.line_index < buffer.height() {
            self.text_location.line_index += 1;
            self.text_location.char_index = 0;
        }
    }

    pub fn move_to_start_of_line(&mut self) {
        self.text_location.char_index = 0;
    }

    pub fn move_to_end_of_line(&mut self, buffer: &Buffer) {
        self.text_location.char_index = buffer.row_char_len(self.text_location.line_index);
    }

    /// Snaps the column back into the current row after a vertical move.
    fn clamp_to_row(&mut self, buffer: &Buffer) {
        self.text_location.char_index = self
            .text_location
            .char_index
            .min(buffer.row_char_len(self.text_location.line_index));
    }
}
