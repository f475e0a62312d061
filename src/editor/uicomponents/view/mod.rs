use std::io::Error;
use std::ops::Range;

use crossterm::style::Attribute::{Reset, Reverse};
use log::error;

use crate::editor::{Edit, Move};
use crate::prelude::*;

use super::super::ui_component::UIComponent;
use super::super::{DocumentStatus, Terminal};

mod buffer;
mod fileinfo;
mod movement;
mod row;
mod token;

use buffer::{Buffer, EditError};
use movement::Movement;
use row::Row;
use token::Token;

#[derive(Default)]
pub struct View {
    buffer: Buffer,
    needs_redraw: bool,
    size: Size,
    movement: Movement,
    scroll_offset: Position,
}

impl View {
    pub fn get_status(&self) -> DocumentStatus {
        DocumentStatus {
            total_lines: self.buffer.height(),
            current_line_index: self.movement.text_location.line_index,
            current_char_index: self.movement.text_location.char_index,
            file_name: format!("{}", self.buffer.file_info),
            is_modified: self.buffer.is_dirty(),
        }
    }

    pub const fn is_file_loaded(&self) -> bool {
        self.buffer.is_file_loaded()
    }

    //
    // File I/O
    //

    pub fn load(&mut self, file_name: &str) -> Result<(), Error> {
        let buffer = Buffer::load(file_name)?;
        self.buffer = buffer;
        self.set_needs_redraw(true);
        Ok(())
    }

    pub fn save(&mut self) -> Result<(), Error> {
        self.buffer.save()
    }

    //
    // Command Handling
    //

    pub fn handle_edit_command(&mut self, command: Edit) {
        match command {
            Edit::Insert(character) => self.insert_char(character),
            Edit::InsertNewline => self.insert_newline(),
            Edit::Delete => self.delete(),
            Edit::DeleteBackward => self.delete_backward(),
        }
        self.scroll_text_location_into_view();
    }

    pub fn handle_move_command(&mut self, command: Move) {
        match command {
            Move::Up => self.movement.move_up(&self.buffer, 1),
            Move::Down => self.movement.move_down(&self.buffer, 1),
            Move::Left => self.movement.move_left(&self.buffer),
            Move::Right => self.movement.move_right(&self.buffer),
            Move::PageUp => self.movement.move_up(&self.buffer, self.size.height),
            Move::PageDown => self.movement.move_down(&self.buffer, self.size.height),
            Move::StartOfLine => self.movement.move_to_start_of_line(),
            Move::EndOfLine => self.movement.move_to_end_of_line(&self.buffer),
        }
        self.scroll_text_location_into_view();
    }

    //
    // Editing
    //

    fn insert_char(&mut self, character: char) {
        let Location {
            char_index,
            line_index,
        } = self.movement.text_location;

        // typing on the virtual line one past the document end creates
        // that row first
        if line_index == self.buffer.height() {
            if let Err(err) = self.buffer.insert_row(line_index, "") {
                error!("Could not append row: {err}");
                return;
            }
        }

        match self.buffer.insert_char(line_index, char_index, character) {
            Ok(()) => {
                self.movement.move_right(&self.buffer);
                self.set_needs_redraw(true);
            }
            Err(err) => error!("Could not insert character: {err}"),
        }
    }

    fn insert_newline(&mut self) {
        let Location {
            char_index,
            line_index,
        } = self.movement.text_location;

        let result = if line_index == self.buffer.height() {
            self.buffer.insert_row(line_index, "")
        } else {
            self.buffer.split_row(line_index, char_index)
        };

        match result {
            Ok(()) => {
                self.movement.text_location = Location {
                    char_index: 0,
                    line_index: line_index.saturating_add(1),
                };
                self.set_needs_redraw(true);
            }
            Err(err) => error!("Could not insert newline: {err}"),
        }
    }

    /// Deletes the character under the cursor. At the end of a row the
    /// next row is joined up instead.
    fn delete(&mut self) {
        let Location {
            char_index,
            line_index,
        } = self.movement.text_location;

        if line_index >= self.buffer.height() {
            return;
        }

        match self.buffer.delete_char(line_index, char_index) {
            Ok(()) => self.set_needs_redraw(true),
            Err(EditError::EndOfRow) => {
                if line_index.saturating_add(1) < self.buffer.height() {
                    match self.buffer.join_rows(line_index) {
                        Ok(()) => self.set_needs_redraw(true),
                        Err(err) => error!("Could not join rows: {err}"),
                    }
                }
            }
            Err(err) => error!("Could not delete character: {err}"),
        }
    }

    /// Backspace: step left (wrapping to the previous row end), then
    /// delete forward. At the very start of the document, and on the
    /// virtual line, there is nothing to delete.
    fn delete_backward(&mut self) {
        let Location {
            char_index,
            line_index,
        } = self.movement.text_location;

        if line_index == self.buffer.height() {
            return;
        }
        if char_index == 0 && line_index == 0 {
            return;
        }

        self.movement.move_left(&self.buffer);
        self.delete();
    }

    //
    // Rendering
    //

    /// Builds the portion of `row` visible in the rendered-column window
    /// `range`. Tab stops are anchored at absolute rendered column 0, so a
    /// window starting inside a tab's expansion begins mid-expansion.
    /// Control characters are shown reverse-video as `@`-offset symbols.
    fn visible_text(row: &Row, range: Range<ColIndex>) -> String {
        let mut output = String::new();
        if range.start >= range.end {
            return output;
        }

        let mut rx = 0;
        for token in row.tokens() {
            if rx >= range.end {
                break;
            }
            match token {
                Token::Whitespace('\t') => {
                    let next_stop = rx + TAB_WIDTH - (rx % TAB_WIDTH);
                    while rx < next_stop {
                        if range.contains(&rx) {
                            output.push(' ');
                        }
                        rx += 1;
                    }
                }
                Token::Whitespace(c) => {
                    if range.contains(&rx) {
                        output.push(*c);
                    }
                    rx += 1;
                }
                Token::Word(word) => {
                    for c in word.chars() {
                        if rx >= range.end {
                            break;
                        }
                        if range.contains(&rx) {
                            Self::push_visible_char(c, &mut output);
                        }
                        rx += 1;
                    }
                }
            }
        }

        output
    }

    fn push_visible_char(c: char, output: &mut String) {
        let code = c as u32;
        if code < 0x20 || code == 0x7f {
            let symbol = if code <= 26 {
                char::from(b'@' + code as u8)
            } else {
                '?'
            };
            output.push_str(&format!("{Reverse}{symbol}{Reset}"));
        } else {
            output.push(c);
        }
    }

    fn render_line(at: RowIndex, line_text: &str) -> Result<(), Error> {
        Terminal::print_row(at, line_text)
    }

    //
    // Scrolling
    //

    fn scroll_vertically(&mut self, to: RowIndex) {
        let Size { height, .. } = self.size;

        let offset_changed = if to < self.scroll_offset.row {
            self.scroll_offset.row = to;
            true
        } else if to >= self.scroll_offset.row.saturating_add(height) {
            self.scroll_offset.row = to.saturating_sub(height).saturating_add(1);
            true
        } else {
            false
        };

        if offset_changed {
            self.set_needs_redraw(true);
        }
    }

    fn scroll_horizontally(&mut self, to: ColIndex) {
        let Size { width, .. } = self.size;

        let offset_changed = if to < self.scroll_offset.col {
            self.scroll_offset.col = to;
            true
        } else if to >= self.scroll_offset.col.saturating_add(width) {
            self.scroll_offset.col = to.saturating_sub(width).saturating_add(1);
            true
        } else {
            false
        };

        if offset_changed {
            self.set_needs_redraw(true);
        }
    }

    fn scroll_text_location_into_view(&mut self) {
        let Position { row, col } = self.text_location_to_position();
        self.scroll_vertically(row);
        self.scroll_horizontally(col);
    }

    //
    // Location and Position Handling
    //

    pub fn cursor_position(&self) -> Position {
        self.text_location_to_position()
            .saturating_sub(self.scroll_offset)
    }

    fn text_location_to_position(&self) -> Position {
        let row = self.movement.text_location.line_index;
        let col = self
            .buffer
            .row(row)
            .map_or(0, |r| r.cx_to_rx(self.movement.text_location.char_index));

        Position { col, row }
    }
}

impl UIComponent for View {
    fn set_needs_redraw(&mut self, value: bool) {
        self.needs_redraw = value;
    }

    fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
        self.scroll_text_location_into_view();
    }

    fn draw(&mut self, origin_row: RowIndex) -> Result<(), Error> {
        let Size { height, width } = self.size;
        let end_y = origin_row.saturating_add(height);
        let scroll_top = self.scroll_offset.row;
        let left = self.scroll_offset.col;

        for current_row in origin_row..end_y {
            let line_index = current_row.saturating_sub(origin_row).saturating_add(scroll_top);
            // rows past the document render blank
            let line_text = self.buffer.row(line_index).map_or_else(String::new, |row| {
                Self::visible_text(row, left..left.saturating_add(width))
            });
            Self::render_line(current_row, &line_text)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod view_tests {
    use super::*;

    fn view_with(lines: &[&str], size: Size) -> View {
        let mut view = View::default();
        view.resize(size);
        for (index, line) in lines.iter().enumerate() {
            view.buffer.insert_row(index, line).unwrap();
        }
        view
    }

    fn row_texts(view: &View) -> Vec<String> {
        (0..view.buffer.height())
            .map(|at| view.buffer.row_text(at).unwrap())
            .collect()
    }

    //
    // Rendering
    //

    #[test]
    fn visible_text_slices_the_window() {
        let row = Row::from("0123456789");
        assert_eq!(View::visible_text(&row, 0..4), "0123");
        assert_eq!(View::visible_text(&row, 3..7), "3456");
        assert_eq!(View::visible_text(&row, 8..20), "89");
        assert_eq!(View::visible_text(&row, 20..24), "");
    }

    #[test]
    fn tabs_expand_to_the_next_stop() {
        let row = Row::from("a\tb");
        assert_eq!(View::visible_text(&row, 0..10), "a   b");
        let row = Row::from("\t\tx");
        assert_eq!(View::visible_text(&row, 0..10), "        x");
    }

    #[test]
    fn window_starting_inside_a_tab_expansion() {
        // rendered: 'a' at column 0, tab cells at 1..4, 'b' at 4
        let row = Row::from("a\tb");
        assert_eq!(View::visible_text(&row, 2..5), "  b");
    }

    #[test]
    fn control_characters_render_reverse_video() {
        let row = Row::from("a\u{1}b");
        assert_eq!(
            View::visible_text(&row, 0..10),
            format!("a{Reverse}A{Reset}b")
        );
        let row = Row::from("\u{7f}");
        assert_eq!(View::visible_text(&row, 0..10), format!("{Reverse}?{Reset}"));
    }

    //
    // Editing through commands
    //

    #[test]
    fn typing_on_the_virtual_line_creates_a_row() {
        let mut view = view_with(&[], Size { width: 10, height: 5 });
        view.handle_edit_command(Edit::Insert('h'));
        view.handle_edit_command(Edit::Insert('i'));
        assert_eq!(row_texts(&view), vec!["hi"]);
        assert_eq!(view.movement.text_location.char_index, 2);
    }

    #[test]
    fn enter_splits_the_row_at_the_cursor() {
        let mut view = view_with(&["ab cd"], Size { width: 10, height: 5 });
        view.movement.text_location = Location {
            char_index: 2,
            line_index: 0,
        };
        view.handle_edit_command(Edit::InsertNewline);
        assert_eq!(row_texts(&view), vec!["ab", " cd"]);
        assert_eq!(
            view.movement.text_location,
            Location {
                char_index: 0,
                line_index: 1
            }
        );
    }

    #[test]
    fn backspace_at_column_zero_joins_into_the_previous_row() {
        let mut view = view_with(&["ab", "cd"], Size { width: 10, height: 5 });
        view.movement.text_location = Location {
            char_index: 0,
            line_index: 1,
        };
        view.handle_edit_command(Edit::DeleteBackward);
        assert_eq!(row_texts(&view), vec!["abcd"]);
        assert_eq!(
            view.movement.text_location,
            Location {
                char_index: 2,
                line_index: 0
            }
        );
    }

    #[test]
    fn delete_at_row_end_joins_the_next_row_up() {
        let mut view = view_with(&["ab", "cd"], Size { width: 10, height: 5 });
        view.movement.text_location = Location {
            char_index: 2,
            line_index: 0,
        };
        view.handle_edit_command(Edit::Delete);
        assert_eq!(row_texts(&view), vec!["abcd"]);

        // at the very end of the document there is nothing to join
        view.movement.text_location = Location {
            char_index: 4,
            line_index: 0,
        };
        view.handle_edit_command(Edit::Delete);
        assert_eq!(row_texts(&view), vec!["abcd"]);
    }

    #[test]
    fn backspace_at_document_start_is_a_no_op() {
        let mut view = view_with(&["ab"], Size { width: 10, height: 5 });
        view.handle_edit_command(Edit::DeleteBackward);
        assert_eq!(row_texts(&view), vec!["ab"]);
    }

    //
    // Scrolling
    //

    #[test]
    fn cursor_stays_inside_the_viewport_vertically() {
        let mut view = view_with(&[], Size { width: 10, height: 5 });
        for index in 0..20 {
            view.buffer.insert_row(index, "text").unwrap();
        }

        for _ in 0..15 {
            view.handle_move_command(Move::Down);
        }
        let row = view.movement.text_location.line_index;
        assert!(view.scroll_offset.row <= row);
        assert!(row < view.scroll_offset.row + 5);

        for _ in 0..15 {
            view.handle_move_command(Move::Up);
        }
        assert_eq!(view.scroll_offset.row, 0);
    }

    #[test]
    fn cursor_stays_inside_the_viewport_horizontally() {
        let mut view = view_with(&["0123456789abcdefghij"], Size { width: 8, height: 5 });

        view.handle_move_command(Move::EndOfLine);
        let rx = view
            .buffer
            .row(0)
            .map_or(0, |row| row.cx_to_rx(view.movement.text_location.char_index));
        assert!(view.scroll_offset.col <= rx);
        assert!(rx < view.scroll_offset.col + 8);

        view.handle_move_command(Move::StartOfLine);
        assert_eq!(view.scroll_offset.col, 0);
    }

    #[test]
    fn cursor_position_is_relative_to_the_scroll_offset() {
        let mut view = view_with(&["a\tb"], Size { width: 10, height: 5 });
        view.movement.text_location = Location {
            char_index: 2,
            line_index: 0,
        };
        view.scroll_text_location_into_view();
        assert_eq!(view.cursor_position(), Position { col: 4, row: 0 });
    }

    #[test]
    fn page_moves_step_by_view_height() {
        let mut view = view_with(&[], Size { width: 10, height: 5 });
        for index in 0..20 {
            view.buffer.insert_row(index, "text").unwrap();
        }

        view.handle_move_command(Move::PageDown);
        assert_eq!(view.movement.text_location.line_index, 5);
        view.handle_move_command(Move::PageUp);
        assert_eq!(view.movement.text_location.line_index, 0);
    }
}
