use std::env;
use std::io::Error;
use std::panic::{set_hook, take_hook};

use crossterm::event::{read, Event, KeyEvent, KeyEventKind};
use log::{error, info};

use crate::prelude::*;

mod command;
mod documentstatus;
mod terminal;
mod ui_component;
mod uicomponents;

use command::{Command, System};
pub use command::{Edit, Move};
pub use documentstatus::DocumentStatus;
pub use terminal::Terminal;
use ui_component::UIComponent;
use uicomponents::{MessageBar, StatusBar, View};

/// Ties the pieces together: one blocking event read per iteration, each
/// keypress fully processed before the next, then a full screen refresh.
#[derive(Default)]
pub struct Editor {
    should_quit: bool,
    view: View,
    status_bar: StatusBar,
    message_bar: MessageBar,
    terminal_size: Size,
    title: String,
    quit_times: u8,
}

impl Editor {
    pub fn new() -> Result<Self, Error> {
        let current_hook = take_hook();
        set_hook(Box::new(move |panic_info| {
            let _ = Terminal::kill();
            current_hook(panic_info);
        }));

        Terminal::init()?;

        let mut editor = Self::default();
        let size = Terminal::size().unwrap_or_default();
        editor.handle_resize_command(size);
        editor
            .message_bar
            .update_message("HELP: Ctrl-S = save | Ctrl-Q = quit");

        let args: Vec<String> = env::args().collect();
        if let Some(file_name) = args.get(1) {
            info!("Opening {file_name}");
            if editor.view.load(file_name).is_err() {
                editor
                    .message_bar
                    .update_message(&format!("ERR: Could not open file: {file_name}"));
            }
        }

        editor.refresh_status();

        Ok(editor)
    }

    pub fn run(&mut self) {
        loop {
            self.refresh_screen();
            if self.should_quit {
                break;
            }
            match read() {
                Ok(event) => self.evaluate_event(event),
                Err(err) => {
                    #[cfg(debug_assertions)]
                    {
                        panic!("Could not read event: {err:?}");
                    }
                    #[cfg(not(debug_assertions))]
                    {
                        error!("Could not read event: {err:?}");
                    }
                }
            }
            self.refresh_status();
        }
    }

    fn evaluate_event(&mut self, event: Event) {
        let should_process = match &event {
            Event::Key(KeyEvent { kind, .. }) => kind == &KeyEventKind::Press,
            Event::Resize(_, _) => true,
            _ => false,
        };

        if should_process {
            if let Ok(command) = Command::try_from(event) {
                self.process_command(command);
            }
        }
    }

    fn process_command(&mut self, command: Command) {
        match command {
            Command::System(System::Resize(size)) => self.handle_resize_command(size),
            Command::System(System::Quit) => self.handle_quit_command(),
            Command::System(System::Save) => {
                self.reset_quit_times();
                self.handle_save_command();
            }
            Command::Edit(edit_command) => {
                self.reset_quit_times();
                self.view.handle_edit_command(edit_command);
            }
            Command::Move(move_command) => {
                self.reset_quit_times();
                self.view.handle_move_command(move_command);
            }
        }
    }

    /// The bottom two rows are reserved for the status and message bars.
    fn handle_resize_command(&mut self, size: Size) {
        self.terminal_size = size;

        self.view.resize(Size {
            height: size.height.saturating_sub(2),
            width: size.width,
        });
        self.status_bar.resize(Size {
            height: 1,
            width: size.width,
        });
        self.message_bar.resize(Size {
            height: 1,
            width: size.width,
        });
    }

    fn handle_save_command(&mut self) {
        if !self.view.is_file_loaded() {
            self.message_bar.update_message("Save aborted: no file name");
            return;
        }
        match self.view.save() {
            Ok(()) => self.message_bar.update_message("File saved successfully"),
            Err(err) => {
                error!("Could not save file: {err}");
                self.message_bar.update_message("Error writing file!");
            }
        }
    }

    /// Quitting a modified document takes `QUIT_TIMES` presses in a row.
    fn handle_quit_command(&mut self) {
        if !self.view.get_status().is_modified || self.quit_times + 1 == QUIT_TIMES {
            self.should_quit = true;
        } else {
            self.message_bar.update_message(&format!(
                "WARNING! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                QUIT_TIMES - self.quit_times - 1
            ));
            self.quit_times += 1;
        }
    }

    fn reset_quit_times(&mut self) {
        if self.quit_times > 0 {
            self.quit_times = 0;
            self.message_bar.update_message("");
        }
    }

    fn refresh_status(&mut self) {
        let status = self.view.get_status();
        let title = format!("{} - {NAME}", status.file_name);
        self.status_bar.update_status(status);

        if title != self.title && Terminal::set_title(&title).is_ok() {
            self.title = title;
        }
    }

    fn refresh_screen(&mut self) {
        if self.terminal_size.height == 0 || self.terminal_size.width == 0 {
            return;
        }

        let bottom_bar_row = self.terminal_size.height.saturating_sub(1);
        let _ = Terminal::hide_cursor();

        self.message_bar.render(bottom_bar_row);
        if self.terminal_size.height > 1 {
            self.status_bar
                .render(self.terminal_size.height.saturating_sub(2));
        }
        if self.terminal_size.height > 2 {
            self.view.render(0);
        }

        let _ = Terminal::move_cursor_to(self.view.cursor_position());
        let _ = Terminal::show_cursor();
        let _ = Terminal::execute();
    }
}

impl Drop for Editor {
    fn drop(&mut self) {
        let _ = Terminal::kill();
        if self.should_quit {
            let _ = Terminal::print("Goodbye.\r\n");
        }
    }
}
