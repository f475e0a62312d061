use anyhow::{Context, Result};

mod editor;
mod prelude;

use editor::Editor;

fn main() -> Result<()> {
    env_logger::init();

    let mut editor = Editor::new().context("Could not initialize editor")?;
    editor.run();

    Ok(())
}
