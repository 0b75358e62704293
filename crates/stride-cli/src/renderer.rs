//! Terminal rendering of the markdown produced by the core display types.
//!
//! Rich output goes through termimad; `--no-color` prints the markdown as is
//! so it stays pipeable and easy to assert on in tests.

use std::io::{self, Write};

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));
        skin.table.set_fg(Color::Grey);

        Self { rich_enabled, skin }
    }

    /// Formats `markdown` for the terminal.
    ///
    /// Headers keep their `#` markers so nesting stays visible; consecutive
    /// table rows are laid out together.
    pub fn format(&self, markdown: &str) -> String {
        if !self.rich_enabled {
            return markdown.to_string();
        }

        let mut output = String::new();
        let mut table = String::new();

        for line in markdown.lines() {
            if line.starts_with('|') {
                table.push_str(line);
                table.push('\n');
                continue;
            }
            self.flush_table(&mut table, &mut output);

            if line.starts_with('#') {
                output.push_str(&format!("\x1b[34m{line}\x1b[0m\n"));
            } else {
                output.push_str(&format!("{}\n", self.skin.inline(line)));
            }
        }
        self.flush_table(&mut table, &mut output);

        output
    }

    fn flush_table(&self, table: &mut String, output: &mut String) {
        if !table.is_empty() {
            output.push_str(&self.skin.term_text(table).to_string());
            table.clear();
        }
    }

    /// Writes `markdown` to stdout.
    pub fn render(&self, markdown: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(self.format(markdown).as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
