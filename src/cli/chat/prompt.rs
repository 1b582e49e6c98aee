use rustyline::{Config, Editor, Result};

use super::options::Page;

/// Readline prompt showing the page free text will go to.
pub fn generate_prompt(page: Page) -> String {
    match page {
        Page::Home => "> ".to_string(),
        page => format!("[{}] > ", page.label()),
    }
}

pub fn rl() -> Result<Editor<()>> {
    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();
    Editor::with_config(config)
}
