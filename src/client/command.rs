//! Terminal input commands

/// What one line of input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send the line as a message
    Send(String),
    /// Resend every failed message
    Resend,
    /// Change the display name
    Rename(String),
    Quit,
    /// Blank line, or a command missing its argument
    Ignore,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim_end_matches(['\r', '\n']);

        match trimmed.trim() {
            "/quit" | "/exit" => return Command::Quit,
            "/resend" => return Command::Resend,
            _ => {}
        }

        if let Some(rest) = trimmed.trim().strip_prefix("/name") {
            // `/nameless` is a message, not a rename
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                let name = rest.trim();
                return if name.is_empty() {
                    Command::Ignore
                } else {
                    Command::Rename(name.to_string())
                };
            }
        }

        if trimmed.is_empty() {
            Command::Ignore
        } else {
            Command::Send(trimmed.to_string())
        }
    }
}
