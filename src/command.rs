/// A prefixed chat message split into a lowercased name and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

/// A command the bot knows how to answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    /// Map leaderboard; the raw TMX id argument, if any, is validated later.
    Map(Option<String>),
    Campaign,
    Unknown(String),
}

/// Strip `prefix` (ASCII case-insensitive) from `text` and split the rest on whitespace.
///
/// Returns `None` when the text is ordinary conversation.
pub fn parse(text: &str, prefix: &str) -> Option<ParsedCommand> {
    let head = text.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }

    let mut tokens = text[prefix.len()..].split_whitespace();
    let name = tokens.next().unwrap_or_default().to_lowercase();
    let args = tokens.map(str::to_string).collect();

    Some(ParsedCommand { name, args })
}

impl From<&ParsedCommand> for Command {
    fn from(parsed: &ParsedCommand) -> Self {
        match parsed.name.as_str() {
            "help" | "h" => Command::Help,
            "map" | "m" => Command::Map(parsed.args.first().cloned()),
            "all" | "a" | "campaign" => Command::Campaign,
            other => Command::Unknown(other.to_string()),
        }
    }
}
