//! Shell command parsing

use thiserror::Error;
use todo_core::task::Filter;

/// One user intent read from a line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    /// 1-based position in the displayed list
    Toggle(usize),
    Remove(usize),
    Edit { index: usize, text: Option<String> },
    Save(Option<String>),
    Cancel,
    Filter(Filter),
    Search(String),
    ClearCompleted,
    Theme,
    List,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command `{0}`, type `help` for usage")]
    Unknown(String),

    #[error("`{0}` needs a task number")]
    MissingIndex(&'static str),

    #[error("`{0}` is not a task number")]
    BadIndex(String),

    #[error("filter must be one of: all, active, completed")]
    BadFilter,
}

pub const USAGE: &str = "\
Commands:
  add <text>          add a task
  toggle <n>          mark task n complete/incomplete
  rm <n>              delete task n
  edit <n> [text]     edit task n (with text: save immediately)
  save [text]         finish the current edit
  cancel              abandon the current edit
  filter <f>          show all, active or completed tasks
  search [term]       filter by text (no term clears)
  clear               remove completed tasks
  theme               switch light/dark
  list                redraw
  help                show this help
  quit                exit";

impl Command {
    /// Parse a line; returns `Ok(None)` for a blank line
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            // Blank text reaches the store, which ignores it
            "add" | "a" => Self::Add(rest.to_string()),
            "toggle" | "t" | "done" => Self::Toggle(parse_index("toggle", rest)?),
            "rm" | "remove" | "delete" => Self::Remove(parse_index("rm", rest)?),
            "edit" | "e" => {
                let (index, text) = match rest.split_once(char::is_whitespace) {
                    Some((n, text)) => (n, Some(text.trim().to_string())),
                    None => (rest, None),
                };
                Self::Edit {
                    index: parse_index("edit", index)?,
                    text,
                }
            }
            "save" => Self::Save((!rest.is_empty()).then(|| rest.to_string())),
            "cancel" => Self::Cancel,
            "filter" | "f" => Self::Filter(rest.parse().map_err(|_| ParseError::BadFilter)?),
            "all" | "active" | "completed" => {
                Self::Filter(word.parse().map_err(|_| ParseError::BadFilter)?)
            }
            "search" | "s" | "/" => Self::Search(rest.to_string()),
            "clear" => Self::ClearCompleted,
            "theme" => Self::Theme,
            "list" | "ls" => Self::List,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn parse_index(command: &'static str, arg: &str) -> Result<usize, ParseError> {
    if arg.is_empty() {
        return Err(ParseError::MissingIndex(command));
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseError::BadIndex(arg.to_string())),
    }
}
