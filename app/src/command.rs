//! Parsing of the shell's line commands.

use std::str::FromStr;

use articulos_core::{ActionKind, ArticuloId, FormField, UnknownField};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reload,
    Show,
    Set { field: FormField, value: String },
    Submit,
    /// `edit <id>` and `delete <id>`, the card controls.
    Action { kind: ActionKind, id: ArticuloId },
    Confirm,
    Dismiss,
    Cancel,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}, try `help`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid id {0:?}")]
    InvalidId(String),
    #[error(transparent)]
    Field(#[from] UnknownField),
}

pub const HELP: &str = "\
commands:
  list | reload           fetch the articulos again
  show                    redraw the page
  set <field> <value>     fill a form field (idcategoria, nombre, descripcion, stock)
  submit                  save the form (create, or update while editing)
  edit <id>               load an articulo into the form
  delete <id>             ask to delete an articulo
  confirm | dismiss       answer the delete prompt
  cancel                  leave edit mode
  help | quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "" => Err(CommandError::Empty),
            "list" | "reload" => Ok(Command::Reload),
            "show" => Ok(Command::Show),
            "submit" | "save" => Ok(Command::Submit),
            "confirm" => Ok(Command::Confirm),
            "dismiss" => Ok(Command::Dismiss),
            "cancel" => Ok(Command::Cancel),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "set" => {
                let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if name.is_empty() {
                    return Err(CommandError::MissingArgument("set"));
                }
                Ok(Command::Set {
                    field: name.parse()?,
                    value: value.trim().to_string(),
                })
            }
            other => match other.parse::<ActionKind>() {
                Ok(kind) => {
                    if rest.is_empty() {
                        return Err(CommandError::MissingArgument(kind.as_str()));
                    }
                    let id = rest
                        .parse()
                        .map_err(|_| CommandError::InvalidId(rest.to_string()))?;
                    Ok(Command::Action { kind, id })
                }
                Err(_) => Err(CommandError::Unknown(other.to_string())),
            },
        }
    }
}
