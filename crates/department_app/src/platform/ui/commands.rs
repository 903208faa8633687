use department_core::{CurrentUser, DepartmentId, Role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Search(String),
    Page(u32),
    Refresh,
    Add,
    Edit(DepartmentId),
    Delete(DepartmentId),
    Confirm,
    Cancel,
    Save {
        name: String,
        description: Option<String>,
    },
    Open(DepartmentId),
    Dismiss,
    Login(CurrentUser),
    Logout,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty input")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),
    #[error("unknown role `{0}` (administrator, moderator or member)")]
    UnknownRole(String),
}

pub const HELP: &str = "\
commands:
  search [text]            type into the search box (empty clears it)
  page <n>                 go to page n
  refresh                  reload the current page
  add | edit <id> | delete <id>
  save <name> [| <description>]   submit the open form
  confirm | cancel         answer the open dialog
  open <id>                open a department
  dismiss                  hide the notification
  login <user> <role> | logout
  help | quit";

pub fn parse(line: &str) -> Result<UiCommand, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(CommandError::Empty);
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "search" | "/" => Ok(UiCommand::Search(rest.to_string())),
        "page" => parse_number(rest, "page").map(UiCommand::Page),
        "refresh" => Ok(UiCommand::Refresh),
        "add" => Ok(UiCommand::Add),
        "edit" => parse_number(rest, "edit").map(UiCommand::Edit),
        "delete" => parse_number(rest, "delete").map(UiCommand::Delete),
        "confirm" => Ok(UiCommand::Confirm),
        "cancel" => Ok(UiCommand::Cancel),
        "save" => parse_save(rest),
        "open" => parse_number(rest, "open").map(UiCommand::Open),
        "dismiss" => Ok(UiCommand::Dismiss),
        "login" => parse_login(rest),
        "logout" => Ok(UiCommand::Logout),
        "help" | "?" => Ok(UiCommand::Help),
        "quit" | "exit" => Ok(UiCommand::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_number<T: std::str::FromStr>(
    raw: &str,
    command: &'static str,
) -> Result<T, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            expected: "a number",
        });
    }
    raw.parse()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}

fn parse_save(rest: &str) -> Result<UiCommand, CommandError> {
    let (name, description) = match rest.split_once('|') {
        Some((name, description)) => (name.trim(), Some(description.trim())),
        None => (rest, None),
    };
    if name.is_empty() {
        return Err(CommandError::MissingArgument {
            command: "save",
            expected: "a name",
        });
    }
    Ok(UiCommand::Save {
        name: name.to_string(),
        description: description
            .filter(|description| !description.is_empty())
            .map(str::to_string),
    })
}

fn parse_login(rest: &str) -> Result<UiCommand, CommandError> {
    let mut parts = rest.split_whitespace();
    let (Some(username), Some(role)) = (parts.next(), parts.next()) else {
        return Err(CommandError::MissingArgument {
            command: "login",
            expected: "a username and a role",
        });
    };
    let role = match role.to_ascii_lowercase().as_str() {
        "administrator" | "admin" => Role::Administrator,
        "moderator" | "mod" => Role::Moderator,
        "member" => Role::Member,
        other => return Err(CommandError::UnknownRole(other.to_string())),
    };
    Ok(UiCommand::Login(CurrentUser::new(username, role)))
}
