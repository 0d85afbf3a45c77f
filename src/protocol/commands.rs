//! Module `commands`
//!
//! Defines the commands accepted on a connection and the result of running
//! one.

/// A parsed request line
#[derive(Debug, PartialEq)]
pub enum Command {
    Login(Vec<u8>), // JSON login form body, undecoded
    Logout,
    Index, // Landing page
    Quit,
    Unknown(String),
}

/// Represents the outcome status of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseConnection,
}

/// Full result of a command execution.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

/// Parses a raw request line into a [`Command`].
///
/// Works on bytes so that a line which is not valid UTF-8 still reaches its
/// handler. `LOGIN` keeps its argument verbatim, even when empty, so that the
/// body decoder decides whether it is well formed.
pub fn parse_command(raw: &[u8]) -> Command {
    let trimmed = raw.trim_ascii();
    let (cmd, arg) = match trimmed.iter().position(|b| b.is_ascii_whitespace()) {
        Some(pos) => (&trimmed[..pos], trimmed[pos..].trim_ascii()),
        None => (trimmed, &[][..]),
    };

    match cmd.to_ascii_uppercase().as_slice() {
        b"LOGIN" => Command::Login(arg.to_vec()),
        b"LOGOUT" => Command::Logout,
        b"INDEX" | b"GET" if arg.is_empty() || arg == b"/" => Command::Index,
        b"QUIT" | b"Q" => Command::Quit,
        _ => Command::Unknown(String::from_utf8_lossy(trimmed).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse_command(b"LOGOUT"), Command::Logout);
        assert_eq!(parse_command(b"INDEX"), Command::Index);
        assert_eq!(parse_command(b"GET /"), Command::Index);
        assert_eq!(parse_command(b"quit"), Command::Quit);
        assert_eq!(parse_command(b"Q"), Command::Quit);
    }

    #[test]
    fn test_parse_login_keeps_body() {
        assert_eq!(
            parse_command(br#"LOGIN {"username":"admin", "password":"x y"}"#),
            Command::Login(br#"{"username":"admin", "password":"x y"}"#.to_vec())
        );
        assert_eq!(parse_command(b"LOGIN"), Command::Login(Vec::new()));
        assert_eq!(parse_command(b"  login   {}  "), Command::Login(b"{}".to_vec()));
    }

    #[test]
    fn test_parse_login_with_invalid_utf8() {
        assert_eq!(
            parse_command(b"LOGIN {\"username\":\"adm\xffin\"}"),
            Command::Login(b"{\"username\":\"adm\xffin\"}".to_vec())
        );
    }

    #[test]
    fn test_unknown_commands() {
        assert_eq!(
            parse_command(b"GET /other"),
            Command::Unknown("GET /other".to_string())
        );
        assert_eq!(parse_command(b"FOO"), Command::Unknown("FOO".to_string()));
        assert_eq!(parse_command(b""), Command::Unknown("".to_string()));
        assert_eq!(
            parse_command(b"FOO \xff"),
            Command::Unknown("FOO \u{fffd}".to_string())
        );
    }
}
