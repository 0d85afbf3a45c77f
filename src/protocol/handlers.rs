//! Command handlers
//!
//! Runs a parsed command against the login service for one connection and
//! renders the reply line.

use crate::auth::CheckCredentials;
use crate::error::GateError;
use crate::notify::NotifyLoginEvent;
use crate::protocol::responses::{self, StatusReply};
use crate::protocol::translators::translate;
use crate::protocol::{Command, CommandResult, CommandStatus};
use crate::service::LoginService;
use crate::session::{Landing, MessageKey, SessionSettings, SessionStore};

/// Dispatches a command to its handler.
pub async fn handle_command<C, S, N, St>(
    service: &LoginService<C, S, N>,
    store: &mut St,
    command: &Command,
    remote_ip: &str,
) -> CommandResult
where
    C: CheckCredentials,
    S: SessionSettings,
    N: NotifyLoginEvent,
    St: SessionStore,
{
    match command {
        Command::Login(form) => handle_cmd_login(service, store, form, remote_ip).await,
        Command::Logout => handle_cmd_logout(service, store),
        Command::Index => handle_cmd_index(service, store),
        Command::Quit => CommandResult {
            status: CommandStatus::CloseConnection,
            message: Some("BYE\r\n".into()),
        },
        Command::Unknown(_) => CommandResult {
            status: CommandStatus::Failure("Unknown command".into()),
            message: Some(responses::error("unknown command")),
        },
    }
}

/// Handles LOGIN: always answers with a JSON status line.
async fn handle_cmd_login<C, S, N, St>(
    service: &LoginService<C, S, N>,
    store: &mut St,
    form: &[u8],
    remote_ip: &str,
) -> CommandResult
where
    C: CheckCredentials,
    S: SessionSettings,
    N: NotifyLoginEvent,
    St: SessionStore,
{
    match service.handle_login(form, store, remote_ip).await {
        Ok(result) => {
            let reply = StatusReply::new(result.ok, translate(result.message));
            let status = if result.ok {
                CommandStatus::Success
            } else {
                CommandStatus::Failure(result.message.as_str().to_string())
            };
            CommandResult {
                status,
                message: Some(reply.to_line()),
            }
        }
        Err(e) => {
            // Backend details stay in the log; the peer only learns the outcome.
            let msg = match &e {
                GateError::SessionBind(_) => {
                    format!("{}: {}", translate(MessageKey::SuccessLogin), e)
                }
                GateError::CredentialLookup(_) => {
                    translate(MessageKey::WrongUsernameOrPassword).to_string()
                }
            };
            CommandResult {
                status: CommandStatus::Failure(e.to_string()),
                message: Some(StatusReply::new(false, msg).to_line()),
            }
        }
    }
}

/// Handles LOGOUT: clears the session and redirects to the base path.
fn handle_cmd_logout<C, S, N, St>(service: &LoginService<C, S, N>, store: &mut St) -> CommandResult
where
    C: CheckCredentials,
    S: SessionSettings,
    N: NotifyLoginEvent,
    St: SessionStore,
{
    let target = service.handle_logout(store);
    CommandResult {
        status: CommandStatus::Success,
        message: Some(responses::redirect(&target)),
    }
}

fn handle_cmd_index<C, S, N, St>(service: &LoginService<C, S, N>, store: &St) -> CommandResult
where
    C: CheckCredentials,
    S: SessionSettings,
    N: NotifyLoginEvent,
    St: SessionStore,
{
    let message = match service.landing(store) {
        Landing::Panel(path) => responses::redirect(&path),
        Landing::LoginPage => responses::page("login"),
    };
    CommandResult {
        status: CommandStatus::Success,
        message: Some(message),
    }
}
