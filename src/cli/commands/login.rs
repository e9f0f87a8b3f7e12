use super::{CommandHandler, CommandResult};
use crate::cli::context::AppContext;
use crate::{FunRunError, Result};

/// Handler for the `login` command
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl CommandHandler for LoginCommand {
    fn execute(&self, ctx: &mut AppContext) -> Result<CommandResult> {
        if ctx.gate.is_authenticated()? {
            return Ok(CommandResult::Success(Some(
                "Already logged in as administrator.".to_string(),
            )));
        }

        match ctx.gate.login(&self.username, &self.password) {
            Ok(()) => Ok(CommandResult::Success(Some("Logged in.".to_string()))),
            Err(FunRunError::InvalidCredentials) => Ok(CommandResult::Error(
                "Invalid username or password".to_string(),
            )),
            Err(e) => Err(e),
        }
    }

    fn name(&self) -> &'static str {
        "login"
    }
}

impl LoginCommand {
    /// Create new login command
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

/// Handler for the `logout` command
pub struct LogoutCommand;

impl CommandHandler for LogoutCommand {
    fn execute(&self, ctx: &mut AppContext) -> Result<CommandResult> {
        if ctx.gate.logout()? {
            Ok(CommandResult::Success(Some("Logged out.".to_string())))
        } else {
            Ok(CommandResult::Warning("Not logged in.".to_string()))
        }
    }

    fn name(&self) -> &'static str {
        "logout"
    }
}
