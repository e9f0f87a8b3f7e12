pub mod clear;
pub mod export;
pub mod list;
pub mod login;
pub mod register;

use super::app::Commands;
use super::context::AppContext;
use crate::{FunRunError, Result};
use tracing::debug;

/// Common trait for all command handlers
pub trait CommandHandler {
    /// Execute the command
    fn execute(&self, ctx: &mut AppContext) -> Result<CommandResult>;

    /// Get command name for logging
    fn name(&self) -> &'static str;
}

/// Command execution result
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Success with optional message
    Success(Option<String>),
    /// Error with message
    Error(String),
    /// Warning with message
    Warning(String),
}

impl CommandResult {
    /// Convert to exit code
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandResult::Success(_) => 0,
            CommandResult::Error(_) => 1,
            CommandResult::Warning(_) => 0,
        }
    }

    /// Get message if any
    pub fn message(&self) -> Option<&str> {
        match self {
            CommandResult::Success(msg) => msg.as_deref(),
            CommandResult::Error(msg) => Some(msg),
            CommandResult::Warning(msg) => Some(msg),
        }
    }
}

/// Build the handler for `command`
pub fn handler_for(command: Commands) -> Box<dyn CommandHandler> {
    match command {
        Commands::Register {
            name,
            nik,
            category,
        } => Box::new(register::RegisterCommand::new(name, nik, category)),
        Commands::Login { username, password } => {
            Box::new(login::LoginCommand::new(username, password))
        }
        Commands::Logout => Box::new(login::LogoutCommand),
        Commands::List { search, json } => Box::new(list::ListCommand::new(search, json)),
        Commands::Export { output } => Box::new(export::ExportCommand::new(output)),
        Commands::Clear { yes } => Box::new(clear::ClearCommand::new(yes)),
    }
}

/// Run `command`, refusing administrator commands until logged in
pub fn dispatch(command: Commands, ctx: &mut AppContext) -> Result<CommandResult> {
    debug!(
        command = command.name(),
        modifies_data = command.modifies_data(),
        "Dispatching command"
    );

    if command.requires_admin() {
        match ctx.gate.require_authenticated() {
            Ok(()) => {}
            Err(FunRunError::NotAuthenticated) => {
                return Ok(CommandResult::Error(
                    "Administrator login required. Run `funrun login` first.".to_string(),
                ));
            }
            Err(e) => return Err(e),
        }
    }

    let handler = handler_for(command);
    let result = handler.execute(ctx)?;
    debug!(
        handler = handler.name(),
        exit_code = result.exit_code(),
        "Command finished"
    );
    Ok(result)
}
