use super::{CommandHandler, CommandResult};
use crate::cli::context::AppContext;
use crate::Result;
use std::io::{self, BufRead, Write};

/// Handler for the `clear` command
pub struct ClearCommand {
    pub yes: bool,
}

impl CommandHandler for ClearCommand {
    fn execute(&self, ctx: &mut AppContext) -> Result<CommandResult> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.execute_with(ctx, &mut stdin.lock(), &mut stdout.lock())
    }

    fn name(&self) -> &'static str {
        "clear"
    }
}

impl ClearCommand {
    /// Create new clear command
    pub fn new(yes: bool) -> Self {
        Self { yes }
    }

    /// Run with explicit prompt streams. Registrations are only removed after
    /// the confirmation is answered `y` or `yes`.
    pub fn execute_with(
        &self,
        ctx: &mut AppContext,
        input: &mut dyn BufRead,
        prompt: &mut dyn Write,
    ) -> Result<CommandResult> {
        let count = ctx.store.list()?.len();

        if !self.yes {
            writeln!(
                prompt,
                "This will permanently delete all {} registration(s). Continue? (y/N)",
                count
            )?;
            prompt.flush()?;

            let mut answer = String::new();
            input.read_line(&mut answer)?;

            if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
                return Ok(CommandResult::Warning("Clear cancelled.".to_string()));
            }
        }

        ctx.store.clear()?;
        Ok(CommandResult::Success(Some(format!(
            "Deleted {} registration(s).",
            count
        ))))
    }
}
