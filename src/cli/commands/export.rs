use super::{CommandHandler, CommandResult};
use crate::cli::context::AppContext;
use crate::export::write_export;
use crate::Result;
use std::path::PathBuf;

/// Handler for the `export` command
pub struct ExportCommand {
    pub output: Option<PathBuf>,
}

impl CommandHandler for ExportCommand {
    fn execute(&self, ctx: &mut AppContext) -> Result<CommandResult> {
        let path = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&ctx.config.export.file_name));
        let registrations = ctx.store.list()?;

        write_export(&path, &registrations)?;

        Ok(CommandResult::Success(Some(format!(
            "Exported {} registration(s) to {}",
            registrations.len(),
            path.display()
        ))))
    }

    fn name(&self) -> &'static str {
        "export"
    }
}

impl ExportCommand {
    /// Create new export command
    pub fn new(output: Option<PathBuf>) -> Self {
        Self { output }
    }
}
