use super::{CommandHandler, CommandResult};
use crate::cli::context::AppContext;
use crate::registry::{Category, NewRegistration};
use crate::{FunRunError, Result};

/// Handler for the `register` command
pub struct RegisterCommand {
    pub name: String,
    pub nik: String,
    pub category: Category,
}

impl CommandHandler for RegisterCommand {
    fn execute(&self, ctx: &mut AppContext) -> Result<CommandResult> {
        let new = match NewRegistration::new(&self.name, &self.nik, self.category) {
            Ok(new) => new,
            Err(FunRunError::Validation(msg)) => return Ok(CommandResult::Error(msg)),
            Err(e) => return Err(e),
        };

        match ctx.store.register(new) {
            Ok(registration) => Ok(CommandResult::Success(Some(format!(
                "Registration successful! Your bib number: {}",
                registration.bib_number
            )))),
            Err(FunRunError::CapacityExhausted { category }) => Ok(CommandResult::Error(format!(
                "Sorry, bib numbers for category '{}' are sold out.",
                category.display_name()
            ))),
            Err(e) => Err(e),
        }
    }

    fn name(&self) -> &'static str {
        "register"
    }
}

impl RegisterCommand {
    /// Create new register command
    pub fn new(name: String, nik: String, category: Category) -> Self {
        Self {
            name,
            nik,
            category,
        }
    }
}
