use super::{CommandHandler, CommandResult};
use crate::cli::context::AppContext;
use crate::registry::{count_by_category, search, Registration};
use crate::Result;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

/// Table row for the registrations dashboard
#[derive(Tabled)]
struct RegistrationRow {
    #[tabled(rename = "No. BIB")]
    bib_number: String,
    #[tabled(rename = "NIK")]
    nik: String,
    #[tabled(rename = "Nama")]
    name: String,
    #[tabled(rename = "Kategori")]
    category: String,
}

impl From<&Registration> for RegistrationRow {
    fn from(registration: &Registration) -> Self {
        Self {
            bib_number: registration.bib_number.clone(),
            nik: registration.nik.clone(),
            name: registration.name.clone(),
            category: registration.category.display_name().to_string(),
        }
    }
}

/// Handler for the `list` command
pub struct ListCommand {
    pub search: Option<String>,
    pub json: bool,
}

impl CommandHandler for ListCommand {
    fn execute(&self, ctx: &mut AppContext) -> Result<CommandResult> {
        let registrations = ctx.store.list()?;
        let term = self.search.as_deref().unwrap_or("");
        let matching = search::filter(&registrations, term);

        if self.json {
            return Ok(CommandResult::Success(Some(serde_json::to_string_pretty(
                &matching,
            )?)));
        }

        let mut out = String::new();
        if matching.is_empty() {
            out.push_str("No registrations found.\n");
        } else {
            out.push_str(&format!("Found {} registration(s):\n\n", matching.len()));
            let rows: Vec<RegistrationRow> = matching.iter().map(|r| (*r).into()).collect();
            let table = Table::new(&rows)
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()))
                .to_string();
            out.push_str(&table);
            out.push('\n');
        }

        let counts = count_by_category(&registrations);
        let breakdown: Vec<String> = counts
            .iter()
            .map(|(category, count)| format!("{}: {}", category.display_name(), count))
            .collect();
        out.push_str(&format!(
            "\nTotal registered: {} ({})",
            registrations.len(),
            breakdown.join(", ")
        ));

        Ok(CommandResult::Success(Some(out)))
    }

    fn name(&self) -> &'static str {
        "list"
    }
}

impl ListCommand {
    /// Create new list command
    pub fn new(search: Option<String>, json: bool) -> Self {
        Self { search, json }
    }
}
