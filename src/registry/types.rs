use super::normalize::{capitalize_each_word, sanitize_nik};
use crate::{FunRunError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registrant category, each owning a disjoint bib number band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Students
    Pelajar,
    /// General public
    Umum,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Pelajar, Category::Umum];

    /// Reserved bib number range for this category
    pub fn band(&self) -> CategoryBand {
        match self {
            Category::Pelajar => CategoryBand::new(1, 5000),
            Category::Umum => CategoryBand::new(5001, 10000),
        }
    }

    /// Serialized name, as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pelajar => "pelajar",
            Category::Umum => "umum",
        }
    }

    /// Name with the first letter capitalized, as shown in exports
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Pelajar => "Pelajar",
            Category::Umum => "Umum",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = FunRunError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pelajar" | "student" => Ok(Category::Pelajar),
            "umum" | "general" => Ok(Category::Umum),
            other => Err(FunRunError::Validation(format!(
                "Unknown category '{}', expected pelajar or umum",
                other
            ))),
        }
    }
}

/// Inclusive numeric range of bib numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryBand {
    pub start: u32,
    pub end: u32,
}

impl CategoryBand {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, number: u32) -> bool {
        (self.start..=self.end).contains(&number)
    }

    /// Number of slots in the band
    pub fn capacity(&self) -> u32 {
        self.end - self.start + 1
    }
}

/// Format a bib number zero-padded to four digits
pub fn format_bib(number: u32) -> String {
    format!("{:04}", number)
}

/// One participant's stored submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub nik: String,
    pub category: Category,
    #[serde(rename = "bibNumber")]
    pub bib_number: String,
}

impl Registration {
    /// Numeric value of the bib number, ignoring zero padding.
    ///
    /// Reads the leading run of digits after any whitespace, so `"7a"` is 7.
    /// `None` when there are no leading digits.
    pub fn bib_value(&self) -> Option<u32> {
        let trimmed = self.bib_number.trim_start();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        trimmed[..end].parse().ok()
    }
}

/// Validated form input awaiting a bib number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub name: String,
    pub nik: String,
    pub category: Category,
}

impl NewRegistration {
    /// Normalize the raw name and NIK and reject empty fields
    pub fn new(name: &str, nik: &str, category: Category) -> Result<Self> {
        let name = capitalize_each_word(name);
        let nik = sanitize_nik(nik);

        if name.is_empty() {
            return Err(FunRunError::Validation("Name is required".to_string()));
        }
        if nik.is_empty() {
            return Err(FunRunError::Validation(
                "NIK is required and must contain digits".to_string(),
            ));
        }

        Ok(Self {
            name,
            nik,
            category,
        })
    }

    /// Attach an allocated bib number
    pub fn into_registration(self, bib_number: String) -> Registration {
        Registration {
            name: self.name,
            nik: self.nik,
            category: self.category,
            bib_number,
        }
    }
}
