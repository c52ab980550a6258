//! Ergonomic constructors for vacancy records.
//!
//! Records mimic the endpoint's item shape: `name`, `employer.name`, a
//! `snippet` with requirement/responsibility text and an `area`. These
//! builders are for readability in tests, not for production use.

use querycheck_core::ResultRecord;
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// VacancyBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for vacancy JSON fixtures.
///
/// # Example
///
/// ```rust
/// let item = VacancyBuilder::new("Кассир")
///     .employer("Магнит")
///     .requirement("Опыт работы с кассой")
///     .build();
/// ```
pub struct VacancyBuilder {
    name: String,
    employer: String,
    requirement: Option<String>,
    responsibility: Option<String>,
    area: String,
}

impl VacancyBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            employer: "ООО Ромашка".to_string(),
            requirement: None,
            responsibility: None,
            area: "Москва".to_string(),
        }
    }

    pub fn employer(mut self, employer: impl Into<String>) -> Self {
        self.employer = employer.into();
        self
    }

    pub fn requirement(mut self, text: impl Into<String>) -> Self {
        self.requirement = Some(text.into());
        self
    }

    pub fn responsibility(mut self, text: impl Into<String>) -> Self {
        self.responsibility = Some(text.into());
        self
    }

    pub fn area(mut self, area: impl Into<String>) -> Self {
        self.area = area.into();
        self
    }

    pub fn build(self) -> Value {
        json!({
            "id": "10000001",
            "name": self.name,
            "employer": { "id": "1", "name": self.employer },
            "area": { "id": "1", "name": self.area },
            "snippet": {
                "requirement": self.requirement,
                "responsibility": self.responsibility,
            },
            "salary": null,
        })
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// Vacancy JSON with a title and employer.
pub fn vacancy(name: &str, employer: &str) -> Value {
    VacancyBuilder::new(name).employer(employer).build()
}

/// Decode JSON items the way the client does.
pub fn records(items: &[Value]) -> Vec<ResultRecord> {
    items.iter().cloned().map(ResultRecord::new).collect()
}
