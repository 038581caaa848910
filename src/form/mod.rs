//! Project form handling
//!
//! The form speaks the display convention (`startDate`, `assignedTeam`), the
//! store speaks the storage convention (`start_date`, `assigned_team`).
//! `PROJECT_FIELD_MAP` is the only place the two are tied together.

mod image;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::core::ProjectStatus;
use crate::core::decode::numeric;
use crate::error::FormError;
use crate::utils::parse_date;

pub(crate) use image::{ImageDescriptor, validate_image};

/// One display-to-storage rename
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldMapping {
    pub(crate) display: &'static str,
    pub(crate) storage: &'static str,
}

const fn field(display: &'static str, storage: &'static str) -> FieldMapping {
    FieldMapping { display, storage }
}

pub(crate) const PROJECT_FIELD_MAP: [FieldMapping; 9] = [
    field("name", "name"),
    field("location", "location"),
    field("client", "client"),
    field("startDate", "start_date"),
    field("endDate", "end_date"),
    field("budget", "budget"),
    field("status", "status"),
    field("assignedTeam", "assigned_team"),
    field("description", "description"),
];

/// Injected into every new project; never taken from the form
pub(crate) const PROGRESS_FIELD: &str = "progress";

/// Row shape written to the `projects` table
pub(crate) type StorageRecord = Map<String, Value>;

/// Translate display-convention form fields into a storage record.
///
/// Fields not listed in `PROJECT_FIELD_MAP` are dropped. Listed fields that are
/// absent from the form are omitted. `progress` is always set to 0.
pub(crate) fn to_storage_record(form: &Map<String, Value>) -> StorageRecord {
    let mut record = StorageRecord::new();
    for mapping in &PROJECT_FIELD_MAP {
        if let Some(value) = form.get(mapping.display) {
            record.insert(mapping.storage.to_string(), value.clone());
        }
    }
    record.insert(PROGRESS_FIELD.to_string(), Value::from(0));
    record
}

/// The new-project form as entered by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ProjectForm {
    pub(crate) name: String,
    pub(crate) location: String,
    pub(crate) client: String,
    pub(crate) start_date: String,
    pub(crate) end_date: String,
    #[serde(deserialize_with = "budget_text")]
    pub(crate) budget: String,
    pub(crate) status: String,
    pub(crate) assigned_team: String,
    pub(crate) description: String,
}

impl Default for ProjectForm {
    fn default() -> Self {
        ProjectForm {
            name: String::new(),
            location: String::new(),
            client: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            budget: String::new(),
            status: "planning".to_string(),
            assigned_team: String::new(),
            description: String::new(),
        }
    }
}

impl ProjectForm {
    /// Parse a form saved as display-convention JSON. Unknown keys are ignored.
    pub(crate) fn from_json(text: &str) -> Result<Self, FormError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Check required fields and normalize dates to YYYY-MM-DD
    pub(crate) fn validated(mut self) -> Result<Self, FormError> {
        let required = [
            ("name", &self.name),
            ("location", &self.location),
            ("client", &self.client),
            ("startDate", &self.start_date),
            ("endDate", &self.end_date),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(FormError::MissingField { field: *field });
        }

        self.start_date = normalize_date("startDate", &self.start_date)?;
        self.end_date = normalize_date("endDate", &self.end_date)?;

        let budget = self.budget.trim();
        if !budget.is_empty() && numeric(&Value::from(budget)).is_none() {
            return Err(FormError::InvalidBudget {
                input: self.budget.clone(),
            });
        }
        if self.status.trim().is_empty() {
            self.status = ProjectForm::default().status;
        }
        if matches!(
            ProjectStatus::from(self.status.clone()),
            ProjectStatus::Other(_) | ProjectStatus::Unset
        ) {
            return Err(FormError::InvalidStatus {
                input: self.status.clone(),
            });
        }
        Ok(self)
    }

    /// The form as a display-convention object
    pub(crate) fn display_fields(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    pub(crate) fn to_storage_record(&self) -> StorageRecord {
        to_storage_record(&self.display_fields())
    }
}

/// Budget as typed text; a saved form may also hold it as a JSON number
fn budget_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(serde::de::Error::custom(format!(
            "budget must be a number or a string, got {other}"
        ))),
    }
}

fn normalize_date(field: &'static str, input: &str) -> Result<String, FormError> {
    parse_date(input.trim())
        .map(|d| d.format(crate::consts::DATE_FORMAT).to_string())
        .ok_or_else(|| FormError::InvalidDate {
            field,
            input: input.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn snake_case(name: &str) -> String {
        let mut out = String::new();
        for c in name.chars() {
            if c.is_ascii_uppercase() {
                out.push('_');
                out.push(c.to_ascii_lowercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    fn filled_form() -> ProjectForm {
        ProjectForm {
            name: "Harbor Wall".to_string(),
            location: "Pier 4".to_string(),
            client: "Port Authority".to_string(),
            start_date: "2025-03-01".to_string(),
            end_date: "2025-09-30".to_string(),
            budget: "125000".to_string(),
            status: "in-progress".to_string(),
            assigned_team: "Team A".to_string(),
            description: "Seawall repair".to_string(),
        }
    }

    #[test]
    fn map_covers_every_form_field() {
        let fields = ProjectForm::default().display_fields();
        let form_keys: BTreeSet<String> = fields.keys().cloned().collect();
        let mapped: BTreeSet<String> = PROJECT_FIELD_MAP
            .iter()
            .map(|m| m.display.to_string())
            .collect();
        assert_eq!(form_keys, mapped);
    }

    #[test]
    fn storage_names_are_snake_case_of_display_names() {
        for mapping in &PROJECT_FIELD_MAP {
            assert_eq!(mapping.storage, snake_case(mapping.display));
        }
    }

    #[test]
    fn full_form_maps_to_nine_fields_plus_progress() {
        let record = filled_form().to_storage_record();
        assert_eq!(record.len(), 10);
        assert_eq!(record["start_date"], "2025-03-01");
        assert_eq!(record["end_date"], "2025-09-30");
        assert_eq!(record["assigned_team"], "Team A");
        assert_eq!(record["budget"], "125000");
        assert_eq!(record["progress"], 0);
        assert!(record.get("startDate").is_none());
        assert!(record.get("assignedTeam").is_none());
    }

    #[test]
    fn unknown_display_fields_are_dropped() {
        let form = json!({
            "name": "Depot",
            "imageUrl": "http://example.test/a.png",
            "progress": 80,
            "start_date": "2025-01-01"
        });
        let record = to_storage_record(form.as_object().unwrap());
        let keys: BTreeSet<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, BTreeSet::from(["name", "progress"]));
        assert_eq!(record["progress"], 0);
    }

    #[test]
    fn missing_mapped_fields_are_omitted() {
        let form = json!({ "name": "Depot", "endDate": "2025-01-01" });
        let record = to_storage_record(form.as_object().unwrap());
        assert_eq!(record.len(), 3);
        assert_eq!(record["end_date"], "2025-01-01");
        assert!(record.get("start_date").is_none());
    }

    #[test]
    fn mapping_does_not_touch_input() {
        let form = filled_form().display_fields();
        let before = form.clone();
        let _ = to_storage_record(&form);
        assert_eq!(form, before);
    }

    #[test]
    fn from_json_defaults_status_and_ignores_unknowns() {
        let form = ProjectForm::from_json(r#"{"name":"Depot","colour":"red"}"#).unwrap();
        assert_eq!(form.name, "Depot");
        assert_eq!(form.status, "planning");
    }

    #[test]
    fn from_json_accepts_numeric_budget() {
        let form = ProjectForm::from_json(r#"{"name":"x","budget":125000}"#).unwrap();
        assert_eq!(form.budget, "125000");
        let form = ProjectForm::from_json(r#"{"budget":1250.5}"#).unwrap();
        assert_eq!(form.budget, "1250.5");
        let form = ProjectForm::from_json(r#"{"budget":null}"#).unwrap();
        assert_eq!(form.budget, "");
        assert!(ProjectForm::from_json(r#"{"budget":[1]}"#).is_err());
    }

    #[test]
    fn validated_accepts_only_form_statuses() {
        for status in ["planning", "in-progress", "on-hold", "completed"] {
            let mut form = filled_form();
            form.status = status.to_string();
            assert!(form.validated().is_ok(), "{status}");
        }
        let mut form = filled_form();
        form.status = "cancelled".to_string();
        assert!(matches!(
            form.validated().unwrap_err(),
            FormError::InvalidStatus { input } if input == "cancelled"
        ));
    }

    #[test]
    fn validated_normalizes_compact_dates() {
        let mut form = filled_form();
        form.start_date = "20250301".to_string();
        let form = form.validated().unwrap();
        assert_eq!(form.start_date, "2025-03-01");
    }

    #[test]
    fn validated_rejects_missing_required_field() {
        let mut form = filled_form();
        form.client = "  ".to_string();
        let err = form.validated().unwrap_err();
        assert!(matches!(err, FormError::MissingField { field: "client" }));
    }

    #[test]
    fn validated_rejects_bad_date() {
        let mut form = filled_form();
        form.end_date = "soon".to_string();
        let err = form.validated().unwrap_err();
        assert!(matches!(err, FormError::InvalidDate { field: "endDate", .. }));
    }

    #[test]
    fn validated_rejects_non_numeric_budget_but_allows_empty() {
        let mut form = filled_form();
        form.budget = "lots".to_string();
        assert!(matches!(
            form.clone().validated().unwrap_err(),
            FormError::InvalidBudget { .. }
        ));
        form.budget = String::new();
        assert!(form.validated().is_ok());
    }
}
