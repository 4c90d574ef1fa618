//! Fixed-shape requirements record
//!
//! The record has exactly eight keys, declared in the order they are
//! rendered and exported. Scalar fields only ever go from absent to
//! populated and list fields only ever grow, one item at a time.

use crate::error::{Result, ReqCollectorError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a field holds a single value or an ordered list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Optional single string
    Scalar,
    /// Append-only sequence of strings
    List,
}

/// Names of the requirements record fields, in fixed key order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequirementField {
    ProjectName,
    ProjectDescription,
    FunctionalRequirements,
    NonFunctionalRequirements,
    PreferredTechStack,
    TargetPlatform,
    Constraints,
    SuggestedTechStack,
}

impl RequirementField {
    /// Every field, in the record's fixed key order
    pub const ALL: [RequirementField; 8] = [
        Self::ProjectName,
        Self::ProjectDescription,
        Self::FunctionalRequirements,
        Self::NonFunctionalRequirements,
        Self::PreferredTechStack,
        Self::TargetPlatform,
        Self::Constraints,
        Self::SuggestedTechStack,
    ];

    /// Key name used in rendering and in the exported JSON
    pub fn key(&self) -> &'static str {
        match self {
            Self::ProjectName => "project_name",
            Self::ProjectDescription => "project_description",
            Self::FunctionalRequirements => "functional_requirements",
            Self::NonFunctionalRequirements => "non_functional_requirements",
            Self::PreferredTechStack => "preferred_tech_stack",
            Self::TargetPlatform => "target_platform",
            Self::Constraints => "constraints",
            Self::SuggestedTechStack => "suggested_tech_stack",
        }
    }

    /// Scalar or list
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::FunctionalRequirements | Self::NonFunctionalRequirements | Self::Constraints => {
                FieldKind::List
            }
            _ => FieldKind::Scalar,
        }
    }
}

impl fmt::Display for RequirementField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RequirementField {
    type Err = ReqCollectorError;

    /// Parse a key name; dashes are accepted in place of underscores
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|field| field.key() == normalized)
            .ok_or_else(|| ReqCollectorError::UnknownField(s.trim().to_string()))
    }
}

/// The structured artifact assembled during a session
///
/// Field declaration order is the export order; do not reorder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequirementsRecord {
    project_name: Option<String>,
    project_description: Option<String>,
    functional_requirements: Vec<String>,
    non_functional_requirements: Vec<String>,
    preferred_tech_stack: Option<String>,
    target_platform: Option<String>,
    constraints: Vec<String>,
    suggested_tech_stack: Option<String>,
}

impl RequirementsRecord {
    /// Create a record with every scalar absent and every list empty
    ///
    /// Each call returns an independent value.
    ///
    /// # Examples
    ///
    /// ```
    /// use reqcollector::session::RequirementsRecord;
    ///
    /// let record = RequirementsRecord::empty();
    /// assert!(record.is_empty());
    /// ```
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if no field has been populated
    pub fn is_empty(&self) -> bool {
        RequirementField::ALL
            .iter()
            .all(|field| match field.kind() {
                FieldKind::Scalar => self.scalar(*field).is_none(),
                FieldKind::List => self.list(*field).is_empty(),
            })
    }

    /// Value of a scalar field, `None` for list fields or absent values
    pub fn scalar(&self, field: RequirementField) -> Option<&str> {
        let slot = match field {
            RequirementField::ProjectName => &self.project_name,
            RequirementField::ProjectDescription => &self.project_description,
            RequirementField::PreferredTechStack => &self.preferred_tech_stack,
            RequirementField::TargetPlatform => &self.target_platform,
            RequirementField::SuggestedTechStack => &self.suggested_tech_stack,
            _ => return None,
        };
        slot.as_deref()
    }

    /// Items of a list field, empty for scalar fields
    pub fn list(&self, field: RequirementField) -> &[String] {
        match field {
            RequirementField::FunctionalRequirements => &self.functional_requirements,
            RequirementField::NonFunctionalRequirements => &self.non_functional_requirements,
            RequirementField::Constraints => &self.constraints,
            _ => &[],
        }
    }

    fn scalar_slot_mut(&mut self, field: RequirementField) -> Option<&mut Option<String>> {
        match field {
            RequirementField::ProjectName => Some(&mut self.project_name),
            RequirementField::ProjectDescription => Some(&mut self.project_description),
            RequirementField::PreferredTechStack => Some(&mut self.preferred_tech_stack),
            RequirementField::TargetPlatform => Some(&mut self.target_platform),
            RequirementField::SuggestedTechStack => Some(&mut self.suggested_tech_stack),
            _ => None,
        }
    }

    fn list_slot_mut(&mut self, field: RequirementField) -> Option<&mut Vec<String>> {
        match field {
            RequirementField::FunctionalRequirements => Some(&mut self.functional_requirements),
            RequirementField::NonFunctionalRequirements => {
                Some(&mut self.non_functional_requirements)
            }
            RequirementField::Constraints => Some(&mut self.constraints),
            _ => None,
        }
    }

    /// Populate an absent scalar field
    ///
    /// # Errors
    ///
    /// Returns a record error if the field is a list, is already populated,
    /// or the value is blank
    ///
    /// # Examples
    ///
    /// ```
    /// use reqcollector::session::{RequirementField, RequirementsRecord};
    ///
    /// let mut record = RequirementsRecord::empty();
    /// record.set(RequirementField::ProjectName, "Atlas").unwrap();
    /// assert!(record.set(RequirementField::ProjectName, "Other").is_err());
    /// ```
    pub fn set(&mut self, field: RequirementField, value: impl Into<String>) -> Result<()> {
        let value = non_blank(field, value.into())?;
        let slot = self
            .scalar_slot_mut(field)
            .ok_or_else(|| rejected(field, "list field; append items instead"))?;
        if slot.is_some() {
            return Err(rejected(field, "already set").into());
        }
        *slot = Some(value);
        Ok(())
    }

    /// Append one item to a list field
    ///
    /// # Errors
    ///
    /// Returns a record error if the field is a scalar or the value is blank
    pub fn append(&mut self, field: RequirementField, value: impl Into<String>) -> Result<()> {
        let value = non_blank(field, value.into())?;
        let slot = self
            .list_slot_mut(field)
            .ok_or_else(|| rejected(field, "single-value field; set it instead"))?;
        slot.push(value);
        Ok(())
    }

    /// Textual form of one field's current value
    ///
    /// Absent scalars render as `None`; lists render as a bracketed,
    /// quoted, comma-separated sequence.
    pub fn render_value(&self, field: RequirementField) -> String {
        match field.kind() {
            FieldKind::Scalar => self.scalar(field).unwrap_or("None").to_string(),
            FieldKind::List => format!("{:?}", self.list(field)),
        }
    }

    /// Flat `key: value` listing, one line per field in fixed key order
    ///
    /// # Examples
    ///
    /// ```
    /// use reqcollector::session::RequirementsRecord;
    ///
    /// let listing = RequirementsRecord::empty().render_listing();
    /// assert!(listing.starts_with("project_name: None\n"));
    /// assert!(listing.contains("functional_requirements: []"));
    /// ```
    pub fn render_listing(&self) -> String {
        RequirementField::ALL
            .iter()
            .map(|field| format!("{}: {}", field.key(), self.render_value(*field)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn rejected(field: RequirementField, reason: &str) -> ReqCollectorError {
    ReqCollectorError::Record {
        field: field.key().to_string(),
        reason: reason.to_string(),
    }
}

fn non_blank(field: RequirementField, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(rejected(field, "value cannot be empty").into());
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_listing() {
        let listing = RequirementsRecord::empty().render_listing();
        let expected = "\
project_name: None
project_description: None
functional_requirements: []
non_functional_requirements: []
preferred_tech_stack: None
target_platform: None
constraints: []
suggested_tech_stack: None";
        assert_eq!(listing, expected);
    }

    #[test]
    fn test_listing_renders_populated_values() {
        let mut record = RequirementsRecord::empty();
        record.set(RequirementField::ProjectName, "Atlas").unwrap();
        record
            .append(RequirementField::FunctionalRequirements, "Login")
            .unwrap();
        record
            .append(RequirementField::FunctionalRequirements, "Search")
            .unwrap();

        let listing = record.render_listing();
        assert!(listing.contains("project_name: Atlas\n"));
        assert!(listing.contains(r#"functional_requirements: ["Login", "Search"]"#));
    }

    #[test]
    fn test_empty_factory_returns_independent_values() {
        let mut first = RequirementsRecord::empty();
        let second = RequirementsRecord::empty();
        first
            .append(RequirementField::Constraints, "Budget under 10k")
            .unwrap();
        assert!(second.is_empty());
        assert!(!first.is_empty());
    }

    #[test]
    fn test_set_rejects_overwrite() {
        let mut record = RequirementsRecord::empty();
        record.set(RequirementField::TargetPlatform, "web").unwrap();
        let err = record
            .set(RequirementField::TargetPlatform, "mobile")
            .unwrap_err();
        assert!(err.to_string().contains("already set"));
        assert_eq!(record.scalar(RequirementField::TargetPlatform), Some("web"));
    }

    #[test]
    fn test_set_rejects_list_field() {
        let mut record = RequirementsRecord::empty();
        assert!(record.set(RequirementField::Constraints, "x").is_err());
        assert!(record.is_empty());
    }

    #[test]
    fn test_append_rejects_scalar_field() {
        let mut record = RequirementsRecord::empty();
        assert!(record.append(RequirementField::ProjectName, "x").is_err());
    }

    #[test]
    fn test_blank_values_rejected() {
        let mut record = RequirementsRecord::empty();
        assert!(record.set(RequirementField::ProjectName, "   ").is_err());
        assert!(record
            .append(RequirementField::FunctionalRequirements, "")
            .is_err());
        assert!(record.is_empty());
    }

    #[test]
    fn test_values_are_trimmed() {
        let mut record = RequirementsRecord::empty();
        record.set(RequirementField::ProjectName, "  Atlas ").unwrap();
        assert_eq!(record.scalar(RequirementField::ProjectName), Some("Atlas"));
    }

    #[test]
    fn test_field_parsing() {
        assert_eq!(
            "project_name".parse::<RequirementField>().unwrap(),
            RequirementField::ProjectName
        );
        assert_eq!(
            "Non-Functional-Requirements".parse::<RequirementField>().unwrap(),
            RequirementField::NonFunctionalRequirements
        );
        let err = "budget".parse::<RequirementField>().unwrap_err();
        assert!(matches!(err, ReqCollectorError::UnknownField(ref f) if f == "budget"));
    }

    #[test]
    fn test_field_kinds() {
        let lists: Vec<_> = RequirementField::ALL
            .iter()
            .filter(|f| f.kind() == FieldKind::List)
            .map(|f| f.key())
            .collect();
        assert_eq!(
            lists,
            vec![
                "functional_requirements",
                "non_functional_requirements",
                "constraints"
            ]
        );
    }

    #[test]
    fn test_serialized_key_order_matches_field_order() {
        let json = serde_json::to_string(&RequirementsRecord::empty()).unwrap();
        let mut last = 0;
        for field in RequirementField::ALL {
            let pos = json
                .find(&format!("\"{}\"", field.key()))
                .unwrap_or_else(|| panic!("missing key {}", field.key()));
            assert!(pos >= last, "{} out of order", field.key());
            last = pos;
        }
        assert!(json.contains(r#""project_name":null"#));
        assert!(json.contains(r#""constraints":[]"#));
    }

    #[test]
    fn test_deserialize_rejects_unknown_keys() {
        let result = serde_json::from_str::<RequirementsRecord>(
            r#"{"project_name":null,"project_description":null,"functional_requirements":[],
               "non_functional_requirements":[],"preferred_tech_stack":null,"target_platform":null,
               "constraints":[],"suggested_tech_stack":null,"budget":"1k"}"#,
        );
        assert!(result.is_err());
    }
}
