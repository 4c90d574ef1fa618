//! Exportable session snapshot
//!
//! A snapshot is derived on demand from the live session and never feeds
//! back into it. The JSON document has exactly two top-level keys,
//! `requirements` then `final_summary`.

use crate::error::Result;
use crate::session::RequirementsRecord;
use serde::{Deserialize, Serialize};

/// Immutable capture of the requirements record and the final summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSnapshot {
    /// Requirements as they stood at export time
    pub requirements: RequirementsRecord,
    /// Reply frozen as the final summary
    pub final_summary: String,
}

impl SessionSnapshot {
    /// Capture a snapshot from borrowed session state
    pub fn capture(requirements: &RequirementsRecord, final_summary: &str) -> Self {
        Self {
            requirements: requirements.clone(),
            final_summary: final_summary.to_string(),
        }
    }

    /// Serialize as pretty-printed JSON (two-space indentation)
    ///
    /// # Examples
    ///
    /// ```
    /// use reqcollector::session::{RequirementsRecord, SessionSnapshot};
    ///
    /// let snapshot = SessionSnapshot::capture(&RequirementsRecord::empty(), "");
    /// let json = snapshot.to_json().unwrap();
    /// assert!(json.starts_with("{\n  \"requirements\": {"));
    /// ```
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a previously exported document
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the text is not a snapshot document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::RequirementField;

    #[test]
    fn test_empty_snapshot_document() {
        let json = SessionSnapshot::capture(&RequirementsRecord::empty(), "")
            .to_json()
            .unwrap();
        let expected = r#"{
  "requirements": {
    "project_name": null,
    "project_description": null,
    "functional_requirements": [],
    "non_functional_requirements": [],
    "preferred_tech_stack": null,
    "target_platform": null,
    "constraints": [],
    "suggested_tech_stack": null
  },
  "final_summary": ""
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_parse_back_matches_capture() {
        let mut record = RequirementsRecord::empty();
        record.set(RequirementField::ProjectName, "Atlas").unwrap();
        record
            .append(RequirementField::Constraints, "GDPR compliant")
            .unwrap();

        let snapshot = SessionSnapshot::capture(&record, "Looks complete.");
        let parsed = SessionSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(parsed, snapshot);
        assert_eq!(parsed.requirements.scalar(RequirementField::ProjectName), Some("Atlas"));
    }

    #[test]
    fn test_top_level_keys() {
        let json = SessionSnapshot::capture(&RequirementsRecord::empty(), "done")
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&"requirements".to_string()));
        assert!(keys.contains(&"final_summary".to_string()));
    }

    #[test]
    fn test_from_json_rejects_other_documents() {
        assert!(SessionSnapshot::from_json(r#"{"final_summary": "x"}"#).is_err());
        assert!(SessionSnapshot::from_json("not json").is_err());
    }
}
