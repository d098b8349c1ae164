//! Onboarding checklist records.
//!
//! Checklists are read-mostly; steps advance only via explicit
//! complete/skip calls on the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One step of an onboarding checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistStep {
    /// Step identifier.
    pub id: String,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Longer description shown under the step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the step has been completed (or skipped).
    #[serde(default)]
    pub completed: bool,

    /// Whether the customer may mark the step complete themselves.
    #[serde(default)]
    pub allow_manual_complete: bool,

    /// When the step was completed, if it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// An onboarding checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    /// Checklist identifier.
    pub id: String,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Stable handle for looking the checklist up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    /// Steps in display order.
    #[serde(default)]
    pub steps: Vec<ChecklistStep>,

    /// Whether every step is completed.
    #[serde(default)]
    pub completed: bool,

    /// Number of completed steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_steps: Option<u32>,

    /// Total number of steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_steps: Option<u32>,

    /// Completion percentage (0–100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_percentage: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_checklist_with_steps() {
        let checklist: Checklist = serde_json::from_value(json!({
            "id": "chk_1",
            "handle": "getting-started",
            "completedSteps": 1,
            "totalSteps": 3,
            "completionPercentage": 33.3,
            "steps": [
                {"id": "step_1", "completed": true},
                {"id": "step_2", "completed": false, "allowManualComplete": true},
                {"id": "step_3", "completed": false}
            ]
        }))
        .unwrap();
        assert_eq!(checklist.steps.len(), 3);
        assert!(checklist.steps[0].completed);
        assert!(checklist.steps[1].allow_manual_complete);
        assert_eq!(checklist.completed_steps, Some(1));
    }
}
