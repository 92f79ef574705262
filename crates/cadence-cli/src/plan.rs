//! The JSON plan file the CLI reads a user's data from.
//!
//! The file is an export of the availability and session stores:
//!
//! ```json
//! {
//!   "session_types": [{"id": "guitar", "name": "Guitar", "category": "Music", "priority": 4}],
//!   "availability": [{"day": "Wednesday", "start": "17:00", "end": "19:00"}],
//!   "sessions": [
//!     {"session_type_id": "guitar", "start": "2025-01-08T18:00", "duration_minutes": 45}
//!   ]
//! }
//! ```
//!
//! The CLI only ever reads it.

use std::convert::Infallible;
use std::path::Path;

use anyhow::{Context, Result};
use cadence_core::{
    AvailabilitySource, AvailabilityWindow, ScheduledSession, SessionSource, SessionType,
    SessionTypeId,
};
use serde::{Deserialize, Serialize};

/// Contents of a plan file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanFile {
    pub session_types: Vec<SessionType>,
    pub availability: Vec<AvailabilityWindow>,
    pub sessions: Vec<ScheduledSession>,
}

const MISSING_PLAN_HINT: &str = "pass --plan or set plan_path in the config file.";

impl PlanFile {
    /// Reads and validates a plan file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).with_context(|| {
            format!(
                "failed to read plan file {}\n\nHint: {MISSING_PLAN_HINT}",
                path.display()
            )
        })?;
        let plan: Self = serde_json::from_str(&content)
            .with_context(|| format!("invalid plan file {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            windows = plan.availability.len(),
            sessions = plan.sessions.len(),
            session_types = plan.session_types.len(),
            "loaded plan file"
        );
        Ok(plan)
    }

    /// Display name for a session type, falling back to its ID.
    pub fn type_label(&self, id: &SessionTypeId) -> String {
        self.session_types
            .iter()
            .find(|t| &t.id == id)
            .map_or_else(
                || id.to_string(),
                |t| {
                    if t.category.is_empty() {
                        t.name.clone()
                    } else {
                        format!("{} ({})", t.name, t.category)
                    }
                },
            )
    }
}

impl AvailabilitySource for PlanFile {
    type Error = Infallible;

    fn availability(&self) -> Result<Vec<AvailabilityWindow>, Self::Error> {
        Ok(self.availability.clone())
    }
}

impl SessionSource for PlanFile {
    type Error = Infallible;

    fn sessions(&self) -> Result<Vec<ScheduledSession>, Self::Error> {
        Ok(self.sessions.clone())
    }
}
