use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub address: Option<String>,
}

/// Create/update payload — full-field replace, never a partial patch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub age: i64,
    #[serde(default)]
    pub address: Option<String>,
}

impl NewPatient {
    /// Field-level checks applied before any persistence attempt.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Patient name must not be empty".into());
        }
        if self.age < 0 {
            return Err(format!("Patient age must be non-negative, got {}", self.age));
        }
        Ok(())
    }
}
