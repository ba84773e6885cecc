use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialization: String,
}

/// Create/update payload — full-field replace, never a partial patch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDoctor {
    pub name: String,
    pub specialization: String,
}

impl NewDoctor {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Doctor name must not be empty".into());
        }
        if self.specialization.trim().is_empty() {
            return Err("Doctor specialization must not be empty".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_doctor_passes() {
        let d = NewDoctor {
            name: "Dr. Chen".into(),
            specialization: "Cardiology".into(),
        };
        assert!(d.validate().is_ok());
    }

    #[test]
    fn blank_specialization_rejected() {
        let d = NewDoctor {
            name: "Dr. Chen".into(),
            specialization: "".into(),
        };
        assert!(d.validate().unwrap_err().contains("specialization"));
    }
}
