use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub description: Option<String>,
}

/// Create/update payload. The patient and doctor references are checked
/// against the store at insert/update time, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewAppointment {
    pub fn validate(&self) -> Result<(), String> {
        if self.patient_id <= 0 {
            return Err(format!("Invalid patient_id {}", self.patient_id));
        }
        if self.doctor_id <= 0 {
            return Err(format!("Invalid doctor_id {}", self.doctor_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_round_trips_as_iso8601() {
        let a: NewAppointment = serde_json::from_str(
            r#"{"patient_id":1,"doctor_id":2,"date":"2024-03-01"}"#,
        )
        .unwrap();
        assert_eq!(a.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(a.description.is_none());

        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["date"], "2024-03-01");
    }

    #[test]
    fn malformed_date_rejected_by_serde() {
        let result: Result<NewAppointment, _> = serde_json::from_str(
            r#"{"patient_id":1,"doctor_id":2,"date":"03/01/2024"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn nonpositive_references_rejected() {
        let a = NewAppointment {
            patient_id: 0,
            doctor_id: 2,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            description: None,
        };
        assert!(a.validate().is_err());
    }
}
