//! Aggregate statistics over the stored records.
//!
//! A `Snapshot` is a point-in-time, read-only copy of all three entity
//! sets, loaded per request and never cached. The computations below are
//! pure functions over that snapshot; writes that land during a
//! computation are not reflected in its result.

use std::collections::BTreeMap;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::repository::{all_appointments, all_doctors, all_patients};
use crate::db::DatabaseError;
use crate::models::{Appointment, Doctor, Patient};

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Statistics aggregation failed: {0}")]
    Snapshot(#[from] DatabaseError),
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Point-in-time copy of the full dataset.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub patients: Vec<Patient>,
    pub doctors: Vec<Doctor>,
    pub appointments: Vec<Appointment>,
}

impl Snapshot {
    /// Bulk-read all three entity sets under one read transaction, so a
    /// writer landing between the scans cannot skew the snapshot. Fails
    /// as a whole on the first invalid row (no partial snapshot).
    pub fn load(conn: &Connection) -> Result<Self, StatsError> {
        let tx = conn.unchecked_transaction().map_err(DatabaseError::from)?;
        let snapshot = Self {
            patients: all_patients(&tx)?,
            doctors: all_doctors(&tx)?,
            appointments: all_appointments(&tx)?,
        };
        tx.commit().map_err(DatabaseError::from)?;
        Ok(snapshot)
    }
}

/// Descriptive statistics of a numeric column.
///
/// `std` is the sample standard deviation (n−1 denominator, absent for
/// fewer than two values); quartiles use linear interpolation on the
/// sorted values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub count: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
}

/// Summary view over the full dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicStats {
    pub total_patients: u64,
    pub total_doctors: u64,
    pub total_appointments: u64,
    pub patient_age: NumericSummary,
    pub specializations: BTreeMap<String, u64>,
}

// ---------------------------------------------------------------------------
// Computations
// ---------------------------------------------------------------------------

/// Counts per entity type, descriptive statistics of patient age, and the
/// doctor specialization frequency table. Empty entity sets yield zero
/// counts and empty summaries, never an error.
pub fn basic_stats(snapshot: &Snapshot) -> BasicStats {
    let ages: Vec<f64> = snapshot.patients.iter().map(|p| p.age as f64).collect();

    let mut specializations: BTreeMap<String, u64> = BTreeMap::new();
    for doctor in &snapshot.doctors {
        *specializations
            .entry(doctor.specialization.clone())
            .or_default() += 1;
    }

    BasicStats {
        total_patients: snapshot.patients.len() as u64,
        total_doctors: snapshot.doctors.len() as u64,
        total_appointments: snapshot.appointments.len() as u64,
        patient_age: describe(&ages),
        specializations,
    }
}

/// Appointment counts grouped by calendar month (1–12) of their date,
/// in ascending month order. Months with no appointments are omitted.
pub fn appointments_by_month(snapshot: &Snapshot) -> BTreeMap<u32, u64> {
    use chrono::Datelike;

    let mut months: BTreeMap<u32, u64> = BTreeMap::new();
    for appointment in &snapshot.appointments {
        *months.entry(appointment.date.month()).or_default() += 1;
    }
    months
}

/// Descriptive statistics of a numeric sample.
fn describe(values: &[f64]) -> NumericSummary {
    if values.is_empty() {
        return NumericSummary::default();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;

    let std = if n > 1 {
        let variance =
            sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
        Some(variance.sqrt())
    } else {
        None
    };

    NumericSummary {
        count: n as u64,
        min: Some(sorted[0]),
        max: Some(sorted[n - 1]),
        mean: Some(mean),
        std,
        q1: percentile(&sorted, 0.25),
        median: percentile(&sorted, 0.5),
        q3: percentile(&sorted, 0.75),
    }
}

/// Percentile of a sorted sample with linear interpolation between ranks.
fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let weight = rank - lo as f64;
    Some(sorted[lo] * (1.0 - weight) + sorted[hi] * weight)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn patient(id: i64, age: i64) -> Patient {
        Patient {
            id,
            name: format!("Patient {id}"),
            age,
            address: None,
        }
    }

    fn doctor(id: i64, specialization: &str) -> Doctor {
        Doctor {
            id,
            name: format!("Dr. {id}"),
            specialization: specialization.into(),
        }
    }

    fn appointment(id: i64, date: &str) -> Appointment {
        Appointment {
            id,
            patient_id: 1,
            doctor_id: 1,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            description: None,
        }
    }

    #[test]
    fn empty_snapshot_yields_zeroes() {
        let stats = basic_stats(&Snapshot::default());
        assert_eq!(stats.total_patients, 0);
        assert_eq!(stats.total_doctors, 0);
        assert_eq!(stats.total_appointments, 0);
        assert_eq!(stats.patient_age, NumericSummary::default());
        assert!(stats.specializations.is_empty());
    }

    #[test]
    fn counts_match_snapshot_sizes() {
        let snapshot = Snapshot {
            patients: vec![patient(1, 30), patient(2, 40)],
            doctors: vec![doctor(1, "Cardiology")],
            appointments: vec![appointment(1, "2024-03-01")],
        };
        let stats = basic_stats(&snapshot);
        assert_eq!(stats.total_patients, 2);
        assert_eq!(stats.total_doctors, 1);
        assert_eq!(stats.total_appointments, 1);
    }

    #[test]
    fn age_summary_on_known_sample() {
        // ages 30, 34, 40, 52: mean 39, q1 33, median 37, q3 43
        let snapshot = Snapshot {
            patients: vec![
                patient(1, 30),
                patient(2, 34),
                patient(3, 40),
                patient(4, 52),
            ],
            ..Default::default()
        };
        let age = basic_stats(&snapshot).patient_age;

        assert_eq!(age.count, 4);
        assert_eq!(age.min, Some(30.0));
        assert_eq!(age.max, Some(52.0));
        assert_eq!(age.mean, Some(39.0));
        assert_eq!(age.q1, Some(33.0));
        assert_eq!(age.median, Some(37.0));
        assert_eq!(age.q3, Some(43.0));

        // sample variance of [30, 34, 40, 52] is 276/3 = 92
        let expected_std = 92.0_f64.sqrt();
        assert!((age.std.unwrap() - expected_std).abs() < 1e-9);
    }

    #[test]
    fn single_patient_has_no_std() {
        let snapshot = Snapshot {
            patients: vec![patient(1, 34)],
            ..Default::default()
        };
        let age = basic_stats(&snapshot).patient_age;
        assert_eq!(age.count, 1);
        assert_eq!(age.mean, Some(34.0));
        assert_eq!(age.median, Some(34.0));
        assert!(age.std.is_none());
    }

    #[test]
    fn specialization_frequencies() {
        let snapshot = Snapshot {
            doctors: vec![
                doctor(1, "Cardiology"),
                doctor(2, "Neurology"),
                doctor(3, "Cardiology"),
            ],
            ..Default::default()
        };
        let stats = basic_stats(&snapshot);
        assert_eq!(stats.specializations["Cardiology"], 2);
        assert_eq!(stats.specializations["Neurology"], 1);
    }

    #[test]
    fn months_grouped_and_sorted() {
        let snapshot = Snapshot {
            appointments: vec![
                appointment(1, "2024-03-01"),
                appointment(2, "2024-03-15"),
                appointment(3, "2024-01-20"),
                appointment(4, "2023-12-05"),
            ],
            ..Default::default()
        };
        let months = appointments_by_month(&snapshot);

        assert_eq!(months.len(), 3);
        assert_eq!(months[&1], 1);
        assert_eq!(months[&3], 2);
        assert_eq!(months[&12], 1);
        // BTreeMap iterates in ascending month order
        let keys: Vec<u32> = months.keys().copied().collect();
        assert_eq!(keys, vec![1, 3, 12]);
    }

    #[test]
    fn months_empty_without_appointments() {
        assert!(appointments_by_month(&Snapshot::default()).is_empty());
    }

    #[test]
    fn snapshot_load_reads_all_rows() {
        use crate::db::repository::{insert_appointment, insert_doctor, insert_patient};
        use crate::db::sqlite::open_memory_database;
        use crate::models::{NewAppointment, NewDoctor, NewPatient};

        let conn = open_memory_database().unwrap();
        let p = insert_patient(
            &conn,
            &NewPatient {
                name: "Alice".into(),
                age: 34,
                address: None,
            },
        )
        .unwrap();
        let d = insert_doctor(
            &conn,
            &NewDoctor {
                name: "Dr. Chen".into(),
                specialization: "Cardiology".into(),
            },
        )
        .unwrap();
        insert_appointment(
            &conn,
            &NewAppointment {
                patient_id: p.id,
                doctor_id: d.id,
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                description: None,
            },
        )
        .unwrap();

        let snapshot = Snapshot::load(&conn).unwrap();
        assert_eq!(snapshot.patients.len(), 1);
        assert_eq!(snapshot.doctors.len(), 1);
        assert_eq!(snapshot.appointments.len(), 1);
    }

    #[test]
    fn snapshot_load_fails_on_malformed_date() {
        use crate::db::repository::{insert_doctor, insert_patient};
        use crate::db::sqlite::open_memory_database;
        use crate::models::{NewDoctor, NewPatient};

        let conn = open_memory_database().unwrap();
        let p = insert_patient(
            &conn,
            &NewPatient {
                name: "Alice".into(),
                age: 34,
                address: None,
            },
        )
        .unwrap();
        let d = insert_doctor(
            &conn,
            &NewDoctor {
                name: "Dr. Chen".into(),
                specialization: "Cardiology".into(),
            },
        )
        .unwrap();
        conn.execute(
            "INSERT INTO appointments (patient_id, doctor_id, date) VALUES (?1, ?2, 'garbage')",
            rusqlite::params![p.id, d.id],
        )
        .unwrap();

        let err = Snapshot::load(&conn).unwrap_err();
        assert!(err.to_string().contains("garbage"));
    }

    #[test]
    fn percentile_interpolates() {
        let sorted = vec![10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile(&sorted, 0.0), Some(10.0));
        assert_eq!(percentile(&sorted, 1.0), Some(40.0));
        assert_eq!(percentile(&sorted, 0.5), Some(25.0));
        assert!(percentile(&[], 0.5).is_none());
    }
}
