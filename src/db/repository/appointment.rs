use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{Appointment, NewAppointment};

/// Referential integrity check, done explicitly so the caller gets a
/// precise message instead of a raw SQLite constraint failure.
fn check_references(conn: &Connection, new: &NewAppointment) -> Result<(), DatabaseError> {
    let patient_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM patients WHERE id = ?1)",
        params![new.patient_id],
        |row| row.get(0),
    )?;
    if !patient_exists {
        return Err(DatabaseError::MissingReference {
            entity: "Patient",
            id: new.patient_id,
        });
    }

    let doctor_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM doctors WHERE id = ?1)",
        params![new.doctor_id],
        |row| row.get(0),
    )?;
    if !doctor_exists {
        return Err(DatabaseError::MissingReference {
            entity: "Doctor",
            id: new.doctor_id,
        });
    }

    Ok(())
}

pub fn insert_appointment(
    conn: &Connection,
    new: &NewAppointment,
) -> Result<Appointment, DatabaseError> {
    check_references(conn, new)?;

    conn.execute(
        "INSERT INTO appointments (patient_id, doctor_id, date, description)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            new.patient_id,
            new.doctor_id,
            new.date.to_string(),
            new.description,
        ],
    )?;
    let id = conn.last_insert_rowid();
    Ok(Appointment {
        id,
        patient_id: new.patient_id,
        doctor_id: new.doctor_id,
        date: new.date,
        description: new.description.clone(),
    })
}

pub fn get_appointment(conn: &Connection, id: i64) -> Result<Appointment, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, patient_id, doctor_id, date, description
             FROM appointments WHERE id = ?1",
            params![id],
            appointment_row,
        )
        .optional()?
        .ok_or(DatabaseError::NotFound {
            entity: "Appointment",
            id,
        })?;
    appointment_from_row(row)
}

/// Page of appointments in insertion (id) order.
pub fn list_appointments(
    conn: &Connection,
    skip: u32,
    limit: u32,
) -> Result<Vec<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, doctor_id, date, description
         FROM appointments ORDER BY id LIMIT ?1 OFFSET ?2",
    )?;
    let rows = stmt.query_map(params![limit, skip], appointment_row)?;

    let mut appointments = Vec::new();
    for row in rows {
        appointments.push(appointment_from_row(row?)?);
    }
    Ok(appointments)
}

/// Full scan, used by the statistics snapshot.
pub fn all_appointments(conn: &Connection) -> Result<Vec<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, doctor_id, date, description
         FROM appointments ORDER BY id",
    )?;
    let rows = stmt.query_map([], appointment_row)?;

    let mut appointments = Vec::new();
    for row in rows {
        appointments.push(appointment_from_row(row?)?);
    }
    Ok(appointments)
}

/// Full-field replace. Returns the updated record or `NotFound`.
pub fn update_appointment(
    conn: &Connection,
    id: i64,
    new: &NewAppointment,
) -> Result<Appointment, DatabaseError> {
    check_references(conn, new)?;

    let changed = conn.execute(
        "UPDATE appointments SET patient_id = ?1, doctor_id = ?2, date = ?3, description = ?4
         WHERE id = ?5",
        params![
            new.patient_id,
            new.doctor_id,
            new.date.to_string(),
            new.description,
            id,
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Appointment",
            id,
        });
    }
    Ok(Appointment {
        id,
        patient_id: new.patient_id,
        doctor_id: new.doctor_id,
        date: new.date,
        description: new.description.clone(),
    })
}

pub fn delete_appointment(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let deleted = conn.execute("DELETE FROM appointments WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Appointment",
            id,
        });
    }
    Ok(())
}

// Internal row type: the date column comes back as TEXT and is parsed
// strictly — a row that does not parse is surfaced, not defaulted.
struct AppointmentRow {
    id: i64,
    patient_id: i64,
    doctor_id: i64,
    date: String,
    description: Option<String>,
}

fn appointment_row(row: &rusqlite::Row<'_>) -> Result<AppointmentRow, rusqlite::Error> {
    Ok(AppointmentRow {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        doctor_id: row.get(2)?,
        date: row.get(3)?,
        description: row.get(4)?,
    })
}

fn appointment_from_row(row: AppointmentRow) -> Result<Appointment, DatabaseError> {
    let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").map_err(|_| {
        DatabaseError::InvalidDate {
            entity: "Appointment",
            id: row.id,
            value: row.date.clone(),
        }
    })?;
    Ok(Appointment {
        id: row.id,
        patient_id: row.patient_id,
        doctor_id: row.doctor_id,
        date,
        description: row.description,
    })
}
