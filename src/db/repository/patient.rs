use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{NewPatient, Patient};

pub fn insert_patient(conn: &Connection, new: &NewPatient) -> Result<Patient, DatabaseError> {
    conn.execute(
        "INSERT INTO patients (name, age, address) VALUES (?1, ?2, ?3)",
        params![new.name, new.age, new.address],
    )?;
    let id = conn.last_insert_rowid();
    Ok(Patient {
        id,
        name: new.name.clone(),
        age: new.age,
        address: new.address.clone(),
    })
}

pub fn get_patient(conn: &Connection, id: i64) -> Result<Patient, DatabaseError> {
    conn.query_row(
        "SELECT id, name, age, address FROM patients WHERE id = ?1",
        params![id],
        patient_from_row,
    )
    .optional()?
    .ok_or(DatabaseError::NotFound {
        entity: "Patient",
        id,
    })
}

/// Page of patients in insertion (id) order.
pub fn list_patients(
    conn: &Connection,
    skip: u32,
    limit: u32,
) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, age, address FROM patients ORDER BY id LIMIT ?1 OFFSET ?2",
    )?;
    let rows = stmt.query_map(params![limit, skip], patient_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Full scan, used by the statistics snapshot.
pub fn all_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id, name, age, address FROM patients ORDER BY id")?;
    let rows = stmt.query_map([], patient_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Full-field replace. Returns the updated record or `NotFound`.
pub fn update_patient(
    conn: &Connection,
    id: i64,
    new: &NewPatient,
) -> Result<Patient, DatabaseError> {
    let changed = conn.execute(
        "UPDATE patients SET name = ?1, age = ?2, address = ?3 WHERE id = ?4",
        params![new.name, new.age, new.address, id],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Patient",
            id,
        });
    }
    Ok(Patient {
        id,
        name: new.name.clone(),
        age: new.age,
        address: new.address.clone(),
    })
}

/// Delete is restricted: a patient referenced by appointments stays put.
pub fn delete_patient(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let references: i64 = conn.query_row(
        "SELECT COUNT(*) FROM appointments WHERE patient_id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    if references > 0 {
        return Err(DatabaseError::ConstraintViolation(format!(
            "Patient {id} is referenced by {references} appointment(s)"
        )));
    }

    let deleted = conn.execute("DELETE FROM patients WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Patient",
            id,
        });
    }
    Ok(())
}

fn patient_from_row(row: &rusqlite::Row<'_>) -> Result<Patient, rusqlite::Error> {
    Ok(Patient {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        address: row.get(3)?,
    })
}
