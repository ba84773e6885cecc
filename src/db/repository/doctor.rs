use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{Doctor, NewDoctor};

pub fn insert_doctor(conn: &Connection, new: &NewDoctor) -> Result<Doctor, DatabaseError> {
    conn.execute(
        "INSERT INTO doctors (name, specialization) VALUES (?1, ?2)",
        params![new.name, new.specialization],
    )?;
    let id = conn.last_insert_rowid();
    Ok(Doctor {
        id,
        name: new.name.clone(),
        specialization: new.specialization.clone(),
    })
}

pub fn get_doctor(conn: &Connection, id: i64) -> Result<Doctor, DatabaseError> {
    conn.query_row(
        "SELECT id, name, specialization FROM doctors WHERE id = ?1",
        params![id],
        doctor_from_row,
    )
    .optional()?
    .ok_or(DatabaseError::NotFound {
        entity: "Doctor",
        id,
    })
}

/// Page of doctors in insertion (id) order.
pub fn list_doctors(conn: &Connection, skip: u32, limit: u32) -> Result<Vec<Doctor>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, specialization FROM doctors ORDER BY id LIMIT ?1 OFFSET ?2",
    )?;
    let rows = stmt.query_map(params![limit, skip], doctor_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Full scan, used by the statistics snapshot.
pub fn all_doctors(conn: &Connection) -> Result<Vec<Doctor>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id, name, specialization FROM doctors ORDER BY id")?;
    let rows = stmt.query_map([], doctor_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Full-field replace. Returns the updated record or `NotFound`.
pub fn update_doctor(conn: &Connection, id: i64, new: &NewDoctor) -> Result<Doctor, DatabaseError> {
    let changed = conn.execute(
        "UPDATE doctors SET name = ?1, specialization = ?2 WHERE id = ?3",
        params![new.name, new.specialization, id],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Doctor",
            id,
        });
    }
    Ok(Doctor {
        id,
        name: new.name.clone(),
        specialization: new.specialization.clone(),
    })
}

/// Delete is restricted: a doctor referenced by appointments stays put.
pub fn delete_doctor(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let references: i64 = conn.query_row(
        "SELECT COUNT(*) FROM appointments WHERE doctor_id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    if references > 0 {
        return Err(DatabaseError::ConstraintViolation(format!(
            "Doctor {id} is referenced by {references} appointment(s)"
        )));
    }

    let deleted = conn.execute("DELETE FROM doctors WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Doctor",
            id,
        });
    }
    Ok(())
}

fn doctor_from_row(row: &rusqlite::Row<'_>) -> Result<Doctor, rusqlite::Error> {
    Ok(Doctor {
        id: row.get(0)?,
        name: row.get(1)?,
        specialization: row.get(2)?,
    })
}
