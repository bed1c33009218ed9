use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, types::Type, Connection, Row};
use serde::Serialize;
use crate::{
    eligibility::Regulation,
    error::Result,
    storage::models::AssessmentRecord,
};

const SELECT_COLUMNS: &str = "SELECT id, flight_number, flight_date, departure_country, arrival_country,
        airline_country, distance_km, disruption_type, is_eligible, amount, regulation, reason, assessed_at
     FROM assessments";

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn in_memory() -> Result<Self> {
        let db = Self {
            conn: Connection::open_in_memory()?,
        };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS assessments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                flight_number TEXT,
                flight_date TEXT,
                departure_country TEXT NOT NULL,
                arrival_country TEXT NOT NULL,
                airline_country TEXT NOT NULL,
                distance_km REAL NOT NULL,
                disruption_type TEXT NOT NULL,
                is_eligible INTEGER NOT NULL,
                amount INTEGER NOT NULL,
                regulation TEXT NOT NULL,
                reason TEXT NOT NULL,
                assessed_at TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_assessed_at ON assessments(assessed_at)",
            [],
        )?;

        Ok(())
    }

    /// Store a decision and return its row id
    pub fn save_assessment(&self, record: &AssessmentRecord) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO assessments
             (flight_number, flight_date, departure_country, arrival_country, airline_country,
              distance_km, disruption_type, is_eligible, amount, regulation, reason, assessed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                record.flight_number,
                record.flight_date.map(|d| d.to_string()),
                record.departure_country,
                record.arrival_country,
                record.airline_country,
                record.distance_km,
                record.disruption_type,
                record.is_eligible,
                record.amount,
                record.regulation.to_string(),
                record.reason,
                record.assessed_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent decisions first
    pub fn get_history(&self, limit: Option<usize>) -> Result<Vec<AssessmentRecord>> {
        let query = match limit {
            Some(lim) => format!("{} ORDER BY assessed_at DESC, id DESC LIMIT {}", SELECT_COLUMNS, lim),
            None => format!("{} ORDER BY assessed_at DESC, id DESC", SELECT_COLUMNS),
        };

        let mut stmt = self.conn.prepare(&query)?;
        let records = stmt
            .query_map([], read_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    pub fn get_assessment(&self, id: i64) -> Result<Option<AssessmentRecord>> {
        let mut stmt = self.conn.prepare(&format!("{} WHERE id = ?1", SELECT_COLUMNS))?;
        let mut records = stmt.query_map([id], read_record)?;
        Ok(records.next().transpose()?)
    }

    pub fn get_stats(&self) -> Result<AssessmentStats> {
        let total_assessments: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM assessments",
            [],
            |row| row.get(0),
        )?;

        let eligible: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM assessments WHERE is_eligible = 1",
            [],
            |row| row.get(0),
        )?;

        let total_eur = self.total_for(Regulation::Eu261)?;
        let total_gbp = self.total_for(Regulation::Uk261)?;

        Ok(AssessmentStats {
            total_assessments: total_assessments as usize,
            eligible: eligible as usize,
            ineligible: (total_assessments - eligible) as usize,
            total_eur,
            total_gbp,
        })
    }

    fn total_for(&self, regulation: Regulation) -> Result<u64> {
        let total: Option<i64> = self.conn.query_row(
            "SELECT SUM(amount) FROM assessments WHERE is_eligible = 1 AND regulation = ?1",
            [regulation.to_string()],
            |row| row.get(0),
        )?;
        Ok(total.unwrap_or(0) as u64)
    }
}

fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, message.into())
}

fn read_record(row: &Row<'_>) -> rusqlite::Result<AssessmentRecord> {
    let flight_date = row
        .get::<_, Option<String>>(2)?
        .map(|s| s.parse::<NaiveDate>().map_err(|e| conversion_error(2, e.to_string())))
        .transpose()?;

    let regulation = row
        .get::<_, String>(10)?
        .parse::<Regulation>()
        .map_err(|e| conversion_error(10, e))?;

    let assessed_at = row
        .get::<_, String>(12)?
        .parse::<DateTime<Utc>>()
        .map_err(|e| conversion_error(12, e.to_string()))?;

    Ok(AssessmentRecord {
        id: row.get(0)?,
        flight_number: row.get(1)?,
        flight_date,
        departure_country: row.get(3)?,
        arrival_country: row.get(4)?,
        airline_country: row.get(5)?,
        distance_km: row.get(6)?,
        disruption_type: row.get(7)?,
        is_eligible: row.get(8)?,
        amount: row.get(9)?,
        regulation,
        reason: row.get(11)?,
        assessed_at,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentStats {
    pub total_assessments: usize,
    pub eligible: usize,
    pub ineligible: usize,
    pub total_eur: u64,
    pub total_gbp: u64,
}
