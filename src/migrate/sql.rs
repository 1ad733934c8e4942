//! SQL text for the roster tables.
//!
//! Statements target PostgreSQL (`gen_random_uuid()`). Escaping is limited
//! to doubling single quotes inside literals.

use crate::error::Result;
use std::fs;
use std::path::Path;

use super::roster::{Member, OfficeBearer};

/// Schema for the `members` and `office_bearers` tables.
pub const SCHEMA: &str = "\
-- Create members table
CREATE TABLE IF NOT EXISTS members (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    full_name TEXT,
    rotary_id TEXT,
    role TEXT,
    year_joined INTEGER,
    email TEXT,
    phone_number TEXT
);

-- Create office_bearers table
CREATE TABLE IF NOT EXISTS office_bearers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    role TEXT,
    full_name TEXT,
    email TEXT,
    phone_number TEXT
);";

/// Clears both tables so the script can be re-run without duplicates.
pub const TRUNCATE: &str = "\
-- Clear existing data to avoid duplicates on re-run
TRUNCATE TABLE members;
TRUNCATE TABLE office_bearers;";

/// Render a text literal, or `NULL` for a missing value.
pub fn quote_literal(value: Option<&str>) -> String {
    match value {
        Some(text) => format!("'{}'", text.replace('\'', "''")),
        None => "NULL".to_string(),
    }
}

fn integer_literal(value: Option<i64>) -> String {
    value.map_or_else(|| "NULL".to_string(), |n| n.to_string())
}

impl Member {
    /// `INSERT` statement for this member.
    pub fn insert_statement(&self) -> String {
        format!(
            "INSERT INTO members (full_name, rotary_id, role, year_joined, email, phone_number)\n\
             VALUES ({}, {}, {}, {}, {}, {});",
            quote_literal(Some(self.full_name.as_str())),
            quote_literal(self.rotary_id.as_deref()),
            quote_literal(self.role.as_deref()),
            integer_literal(self.year_joined),
            quote_literal(self.email.as_deref()),
            quote_literal(self.phone_number.as_deref()),
        )
    }
}

impl OfficeBearer {
    /// `INSERT` statement for this office bearer.
    pub fn insert_statement(&self) -> String {
        format!(
            "INSERT INTO office_bearers (role, full_name, email, phone_number)\n\
             VALUES ({}, {}, {}, {});",
            quote_literal(Some(self.role.as_str())),
            quote_literal(self.full_name.as_deref()),
            quote_literal(self.email.as_deref()),
            quote_literal(self.phone_number.as_deref()),
        )
    }
}

/// An ordered list of SQL statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationScript {
    statements: Vec<String>,
}

impl MigrationScript {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a statement.
    pub fn push(&mut self, statement: impl Into<String>) {
        self.statements.push(statement.into());
    }

    /// Statements in order.
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Number of statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Check if the script has no statements.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// The full script, one blank line between statements.
    pub fn to_sql(&self) -> String {
        let mut sql = self.statements.join("\n\n");
        sql.push('\n');
        sql
    }

    /// Write the script to a file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_sql())?;
        Ok(())
    }
}
