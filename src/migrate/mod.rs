//! Roster migration: worksheet rows to a SQL script.
//!
//! Works only on [`Row`] values, so any row source can feed it. The
//! workbook helpers read the first sheet of each file.
//!
//! # Example
//!
//! ```no_run
//! use rostersql::migrate::{build_script_from_workbooks, MigrationOptions};
//!
//! let script = build_script_from_workbooks(
//!     "membership.xlsx",
//!     "office_bearers.xlsx",
//!     &MigrationOptions::default(),
//! )?;
//! script.write_to("migration.sql")?;
//! # Ok::<(), rostersql::Error>(())
//! ```

mod clean;
mod options;
mod roster;
mod sql;

pub use clean::{clean_phone, clean_rotary_id, parse_year};
pub use options::MigrationOptions;
pub use roster::{members_from_rows, office_bearers_from_rows, Member, OfficeBearer};
pub use sql::{quote_literal, MigrationScript, SCHEMA, TRUNCATE};

use crate::error::Result;
use crate::model::Row;
use crate::xlsx::{read, SheetSelector};
use std::path::Path;

/// Build a migration script from membership and office-bearer rows.
pub fn build_script(
    members: &[Row],
    bearers: &[Row],
    options: &MigrationOptions,
) -> MigrationScript {
    let mut script = MigrationScript::new();

    if options.include_schema {
        script.push(SCHEMA);
    }
    if options.truncate {
        script.push(TRUNCATE);
    }

    let members = members_from_rows(members);
    let bearers = office_bearers_from_rows(bearers);

    for member in &members {
        script.push(member.insert_statement());
    }
    for bearer in &bearers {
        script.push(bearer.insert_statement());
    }

    tracing::info!(
        members = members.len(),
        office_bearers = bearers.len(),
        statements = script.len(),
        "built migration script"
    );
    script
}

/// Read the first sheet of both workbooks and build a migration script.
pub fn build_script_from_workbooks(
    members_path: impl AsRef<Path>,
    bearers_path: impl AsRef<Path>,
    options: &MigrationOptions,
) -> Result<MigrationScript> {
    let members = read(members_path, &SheetSelector::First)?;
    let bearers = read(bearers_path, &SheetSelector::First)?;
    Ok(build_script(&members, &bearers, options))
}
