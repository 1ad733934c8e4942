//! Roster records extracted from worksheet rows.

use crate::model::Row;
use serde::{Deserialize, Serialize};

use super::clean::{clean_phone, clean_rotary_id, parse_year};

/// A club member.
///
/// Columns: A full name, B rotary ID, C role, D year joined, E email,
/// F phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Column A, always present
    pub full_name: String,
    /// Column B, numeric forms reduced to whole digits
    pub rotary_id: Option<String>,
    /// Column C
    pub role: Option<String>,
    /// Column D; zero and unparseable years are `None`
    pub year_joined: Option<i64>,
    /// Column E
    pub email: Option<String>,
    /// Column F, spaces removed and local mobile form made international
    pub phone_number: Option<String>,
}

impl Member {
    /// Text of cell A in the membership sheet's header row.
    pub const HEADER: &'static str = "Full Name";

    /// Build a member from a row; rows without a full name yield `None`.
    pub fn from_row(row: &Row) -> Option<Self> {
        let full_name = non_empty(row, "A")?;
        Some(Self {
            full_name,
            rotary_id: row.get("B").and_then(clean_rotary_id),
            role: text(row, "C"),
            year_joined: row.get("D").and_then(parse_year),
            email: text(row, "E"),
            phone_number: row.get("F").and_then(clean_phone),
        })
    }
}

/// A club office bearer.
///
/// Columns: A role, B full name, C email, D phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficeBearer {
    /// Column A, always present
    pub role: String,
    /// Column B
    pub full_name: Option<String>,
    /// Column C
    pub email: Option<String>,
    /// Column D, cleaned like [`Member::phone_number`]
    pub phone_number: Option<String>,
}

impl OfficeBearer {
    /// Text of cell A in the office-bearers sheet's header row.
    pub const HEADER: &'static str = "Role";

    /// Build an office bearer from a row; rows without a role yield `None`.
    pub fn from_row(row: &Row) -> Option<Self> {
        let role = non_empty(row, "A")?;
        Some(Self {
            role,
            full_name: text(row, "B"),
            email: text(row, "C"),
            phone_number: row.get("D").and_then(clean_phone),
        })
    }
}

/// Extract members, skipping the header row if present.
pub fn members_from_rows(rows: &[Row]) -> Vec<Member> {
    let members: Vec<Member> = data_rows(rows, Member::HEADER)
        .iter()
        .filter_map(Member::from_row)
        .collect();
    tracing::debug!(rows = rows.len(), members = members.len(), "extracted members");
    members
}

/// Extract office bearers, skipping the header row if present.
pub fn office_bearers_from_rows(rows: &[Row]) -> Vec<OfficeBearer> {
    let bearers: Vec<OfficeBearer> = data_rows(rows, OfficeBearer::HEADER)
        .iter()
        .filter_map(OfficeBearer::from_row)
        .collect();
    tracing::debug!(rows = rows.len(), bearers = bearers.len(), "extracted office bearers");
    bearers
}

/// Rows after the header, when the first row's column A is `header`.
fn data_rows<'a>(rows: &'a [Row], header: &str) -> &'a [Row] {
    match rows.split_first() {
        Some((first, rest)) if first.get("A") == Some(header) => rest,
        _ => rows,
    }
}

fn text(row: &Row, column: &str) -> Option<String> {
    row.get(column).map(str::to_string)
}

fn non_empty(row: &Row, column: &str) -> Option<String> {
    row.get(column).filter(|s| !s.is_empty()).map(str::to_string)
}
