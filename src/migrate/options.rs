//! Migration script options.

/// Options controlling which sections a migration script contains.
#[derive(Debug, Clone)]
pub struct MigrationOptions {
    /// Emit `CREATE TABLE IF NOT EXISTS` statements
    pub include_schema: bool,

    /// Emit `TRUNCATE TABLE` statements before the inserts
    pub truncate: bool,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            include_schema: true,
            truncate: true,
        }
    }
}

impl MigrationOptions {
    /// Create options with defaults: schema and truncate both on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to emit the schema.
    pub fn with_schema(mut self, include: bool) -> Self {
        self.include_schema = include;
        self
    }

    /// Set whether to truncate tables before inserting.
    pub fn with_truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }
}
