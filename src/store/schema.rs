pub struct Table {
    pub name: &'static str,
    pub schema: &'static str,
    pub indices: &'static [&'static str],
}

pub const SCOPED_COLLECTION_TABLE: Table = Table {
    name: "scoped_collection",
    schema: "CREATE TABLE scoped_collection (key TEXT NOT NULL UNIQUE, value TEXT NOT NULL, updated INTEGER DEFAULT (cast(strftime('%s','now') as int)), PRIMARY KEY (key));",
    indices: &[],
};

pub const TABLES: &[Table] = &[SCOPED_COLLECTION_TABLE];

/// Stamped into PRAGMA user_version so a database written by a newer build
/// is refused instead of silently misread. There is no migration chain.
pub const DB_VERSION: i64 = 1;
