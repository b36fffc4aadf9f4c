//! Table definitions, applied on connect.

pub(super) const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        role     TEXT NOT NULL DEFAULT 'USER'
    )
"#;

pub(super) const CREATE_PROPERTIES: &str = r#"
    CREATE TABLE IF NOT EXISTS properties (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        address     TEXT NOT NULL,
        price       REAL NOT NULL,
        size        REAL NOT NULL,
        description TEXT NOT NULL
    )
"#;

pub(super) const ALL: [&str; 2] = [CREATE_USERS, CREATE_PROPERTIES];
