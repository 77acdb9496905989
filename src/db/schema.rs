pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
    id     INTEGER PRIMARY KEY AUTOINCREMENT,
    name   TEXT NOT NULL UNIQUE,
    icon   TEXT NOT NULL DEFAULT '',
    color  TEXT NOT NULL DEFAULT '',
    kind   TEXT NOT NULL DEFAULT 'expense'
);

CREATE TABLE IF NOT EXISTS transactions (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id        INTEGER NOT NULL,
    amount         TEXT NOT NULL,
    category_id    INTEGER REFERENCES categories(id) ON DELETE SET NULL,
    category_name  TEXT NOT NULL,
    category_icon  TEXT NOT NULL DEFAULT '',
    kind           TEXT NOT NULL,
    description    TEXT NOT NULL DEFAULT '',
    occurred_at    TEXT NOT NULL,
    created_at     TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_transactions_user ON transactions(user_id);
CREATE INDEX IF NOT EXISTS idx_transactions_occurred ON transactions(occurred_at);

CREATE TABLE IF NOT EXISTS budgets (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id        INTEGER NOT NULL,
    category_name  TEXT NOT NULL,
    limit_amount   TEXT NOT NULL,
    month          TEXT NOT NULL,
    created_at     TEXT NOT NULL,
    UNIQUE(user_id, category_name)
);

CREATE TABLE IF NOT EXISTS preferences (
    user_id        INTEGER PRIMARY KEY,
    monthly_limit  TEXT NOT NULL DEFAULT '0'
);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;
