use crate::models::TransactionKind;

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: Option<i64>,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub kind: TransactionKind,
}

impl Category {
    pub fn new(name: String, icon: String, color: String, kind: TransactionKind) -> Self {
        Self {
            id: None,
            name,
            icon,
            color,
            kind,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.icon, self.name)
    }
}

/// The catalog seeded into a fresh store: (name, icon, color, kind).
pub const DEFAULT_CATEGORIES: &[(&str, &str, &str, TransactionKind)] = &[
    ("Food", "🍔", "#FFC107", TransactionKind::Expense),
    ("Transport", "🚗", "#2196F3", TransactionKind::Expense),
    ("Shopping", "🛍️", "#9C27B0", TransactionKind::Expense),
    ("Bills", "📄", "#FF5722", TransactionKind::Expense),
    ("Entertainment", "🎬", "#E91E63", TransactionKind::Expense),
    ("Health", "💊", "#F44336", TransactionKind::Expense),
    ("Education", "📚", "#3F51B5", TransactionKind::Expense),
    ("Other", "💸", "#607D8B", TransactionKind::Expense),
    ("Salary", "💼", "#4CAF50", TransactionKind::Income),
    ("Business", "💰", "#8BC34A", TransactionKind::Income),
    ("Investment", "📈", "#00BCD4", TransactionKind::Income),
    ("Other Income", "💵", "#009688", TransactionKind::Income),
];
