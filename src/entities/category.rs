// 🏷️ Category Entity
// Natural key: name (unique in the store)

/// Category as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Surrogate id, only meaningful inside one database
    pub id: i64,
    /// Natural key (e.g. "Food", "Dining Out")
    pub name: String,
    pub description: String,
}

/// Category waiting to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        NewCategory {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Category with the default "Category: <name>" description
    pub fn named(name: &str) -> Self {
        Self::new(name, format!("Category: {}", name))
    }
}
