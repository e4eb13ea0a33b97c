// 👤 Person Entity
// Natural key: email (unique in the store)

/// Person as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Surrogate id, only meaningful inside one database
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Natural key
    pub email: String,
    pub phone: String,
}

impl Person {
    /// "First Last", as written to the transactions export
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Person waiting to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl NewPerson {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        NewPerson {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_joins_with_single_space() {
        let person = Person {
            id: 7,
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email: "alice.smith.1@erb7.com".to_string(),
            phone: "+852-1234 5678".to_string(),
        };

        assert_eq!(person.full_name(), "Alice Smith");
    }
}
