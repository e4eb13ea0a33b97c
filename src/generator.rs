// 🎲 Sample Data Generator
//
// Wipes the store, then fills it with randomized categories, people and
// transactions. The random source is injected so tests can seed it.

use crate::db::{
    clear_all, get_all_categories, get_all_people, insert_categories, insert_people,
    insert_transactions, StoreCounts,
};
use crate::entities::{Category, NewCategory, NewPerson, NewTransaction, Person};
use anyhow::{bail, Result};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use rust_decimal::Decimal;
use rusqlite::Connection;
use std::collections::HashSet;
use tracing::info;

pub const CATEGORY_NAMES: [&str; 20] = [
    "Food",
    "Transport",
    "Entertainment",
    "Utilities",
    "Health",
    "Education",
    "Shopping",
    "Travel",
    "Gifts",
    "Savings",
    "Clothing",
    "Insurance",
    "Dining Out",
    "Groceries",
    "Car",
    "Pet",
    "Household",
    "Electronics",
    "Subscriptions",
    "Miscellaneous",
];

pub const FIRST_NAMES: [&str; 10] = [
    "Alice", "Bob", "Charlie", "Diana", "Eve", "Frank", "Grace", "Henry", "Iris", "Jack",
];

pub const LAST_NAMES: [&str; 10] = [
    "Smith",
    "Johnson",
    "Williams",
    "Brown",
    "Jones",
    "Garcia",
    "Miller",
    "Davis",
    "Rodriguez",
    "Martinez",
];

/// Emails look like `first.last.N@domain` with N in 1..=EMAIL_SUFFIX_MAX
const EMAIL_SUFFIX_MAX: u32 = 100;

/// Amount bounds in cents (10.00 ..= 500.00)
const MIN_AMOUNT_CENTS: i64 = 10_00;
const MAX_AMOUNT_CENTS: i64 = 500_00;

/// Generator settings
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub person_count: usize,
    pub transaction_count: usize,
    /// Chance that a transaction gets a category at all
    pub categorized_probability: f64,
    /// Transaction dates fall within the last `window_days` days
    pub window_days: i64,
    pub email_domain: String,
}

impl Default for GeneratorConfig {
    /// 20 people, 25 transactions, 80% categorized, last 60 days
    fn default() -> Self {
        Self {
            person_count: 20,
            transaction_count: 25,
            categorized_probability: 0.8,
            window_days: 60,
            email_domain: "erb7.com".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Number of distinct emails the name lists can produce
    pub fn email_capacity() -> usize {
        FIRST_NAMES.len() * LAST_NAMES.len() * EMAIL_SUFFIX_MAX as usize
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.categorized_probability) {
            bail!(
                "categorized_probability must be within 0..=1, got {}",
                self.categorized_probability
            );
        }
        if self.window_days < 0 {
            bail!("window_days must not be negative, got {}", self.window_days);
        }
        if self.person_count > Self::email_capacity() {
            bail!(
                "cannot generate {} people with unique emails (at most {})",
                self.person_count,
                Self::email_capacity()
            );
        }
        if self.person_count == 0 && self.transaction_count > 0 {
            bail!("transactions need at least one person");
        }
        Ok(())
    }
}

/// Records inserted by one run
pub type GenerationSummary = StoreCounts;

pub struct DataGenerator {
    config: GeneratorConfig,
}

impl DataGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(GeneratorConfig::default())
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// One category per fixed name, described as "Category: <name>"
    pub fn generate_categories(&self) -> Vec<NewCategory> {
        CATEGORY_NAMES.iter().map(|name| NewCategory::named(name)).collect()
    }

    /// Random people; an email already drawn is drawn again
    pub fn generate_people<R: Rng>(&self, rng: &mut R) -> Vec<NewPerson> {
        let mut seen = HashSet::new();
        let mut people = Vec::with_capacity(self.config.person_count);

        while people.len() < self.config.person_count {
            let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
            let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
            let email = format!(
                "{}.{}.{}@{}",
                first.to_lowercase(),
                last.to_lowercase(),
                rng.gen_range(1..=EMAIL_SUFFIX_MAX),
                self.config.email_domain
            );
            if !seen.insert(email.clone()) {
                continue;
            }

            let phone = format!(
                "+852-{} {}",
                rng.gen_range(1000..=9999),
                rng.gen_range(1000..=9999)
            );
            people.push(NewPerson::new(first, last, email, phone));
        }

        people
    }

    /// Random transactions over already-stored people and categories
    pub fn generate_transactions<R: Rng>(
        &self,
        rng: &mut R,
        people: &[Person],
        categories: &[Category],
        today: NaiveDate,
    ) -> Vec<NewTransaction> {
        if people.is_empty() {
            return Vec::new();
        }

        let start = today - Duration::days(self.config.window_days);

        (0..self.config.transaction_count)
            .map(|_| {
                let person = &people[rng.gen_range(0..people.len())];
                let category = if !categories.is_empty()
                    && rng.gen_bool(self.config.categorized_probability)
                {
                    Some(categories[rng.gen_range(0..categories.len())].id)
                } else {
                    None
                };
                let amount = Decimal::new(rng.gen_range(MIN_AMOUNT_CENTS..=MAX_AMOUNT_CENTS), 2);
                let date = start + Duration::days(rng.gen_range(0..=self.config.window_days));

                NewTransaction {
                    person_id: person.id,
                    category_id: category,
                    amount,
                    date,
                    notes: format!("Sample transaction for {} on {}", person.first_name, date),
                }
            })
            .collect()
    }

    /// Clear the store, then insert categories, people and transactions
    pub fn populate<R: Rng>(
        &self,
        conn: &Connection,
        rng: &mut R,
        today: NaiveDate,
    ) -> Result<GenerationSummary> {
        self.config.validate()?;

        clear_all(conn)?;

        let categories = insert_categories(conn, &self.generate_categories())?;
        let people = insert_people(conn, &self.generate_people(rng))?;

        // Re-read so transactions reference the stored ids
        let stored_people = get_all_people(conn)?;
        let stored_categories = get_all_categories(conn)?;

        let transactions = self.generate_transactions(rng, &stored_people, &stored_categories, today);
        let transactions = insert_transactions(conn, &transactions)?;

        let summary = GenerationSummary {
            categories,
            people,
            transactions,
        };
        info!(
            categories = summary.categories,
            people = summary.people,
            transactions = summary.transactions,
            "sample data generated"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_all_transactions, setup_database, store_counts};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        conn
    }

    #[test]
    fn test_populate_default_counts() {
        let conn = test_db();
        let mut rng = StdRng::seed_from_u64(7);

        let summary = DataGenerator::with_defaults()
            .populate(&conn, &mut rng, today())
            .unwrap();

        assert_eq!(summary.categories, 20);
        assert_eq!(summary.people, 20);
        assert_eq!(summary.transactions, 25);
        assert_eq!(store_counts(&conn).unwrap(), summary);
    }

    #[test]
    fn test_rerun_clears_previous_records() {
        let conn = test_db();
        let mut rng = StdRng::seed_from_u64(1);
        let generator = DataGenerator::with_defaults();

        generator.populate(&conn, &mut rng, today()).unwrap();
        generator.populate(&conn, &mut rng, today()).unwrap();

        let counts = store_counts(&conn).unwrap();
        assert_eq!(counts.categories, 20);
        assert_eq!(counts.people, 20);
        assert_eq!(counts.transactions, 25);
    }

    #[test]
    fn test_generated_values_stay_in_range() {
        let conn = test_db();
        let mut rng = StdRng::seed_from_u64(42);

        DataGenerator::with_defaults()
            .populate(&conn, &mut rng, today())
            .unwrap();

        let earliest = today() - Duration::days(60);
        for t in get_all_transactions(&conn).unwrap() {
            assert!(t.amount >= Decimal::new(MIN_AMOUNT_CENTS, 2));
            assert!(t.amount <= Decimal::new(MAX_AMOUNT_CENTS, 2));
            assert_eq!(t.amount.scale(), 2);
            assert!(t.date >= earliest && t.date <= today());
            assert_eq!(
                t.notes,
                format!("Sample transaction for {} on {}", t.person_first_name, t.date)
            );
        }
    }

    #[test]
    fn test_people_have_unique_emails_even_when_crowded() {
        let generator = DataGenerator::new(GeneratorConfig {
            person_count: 500,
            ..GeneratorConfig::default()
        });
        let mut rng = StdRng::seed_from_u64(3);

        let people = generator.generate_people(&mut rng);

        let emails: HashSet<_> = people.iter().map(|p| p.email.as_str()).collect();
        assert_eq!(emails.len(), 500);
        assert!(people.iter().all(|p| p.email.ends_with("@erb7.com")));
        assert!(people.iter().all(|p| p.phone.starts_with("+852-")));
    }

    #[test]
    fn test_probability_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        let people = vec![Person {
            id: 1,
            first_name: "Iris".to_string(),
            last_name: "Davis".to_string(),
            email: "iris@example.com".to_string(),
            phone: String::new(),
        }];
        let categories = vec![Category {
            id: 5,
            name: "Pet".to_string(),
            description: String::new(),
        }];

        let never = DataGenerator::new(GeneratorConfig {
            categorized_probability: 0.0,
            ..GeneratorConfig::default()
        })
        .generate_transactions(&mut rng, &people, &categories, today());
        assert!(never.iter().all(|t| t.category_id.is_none()));

        let always = DataGenerator::new(GeneratorConfig {
            categorized_probability: 1.0,
            ..GeneratorConfig::default()
        })
        .generate_transactions(&mut rng, &people, &categories, today());
        assert!(always.iter().all(|t| t.category_id == Some(5)));
    }

    #[test]
    fn test_invalid_config_is_rejected_before_clearing() {
        let conn = test_db();
        let mut rng = StdRng::seed_from_u64(0);
        DataGenerator::with_defaults()
            .populate(&conn, &mut rng, today())
            .unwrap();

        let bad = DataGenerator::new(GeneratorConfig {
            categorized_probability: 1.5,
            ..GeneratorConfig::default()
        });

        assert!(bad.populate(&conn, &mut rng, today()).is_err());
        assert_eq!(store_counts(&conn).unwrap().transactions, 25);
    }
}
