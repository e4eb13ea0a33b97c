// Entity Models
// Three record types live in the store. Each one has a surrogate `id` that is
// local to a single database and a natural key that survives export/import:
// - Category: name
// - Person: email
// - Transaction: none (always re-created, references resolved by natural key)

pub mod category;
pub mod person;
pub mod transaction;

pub use category::{Category, NewCategory};
pub use person::{NewPerson, Person};
pub use transaction::{NewTransaction, Transaction};
