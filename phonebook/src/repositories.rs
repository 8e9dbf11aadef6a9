pub mod memory;
pub mod sql;

use anyhow::Result;

use crate::domains::{Person, PersonId};

/// The store behind the service. Callers validate before writing; the store
/// never re-checks a name or number on its way in or out.
#[async_trait::async_trait]
pub trait PersonRepository {
    async fn find_all(&self) -> Result<Vec<Person>>;
    async fn find_one(&self, id: PersonId) -> Result<Option<Person>>;
    async fn insert_one(&self, person: &Person) -> Result<()>;
    /// Rewrites the number of the matching person, returning the updated
    /// record, or `None` when the id matches nothing.
    async fn update_number(&self, id: PersonId, number: &str) -> Result<Option<Person>>;
    /// Idempotent; removing an id that matches nothing is a success.
    async fn delete_one(&self, id: PersonId) -> Result<()>;
}
