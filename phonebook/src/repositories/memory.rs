use anyhow::Result;
use tokio::sync::Mutex;

use crate::domains::{Person, PersonId};

use super::PersonRepository;

/// Volatile store keeping persons in insertion order. Backs the test suite
/// and local runs that have no Postgres at hand.
#[derive(Default)]
pub struct InMemoryPersonRepository {
    persons: Mutex<Vec<Person>>,
}

#[async_trait::async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn find_all(&self) -> Result<Vec<Person>> {
        Ok(self.persons.lock().await.clone())
    }

    async fn find_one(&self, id: PersonId) -> Result<Option<Person>> {
        let persons = self.persons.lock().await;

        Ok(persons.iter().find(|person| person.id == id).cloned())
    }

    async fn insert_one(&self, person: &Person) -> Result<()> {
        self.persons.lock().await.push(person.clone());

        Ok(())
    }

    async fn update_number(&self, id: PersonId, number: &str) -> Result<Option<Person>> {
        let mut persons = self.persons.lock().await;

        Ok(persons.iter_mut().find(|person| person.id == id).map(|person| {
            person.number = number.to_string();
            person.clone()
        }))
    }

    async fn delete_one(&self, id: PersonId) -> Result<()> {
        self.persons.lock().await.retain(|person| person.id != id);

        Ok(())
    }
}
