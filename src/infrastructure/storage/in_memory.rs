//! In-memory document collection

use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use crate::domain::persistence::{Entity, ObjectId};
use crate::domain::DomainError;

/// Thread-safe in-memory collection of one entity type
///
/// Each collection carries its own lock, so traffic on one entity type never
/// contends with another. Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryCollection<E>
where
    E: Entity,
{
    state: RwLock<CollectionState<E>>,
}

#[derive(Debug)]
struct CollectionState<E> {
    entities: HashMap<ObjectId, E>,
    /// (field, json-encoded value) pairs taken by `E::UNIQUE_FIELDS`
    unique_index: HashSet<(&'static str, String)>,
}

impl<E> Default for InMemoryCollection<E>
where
    E: Entity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryCollection<E>
where
    E: Entity,
{
    /// Creates a new empty collection
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CollectionState {
                entities: HashMap::new(),
                unique_index: HashSet::new(),
            }),
        }
    }

    /// Assigns identity to the draft and stores it
    pub fn insert(&self, draft: E::Draft) -> Result<E, DomainError> {
        let entity = E::from_draft(ObjectId::generate(), Utc::now(), draft);
        let unique_keys = unique_keys(&entity)?;

        let mut state = self.write()?;

        if let Some((field, value)) = unique_keys
            .iter()
            .find(|key| state.unique_index.contains(*key))
        {
            return Err(DomainError::duplicate_key(format!(
                "{} already has a document with {} {}",
                E::COLLECTION,
                field,
                value
            )));
        }

        state.unique_index.extend(unique_keys);
        state
            .entities
            .insert(entity.id().clone(), entity.clone());

        Ok(entity)
    }

    pub fn get(&self, id: &ObjectId) -> Result<E, DomainError> {
        self.read()?.entities.get(id).cloned().ok_or_else(|| {
            DomainError::not_found(format!("No document with id '{}' in {}", id, E::COLLECTION))
        })
    }

    /// All documents in creation order
    pub fn list(&self) -> Result<Vec<E>, DomainError> {
        self.find(|_| true)
    }

    /// Documents matching the predicate, in creation order
    pub fn find<P>(&self, predicate: P) -> Result<Vec<E>, DomainError>
    where
        P: Fn(&E) -> bool,
    {
        let mut matches: Vec<E> = self
            .read()?
            .entities
            .values()
            .filter(|e| predicate(e))
            .cloned()
            .collect();

        matches.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });

        Ok(matches)
    }

    /// The earliest document matching the predicate
    pub fn find_one<P>(&self, predicate: P) -> Result<Option<E>, DomainError>
    where
        P: Fn(&E) -> bool,
    {
        Ok(self.find(predicate)?.into_iter().next())
    }

    pub fn len(&self) -> Result<usize, DomainError> {
        Ok(self.read()?.entities.len())
    }

    pub fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, CollectionState<E>>, DomainError> {
        self.state.read().map_err(|e| {
            DomainError::internal(format!("Failed to acquire read lock: {}", e))
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, CollectionState<E>>, DomainError> {
        self.state.write().map_err(|e| {
            DomainError::internal(format!("Failed to acquire write lock: {}", e))
        })
    }
}

fn unique_keys<E: Entity>(entity: &E) -> Result<Vec<(&'static str, String)>, DomainError> {
    if E::UNIQUE_FIELDS.is_empty() {
        return Ok(Vec::new());
    }

    let document = serde_json::to_value(entity).map_err(|e| {
        DomainError::internal(format!("Failed to serialize document: {}", e))
    })?;

    Ok(E::UNIQUE_FIELDS
        .iter()
        .map(|field| {
            let value = document.get(*field).cloned().unwrap_or_default();
            (*field, value.to_string())
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestEntity {
        id: ObjectId,
        name: String,
        value: i32,
        created_at: DateTime<Utc>,
    }

    impl Entity for TestEntity {
        type Draft = (String, i32);

        const COLLECTION: &'static str = "Tests";
        const UNIQUE_FIELDS: &'static [&'static str] = &["name"];

        fn from_draft(id: ObjectId, created_at: DateTime<Utc>, draft: (String, i32)) -> Self {
            Self {
                id,
                name: draft.0,
                value: draft.1,
                created_at,
            }
        }

        fn id(&self) -> &ObjectId {
            &self.id
        }

        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }
    }

    fn draft(name: &str, value: i32) -> (String, i32) {
        (name.to_string(), value)
    }

    #[test]
    fn test_new_collection_lists_empty() {
        let collection: InMemoryCollection<TestEntity> = InMemoryCollection::new();

        assert!(collection.list().unwrap().is_empty());
        assert!(collection.is_empty().unwrap());
    }

    #[test]
    fn test_insert_and_get() {
        let collection: InMemoryCollection<TestEntity> = InMemoryCollection::new();

        let stored = collection.insert(draft("a", 42)).unwrap();
        let fetched = collection.get(stored.id()).unwrap();

        assert_eq!(fetched, stored);
        assert_eq!(fetched.value, 42);
    }

    #[test]
    fn test_get_unknown_id_is_not_found() {
        let collection: InMemoryCollection<TestEntity> = InMemoryCollection::new();

        let result = collection.get(&ObjectId::generate());
        assert!(matches!(result.unwrap_err(), DomainError::NotFound { .. }));
    }

    #[test]
    fn test_unique_field_conflict() {
        let collection: InMemoryCollection<TestEntity> = InMemoryCollection::new();

        collection.insert(draft("a", 1)).unwrap();
        let result = collection.insert(draft("a", 2));

        assert!(matches!(result.unwrap_err(), DomainError::DuplicateKey { .. }));
        assert_eq!(collection.len().unwrap(), 1);
    }

    #[test]
    fn test_list_is_sorted_by_creation_time() {
        let collection: InMemoryCollection<TestEntity> = InMemoryCollection::new();

        let first = collection.insert(draft("a", 1)).unwrap();
        let second = collection.insert(draft("b", 2)).unwrap();
        let third = collection.insert(draft("c", 3)).unwrap();

        let ids: Vec<ObjectId> = collection
            .list()
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();

        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&first.id));
        assert!(ids.contains(&second.id));
        assert!(ids.contains(&third.id));

        let listed = collection.list().unwrap();
        assert!(listed
            .windows(2)
            .all(|w| w[0].created_at <= w[1].created_at));
    }

    #[test]
    fn test_find_filters() {
        let collection: InMemoryCollection<TestEntity> = InMemoryCollection::new();

        collection.insert(draft("a", 1)).unwrap();
        collection.insert(draft("b", 2)).unwrap();
        collection.insert(draft("c", 3)).unwrap();

        let odd = collection.find(|e| e.value % 2 == 1).unwrap();
        assert_eq!(odd.len(), 2);

        let b = collection.find_one(|e| e.name == "b").unwrap();
        assert_eq!(b.unwrap().value, 2);

        assert!(collection.find_one(|e| e.name == "z").unwrap().is_none());
    }
}
