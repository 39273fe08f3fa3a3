//! In-memory object store.
//!
//! Backs the runtime when no external storage is wired in and every test in
//! the workspace. State sits behind a single `RwLock`, so each write is one
//! atomic update and each read sees a consistent snapshot.

use crate::ports::{ApiKeyDirectory, ObjectStore, SubmissionQuery, SubmissionWriter};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared_types::{
    FileObject, Form, LinkedEntity, StoreError, Submission, SubmissionHandle, SubmissionId,
    Timestamp, User, UserId, FILE_OBJECT_TYPE,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use subtle::ConstantTimeEq;
use thiserror::Error;

/// A non-file object that submissions may reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub entity_type: String,
    pub id: String,
}

/// Seed data for [`InMemoryObjectStore`], usually read from a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreFixture {
    pub forms: Vec<Form>,
    pub users: Vec<User>,
    pub submissions: Vec<Submission>,
    pub files: Vec<FileObject>,
    pub entities: Vec<EntityRecord>,
}

/// Errors loading a fixture file.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid fixture {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Submission {id} references unknown form {form_id}")]
    UnknownForm { id: SubmissionId, form_id: String },
}

impl StoreFixture {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| FixtureError::Parse {
            path: display,
            source,
        })
    }
}

#[derive(Default)]
struct StoreState {
    forms: HashMap<String, Form>,
    users: BTreeMap<UserId, User>,
    submissions: BTreeMap<SubmissionId, Submission>,
    files: BTreeMap<String, FileObject>,
    entities: HashSet<(String, String)>,
    next_submission_id: SubmissionId,
    offline: bool,
    failing_entity_types: HashSet<String>,
}

impl StoreState {
    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline {
            return Err(StoreError::Unavailable("store is offline".to_string()));
        }
        Ok(())
    }
}

/// Object store held entirely in memory.
#[derive(Default)]
pub struct InMemoryObjectStore {
    state: RwLock<StoreState>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from fixture data.
    ///
    /// Every submission must belong to a form present in the fixture.
    pub fn from_fixture(fixture: StoreFixture) -> Result<Self, FixtureError> {
        let store = Self::new();
        {
            let mut state = store.state.write();
            for form in fixture.forms {
                state.forms.insert(form.id.clone(), form);
            }
            for user in fixture.users {
                state.users.insert(user.id, user);
            }
            for submission in fixture.submissions {
                if !state.forms.contains_key(&submission.form_id) {
                    return Err(FixtureError::UnknownForm {
                        id: submission.id,
                        form_id: submission.form_id,
                    });
                }
                state.next_submission_id = state.next_submission_id.max(submission.id);
                state.submissions.insert(submission.id, submission);
            }
            for file in fixture.files {
                state.files.insert(file.id.clone(), file);
            }
            for entity in fixture.entities {
                state.entities.insert((entity.entity_type, entity.id));
            }
            tracing::info!(
                forms = state.forms.len(),
                users = state.users.len(),
                submissions = state.submissions.len(),
                files = state.files.len(),
                "Seeded in-memory object store"
            );
        }
        Ok(store)
    }

    pub fn insert_form(&self, form: Form) {
        self.state.write().forms.insert(form.id.clone(), form);
    }

    pub fn insert_user(&self, user: User) {
        self.state.write().users.insert(user.id, user);
    }

    /// Insert a submission as-is, keeping its id and uuid.
    pub fn insert_submission(&self, submission: Submission) {
        let mut state = self.state.write();
        state.next_submission_id = state.next_submission_id.max(submission.id);
        state.submissions.insert(submission.id, submission);
    }

    pub fn insert_file(&self, file: FileObject) {
        self.state.write().files.insert(file.id.clone(), file);
    }

    pub fn insert_entity(&self, entity_type: impl Into<String>, id: impl Into<String>) {
        self.state
            .write()
            .entities
            .insert((entity_type.into(), id.into()));
    }

    /// Make every subsequent call fail with `StoreError::Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.state.write().offline = offline;
    }

    /// Make `load_entities` report corrupt records for one object type.
    pub fn fail_entity_loads(&self, entity_type: impl Into<String>) {
        self.state
            .write()
            .failing_entity_types
            .insert(entity_type.into());
    }

    pub fn submission_count(&self) -> usize {
        self.state.read().submissions.len()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn load_form(&self, id: &str) -> Result<Option<Form>, StoreError> {
        let state = self.state.read();
        state.check_online()?;
        Ok(state.forms.get(id).cloned())
    }

    fn load_users(&self, ids: &[UserId]) -> Result<Vec<User>, StoreError> {
        let state = self.state.read();
        state.check_online()?;
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect())
    }

    fn load_submission(&self, id: SubmissionId) -> Result<Option<Submission>, StoreError> {
        let state = self.state.read();
        state.check_online()?;
        Ok(state.submissions.get(&id).cloned())
    }

    fn query_submissions(
        &self,
        query: &SubmissionQuery,
    ) -> Result<Vec<SubmissionHandle>, StoreError> {
        let state = self.state.read();
        state.check_online()?;
        // BTreeMap iteration keeps the projection ordered by id
        Ok(state
            .submissions
            .values()
            .filter(|s| query.matches(s))
            .map(SubmissionHandle::from)
            .collect())
    }

    fn load_entities(
        &self,
        entity_type: &str,
        ids: &[String],
    ) -> Result<BTreeMap<String, LinkedEntity>, StoreError> {
        let state = self.state.read();
        state.check_online()?;
        if state.failing_entity_types.contains(entity_type) {
            return Err(StoreError::Corrupt {
                kind: "entity",
                id: entity_type.to_string(),
                reason: "unreadable entity table".to_string(),
            });
        }

        let mut loaded = BTreeMap::new();
        for id in ids {
            let entity = if entity_type == FILE_OBJECT_TYPE {
                state.files.get(id).cloned().map(LinkedEntity::File)
            } else if state
                .entities
                .contains(&(entity_type.to_string(), id.clone()))
            {
                Some(LinkedEntity::Other {
                    entity_type: entity_type.to_string(),
                    id: id.clone(),
                })
            } else {
                None
            };
            if let Some(entity) = entity {
                loaded.insert(id.clone(), entity);
            }
        }
        Ok(loaded)
    }

    fn load_file_by_uri(&self, uri: &str) -> Result<Option<FileObject>, StoreError> {
        let state = self.state.read();
        state.check_online()?;
        Ok(state.files.values().find(|f| f.uri == uri).cloned())
    }
}

impl SubmissionWriter for InMemoryObjectStore {
    fn create_submission(
        &self,
        form_id: &str,
        data: Map<String, Value>,
        created: Timestamp,
    ) -> Result<SubmissionHandle, StoreError> {
        let mut state = self.state.write();
        state.check_online()?;
        if !state.forms.contains_key(form_id) {
            return Err(StoreError::UnknownForm(form_id.to_string()));
        }

        state.next_submission_id += 1;
        let submission = Submission {
            id: state.next_submission_id,
            uuid: uuid::Uuid::new_v4().to_string(),
            form_id: form_id.to_string(),
            created,
            data,
        };
        let handle = SubmissionHandle::from(&submission);
        state.submissions.insert(submission.id, submission);

        tracing::debug!(form_id, uuid = %handle.uuid, "Created submission");
        Ok(handle)
    }

    fn patch_submission(
        &self,
        uuid: &str,
        data: Map<String, Value>,
    ) -> Result<Option<Submission>, StoreError> {
        let mut state = self.state.write();
        state.check_online()?;
        let Some(submission) = state.submissions.values_mut().find(|s| s.uuid == uuid) else {
            return Ok(None);
        };
        submission.data.extend(data);
        Ok(Some(submission.clone()))
    }
}

impl ApiKeyDirectory for InMemoryObjectStore {
    fn user_for_api_key(&self, key: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.read();
        state.check_online()?;
        if key.is_empty() {
            return Ok(None);
        }

        // Compare against every key so timing does not reveal which user matched
        let mut found = None;
        for user in state.users.values() {
            let Some(candidate) = user.api_key.as_deref() else {
                continue;
            };
            if bool::from(candidate.as_bytes().ct_eq(key.as_bytes())) && found.is_none() {
                found = Some(user.clone());
            }
        }
        Ok(found)
    }
}
