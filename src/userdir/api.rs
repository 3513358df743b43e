//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry point
//! for every directory operation, whatever UI sits on top.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the [`DirectoryStore`] and the [`UserSource`]; consumers read state
//!   through this object, never through ambient state
//! - **Initializes once**: [`DirectoryApi::initialize`] runs the loader and refuses to
//!   run it again
//! - **Dispatches** to the appropriate command function
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## Generic Over UserSource
//!
//! - Production: `DirectoryApi<HttpUserSource>`
//! - Testing: `DirectoryApi<InMemorySource>`

use crate::commands;
use crate::error::{DirectoryError, Result};
use crate::form::NewUserForm;
use crate::loader::{self, LoadOutcome};
use crate::model::{User, UserId};
use crate::source::UserSource;
use crate::store::{DirectoryState, DirectoryStore};
use crate::view::ViewQuery;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub struct DirectoryApi<S: UserSource> {
    source: S,
    store: DirectoryStore,
    config_dir: PathBuf,
    initialized: bool,
}

impl<S: UserSource> DirectoryApi<S> {
    pub fn new(source: S, config_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            store: DirectoryStore::new(),
            config_dir: config_dir.into(),
            initialized: false,
        }
    }

    /// Populate the store from the source. Allowed once per `DirectoryApi`.
    pub fn initialize(&mut self) -> Result<LoadOutcome> {
        if self.initialized {
            return Err(DirectoryError::AlreadyInitialized);
        }
        self.initialized = true;
        Ok(loader::run(&self.source, &mut self.store))
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Directory operations are only meaningful once the load has run, even if it failed.
    fn require_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(DirectoryError::Api(
                "Directory not loaded; call initialize() first".to_string(),
            ))
        }
    }

    pub fn list_users(&self, query: &ViewQuery) -> Result<commands::CmdResult> {
        self.require_initialized()?;
        Ok(commands::list::run(&self.store, query))
    }

    pub fn view_user(&self, id: UserId) -> Result<commands::CmdResult> {
        self.require_initialized()?;
        Ok(commands::view::run(&self.store, id))
    }

    pub fn add_user(&mut self, form: &NewUserForm) -> Result<commands::CmdResult> {
        self.require_initialized()?;
        commands::add::run(&mut self.store, form, Utc::now().timestamp_millis())
    }

    pub fn update_user(&mut self, user: User) -> Result<commands::CmdResult> {
        self.require_initialized()?;
        Ok(commands::update::run(&mut self.store, user))
    }

    pub fn delete_user(&mut self, id: UserId) -> Result<commands::CmdResult> {
        self.require_initialized()?;
        Ok(commands::delete::run(&mut self.store, id))
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        configure(&self.config_dir, action)
    }

    pub fn state(&self) -> &DirectoryState {
        self.store.state()
    }

    pub fn snapshot(&self) -> Rc<DirectoryState> {
        self.store.snapshot()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

/// Reads or writes `config.json` in `config_dir`. Needs neither a source nor a load.
pub fn configure(config_dir: &Path, action: ConfigAction) -> Result<commands::CmdResult> {
    commands::config::run(config_dir, action)
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::{fixtures, InMemorySource};
    use crate::store::FETCH_ERROR_MESSAGE;
    use crate::view::{SortKey, SortOrder};

    fn api(source: InMemorySource) -> DirectoryApi<InMemorySource> {
        DirectoryApi::new(source, std::env::temp_dir().join("userdir-api-tests"))
    }

    fn valid_form() -> NewUserForm {
        NewUserForm::new()
            .set("name", "Zoe")
            .set("username", "zoe")
            .set("email", "zoe@x.com")
            .set("phone", "1")
            .set("website", "zoe.dev")
            .set("address.street", "S")
            .set("address.city", "C")
            .set("address.zipcode", "Z")
            .set("company.name", "Acme")
    }

    #[test]
    fn initialize_runs_loader_once() {
        let mut api = api(InMemorySource::new(fixtures::bob_and_ann()));
        assert!(!api.is_initialized());

        let outcome = api.initialize().unwrap();
        assert_eq!(outcome, LoadOutcome::Loaded { count: 2 });

        let err = api.initialize().unwrap_err();
        assert!(matches!(err, DirectoryError::AlreadyInitialized));
        assert_eq!(api.source().reads(), 1);
        assert_eq!(api.state().users.len(), 2);
    }

    #[test]
    fn failed_initialize_leaves_error_state() {
        let mut api = api(InMemorySource::failing("dns"));
        api.initialize().unwrap();

        let state = api.state();
        assert!(state.users.is_empty());
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some(FETCH_ERROR_MESSAGE));
    }

    #[test]
    fn added_user_is_listed_and_viewable() {
        let mut api = api(InMemorySource::new(fixtures::bob_and_ann()));
        api.initialize().unwrap();

        let added = api.add_user(&valid_form()).unwrap().affected_users[0].clone();
        assert_eq!(api.state().users[0], added);
        assert_eq!(added.website, "https://zoe.dev");

        let found = api.view_user(added.id).unwrap();
        assert_eq!(found.listed_users, vec![added.clone()]);

        let listing = api
            .list_users(&ViewQuery::new("acme", SortKey::Id, SortOrder::Asc))
            .unwrap();
        let ids: Vec<_> = listing.listed_users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, added.id]);
    }

    #[test]
    fn operations_before_initialize_are_rejected() {
        let mut api = api(InMemorySource::new(fixtures::bob_and_ann()));

        assert!(matches!(
            api.list_users(&ViewQuery::default()),
            Err(DirectoryError::Api(_))
        ));
        assert!(matches!(api.delete_user(1), Err(DirectoryError::Api(_))));
        assert_eq!(api.source().reads(), 0);
        assert_eq!(api.store.revision(), 0);
    }

    #[test]
    fn update_replaces_loaded_user() {
        let mut api = api(InMemorySource::new(fixtures::bob_and_ann()));
        api.initialize().unwrap();

        let renamed = User::new(2, "Annabel", "a@x.com");
        let result = api.update_user(renamed.clone()).unwrap();

        assert_eq!(result.affected_users, vec![renamed.clone()]);
        assert_eq!(api.view_user(2).unwrap().listed_users, vec![renamed]);
        assert_eq!(api.state().users.len(), 2);
    }

    #[test]
    fn snapshots_detect_changes() {
        let mut api = api(InMemorySource::new(fixtures::bob_and_ann()));
        api.initialize().unwrap();
        let before = api.snapshot();

        api.list_users(&ViewQuery::default()).unwrap();
        assert!(Rc::ptr_eq(&before, &api.snapshot()));

        api.delete_user(2).unwrap();
        assert!(!Rc::ptr_eq(&before, &api.snapshot()));
        assert_eq!(before.users.len(), 2);
    }

    #[test]
    fn config_works_without_initialize() {
        let dir = tempfile::tempdir().unwrap();
        let api = DirectoryApi::new(InMemorySource::failing("offline"), dir.path());

        api.config(ConfigAction::Set("timeout-secs".into(), "4".into()))
            .unwrap();
        let shown = configure(api.config_dir(), ConfigAction::ShowAll).unwrap();

        assert_eq!(shown.config.unwrap().timeout_secs, 4);
        assert_eq!(api.source().reads(), 0);
    }
}
