//! # State Layer
//!
//! This module holds the single source of truth for the directory: the list of users
//! plus the loading and error flags that describe how that list came to be.
//!
//! ## Reducer
//!
//! All writes go through [`reduce`], a pure function from `(&DirectoryState, Command)`
//! to a fresh `DirectoryState`. The previous state is never mutated, so any holder of an
//! older snapshot keeps seeing exactly what it saw.
//!
//! ## Container
//!
//! [`DirectoryStore`] is the explicitly passed holder of the current state. It keeps the
//! state behind an `Rc` and swaps it on every [`DirectoryStore::dispatch`]:
//!
//! - `Rc::ptr_eq` between two snapshots tells a consumer whether anything was dispatched
//! - [`DirectoryStore::revision`] counts dispatches for the same purpose without holding
//!   a snapshot
//! - [`DirectoryStore::subscribe`] registers a listener that sees every new state as it
//!   is installed
//!
//! Nothing here is shared across threads, so `Rc` is enough.

use crate::model::{User, UserId};
use std::fmt;
use std::rc::Rc;
use tracing::debug;

pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch users. Please try again later.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryState {
    pub users: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl DirectoryState {
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetUsers(Vec<User>),
    AddUser(User),
    UpdateUser(User),
    DeleteUser(UserId),
    SetLoading(bool),
    SetError(String),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SetUsers(users) => write!(f, "set-users({})", users.len()),
            Command::AddUser(user) => write!(f, "add-user({})", user.id),
            Command::UpdateUser(user) => write!(f, "update-user({})", user.id),
            Command::DeleteUser(id) => write!(f, "delete-user({})", id),
            Command::SetLoading(loading) => write!(f, "set-loading({})", loading),
            Command::SetError(_) => write!(f, "set-error"),
        }
    }
}

pub fn reduce(state: &DirectoryState, command: Command) -> DirectoryState {
    match command {
        Command::SetUsers(users) => DirectoryState {
            users,
            loading: false,
            error: None,
        },
        Command::AddUser(user) => {
            let mut users = Vec::with_capacity(state.users.len() + 1);
            users.push(user);
            users.extend(state.users.iter().cloned());
            DirectoryState {
                users,
                ..state.clone()
            }
        }
        Command::UpdateUser(user) => DirectoryState {
            users: state
                .users
                .iter()
                .map(|existing| {
                    if existing.id == user.id {
                        user.clone()
                    } else {
                        existing.clone()
                    }
                })
                .collect(),
            ..state.clone()
        },
        Command::DeleteUser(id) => DirectoryState {
            users: state.users.iter().filter(|u| u.id != id).cloned().collect(),
            ..state.clone()
        },
        Command::SetLoading(loading) => DirectoryState {
            loading,
            ..state.clone()
        },
        Command::SetError(message) => DirectoryState {
            error: Some(message),
            loading: false,
            ..state.clone()
        },
    }
}

type Listener = Box<dyn Fn(&DirectoryState)>;

#[derive(Default)]
pub struct DirectoryStore {
    state: Rc<DirectoryState>,
    revision: u64,
    listeners: Vec<Listener>,
}

impl fmt::Debug for DirectoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryStore")
            .field("state", &self.state)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl DirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, command: Command) {
        debug!(command = %command, revision = self.revision + 1, "dispatch");
        self.state = Rc::new(reduce(&self.state, command));
        self.revision += 1;
        for listener in &self.listeners {
            listener(&self.state);
        }
    }

    /// Calls `listener` after every dispatch with the state that was just installed.
    pub fn subscribe(&mut self, listener: impl Fn(&DirectoryState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Returns the current state. Later dispatches never change a returned snapshot.
    pub fn snapshot(&self) -> Rc<DirectoryState> {
        Rc::clone(&self.state)
    }

    pub fn state(&self) -> &DirectoryState {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn users(&self) -> &[User] {
        &self.state.users
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.state.user(id)
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn bob() -> User {
        User::new(1, "Bob", "b@x.com").with_company("Acme")
    }

    fn ann() -> User {
        User::new(2, "Ann", "a@x.com").with_company("Beta")
    }

    fn loaded() -> DirectoryState {
        reduce(&DirectoryState::default(), Command::SetUsers(vec![bob(), ann()]))
    }

    fn all_commands() -> Vec<Command> {
        vec![
            Command::SetUsers(vec![ann()]),
            Command::AddUser(User::new(3, "Cid", "c@x.com")),
            Command::UpdateUser(User::new(1, "Robert", "b@x.com")),
            Command::DeleteUser(2),
            Command::SetLoading(true),
            Command::SetError("boom".into()),
        ]
    }

    #[test]
    fn initial_state_is_empty_and_idle() {
        let store = DirectoryStore::new();
        assert!(store.users().is_empty());
        assert!(!store.is_loading());
        assert_eq!(store.error(), None);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn reduce_is_pure_and_leaves_input_untouched() {
        let state = loaded();
        let before = state.clone();

        for command in all_commands() {
            let first = reduce(&state, command.clone());
            let second = reduce(&state, command);
            assert_eq!(first, second);
            assert_eq!(state, before);
        }
    }

    #[test]
    fn set_users_clears_loading_and_error() {
        let state = DirectoryState {
            users: vec![],
            loading: true,
            error: Some("old".into()),
        };
        let next = reduce(&state, Command::SetUsers(vec![bob()]));
        assert_eq!(next.users, vec![bob()]);
        assert!(!next.loading);
        assert_eq!(next.error, None);
    }

    #[test]
    fn add_user_prepends() {
        let state = loaded();
        let new_user = User::new(99, "Zed", "z@x.com");
        let next = reduce(&state, Command::AddUser(new_user.clone()));

        assert_eq!(next.users.len(), state.users.len() + 1);
        assert_eq!(next.users[0], new_user);
        assert_eq!(next.user(99), Some(&new_user));
        assert_eq!(&next.users[1..], &state.users[..]);
    }

    #[test]
    fn update_user_replaces_matching_id_in_place() {
        let renamed = User::new(2, "Anna", "anna@x.com");
        let next = reduce(&loaded(), Command::UpdateUser(renamed.clone()));
        assert_eq!(next.users, vec![bob(), renamed]);
    }

    #[test]
    fn update_user_without_match_is_noop() {
        let state = loaded();
        let next = reduce(&state, Command::UpdateUser(User::new(42, "Nobody", "")));
        assert_eq!(next, state);
    }

    #[test]
    fn delete_user_removes_at_most_one() {
        let state = loaded();
        let next = reduce(&state, Command::DeleteUser(1));
        assert_eq!(next.users, vec![ann()]);

        let missing = reduce(&state, Command::DeleteUser(42));
        assert_eq!(missing.users, state.users);
    }

    #[test]
    fn set_loading_touches_only_loading() {
        let mut state = loaded();
        state.error = Some("kept".into());
        let next = reduce(&state, Command::SetLoading(true));
        assert!(next.loading);
        assert_eq!(next.error.as_deref(), Some("kept"));
        assert_eq!(next.users, state.users);
    }

    #[test]
    fn set_error_clears_loading() {
        let state = reduce(&loaded(), Command::SetLoading(true));
        let next = reduce(&state, Command::SetError(FETCH_ERROR_MESSAGE.into()));
        assert!(!next.loading);
        assert_eq!(next.error.as_deref(), Some(FETCH_ERROR_MESSAGE));
        assert_eq!(next.users, state.users);
    }

    #[test]
    fn ids_stay_unique_across_command_sequence() {
        let mut store = DirectoryStore::new();
        for command in all_commands() {
            store.dispatch(command);
            let ids: HashSet<_> = store.users().iter().map(|u| u.id).collect();
            assert_eq!(ids.len(), store.users().len());
        }
    }

    #[test]
    fn dispatch_swaps_snapshot_and_bumps_revision() {
        let mut store = DirectoryStore::new();
        let before = store.snapshot();

        store.dispatch(Command::AddUser(bob()));

        let after = store.snapshot();
        assert!(!Rc::ptr_eq(&before, &after));
        assert!(before.users.is_empty());
        assert_eq!(after.users, vec![bob()]);
        assert_eq!(store.revision(), 1);
        assert!(Rc::ptr_eq(&after, &store.snapshot()));
    }

    #[test]
    fn listeners_see_each_installed_state() {
        use std::cell::RefCell;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = DirectoryStore::new();
        let sink = Rc::clone(&seen);
        store.subscribe(move |state| sink.borrow_mut().push((state.loading, state.users.len())));

        store.dispatch(Command::SetLoading(true));
        store.dispatch(Command::SetUsers(vec![bob(), ann()]));
        store.dispatch(Command::DeleteUser(1));

        assert_eq!(*seen.borrow(), vec![(true, 0), (false, 2), (false, 1)]);
    }
}
