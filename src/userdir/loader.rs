//! The one-shot routine that fills the store from a [`UserSource`].
//!
//! Calling it more than once per application is a caller bug; the API facade guards
//! against that (see [`crate::api::DirectoryApi::initialize`]).

use crate::source::UserSource;
use crate::store::{Command, DirectoryStore, FETCH_ERROR_MESSAGE};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { count: usize },
    Failed { message: String },
}

pub fn run<S: UserSource>(source: &S, store: &mut DirectoryStore) -> LoadOutcome {
    info!(source = %source.describe(), "loading users");
    store.dispatch(Command::SetLoading(true));

    match source.fetch_users() {
        Ok(users) => {
            let count = users.len();
            store.dispatch(Command::SetUsers(users));
            info!(count, "users loaded");
            LoadOutcome::Loaded { count }
        }
        Err(e) => {
            warn!(error = %e, "error fetching users");
            store.dispatch(Command::SetError(FETCH_ERROR_MESSAGE.to_string()));
            LoadOutcome::Failed {
                message: FETCH_ERROR_MESSAGE.to_string(),
            }
        }
    }
}
