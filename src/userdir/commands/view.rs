use crate::commands::{CmdMessage, CmdResult};
use crate::model::UserId;
use crate::store::DirectoryStore;

/// Detail lookup. A missing id is an ordinary result with a warning, not an error.
pub fn run(store: &DirectoryStore, id: UserId) -> CmdResult {
    match store.user(id) {
        Some(user) => CmdResult::default().with_listed_users(vec![user.clone()]),
        None => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::warning(format!(
                "User not found: #{}. The user you're looking for doesn't exist.",
                id
            )));
            result
        }
    }
}
