use crate::commands::{CmdMessage, CmdResult};
use crate::model::User;
use crate::store::{Command, DirectoryStore};

pub fn run(store: &mut DirectoryStore, user: User) -> CmdResult {
    let mut result = CmdResult::default();

    if store.user(user.id).is_none() {
        result.add_message(CmdMessage::warning(format!("User not found: #{}", user.id)));
        return result;
    }

    store.dispatch(Command::UpdateUser(user.clone()));
    result.add_message(CmdMessage::success(format!(
        "User updated (#{}): {}",
        user.id, user.name
    )));
    result.with_affected_users(vec![user])
}
