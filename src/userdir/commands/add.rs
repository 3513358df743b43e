use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DirectoryError, Result};
use crate::form::NewUserForm;
use crate::store::{Command, DirectoryStore};

pub fn run(store: &mut DirectoryStore, form: &NewUserForm, now_millis: i64) -> Result<CmdResult> {
    let user = form
        .submit(store.users(), now_millis)
        .map_err(DirectoryError::Validation)?;

    store.dispatch(Command::AddUser(user.clone()));

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "User added (#{}): {}",
        user.id, user.name
    )));
    Ok(result.with_affected_users(vec![user]))
}
