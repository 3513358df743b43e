use crate::commands::{CmdMessage, CmdResult};
use crate::model::UserId;
use crate::store::{Command, DirectoryStore};

pub fn run(store: &mut DirectoryStore, id: UserId) -> CmdResult {
    let mut result = CmdResult::default();

    let Some(user) = store.user(id).cloned() else {
        result.add_message(CmdMessage::warning(format!("User not found: #{}", id)));
        return result;
    };

    store.dispatch(Command::DeleteUser(id));
    result.add_message(CmdMessage::success(format!(
        "User deleted (#{}): {}",
        id, user.name
    )));
    result.with_affected_users(vec![user])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::fixtures;

    #[test]
    fn removes_user() {
        let mut store = DirectoryStore::new();
        store.dispatch(Command::SetUsers(fixtures::bob_and_ann()));

        let result = run(&mut store, 1);

        assert_eq!(store.users().len(), 1);
        assert_eq!(store.user(1), None);
        assert_eq!(result.affected_users[0].name, "Bob");
        assert_eq!(result.messages[0].content, "User deleted (#1): Bob");
    }

    #[test]
    fn missing_id_changes_nothing() {
        let mut store = DirectoryStore::new();
        store.dispatch(Command::SetUsers(fixtures::bob_and_ann()));

        let result = run(&mut store, 77);

        assert_eq!(store.users().len(), 2);
        assert!(result.affected_users.is_empty());
    }
}
