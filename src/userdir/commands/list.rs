use crate::commands::{CmdMessage, CmdResult};
use crate::store::DirectoryStore;
use crate::view::{derive_with, ViewQuery};

pub fn run(store: &DirectoryStore, query: &ViewQuery) -> CmdResult {
    let listed: Vec<_> = derive_with(store.users(), query)
        .into_iter()
        .cloned()
        .collect();

    let mut result = CmdResult::default();
    if query.is_searching() {
        let count = listed.len();
        let plural = if count == 1 { "" } else { "s" };
        result.add_message(CmdMessage::info(format!("{} user{} found", count, plural)));
        if listed.is_empty() {
            result.add_message(CmdMessage::warning(format!(
                "No users match \"{}\". Try a different search term.",
                query.search_term
            )));
        }
    } else if listed.is_empty() {
        result.add_message(CmdMessage::info("No users available."));
    }

    result.with_listed_users(listed).with_query(query.clone())
}
