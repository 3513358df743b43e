use super::UserSource;
use crate::error::{DirectoryError, Result};
use crate::model::User;
use std::cell::Cell;

/// In-memory source for testing and development.
/// Does NOT touch the network.
#[derive(Debug, Default)]
pub struct InMemorySource {
    users: Vec<User>,
    failure: Option<String>,
    reads: Cell<usize>,
}

impl InMemorySource {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }

    /// A source whose every read fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl UserSource for InMemorySource {
    fn fetch_users(&self) -> Result<Vec<User>> {
        self.reads.set(self.reads.get() + 1);
        match &self.failure {
            Some(reason) => Err(DirectoryError::Fetch(reason.clone())),
            None => Ok(self.users.clone()),
        }
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::model::{Address, Company, Geo, User};

    /// Bob (id 1, Acme) and Ann (id 2, Beta), in that order.
    pub fn bob_and_ann() -> Vec<User> {
        vec![
            User::new(1, "Bob", "b@x.com").with_company("Acme"),
            User::new(2, "Ann", "a@x.com").with_company("Beta"),
        ]
    }

    pub fn full_user(id: i64, name: &str) -> User {
        let handle = name.to_lowercase().replace(' ', ".");
        User {
            id,
            name: name.to_string(),
            username: handle.clone(),
            email: format!("{}@example.com", handle),
            phone: "1-770-736-8031".to_string(),
            website: format!("{}.org", handle),
            address: Address {
                street: "Kulas Light".to_string(),
                suite: "Apt. 556".to_string(),
                city: "Gwenborough".to_string(),
                zipcode: "92998-3874".to_string(),
                geo: Geo {
                    lat: "-37.3159".to_string(),
                    lng: "81.1496".to_string(),
                },
            },
            company: Company {
                name: format!("{} Holdings", name),
                catch_phrase: "Multi-layered client-server neural-net".to_string(),
                bs: "harness real-time e-markets".to_string(),
            },
        }
    }

    pub fn directory(names: &[&str]) -> Vec<User> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| full_user(i as i64 + 1, name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_reads() {
        let source = InMemorySource::new(fixtures::bob_and_ann());
        assert_eq!(source.reads(), 0);
        assert_eq!(source.fetch_users().unwrap().len(), 2);
        assert_eq!(source.reads(), 1);
    }

    #[test]
    fn failing_source_reports_reason() {
        let source = InMemorySource::failing("offline");
        let err = source.fetch_users().unwrap_err();
        assert!(matches!(err, DirectoryError::Fetch(reason) if reason == "offline"));
        assert_eq!(source.reads(), 1);
    }
}
