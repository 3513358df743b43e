//! # Add-User Form
//!
//! [`NewUserForm`] collects every field of a [`User`] as free text. Submitting it:
//!
//! 1. Checks the required fields (blank after trimming counts as missing) and reports
//!    every missing one at once, keyed by its dotted path (`address.city`).
//! 2. Trims every string.
//! 3. Prefixes `https://` to the website when it carries no scheme.
//! 4. Allocates an id from the current time that is strictly greater than every id
//!    already in the directory.
//!
//! A rejected form produces no user, so nothing reaches the store.

use crate::model::{Address, Company, Geo, User, UserId};
use std::fmt;

/// Dotted paths of the required fields, in form order.
pub const REQUIRED_FIELDS: [&str; 9] = [
    "name",
    "username",
    "email",
    "phone",
    "website",
    "address.street",
    "address.city",
    "address.zipcode",
    "company.name",
];

/// Every field path, in form order, with the prompt shown for it.
pub const FORM_FIELDS: [(&str, &str); 14] = [
    ("name", "Name"),
    ("username", "Username"),
    ("email", "Email"),
    ("phone", "Phone"),
    ("website", "Website"),
    ("address.street", "Street"),
    ("address.suite", "Suite"),
    ("address.city", "City"),
    ("address.zipcode", "Zipcode"),
    ("address.geo.lat", "Latitude"),
    ("address.geo.lng", "Longitude"),
    ("company.name", "Company name"),
    ("company.catchPhrase", "Catch phrase"),
    ("company.bs", "Business"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    fn push(&mut self, field: &str) {
        let leaf = field.rsplit('.').next().unwrap_or(field);
        self.errors.push(FieldError {
            field: field.to_string(),
            message: format!("{} is required", leaf),
        });
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUserForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub lat: String,
    pub lng: String,
    pub company_name: String,
    pub catch_phrase: String,
    pub bs: String,
}

impl NewUserForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable access by dotted path. Unknown paths yield `None`.
    pub fn field_mut(&mut self, path: &str) -> Option<&mut String> {
        match path {
            "name" => Some(&mut self.name),
            "username" => Some(&mut self.username),
            "email" => Some(&mut self.email),
            "phone" => Some(&mut self.phone),
            "website" => Some(&mut self.website),
            "address.street" => Some(&mut self.street),
            "address.suite" => Some(&mut self.suite),
            "address.city" => Some(&mut self.city),
            "address.zipcode" => Some(&mut self.zipcode),
            "address.geo.lat" => Some(&mut self.lat),
            "address.geo.lng" => Some(&mut self.lng),
            "company.name" => Some(&mut self.company_name),
            "company.catchPhrase" => Some(&mut self.catch_phrase),
            "company.bs" => Some(&mut self.bs),
            _ => None,
        }
    }

    pub fn field(&self, path: &str) -> Option<&str> {
        let value = match path {
            "name" => &self.name,
            "username" => &self.username,
            "email" => &self.email,
            "phone" => &self.phone,
            "website" => &self.website,
            "address.street" => &self.street,
            "address.suite" => &self.suite,
            "address.city" => &self.city,
            "address.zipcode" => &self.zipcode,
            "address.geo.lat" => &self.lat,
            "address.geo.lng" => &self.lng,
            "company.name" => &self.company_name,
            "company.catchPhrase" => &self.catch_phrase,
            "company.bs" => &self.bs,
            _ => return None,
        };
        Some(value.as_str())
    }

    pub fn set(mut self, path: &str, value: impl Into<String>) -> Self {
        if let Some(slot) = self.field_mut(path) {
            *slot = value.into();
        }
        self
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        for path in REQUIRED_FIELDS {
            let blank = self.field(path).map_or(true, |v| v.trim().is_empty());
            if blank {
                errors.push(path);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validates and builds the user. `now_millis` seeds the id.
    pub fn submit(&self, existing: &[User], now_millis: i64) -> Result<User, FieldErrors> {
        self.validate()?;

        Ok(User {
            id: next_id(existing, now_millis),
            name: self.name.trim().to_string(),
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            website: normalize_website(&self.website),
            address: Address {
                street: self.street.trim().to_string(),
                suite: self.suite.trim().to_string(),
                city: self.city.trim().to_string(),
                zipcode: self.zipcode.trim().to_string(),
                geo: Geo {
                    lat: self.lat.trim().to_string(),
                    lng: self.lng.trim().to_string(),
                },
            },
            company: Company {
                name: self.company_name.trim().to_string(),
                catch_phrase: self.catch_phrase.trim().to_string(),
                bs: self.bs.trim().to_string(),
            },
        })
    }
}

/// Time-based id, bumped past the largest existing id when the clock would collide.
/// When the largest id is already `UserId::MAX` the lowest free positive id is used.
pub fn next_id(existing: &[User], now_millis: i64) -> UserId {
    match existing.iter().map(|u| u.id).max() {
        Some(max) if max >= now_millis => max
            .checked_add(1)
            .unwrap_or_else(|| lowest_free_id(existing)),
        _ => now_millis,
    }
}

fn lowest_free_id(existing: &[User]) -> UserId {
    let mut taken: Vec<UserId> = existing.iter().map(|u| u.id).filter(|id| *id > 0).collect();
    taken.sort_unstable();
    taken.dedup();

    let mut candidate = 1;
    for id in taken {
        if id != candidate {
            break;
        }
        candidate += 1;
    }
    candidate
}

pub fn normalize_website(raw: &str) -> String {
    let website = raw.trim();
    if has_scheme(website) {
        website.to_string()
    } else {
        format!("https://{}", website)
    }
}

fn has_scheme(website: &str) -> bool {
    match website.split_once("://") {
        Some((scheme, _)) => {
            let mut chars = scheme.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::fixtures;

    fn complete_form() -> NewUserForm {
        NewUserForm::new()
            .set("name", "  Jane Doe ")
            .set("username", "jdoe")
            .set("email", "jane@example.com ")
            .set("phone", "555-0100")
            .set("website", "example.com")
            .set("address.street", "1 Main St")
            .set("address.city", "Springfield")
            .set("address.zipcode", "12345")
            .set("company.name", "Doe Inc")
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let errors = NewUserForm::new().validate().unwrap_err();
        assert_eq!(errors.len(), REQUIRED_FIELDS.len());
        assert_eq!(errors.get("name"), Some("name is required"));
        assert_eq!(errors.get("address.street"), Some("street is required"));
        assert_eq!(errors.get("company.name"), Some("name is required"));
        assert_eq!(errors.get("address.suite"), None);
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let form = complete_form().set("address.city", "   ");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("address.city"), Some("city is required"));
    }

    #[test]
    fn optional_fields_may_stay_empty() {
        assert!(complete_form().validate().is_ok());
    }

    #[test]
    fn submit_trims_strings() {
        let user = complete_form()
            .set("address.geo.lat", " 1.5 ")
            .submit(&[], 1_000)
            .unwrap();
        assert_eq!(user.name, "Jane Doe");
        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.address.geo.lat, "1.5");
        assert_eq!(user.address.suite, "");
        assert_eq!(user.company.catch_phrase, "");
    }

    #[test]
    fn website_without_scheme_gets_https() {
        let user = complete_form().submit(&[], 1_000).unwrap();
        assert_eq!(user.website, "https://example.com");
    }

    #[test]
    fn website_with_scheme_is_unchanged() {
        let user = complete_form()
            .set("website", "https://example.com")
            .submit(&[], 1_000)
            .unwrap();
        assert_eq!(user.website, "https://example.com");
        assert_eq!(normalize_website("http://example.com"), "http://example.com");
    }

    #[test]
    fn host_and_port_is_not_a_scheme() {
        assert_eq!(normalize_website("localhost:8080"), "https://localhost:8080");
        assert_eq!(normalize_website("://oops"), "https://://oops");
    }

    #[test]
    fn id_comes_from_clock_when_free() {
        let users = fixtures::bob_and_ann();
        assert_eq!(next_id(&users, 1_700_000_000_000), 1_700_000_000_000);
    }

    #[test]
    fn id_is_bumped_past_collisions() {
        let mut users = fixtures::bob_and_ann();
        users[0].id = 5_000;
        assert_eq!(next_id(&users, 5_000), 5_001);
        assert_eq!(next_id(&users, 4_000), 5_001);
    }

    #[test]
    fn id_at_upper_bound_falls_back_to_lowest_free() {
        let users = vec![User::new(UserId::MAX, "Max", "max@x.com")];
        assert_eq!(next_id(&users, 1_700_000_000_000), 1);

        let users = vec![
            User::new(2, "Two", "two@x.com"),
            User::new(1, "One", "one@x.com"),
            User::new(-4, "Neg", "neg@x.com"),
            User::new(UserId::MAX, "Max", "max@x.com"),
        ];
        assert_eq!(next_id(&users, 5), 3);
    }

    #[test]
    fn rejected_form_builds_nothing() {
        let result = NewUserForm::new().set("name", "Only Name").submit(&[], 1);
        assert!(result.is_err());
    }

    #[test]
    fn field_errors_display_lists_paths() {
        let errors = complete_form()
            .set("email", "")
            .set("company.name", "")
            .validate()
            .unwrap_err();
        assert_eq!(
            errors.to_string(),
            "email: email is required, company.name: name is required"
        );
    }

    #[test]
    fn unknown_paths_are_ignored() {
        let form = NewUserForm::new().set("id", "42").set("nickname", "x");
        assert_eq!(form, NewUserForm::new());
    }
}
