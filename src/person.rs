use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

use crate::error::{require_text, Result, ValidationError};

pub const MAX_AGE: u32 = 120;
pub const ADULT_AGE: u32 = 18;

/// Issues person ids: 1, 2, 3, ... one per construction, never reused.
///
/// Passed into every constructor instead of living in a global, so a test
/// can start from a fresh sequence.
#[derive(Debug)]
pub struct IdSequence {
    next: AtomicU64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        IdSequence {
            next: AtomicU64::new(first),
        }
    }

    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Number of ids handed out so far, counting from 1.
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed).saturating_sub(1)
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot inside the
/// domain with text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub(crate) fn check_age(age: u32) -> Result<()> {
    if age > MAX_AGE {
        return Err(ValidationError::AgeOutOfRange(age));
    }
    Ok(())
}

pub(crate) fn check_email(email: &str) -> Result<()> {
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct Person {
    id: u64,
    name: String,
    age: u32,
    email: String,
    created_at: DateTime<Utc>,
}

impl Person {
    /// Validates before drawing an id, so a rejected person does not
    /// consume one.
    pub fn new(ids: &IdSequence, name: &str, age: u32, email: &str) -> Result<Self> {
        require_text("name", name)?;
        check_age(age)?;
        check_email(email)?;

        Ok(Person {
            id: ids.next_id(),
            name: name.to_string(),
            age,
            email: email.to_string(),
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) -> Result<()> {
        require_text("name", name)?;
        self.name = name.to_string();
        Ok(())
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn set_age(&mut self, age: u32) -> Result<()> {
        check_age(age)?;
        self.age = age;
        Ok(())
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: &str) -> Result<()> {
        check_email(email)?;
        self.email = email.to_string();
        Ok(())
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_adult(&self) -> bool {
        self.age >= ADULT_AGE
    }

    pub fn introduce(&self, formal: bool) -> String {
        if formal {
            format!("Hello, my name is {}.", self.name)
        } else {
            format!("Hi! I'm {}, {} years old.", self.name, self.age)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_and_never_reused() {
        let ids = IdSequence::new();
        let first = Person::new(&ids, "Alice Johnson", 20, "alice@university.edu").unwrap();
        drop(first);
        let second = Person::new(&ids, "Bob Smith", 17, "bob@university.edu").unwrap();
        assert_eq!(second.id(), 2);
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn rejected_person_does_not_consume_id() {
        let ids = IdSequence::new();
        assert!(Person::new(&ids, "Ghost", 20, "invalid-email").is_err());
        assert!(Person::new(&ids, "", 20, "ghost@university.edu").is_err());
        assert!(Person::new(&ids, "Old", 121, "old@university.edu").is_err());
        assert_eq!(ids.issued(), 0);
        let person = Person::new(&ids, "Alice", 20, "alice@university.edu").unwrap();
        assert_eq!(person.id(), 1);
    }

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("emma@university.edu"));
        assert!(is_valid_email("emma.wilson@mail.university.edu"));
        assert!(!is_valid_email("emma@university"));
        assert!(!is_valid_email("@university.edu"));
        assert!(!is_valid_email("emma@.edu"));
        assert!(!is_valid_email("emma@university."));
        assert!(!is_valid_email("emma wilson@university.edu"));
        assert!(!is_valid_email("emma@@university.edu"));
    }

    #[test]
    fn set_email_validates() {
        let ids = IdSequence::new();
        let mut person = Person::new(&ids, "Emma Wilson", 19, "emma@university.edu").unwrap();
        person.set_email("emma.wilson@university.edu").unwrap();
        assert_eq!(person.email(), "emma.wilson@university.edu");

        let err = person.set_email("invalid-email").unwrap_err();
        assert_eq!(err.code(), "INVALID_FORMAT");
        assert_eq!(person.email(), "emma.wilson@university.edu");
    }

    #[test]
    fn name_and_age_setters_validate() {
        let ids = IdSequence::new();
        let mut person = Person::new(&ids, "Emma Wilson", 19, "emma@university.edu").unwrap();

        assert_eq!(person.set_name("   "), Err(ValidationError::blank("name")));
        assert_eq!(person.set_age(500), Err(ValidationError::AgeOutOfRange(500)));
        assert_eq!(person.name(), "Emma Wilson");
        assert_eq!(person.age(), 19);

        person.set_name("Emma Wilson-Park").unwrap();
        person.set_age(120).unwrap();
        assert_eq!(person.name(), "Emma Wilson-Park");
        assert_eq!(person.age(), 120);
    }

    #[test]
    fn adulthood_and_introductions() {
        let ids = IdSequence::new();
        let alice = Person::new(&ids, "Alice Johnson", 20, "alice@university.edu").unwrap();
        let bob = Person::new(&ids, "Bob Smith", 17, "bob@university.edu").unwrap();
        assert!(alice.is_adult());
        assert!(!bob.is_adult());
        assert_eq!(bob.introduce(false), "Hi! I'm Bob Smith, 17 years old.");
        assert_eq!(alice.introduce(true), "Hello, my name is Alice Johnson.");
    }
}
