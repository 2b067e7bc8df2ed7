//! Person Entity
//!
//! A team member assessed with GWC (Get it / Want it / Capacity) against a seat.

use serde::{Deserialize, Serialize};
use super::entity::{Entity, EntityKind};

/// Functional seat on the accountability chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Seat {
    Visionary,
    Integrator,
    Sales,
    Marketing,
    Operations,
    Finance,
    Admin,
    #[default]
    #[serde(other)]
    Unassigned,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    pub role: String,
    pub seat: Seat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub get_it: bool,
    pub want_it: bool,
    pub capacity: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Person {
    /// Right person in the right seat: all three GWC flags set
    pub fn is_right_seat(&self) -> bool {
        self.get_it && self.want_it && self.capacity
    }
}

impl Entity for Person {
    const KIND: EntityKind = EntityKind::Person;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Owner/assignee selection entry projected from a person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
}

impl From<&Person> for RosterEntry {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id.clone(),
            name: person.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_parses_names() {
        let seat: Seat = serde_json::from_str("\"Operations\"").unwrap();
        assert_eq!(seat, Seat::Operations);
        let seat: Seat = serde_json::from_str("\"\"").unwrap();
        assert_eq!(seat, Seat::Unassigned);
    }

    #[test]
    fn test_right_seat_needs_all_flags() {
        let mut person = Person {
            get_it: true,
            want_it: true,
            ..Default::default()
        };
        assert!(!person.is_right_seat());
        person.capacity = true;
        assert!(person.is_right_seat());
    }
}
