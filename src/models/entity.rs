//! Autotask entity projections.
//!
//! Vendor payloads stay as loosely-typed JSON. Each entity kind knows which
//! handful of fields matter for a human summary and how to name a record.

use serde_json::Value;

/// The Autotask entities exposed through the tool surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A service desk ticket.
    Ticket,
    /// A note attached to a ticket.
    TicketNote,
    /// A customer company (account).
    Company,
    /// A person at a customer company.
    Contact,
    /// An internal user (technician).
    Resource,
    /// Time logged against a ticket.
    TimeEntry,
}

impl EntityKind {
    /// Singular display label.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Ticket => "Ticket",
            EntityKind::TicketNote => "Ticket note",
            EntityKind::Company => "Company",
            EntityKind::Contact => "Contact",
            EntityKind::Resource => "Resource",
            EntityKind::TimeEntry => "Time entry",
        }
    }

    /// Plural form used in list headings.
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Ticket => "tickets",
            EntityKind::TicketNote => "ticket notes",
            EntityKind::Company => "companies",
            EntityKind::Contact => "contacts",
            EntityKind::Resource => "resources",
            EntityKind::TimeEntry => "time entries",
        }
    }

    /// Fields shown as bullets for a single record: (label, vendor field).
    pub fn summary_fields(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            EntityKind::Ticket => &[
                ("ID", "id"),
                ("Ticket Number", "ticketNumber"),
                ("Title", "title"),
                ("Status", "status"),
                ("Priority", "priority"),
                ("Assigned To", "assignedResourceID"),
            ],
            EntityKind::TicketNote => &[
                ("ID", "id"),
                ("Ticket", "ticketID"),
                ("Title", "title"),
                ("Note Type", "noteType"),
            ],
            EntityKind::Company => &[
                ("ID", "id"),
                ("Name", "companyName"),
                ("Phone", "phone"),
                ("City", "city"),
            ],
            EntityKind::Contact => &[
                ("ID", "id"),
                ("Email", "emailAddress"),
                ("Phone", "phone"),
                ("Company", "companyID"),
            ],
            EntityKind::Resource => &[
                ("ID", "id"),
                ("Email", "email"),
                ("Username", "userName"),
                ("Active", "isActive"),
            ],
            EntityKind::TimeEntry => &[
                ("ID", "id"),
                ("Ticket", "ticketID"),
                ("Resource", "resourceID"),
                ("Hours Worked", "hoursWorked"),
                ("Date", "dateWorked"),
            ],
        }
    }

    /// The identifying name of a record, used in headings and list entries.
    pub fn display_name(&self, record: &Value) -> String {
        let name = match self {
            EntityKind::Ticket | EntityKind::TicketNote => text_field(record, "title"),
            EntityKind::Company => text_field(record, "companyName"),
            EntityKind::Contact | EntityKind::Resource => person_name(record),
            EntityKind::TimeEntry => text_field(record, "summaryNotes"),
        };
        name.unwrap_or_else(|| format!("Untitled {}", self.label().to_lowercase()))
    }
}

/// Renders a scalar JSON field for display; `None` if absent or null.
pub fn text_field(record: &Value, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.trim().to_string()),
        Value::Bool(b) => Some(if *b { "Yes" } else { "No" }.to_string()),
        other => Some(other.to_string()),
    }
}

fn person_name(record: &Value) -> Option<String> {
    let first = text_field(record, "firstName");
    let last = text_field(record, "lastName");
    match (first, last) {
        (Some(f), Some(l)) => Some(format!("{} {}", f, l)),
        (Some(n), None) | (None, Some(n)) => Some(n),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_field_variants() {
        let record = json!({"a": "  x ", "b": 5, "c": null, "d": true, "e": ""});
        assert_eq!(text_field(&record, "a").as_deref(), Some("x"));
        assert_eq!(text_field(&record, "b").as_deref(), Some("5"));
        assert_eq!(text_field(&record, "c"), None);
        assert_eq!(text_field(&record, "d").as_deref(), Some("Yes"));
        assert_eq!(text_field(&record, "e"), None);
        assert_eq!(text_field(&record, "missing"), None);
    }

    #[test]
    fn test_display_name_per_kind() {
        assert_eq!(
            EntityKind::Company.display_name(&json!({"companyName": "Tech Corp"})),
            "Tech Corp"
        );
        assert_eq!(
            EntityKind::Contact.display_name(&json!({"firstName": "Ada", "lastName": "Lovelace"})),
            "Ada Lovelace"
        );
        assert_eq!(
            EntityKind::Resource.display_name(&json!({"lastName": "Hopper"})),
            "Hopper"
        );
        assert_eq!(
            EntityKind::Ticket.display_name(&json!({"id": 1})),
            "Untitled ticket"
        );
    }

    #[test]
    fn test_summary_fields_within_bounds() {
        for kind in [
            EntityKind::Ticket,
            EntityKind::TicketNote,
            EntityKind::Company,
            EntityKind::Contact,
            EntityKind::Resource,
            EntityKind::TimeEntry,
        ] {
            let n = kind.summary_fields().len();
            assert!((2..=6).contains(&n), "{:?} has {} fields", kind, n);
            assert_eq!(kind.summary_fields()[0].1, "id");
        }
    }
}
