//! Entity operations: the tool catalog as a closed set of calls.
//!
//! A [`ToolCall`] carries the typed arguments of one tool. Turning it into a
//! [`VendorRequest`] is pure: it validates the arguments and shapes the
//! Autotask query or body, failing with `AutotaskError::Validation` before
//! anything touches the network.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde_json::{json, Map, Value};

use super::inputs::{
    AddTicketNoteInput, CreateTicketInput, CreateTimeEntryInput, GetCompanyInput,
    GetContactInput, GetTicketInput, ResponseFormat, SearchCompaniesInput, SearchContactsInput,
    SearchResourcesInput, SearchTicketsInput, UpdateTicketInput,
};
use crate::autotask_client::VendorRequest;
use crate::error::AutotaskError;
use crate::format::ResponseShape;
use crate::models::{EntityKind, FilterCondition, QueryFilter, DEFAULT_RECORDS, MAX_RECORDS_LIMIT};

/// Maximum title length accepted by Autotask.
const MAX_TITLE_LENGTH: usize = 255;

/// Title used for notes when the caller gives none.
const DEFAULT_NOTE_TITLE: &str = "Note";

/// One tool invocation with its typed arguments.
#[derive(Debug, Clone)]
pub enum ToolCall {
    /// Search tickets by filters.
    SearchTickets(SearchTicketsInput),
    /// Fetch one ticket.
    GetTicket(GetTicketInput),
    /// Create a ticket.
    CreateTicket(CreateTicketInput),
    /// Patch a ticket.
    UpdateTicket(UpdateTicketInput),
    /// Add a note to a ticket.
    AddTicketNote(AddTicketNoteInput),
    /// Search companies by name.
    SearchCompanies(SearchCompaniesInput),
    /// Fetch one company.
    GetCompany(GetCompanyInput),
    /// Search contacts.
    SearchContacts(SearchContactsInput),
    /// Fetch one contact.
    GetContact(GetContactInput),
    /// Search resources (internal users).
    SearchResources(SearchResourcesInput),
    /// Log time against a ticket.
    CreateTimeEntry(CreateTimeEntryInput),
}

impl ToolCall {
    /// Trims string arguments; blank optional strings become absent.
    #[must_use]
    pub fn sanitize(self) -> Self {
        match self {
            ToolCall::SearchTickets(i) => ToolCall::SearchTickets(i.sanitize()),
            ToolCall::CreateTicket(i) => ToolCall::CreateTicket(i.sanitize()),
            ToolCall::UpdateTicket(i) => ToolCall::UpdateTicket(i.sanitize()),
            ToolCall::AddTicketNote(i) => ToolCall::AddTicketNote(i.sanitize()),
            ToolCall::SearchCompanies(i) => ToolCall::SearchCompanies(i.sanitize()),
            ToolCall::SearchContacts(i) => ToolCall::SearchContacts(i.sanitize()),
            ToolCall::SearchResources(i) => ToolCall::SearchResources(i.sanitize()),
            ToolCall::CreateTimeEntry(i) => ToolCall::CreateTimeEntry(i.sanitize()),
            other => other,
        }
    }

    /// The output format the caller asked for.
    pub fn response_format(&self) -> ResponseFormat {
        match self {
            ToolCall::SearchTickets(i) => i.response_format,
            ToolCall::GetTicket(i) => i.response_format,
            ToolCall::CreateTicket(i) => i.response_format,
            ToolCall::UpdateTicket(i) => i.response_format,
            ToolCall::AddTicketNote(i) => i.response_format,
            ToolCall::SearchCompanies(i) => i.response_format,
            ToolCall::GetCompany(i) => i.response_format,
            ToolCall::SearchContacts(i) => i.response_format,
            ToolCall::GetContact(i) => i.response_format,
            ToolCall::SearchResources(i) => i.response_format,
            ToolCall::CreateTimeEntry(i) => i.response_format,
        }
    }

    /// The entity this call reads or writes.
    pub fn entity(&self) -> EntityKind {
        match self {
            ToolCall::SearchTickets(_)
            | ToolCall::GetTicket(_)
            | ToolCall::CreateTicket(_)
            | ToolCall::UpdateTicket(_) => EntityKind::Ticket,
            ToolCall::AddTicketNote(_) => EntityKind::TicketNote,
            ToolCall::SearchCompanies(_) | ToolCall::GetCompany(_) => EntityKind::Company,
            ToolCall::SearchContacts(_) | ToolCall::GetContact(_) => EntityKind::Contact,
            ToolCall::SearchResources(_) => EntityKind::Resource,
            ToolCall::CreateTimeEntry(_) => EntityKind::TimeEntry,
        }
    }

    /// The shape of a successful vendor payload for this call.
    pub fn shape(&self) -> ResponseShape {
        match self {
            ToolCall::SearchTickets(_)
            | ToolCall::SearchCompanies(_)
            | ToolCall::SearchContacts(_)
            | ToolCall::SearchResources(_) => ResponseShape::List,
            ToolCall::GetTicket(_) | ToolCall::GetCompany(_) | ToolCall::GetContact(_) => {
                ResponseShape::Single
            }
            ToolCall::CreateTicket(_)
            | ToolCall::AddTicketNote(_)
            | ToolCall::CreateTimeEntry(_) => ResponseShape::Created,
            ToolCall::UpdateTicket(_) => ResponseShape::Updated,
        }
    }

    /// Validates the arguments and builds the vendor request.
    ///
    /// # Errors
    ///
    /// Returns `AutotaskError::Validation` describing the first bad argument.
    pub fn to_request(&self) -> Result<VendorRequest, AutotaskError> {
        match self {
            ToolCall::SearchTickets(i) => search_tickets(i),
            ToolCall::GetTicket(i) => {
                let id = positive_id("ticket_id", i.ticket_id)?;
                Ok(VendorRequest::get(format!("Tickets/{}", id)))
            }
            ToolCall::CreateTicket(i) => create_ticket(i),
            ToolCall::UpdateTicket(i) => update_ticket(i),
            ToolCall::AddTicketNote(i) => add_ticket_note(i),
            ToolCall::SearchCompanies(i) => {
                let filter = QueryFilter::new()
                    .add_opt(i.name.clone(), |n| FilterCondition::contains("companyName", n))
                    .with_max_records(limit(i.limit)?);
                Ok(VendorRequest::query("Companies", &filter))
            }
            ToolCall::GetCompany(i) => {
                let id = positive_id("company_id", i.company_id)?;
                Ok(VendorRequest::get(format!("Companies/{}", id)))
            }
            ToolCall::SearchContacts(i) => search_contacts(i),
            ToolCall::GetContact(i) => {
                let id = positive_id("contact_id", i.contact_id)?;
                Ok(VendorRequest::get(format!("Contacts/{}", id)))
            }
            ToolCall::SearchResources(i) => search_resources(i),
            ToolCall::CreateTimeEntry(i) => create_time_entry(i),
        }
    }
}

fn search_tickets(input: &SearchTicketsInput) -> Result<VendorRequest, AutotaskError> {
    let company_id = optional_id("company_id", input.company_id)?;
    let resource_id = optional_id("assigned_resource_id", input.assigned_resource_id)?;
    let queue_id = optional_id("queue_id", input.queue_id)?;
    let priority = input.priority.map(validate_priority).transpose()?;

    let filter = QueryFilter::new()
        .add_opt(company_id, |v| FilterCondition::eq("companyID", v))
        .add_opt(input.status, |v| FilterCondition::eq("status", v))
        .add_opt(priority, |v| FilterCondition::eq("priority", v))
        .add_opt(resource_id, |v| FilterCondition::eq("assignedResourceID", v))
        .add_opt(queue_id, |v| FilterCondition::eq("queueID", v))
        .add_opt(input.keyword.clone(), |k| FilterCondition::contains("title", k))
        .with_max_records(limit(input.limit)?);

    Ok(VendorRequest::query("Tickets", &filter))
}

fn create_ticket(input: &CreateTicketInput) -> Result<VendorRequest, AutotaskError> {
    let company_id = positive_id("company_id", input.company_id)?;
    validate_title("title", &input.title)?;
    if input.description.is_empty() {
        return Err(AutotaskError::validation(
            "description is required and cannot be empty",
        ));
    }

    let mut body = Map::new();
    body.insert("companyID".into(), json!(company_id));
    body.insert("title".into(), json!(input.title));
    body.insert("description".into(), json!(input.description));
    body.insert(
        "priority".into(),
        json!(validate_priority(input.priority.unwrap_or(2))?),
    );
    body.insert("status".into(), json!(input.status.unwrap_or(1)));

    insert_id(&mut body, "assignedResourceID", "assigned_resource_id", input.assigned_resource_id)?;
    insert_id(&mut body, "queueID", "queue_id", input.queue_id)?;
    insert_id(&mut body, "contactID", "contact_id", input.contact_id)?;
    insert_id(&mut body, "issueType", "issue_type", input.issue_type)?;
    insert_id(&mut body, "subIssueType", "sub_issue_type", input.sub_issue_type)?;

    if let Some(due) = &input.due_date_time {
        validate_date_time("due_date_time", due)?;
        body.insert("dueDateTime".into(), json!(due));
    }

    Ok(VendorRequest::post("Tickets", Value::Object(body)))
}

fn update_ticket(input: &UpdateTicketInput) -> Result<VendorRequest, AutotaskError> {
    let ticket_id = positive_id("ticket_id", input.ticket_id)?;
    if !input.has_updates() {
        return Err(AutotaskError::validation(
            "at least one field must be provided for update (title, description, status, priority, assigned_resource_id or queue_id)",
        ));
    }

    let mut body = Map::new();
    body.insert("id".into(), json!(ticket_id));

    if let Some(title) = &input.title {
        validate_title("title", title)?;
        body.insert("title".into(), json!(title));
    }
    if let Some(description) = &input.description {
        body.insert("description".into(), json!(description));
    }
    if let Some(status) = input.status {
        body.insert("status".into(), json!(status));
    }
    if let Some(priority) = input.priority {
        body.insert("priority".into(), json!(validate_priority(priority)?));
    }
    insert_id(&mut body, "assignedResourceID", "assigned_resource_id", input.assigned_resource_id)?;
    insert_id(&mut body, "queueID", "queue_id", input.queue_id)?;

    Ok(VendorRequest::patch("Tickets", Value::Object(body)))
}

fn add_ticket_note(input: &AddTicketNoteInput) -> Result<VendorRequest, AutotaskError> {
    let ticket_id = positive_id("ticket_id", input.ticket_id)?;
    if input.note.is_empty() {
        return Err(AutotaskError::validation(
            "note is required and cannot be empty",
        ));
    }

    let title = input.title.as_deref().unwrap_or(DEFAULT_NOTE_TITLE);
    validate_title("title", title)?;

    let publish = input.publish.unwrap_or(1);
    if !(1..=3).contains(&publish) {
        return Err(AutotaskError::validation(format!(
            "publish must be 1, 2 or 3, got {}",
            publish
        )));
    }

    let body = json!({
        "ticketID": ticket_id,
        "title": title,
        "description": input.note,
        "noteType": input.note_type.unwrap_or(1),
        "publish": publish,
    });

    Ok(VendorRequest::post(format!("Tickets/{}/Notes", ticket_id), body))
}

fn search_contacts(input: &SearchContactsInput) -> Result<VendorRequest, AutotaskError> {
    let company_id = optional_id("company_id", input.company_id)?;

    let filter = QueryFilter::new()
        .add_opt(company_id, |v| FilterCondition::eq("companyID", v))
        .add_opt(input.email.clone(), |v| FilterCondition::contains("emailAddress", v))
        .add_opt(input.first_name.clone(), |v| FilterCondition::contains("firstName", v))
        .add_opt(input.last_name.clone(), |v| FilterCondition::contains("lastName", v))
        .with_max_records(limit(input.limit)?);

    Ok(VendorRequest::query("Contacts", &filter))
}

fn search_resources(input: &SearchResourcesInput) -> Result<VendorRequest, AutotaskError> {
    let active_only = input.active_only.unwrap_or(true).then_some(true);

    let filter = QueryFilter::new()
        .add_opt(input.email.clone(), |v| FilterCondition::eq("email", v))
        .add_opt(input.first_name.clone(), |v| FilterCondition::contains("firstName", v))
        .add_opt(input.last_name.clone(), |v| FilterCondition::contains("lastName", v))
        .add_opt(input.user_name.clone(), |v| FilterCondition::contains("userName", v))
        .add_opt(active_only, |v| FilterCondition::eq("isActive", v))
        .with_max_records(limit(input.limit)?);

    Ok(VendorRequest::query("Resources", &filter))
}

fn create_time_entry(input: &CreateTimeEntryInput) -> Result<VendorRequest, AutotaskError> {
    let ticket_id = positive_id("ticket_id", input.ticket_id)?;
    let resource_id = positive_id("resource_id", input.resource_id)?;
    let hours_worked = positive_hours("hours_worked", input.hours_worked)?;
    let hours_to_bill = match input.hours_to_bill {
        Some(h) => positive_hours("hours_to_bill", h)?,
        None => hours_worked,
    };

    let date_worked = match &input.date_worked {
        Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            AutotaskError::validation(format!(
                "date_worked must be in YYYY-MM-DD format, got {:?}",
                date.chars().take(30).collect::<String>()
            ))
        })?,
        None => Local::now().date_naive(),
    };
    let offset = offset_hours(input.offset_hours.unwrap_or(0.0))?;

    let mut body = Map::new();
    body.insert("ticketID".into(), json!(ticket_id));
    body.insert("resourceID".into(), json!(resource_id));
    body.insert("dateWorked".into(), json!(date_worked.format("%Y-%m-%d").to_string()));
    body.insert("hoursWorked".into(), json!(hours_worked));
    body.insert("hoursToBill".into(), json!(hours_to_bill));
    body.insert("timeEntryType".into(), json!(input.time_entry_type.unwrap_or(1)));
    body.insert("offsetHours".into(), json!(offset));

    if let Some(notes) = &input.summary_notes {
        body.insert("summaryNotes".into(), json!(notes));
    }
    if let Some(notes) = &input.internal_notes {
        body.insert("internalNotes".into(), json!(notes));
    }

    Ok(VendorRequest::post("TimeEntries", Value::Object(body)))
}

// ============================================================================
// Argument validation helpers
// ============================================================================

/// IDs are positive integers; anything else would produce a bogus path.
fn positive_id(field: &str, id: i64) -> Result<i64, AutotaskError> {
    if id <= 0 {
        return Err(AutotaskError::validation(format!(
            "{} must be a positive integer, got {}",
            field, id
        )));
    }
    Ok(id)
}

fn optional_id(field: &str, id: Option<i64>) -> Result<Option<i64>, AutotaskError> {
    id.map(|id| positive_id(field, id)).transpose()
}

fn insert_id(
    body: &mut Map<String, Value>,
    vendor_field: &str,
    field: &str,
    id: Option<i64>,
) -> Result<(), AutotaskError> {
    if let Some(id) = optional_id(field, id)? {
        body.insert(vendor_field.to_string(), json!(id));
    }
    Ok(())
}

fn validate_priority(priority: u32) -> Result<u32, AutotaskError> {
    if !(1..=4).contains(&priority) {
        return Err(AutotaskError::validation(format!(
            "priority must be between 1 (Low) and 4 (Critical), got {}",
            priority
        )));
    }
    Ok(priority)
}

fn validate_title(field: &str, title: &str) -> Result<(), AutotaskError> {
    if title.is_empty() {
        return Err(AutotaskError::validation(format!(
            "{} is required and cannot be empty",
            field
        )));
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LENGTH {
        return Err(AutotaskError::validation(format!(
            "{} exceeds maximum length of {} characters (got {} characters)",
            field, MAX_TITLE_LENGTH, len
        )));
    }
    Ok(())
}

fn validate_date_time(field: &str, value: &str) -> Result<(), AutotaskError> {
    let ok = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
        || chrono::DateTime::parse_from_rfc3339(value).is_ok();
    if !ok {
        return Err(AutotaskError::validation(format!(
            "{} must be an ISO 8601 date-time (YYYY-MM-DDTHH:MM:SS)",
            field
        )));
    }
    Ok(())
}

fn positive_hours(field: &str, hours: f64) -> Result<f64, AutotaskError> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(AutotaskError::validation(format!(
            "{} must be greater than zero",
            field
        )));
    }
    Ok(hours)
}

fn offset_hours(hours: f64) -> Result<f64, AutotaskError> {
    if !hours.is_finite() || !(-24.0..=24.0).contains(&hours) {
        return Err(AutotaskError::validation(
            "offset_hours must be between -24 and 24",
        ));
    }
    Ok(hours)
}

fn limit(limit: Option<u32>) -> Result<u32, AutotaskError> {
    let limit = limit.unwrap_or(DEFAULT_RECORDS);
    if !(1..=MAX_RECORDS_LIMIT).contains(&limit) {
        return Err(AutotaskError::validation(format!(
            "limit must be between 1 and {}, got {}",
            MAX_RECORDS_LIMIT, limit
        )));
    }
    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autotask_client::VendorMethod;
    use pretty_assertions::assert_eq;

    fn search_doc(request: &VendorRequest) -> Value {
        assert_eq!(request.query[0].0, "search");
        serde_json::from_str(&request.query[0].1).unwrap()
    }

    fn create_input() -> CreateTicketInput {
        serde_json::from_value(json!({
            "company_id": 12345,
            "title": "Email issue",
            "description": "Outlook will not start"
        }))
        .unwrap()
    }

    #[test]
    fn test_get_ticket_request() {
        let call = ToolCall::GetTicket(GetTicketInput {
            ticket_id: 42,
            response_format: ResponseFormat::Json,
        });
        let request = call.to_request().unwrap();
        assert_eq!(request.method, VendorMethod::Get);
        assert_eq!(request.path, "Tickets/42");
        assert!(request.body.is_none());
        assert_eq!(call.shape(), ResponseShape::Single);
        assert_eq!(call.response_format(), ResponseFormat::Json);
    }

    #[test]
    fn test_get_rejects_non_positive_ids() {
        for id in [0, -5] {
            let call = ToolCall::GetContact(GetContactInput {
                contact_id: id,
                response_format: ResponseFormat::Markdown,
            });
            let err = call.to_request().unwrap_err();
            assert!(err.to_string().contains("contact_id must be a positive integer"));
        }
    }

    #[test]
    fn test_search_tickets_filters() {
        let input: SearchTicketsInput = serde_json::from_value(json!({
            "company_id": 12,
            "status": 1,
            "keyword": "printer",
            "limit": 50
        }))
        .unwrap();
        let request = ToolCall::SearchTickets(input).to_request().unwrap();
        assert_eq!(request.method, VendorMethod::Get);
        assert_eq!(request.path, "Tickets/query");

        let doc = search_doc(&request);
        assert_eq!(doc["MaxRecords"], 50);
        let items = doc["filter"][0]["items"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], json!({"field": "companyID", "op": "eq", "value": 12}));
        assert_eq!(items[2], json!({"field": "title", "op": "contains", "value": "printer"}));
    }

    #[test]
    fn test_search_tickets_rejects_bad_limit_and_priority() {
        let input = SearchTicketsInput {
            limit: Some(501),
            ..Default::default()
        };
        assert!(ToolCall::SearchTickets(input).to_request().is_err());

        let input = SearchTicketsInput {
            priority: Some(9),
            ..Default::default()
        };
        assert!(ToolCall::SearchTickets(input).to_request().is_err());
    }

    #[test]
    fn test_search_companies_contains_filter() {
        let call = ToolCall::SearchCompanies(SearchCompaniesInput {
            name: Some("Tech".to_string()),
            ..Default::default()
        });
        let doc = search_doc(&call.to_request().unwrap());
        assert_eq!(
            doc,
            json!({
                "MaxRecords": 20,
                "filter": [{"field": "companyName", "op": "contains", "value": "Tech"}]
            })
        );
        assert_eq!(call.entity(), EntityKind::Company);
    }

    #[test]
    fn test_create_ticket_body_defaults() {
        let request = ToolCall::CreateTicket(create_input()).to_request().unwrap();
        assert_eq!(request.method, VendorMethod::Post);
        assert_eq!(request.path, "Tickets");
        assert_eq!(
            request.body.unwrap(),
            json!({
                "companyID": 12345,
                "title": "Email issue",
                "description": "Outlook will not start",
                "priority": 2,
                "status": 1
            })
        );
    }

    #[test]
    fn test_create_ticket_validation() {
        let mut input = create_input();
        input.title = String::new();
        assert!(ToolCall::CreateTicket(input).to_request().is_err());

        let mut input = create_input();
        input.title = "t".repeat(256);
        let err = ToolCall::CreateTicket(input).to_request().unwrap_err();
        assert!(err.to_string().contains("255"));

        let mut input = create_input();
        input.due_date_time = Some("next tuesday".to_string());
        assert!(ToolCall::CreateTicket(input).to_request().is_err());

        let mut input = create_input();
        input.due_date_time = Some("2026-11-01T09:00:00".to_string());
        let body = ToolCall::CreateTicket(input).to_request().unwrap().body.unwrap();
        assert_eq!(body["dueDateTime"], "2026-11-01T09:00:00");
    }

    #[test]
    fn test_update_ticket_patch_body() {
        let input: UpdateTicketInput =
            serde_json::from_value(json!({"ticket_id": 77, "status": 5, "priority": 3})).unwrap();
        let call = ToolCall::UpdateTicket(input);
        let request = call.to_request().unwrap();
        assert_eq!(request.method, VendorMethod::Patch);
        assert_eq!(request.path, "Tickets");
        assert_eq!(
            request.body.unwrap(),
            json!({"id": 77, "status": 5, "priority": 3})
        );
        assert_eq!(call.shape(), ResponseShape::Updated);
    }

    #[test]
    fn test_update_ticket_requires_a_field() {
        let input: UpdateTicketInput = serde_json::from_value(json!({"ticket_id": 77})).unwrap();
        let err = ToolCall::UpdateTicket(input).to_request().unwrap_err();
        assert!(err.to_string().contains("at least one field"));
    }

    #[test]
    fn test_add_note_request() {
        let input: AddTicketNoteInput =
            serde_json::from_value(json!({"ticket_id": 9, "note": "Rebooted the router"})).unwrap();
        let request = ToolCall::AddTicketNote(input).to_request().unwrap();
        assert_eq!(request.path, "Tickets/9/Notes");
        let body = request.body.unwrap();
        assert_eq!(body["title"], "Note");
        assert_eq!(body["description"], "Rebooted the router");
        assert_eq!(body["publish"], 1);
    }

    #[test]
    fn test_add_note_rejects_blank_text() {
        let input: AddTicketNoteInput =
            serde_json::from_value(json!({"ticket_id": 9, "note": "   "})).unwrap();
        let call = ToolCall::AddTicketNote(input).sanitize();
        assert!(call.to_request().is_err());
    }

    #[test]
    fn test_search_resources_active_by_default() {
        let call = ToolCall::SearchResources(SearchResourcesInput::default());
        let doc = search_doc(&call.to_request().unwrap());
        assert_eq!(
            doc["filter"],
            json!([{"field": "isActive", "op": "eq", "value": true}])
        );

        let call = ToolCall::SearchResources(SearchResourcesInput {
            active_only: Some(false),
            ..Default::default()
        });
        let doc = search_doc(&call.to_request().unwrap());
        assert_eq!(doc["filter"][0]["op"], "exist");
    }

    #[test]
    fn test_time_entry_defaults() {
        let input: CreateTimeEntryInput = serde_json::from_value(json!({
            "ticket_id": 5,
            "resource_id": 7,
            "hours_worked": 1.5,
            "date_worked": "2026-10-01"
        }))
        .unwrap();
        let body = ToolCall::CreateTimeEntry(input).to_request().unwrap().body.unwrap();
        assert_eq!(body["hoursToBill"], 1.5);
        assert_eq!(body["dateWorked"], "2026-10-01");
        assert_eq!(body["timeEntryType"], 1);
        assert_eq!(body["offsetHours"], 0.0);
    }

    #[test]
    fn test_time_entry_offset_hours() {
        let input: CreateTimeEntryInput = serde_json::from_value(json!({
            "ticket_id": 5, "resource_id": 7, "hours_worked": 1.0,
            "date_worked": "2026-10-01", "offset_hours": -5.5
        }))
        .unwrap();
        let body = ToolCall::CreateTimeEntry(input).to_request().unwrap().body.unwrap();
        assert_eq!(body["offsetHours"], -5.5);

        let input: CreateTimeEntryInput = serde_json::from_value(json!({
            "ticket_id": 5, "resource_id": 7, "hours_worked": 1.0, "offset_hours": 30.0
        }))
        .unwrap();
        let err = ToolCall::CreateTimeEntry(input).to_request().unwrap_err();
        assert!(err.to_string().contains("offset_hours"));
    }

    #[test]
    fn test_time_entry_validation() {
        let input: CreateTimeEntryInput = serde_json::from_value(json!({
            "ticket_id": 5, "resource_id": 7, "hours_worked": 0.0
        }))
        .unwrap();
        assert!(ToolCall::CreateTimeEntry(input).to_request().is_err());

        let input: CreateTimeEntryInput = serde_json::from_value(json!({
            "ticket_id": 5, "resource_id": 7, "hours_worked": 1.0, "date_worked": "01/10/2026"
        }))
        .unwrap();
        let err = ToolCall::CreateTimeEntry(input).to_request().unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_time_entry_defaults_to_today() {
        let input: CreateTimeEntryInput = serde_json::from_value(json!({
            "ticket_id": 5, "resource_id": 7, "hours_worked": 2.0
        }))
        .unwrap();
        let body = ToolCall::CreateTimeEntry(input).to_request().unwrap().body.unwrap();
        let date = body["dateWorked"].as_str().unwrap();
        assert!(NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok());
    }
}
