use serde_json::Value;

use super::FieldErrors;

#[derive(Debug, Clone, PartialEq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberDraft {
    pub name: String,
    pub group: String,
    pub contacts: Vec<ContactDraft>,
}

/// Validates an untrusted member submission. Name and group are checked
/// independently, but contact processing stops at the first bad contact:
/// unlike poll validation there is no accumulation across contacts.
pub fn validate_member(body: &Value) -> Result<MemberDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = match body.get("name").and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => {
            errors.set("name", "The member name must be a valid string");
            None
        }
    };

    let group = match body.get("group").and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => {
            errors.set("group", "The member group must be a valid string");
            None
        }
    };

    let contacts = validate_contacts(body, &mut errors);

    match (name, group, contacts) {
        (Some(name), Some(group), Some(contacts)) if errors.is_empty() => Ok(MemberDraft {
            name,
            group,
            contacts,
        }),
        _ => Err(errors),
    }
}

fn validate_contacts(body: &Value, errors: &mut FieldErrors) -> Option<Vec<ContactDraft>> {
    let items = match body.get("contacts") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => {
            errors.set("contacts", "There must be at least one contact");
            return None;
        }
    };

    let mut drafts: Vec<ContactDraft> = Vec::with_capacity(items.len());
    for item in items {
        let name = match item.get("name").and_then(Value::as_str) {
            Some(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => {
                errors.set("contacts", "Each contact must have a valid name");
                return None;
            }
        };

        let email = match item.get("email").and_then(Value::as_str) {
            Some(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => {
                errors.set("contacts", "Each contact must have a valid email");
                return None;
            }
        };

        if drafts.iter().any(|existing| existing.email == email) {
            errors.set("contacts", "Contact emails must be unique");
            return None;
        }

        drafts.push(ContactDraft { name, email });
    }

    Some(drafts)
}
