//! Input validation for client submissions

use crate::contract::{AlbumInput, GuestCount, GuestGroupInput, GuestType, MarketplaceError};
use uuid::Uuid;

/// Guest group fields after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidGuestGroup {
    pub name: String,
    pub group_type: GuestType,
    pub count: i32,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// Validate a guest group submission
///
/// `name` is required. `type` defaults to single, `count` defaults to 1 and
/// accepts either a number or a numeric string.
pub fn validate_guest_group(
    input: GuestGroupInput,
    max_count: u32,
) -> Result<ValidGuestGroup, MarketplaceError> {
    let name = required_text(input.name, "name")?;

    let group_type = match non_blank(input.group_type) {
        Some(raw) => GuestType::parse(&raw).ok_or_else(|| {
            MarketplaceError::validation(format!(
                "type '{}' must be one of single, couple, family, group",
                raw
            ))
        })?,
        None => GuestType::Single,
    };

    let count = match input.count {
        Some(count) => parse_count(count)?,
        None => 1,
    };
    if count < 1 || count > i64::from(max_count) {
        return Err(MarketplaceError::validation(format!(
            "count must be between 1 and {}",
            max_count
        )));
    }

    let email = non_blank(input.email);
    if let Some(email) = &email {
        validate_email(email)?;
    }

    Ok(ValidGuestGroup {
        name,
        group_type,
        // Bounded by max_count above
        count: i32::try_from(count).map_err(|_| MarketplaceError::validation("count is too large"))?,
        email,
        phone: non_blank(input.phone),
        notes: non_blank(input.notes),
    })
}

fn parse_count(count: GuestCount) -> Result<i64, MarketplaceError> {
    match count {
        GuestCount::Number(n) => Ok(n),
        GuestCount::Text(text) => text.trim().parse::<i64>().map_err(|_| {
            MarketplaceError::validation(format!("count '{}' is not a whole number", text))
        }),
    }
}

/// Validate an album submission, returning (name, description)
pub fn validate_album(input: AlbumInput) -> Result<(String, Option<String>), MarketplaceError> {
    let name = required_text(input.name, "name")?;
    if name.chars().count() > 120 {
        return Err(MarketplaceError::validation("name must be at most 120 characters"));
    }
    Ok((name, non_blank(input.description)))
}

/// Minimal shape check; deliverability is the auth provider's concern
pub fn validate_email(email: &str) -> Result<(), MarketplaceError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(MarketplaceError::validation(format!("'{}' is not a valid email", email)))
    }
}

/// Parse a path identifier
pub fn parse_id(resource: &str, raw: &str) -> Result<Uuid, MarketplaceError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| MarketplaceError::validation(format!("invalid {} id '{}'", resource, raw)))
}

pub(crate) fn required_text(value: Option<String>, field: &str) -> Result<String, MarketplaceError> {
    non_blank(value).ok_or_else(|| MarketplaceError::validation(format!("{} is required", field)))
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
