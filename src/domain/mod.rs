//! src/domain/mod.rs

mod invitation_request;
mod notification;
mod required_field;

pub use invitation_request::{InvitationFormData, InvitationRequest};
pub use notification::{Notification, NOTIFICATION_SUBJECT};
pub use required_field::RequiredField;

/// Validation error for an incoming invitation request
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}
