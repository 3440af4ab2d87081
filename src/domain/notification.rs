//! src/domain/notification.rs

use crate::domain::InvitationRequest;
use chrono::{DateTime, Utc};
use htmlescape::encode_minimal;

pub const NOTIFICATION_SUBJECT: &str = "New Gentlemen Roundtable Invitation Request";

/// The email relayed to the operations inbox for one invitation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: &'static str,
    pub html_body: String,
    pub text_body: String,
}

impl Notification {
    /// Render `request` into a notification. All submitted values are HTML escaped
    /// before they are embedded into the html body.
    pub fn compose(request: &InvitationRequest, submitted_at: DateTime<Utc>) -> Self {
        let submitted_at = submitted_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();
        let full_name = encode_minimal(request.full_name.as_ref());
        let email = encode_minimal(request.email.as_ref());
        let gender = encode_minimal(request.gender.as_ref());
        let country = encode_minimal(request.country.as_ref());

        let row = |label: &str, value: &str| {
            format!(
                "<tr>\
                <td style=\"padding: 8px 0; font-weight: bold; color: #555; width: 120px;\">{}:</td>\
                <td style=\"padding: 8px 0; color: #333;\">{}</td>\
                </tr>",
                label, value
            )
        };
        let html_body = format!(
            "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;\">\
            <h2 style=\"color: #d97706; border-bottom: 2px solid #fbbf24; padding-bottom: 10px;\">\
            New Invitation Request - The Gentlemen Roundtable</h2>\
            <div style=\"background-color: #f9f9f9; padding: 20px; border-radius: 8px; margin: 20px 0;\">\
            <h3 style=\"color: #333; margin-top: 0;\">Applicant Details:</h3>\
            <table style=\"width: 100%; border-collapse: collapse;\">{}{}{}{}</table>\
            </div>\
            <div style=\"background-color: #fef3c7; padding: 15px; border-radius: 8px; border-left: 4px solid #fbbf24;\">\
            <p style=\"margin: 0; color: #92400e;\"><strong>Submitted:</strong> {}</p>\
            </div>\
            <p style=\"margin-top: 20px;\"><strong>Next Steps:</strong><br />\
            Review the application and send a personalized invitation to {}</p>\
            <div style=\"margin-top: 30px; padding-top: 20px; border-top: 1px solid #e5e5e5; text-align: center;\">\
            <p style=\"color: #666; font-size: 14px; margin: 0;\">\
            This email was automatically generated from The Gentlemen Roundtable invitation form.</p>\
            </div>\
            </div>",
            row("Full Name", full_name.as_str()),
            row("Email", email.as_str()),
            row("Gender", gender.as_str()),
            row("Country", country.as_str()),
            submitted_at,
            email,
        );
        let text_body = format!(
            "New Invitation Request - The Gentlemen Roundtable\n\n\
            Full Name: {}\n\
            Email: {}\n\
            Gender: {}\n\
            Country: {}\n\
            Submitted: {}\n\n\
            Next Steps: Review the application and send a personalized invitation to {}\n",
            request.full_name,
            request.email,
            request.gender,
            request.country,
            submitted_at,
            request.email,
        );

        Self {
            subject: NOTIFICATION_SUBJECT,
            html_body,
            text_body,
        }
    }
}
