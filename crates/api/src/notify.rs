// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Best-effort notification dispatch.
//!
//! Notifications are sent after a state transition commits and can never
//! roll it back: delivery failures are logged and swallowed. There is no
//! retry.

use slotbook_domain::ContactInfo;
use tracing::{info, warn};

/// A notification delivery failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyError {
    /// A description of the failure.
    pub message: String,
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Notification delivery failed: {}", self.message)
    }
}

impl std::error::Error for NotifyError {}

/// Outbound notification channel.
///
/// Implementations deliver messages; callers decide what happens on
/// failure. The handlers in this crate treat every send as best-effort.
pub trait Notifier {
    /// Sends an email message.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails.
    fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError>;

    /// Sends an SMS message.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails.
    fn send_sms(&self, to: &str, body: &str) -> Result<(), NotifyError>;
}

/// A notifier that writes messages to the log instead of delivering
/// them. The default for local runs and tests.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send_email(&self, to: &str, subject: &str, _body: &str) -> Result<(), NotifyError> {
        info!(to, subject, "Email notification");
        Ok(())
    }

    fn send_sms(&self, to: &str, _body: &str) -> Result<(), NotifyError> {
        info!(to, "SMS notification");
        Ok(())
    }
}

/// Notifies a signup contact over every channel they provided.
///
/// Email always; SMS when a phone number was captured. Failures are
/// logged at `warn` and otherwise ignored.
pub fn notify_contact(notifier: &dyn Notifier, contact: &ContactInfo, subject: &str, body: &str) {
    if let Err(err) = notifier.send_email(&contact.email, subject, body) {
        warn!(to = contact.email, %err, "Email notification dropped");
    }
    if let Some(phone) = contact.phone.as_deref() {
        if let Err(err) = notifier.send_sms(phone, body) {
            warn!(to = phone, %err, "SMS notification dropped");
        }
    }
}

/// Notifies a bare email address, best-effort.
pub fn notify_email(notifier: &dyn Notifier, to: &str, subject: &str, body: &str) {
    if let Err(err) = notifier.send_email(to, subject, body) {
        warn!(to, %err, "Email notification dropped");
    }
}
