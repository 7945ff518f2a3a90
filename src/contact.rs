//! Contact form: per-field validation, a simulated send and toast
//! notifications.

use std::time::Duration;

use crate::config::ContactConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{} is required", .0.label())]
    Required(Field),
    #[error("{} must be at least {min} characters", .field.label())]
    TooShort { field: Field, min: usize },
    #[error("Email is invalid")]
    InvalidEmail,
}

/// `local@domain.tld` with no whitespace anywhere.
pub fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Some dot must split the domain into two non-empty halves.
    domain
        .char_indices()
        .filter(|&(_, ch)| ch == '.')
        .any(|(i, _)| i > 0 && i + 1 < domain.len())
}

pub fn validate(field: Field, value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    let min = match field {
        Field::Name => 2,
        Field::Message => 10,
        Field::Email | Field::Subject => 0,
    };

    if value.is_empty() {
        return Err(FieldError::Required(field));
    }
    if value.chars().count() < min {
        return Err(FieldError::TooShort { field, min });
    }
    if field == Field::Email && !is_email(value) {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactDraft {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    /// Every failing field, in form order.
    pub fn validate(&self) -> Vec<(Field, FieldError)> {
        Field::ALL
            .into_iter()
            .filter_map(|field| validate(field, self.value(field)).err().map(|err| (field, err)))
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub expires: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendState {
    Idle,
    Sending { until: Duration },
}

/// Form state with its field errors, the pending send and live toasts.
#[derive(Debug)]
pub struct ContactForm {
    config: ContactConfig,
    pub draft: ContactDraft,
    errors: Vec<(Field, FieldError)>,
    send: SendState,
    notices: Vec<Notice>,
}

impl ContactForm {
    pub fn new(config: ContactConfig) -> Self {
        Self {
            config,
            draft: ContactDraft::default(),
            errors: Vec::new(),
            send: SendState::Idle,
            notices: Vec::new(),
        }
    }

    pub fn error(&self, field: Field) -> Option<&FieldError> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, err)| err)
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.send, SendState::Sending { .. })
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Re-checks one field, as when it loses focus.
    pub fn check(&mut self, field: Field) -> bool {
        self.clear_error(field);
        match validate(field, self.draft.value(field)) {
            Ok(()) => true,
            Err(err) => {
                self.errors.push((field, err));
                false
            }
        }
    }

    /// Drops the error shown under `field`, as when it is edited.
    pub fn clear_error(&mut self, field: Field) {
        self.errors.retain(|(f, _)| *f != field);
    }

    /// Validates everything and, when valid, starts the simulated send.
    pub fn submit(&mut self, now: Duration) -> bool {
        if self.is_sending() {
            return false;
        }

        self.errors = self.draft.validate();
        if !self.errors.is_empty() {
            tracing::debug!(errors = self.errors.len(), "contact form rejected");
            return false;
        }

        tracing::info!(subject = %self.draft.subject.trim(), "sending contact message");
        self.send = SendState::Sending {
            until: now + Duration::from_millis(self.config.send_ms),
        };
        true
    }

    fn notify(&mut self, kind: NoticeKind, text: &str, now: Duration) {
        self.notices.push(Notice {
            kind,
            text: text.to_string(),
            expires: now + Duration::from_millis(self.config.notification_ms),
        });
    }

    /// Reports a failed send; the draft is kept so the user can retry.
    pub fn fail(&mut self, now: Duration) {
        if self.is_sending() {
            tracing::warn!("contact message failed");
            self.send = SendState::Idle;
            self.notify(NoticeKind::Error, "Could not send the message. Try again.", now);
        }
    }

    /// Finishes a due send and expires old notices.
    pub fn poll(&mut self, now: Duration) {
        if let SendState::Sending { until } = self.send {
            if now >= until {
                tracing::info!("contact message sent");
                self.send = SendState::Idle;
                self.draft = ContactDraft::default();
                self.notify(NoticeKind::Success, "Message sent!", until);
            }
        }

        self.notices.retain(|notice| notice.expires > now);
    }
}
