//! Modal gateway: suspends a flow until the user supplies the required
//! fields or dismisses the prompt.

use crate::error::Result;
use crate::ui::{Field, FieldKind, Ui};

/// Result of a prompt: a value, or the user walked away
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Submitted(T),
    Cancelled,
}

/// Which fields a credential form requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFields {
    NameAndPassword,
    PasswordOnly,
}

/// What the form is for, used for its title and subtitle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRequest {
    pub title: String,
    pub subtitle: String,
    pub fields: CredentialFields,
}

impl CredentialRequest {
    pub fn claim() -> Self {
        Self {
            title: "Claim Item".into(),
            subtitle: "Enter your name and set a password. You'll need this password to unclaim the item later.".into(),
            fields: CredentialFields::NameAndPassword,
        }
    }

    pub fn unclaim(claimed_by: &str) -> Self {
        Self {
            title: "Unclaim Item".into(),
            subtitle: format!(
                "This item was claimed by \"{}\". Enter the password to remove the claim.",
                claimed_by
            ),
            fields: CredentialFields::PasswordOnly,
        }
    }
}

/// Values collected by a credential form, trimmed and non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Empty for password-only forms
    pub name: String,
    pub password: String,
}

const NAME_FIELD: Field = Field {
    kind: FieldKind::Name,
    label: "Your Name",
    help: "Who is getting this gift?",
};

const CLAIM_PASSWORD_FIELD: Field = Field {
    kind: FieldKind::Password,
    label: "Password",
    help: "Set a password to protect this claim",
};

const UNCLAIM_PASSWORD_FIELD: Field = Field {
    kind: FieldKind::Password,
    label: "Enter Password",
    help: "Enter the password to unclaim",
};

impl CredentialFields {
    fn fields(self) -> &'static [Field] {
        match self {
            CredentialFields::NameAndPassword => &[NAME_FIELD, CLAIM_PASSWORD_FIELD],
            CredentialFields::PasswordOnly => &[UNCLAIM_PASSWORD_FIELD],
        }
    }
}

/// Ask for the fields of `request`, re-asking any field left blank
pub fn request_credentials(ui: &mut dyn Ui, request: &CredentialRequest) -> Result<Outcome<Credentials>> {
    ui.open_form(&request.title, &request.subtitle);

    let mut name = String::new();
    let mut password = String::new();

    for field in request.fields.fields() {
        let value = loop {
            let Some(raw) = ui.ask(field)? else {
                return Ok(Outcome::Cancelled);
            };
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                ui.refocus(field);
                continue;
            }
            break trimmed.to_string();
        };

        match field.kind {
            FieldKind::Name => name = value,
            FieldKind::Password => password = value,
        }
    }

    Ok(Outcome::Submitted(Credentials { name, password }))
}

/// Yes/no confirmation before a destructive call
pub fn confirm(ui: &mut dyn Ui, message: &str) -> Result<Outcome<()>> {
    if ui.confirm(message)? {
        Ok(Outcome::Submitted(()))
    } else {
        Ok(Outcome::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::scripted::ScriptedUi;

    #[test]
    fn test_claim_collects_name_and_password() {
        let mut ui = ScriptedUi::answering(&[Some(" Aunt May "), Some("hunter2")]);
        let outcome = request_credentials(&mut ui, &CredentialRequest::claim()).unwrap();
        assert_eq!(
            outcome,
            Outcome::Submitted(Credentials { name: "Aunt May".into(), password: "hunter2".into() })
        );
        assert_eq!(ui.forms, vec!["Claim Item"]);
        assert!(ui.refocused.is_empty());
    }

    #[test]
    fn test_blank_field_is_refocused() {
        let mut ui = ScriptedUi::answering(&[Some("  "), Some("Sam"), Some(""), Some("pw")]);
        let outcome = request_credentials(&mut ui, &CredentialRequest::claim()).unwrap();
        assert!(matches!(outcome, Outcome::Submitted(_)));
        assert_eq!(ui.refocused, vec![FieldKind::Name, FieldKind::Password]);
        assert_eq!(
            ui.asked,
            vec![FieldKind::Name, FieldKind::Name, FieldKind::Password, FieldKind::Password]
        );
    }

    #[test]
    fn test_unclaim_asks_only_for_password() {
        let mut ui = ScriptedUi::answering(&[Some("pw")]);
        let outcome = request_credentials(&mut ui, &CredentialRequest::unclaim("Sam")).unwrap();
        assert_eq!(
            outcome,
            Outcome::Submitted(Credentials { name: String::new(), password: "pw".into() })
        );
        assert_eq!(ui.asked, vec![FieldKind::Password]);
    }

    #[test]
    fn test_dismissed_form_is_cancelled() {
        let mut ui = ScriptedUi::answering(&[Some("Sam"), None]);
        let outcome = request_credentials(&mut ui, &CredentialRequest::claim()).unwrap();
        assert_eq!(outcome, Outcome::Cancelled);
    }

    #[test]
    fn test_confirm() {
        let mut ui = ScriptedUi::confirming(true);
        assert_eq!(confirm(&mut ui, "Delete?").unwrap(), Outcome::Submitted(()));
        assert_eq!(confirm(&mut ui, "Delete?").unwrap(), Outcome::Cancelled);
    }
}
