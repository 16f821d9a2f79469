use super::*;
use crate::memory::MemoryPage;

fn draft(name: &str, email: &str, message: &str) -> ContactDraft {
    ContactDraft {
        name: name.into(),
        email: email.into(),
        message: message.into(),
    }
}

#[test]
fn checks_fields_in_form_order() {
    assert_eq!(
        validate(&draft("", "a@b.com", "hi")),
        Err(ValidationError::MissingName)
    );
    assert_eq!(
        validate(&draft("A", "not-an-email", "hi")),
        Err(ValidationError::InvalidEmail)
    );
    assert_eq!(
        validate(&draft("A", "a@b.com", "")),
        Err(ValidationError::MissingMessage)
    );
    assert_eq!(validate(&draft("", "", "")), Err(ValidationError::MissingName));
    assert_eq!(
        validate(&draft("A", "a@b.com", "hi")),
        Ok(ContactMessage {
            name: "A".into(),
            email: "a@b.com".into(),
            message: "hi".into(),
        })
    );
}

#[test]
fn whitespace_only_fields_are_empty() {
    assert_eq!(
        validate(&draft(" \t", "a@b.com", "hi")),
        Err(ValidationError::MissingName)
    );
    assert_eq!(
        validate(&draft("A", "a@b.com", "\n  ")),
        Err(ValidationError::MissingMessage)
    );
}

#[test]
fn email_shape_is_structural_only() {
    for ok in ["a@b.com", "first.last@sub.example.org", "x+tag@host.io"] {
        assert!(is_valid_email(ok), "{ok}");
    }
    for bad in ["", "a@b", "@b.com", "a@.com", "a@b.", "a b@c.com", "a@@b.com", "a@b@c.com"] {
        assert!(!is_valid_email(bad), "{bad}");
    }
}

#[test]
fn surrounding_whitespace_is_trimmed_from_name_and_email() {
    let message = validate(&draft("  Ada ", " ada@example.com ", " hello ")).expect("valid");
    assert_eq!(message.name, "Ada");
    assert_eq!(message.email, "ada@example.com");
    assert_eq!(message.message, " hello ");
}

#[test]
fn reads_draft_from_named_controls() {
    let mut page = MemoryPage::portfolio();
    page.fill("name", "Ada");
    page.fill("email", "ada@example.com");
    page.fill("message", "hello");
    let form = page.element_by_id(CONTACT_FORM_ID).expect("form");

    assert_eq!(
        ContactForm::read_draft(&page, &form),
        draft("Ada", "ada@example.com", "hello")
    );
}

#[test]
fn missing_form_is_not_submitted() {
    let mut page = MemoryPage::new();
    let notifier = Notifier::new(
        std::time::Duration::from_millis(100),
        std::time::Duration::from_millis(4000),
        std::time::Duration::from_millis(300),
    );
    let mut form = ContactForm::default();

    assert!(form.begin(&mut page, &notifier).is_none());
    assert_eq!(form.phase(), FormPhase::Idle);
    assert!(form.last_outcome().is_none());
}
