use crate::db::BookingStore;
use crate::errors::{AppError, FieldError};
use crate::models::{Consultation, ConsultationForm, NewConsultation};
use crate::services::validation::is_valid_email;

const MIN_MESSAGE_LEN: usize = 10;

pub fn validate_consultation(form: &ConsultationForm) -> Result<NewConsultation, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = trimmed(&form.name);
    if name.is_empty() {
        errors.push(FieldError::new("name", "Please enter your name."));
    }

    let email = trimmed(&form.email);
    if !is_valid_email(email) {
        errors.push(FieldError::new("email", "Please enter a valid email address."));
    }

    let phone = trimmed(&form.phone);
    if !is_formatted_phone(phone) {
        errors.push(FieldError::new(
            "phone",
            "Phone number must be in the format (XXX) XXX-XXXX",
        ));
    }

    let message = trimmed(&form.message);
    if message.chars().count() < MIN_MESSAGE_LEN {
        errors.push(FieldError::new(
            "message",
            "Please enter a message with at least 10 characters.",
        ));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewConsultation {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        message: message.to_string(),
    })
}

pub async fn submit_consultation(
    store: &dyn BookingStore,
    form: &ConsultationForm,
) -> Result<Consultation, AppError> {
    let request = validate_consultation(form).map_err(AppError::Validation)?;
    let consultation = store.insert_consultation(request).await?;
    tracing::info!(consultation_id = %consultation.id, "consultation request received");
    Ok(consultation)
}

/// Strict `(XXX) XXX-XXXX`.
pub fn is_formatted_phone(phone: &str) -> bool {
    const PATTERN: &[u8] = b"(ddd) ddd-dddd";
    let bytes = phone.as_bytes();
    bytes.len() == PATTERN.len()
        && bytes
            .iter()
            .zip(PATTERN)
            .all(|(&b, &p)| if p == b'd' { b.is_ascii_digit() } else { b == p })
}

fn trimmed(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn form() -> ConsultationForm {
        ConsultationForm {
            name: Some("Priya".to_string()),
            email: Some("priya@example.com".to_string()),
            phone: Some("(416) 555-0199".to_string()),
            message: Some("I'd like a group class for four people.".to_string()),
        }
    }

    #[test]
    fn test_formatted_phone() {
        assert!(is_formatted_phone("(416) 555-0199"));
        assert!(!is_formatted_phone("416-555-0199"));
        assert!(!is_formatted_phone("(416)555-0199"));
        assert!(!is_formatted_phone("(41a) 555-0199"));
    }

    #[test]
    fn test_short_message_rejected() {
        let mut f = form();
        f.message = Some("hi there".to_string());
        let errors = validate_consultation(&f).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "message");
    }

    #[tokio::test]
    async fn test_submit_persists_request() {
        let store = MemoryStore::new();
        let saved = submit_consultation(&store, &form()).await.unwrap();
        assert_eq!(saved.name, "Priya");
        assert_eq!(store.consultations().len(), 1);
    }
}
