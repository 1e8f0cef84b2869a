use super::Feature;
use super::store::{FORMS_KEY, KeyValueBackend, LocalStore};
use crate::errors::FormError;
use crate::models::FormSubmission;
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// A form's identity and the fields that must not be blank.
#[derive(Debug, Clone, Default)]
pub struct FormSpec {
    pub id: Option<String>,
    pub required: Vec<String>,
}

impl FormSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            required: Vec::new(),
        }
    }

    pub fn require(mut self, field: impl Into<String>) -> Self {
        self.required.push(field.into());
        self
    }

    fn form_id(&self) -> String {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or("form")
            .to_string()
    }
}

pub struct Forms<B> {
    store: LocalStore<B>,
}

impl<B: KeyValueBackend> Forms<B> {
    pub fn new(store: LocalStore<B>) -> Self {
        Self { store }
    }

    /// Validates and appends a submission. Rejected submissions are not stored.
    pub fn submit(
        &self,
        spec: &FormSpec,
        fields: BTreeMap<String, String>,
    ) -> Result<FormSubmission, FormError> {
        let missing: Vec<String> = spec
            .required
            .iter()
            .filter(|field| fields.get(*field).is_none_or(|value| value.trim().is_empty()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            debug!(form = %spec.form_id(), ?missing, "form rejected");
            return Err(FormError::MissingRequired { fields: missing });
        }

        let submission = FormSubmission {
            form_id: spec.form_id(),
            data: fields,
            created_at: Utc::now(),
        };
        let mut log = self.list();
        log.push(submission.clone());
        self.store.set(Self::KEY, &log);
        info!(form = %submission.form_id, "form submission saved");
        Ok(submission)
    }
}

impl<B: KeyValueBackend> Feature for Forms<B> {
    type Item = FormSubmission;
    type View = Vec<(String, usize)>;

    const KEY: &'static str = FORMS_KEY;

    fn list(&self) -> Vec<FormSubmission> {
        self.store.get(Self::KEY, Vec::new())
    }

    /// Submission counts per form id.
    fn render(&self) -> Vec<(String, usize)> {
        let mut counts = BTreeMap::new();
        for submission in self.list() {
            *counts.entry(submission.form_id).or_insert(0) += 1;
        }
        counts.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn blank_required_field_rejects() {
        let forms = Forms::new(LocalStore::in_memory());
        let spec = FormSpec::new("contactForm").require("email").require("message");

        let err = forms
            .submit(&spec, fields(&[("email", "  "), ("name", "Ana")]))
            .unwrap_err();
        assert_eq!(
            err,
            FormError::MissingRequired {
                fields: vec!["email".to_string(), "message".to_string()]
            }
        );
        assert_eq!(err.to_string(), "Please complete required fields");
        assert!(forms.list().is_empty());
    }

    #[test]
    fn valid_submission_is_appended() {
        let forms = Forms::new(LocalStore::in_memory());
        let spec = FormSpec::new("contactForm").require("email");
        forms.submit(&spec, fields(&[("email", "a@b.c")])).unwrap();
        forms
            .submit(&FormSpec::default(), fields(&[("note", "hi")]))
            .unwrap();

        let log = forms.list();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].form_id, "contactForm");
        assert_eq!(log[1].form_id, "form");
        assert_eq!(
            forms.render(),
            vec![("contactForm".to_string(), 1), ("form".to_string(), 1)]
        );
    }
}
