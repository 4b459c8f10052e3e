//! Create-link form state.
//!
//! The view binds inputs to [`CreateLinkForm::set`], calls
//! [`begin_submit`](CreateLinkForm::begin_submit) to get the payload, awaits
//! `create_link`, and hands the result to
//! [`finish_submit`](CreateLinkForm::finish_submit). Navigation and toasts are
//! the view's job; this type only decides what happens to the draft.

use std::fmt;

use api::ApiError;
use store::{Link, NewLink};

/// A text field of the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkField {
    Title,
    Url,
    Description,
    Category,
}

impl LinkField {
    pub const REQUIRED: [LinkField; 4] = [
        LinkField::Title,
        LinkField::Url,
        LinkField::Description,
        LinkField::Category,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LinkField::Title => "Title",
            LinkField::Url => "URL",
            LinkField::Description => "Description",
            LinkField::Category => "Category",
        }
    }
}

/// Why a submit was refused before any request was made.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormError {
    Missing(Vec<LinkField>),
    InvalidUrl,
    AlreadySubmitting,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Missing(fields) => {
                let names: Vec<&str> = fields.iter().map(|field| field.label()).collect();
                write!(f, "Please fill in: {}", names.join(", "))
            }
            FormError::InvalidUrl => write!(f, "URL must start with http:// or https://"),
            FormError::AlreadySubmitting => write!(f, "Already submitting"),
        }
    }
}

impl std::error::Error for FormError {}

/// Result of a finished submit.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    Created(Link),
    Failed(ApiError),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateLinkForm {
    draft: NewLink,
    submitting: bool,
}

impl CreateLinkForm {
    pub fn draft(&self) -> &NewLink {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn get(&self, field: LinkField) -> &str {
        match field {
            LinkField::Title => &self.draft.title,
            LinkField::Url => &self.draft.url,
            LinkField::Description => &self.draft.description,
            LinkField::Category => &self.draft.category,
        }
    }

    pub fn set(&mut self, field: LinkField, value: impl Into<String>) {
        let value = value.into();
        match field {
            LinkField::Title => self.draft.title = value,
            LinkField::Url => self.draft.url = value,
            LinkField::Description => self.draft.description = value,
            LinkField::Category => self.draft.category = value,
        }
    }

    pub fn set_public(&mut self, is_public: bool) {
        self.draft.is_public = is_public;
    }

    /// Validate and mark the form as submitting. Returns the trimmed payload.
    pub fn begin_submit(&mut self) -> Result<NewLink, FormError> {
        if self.submitting {
            return Err(FormError::AlreadySubmitting);
        }

        let missing: Vec<LinkField> = LinkField::REQUIRED
            .into_iter()
            .filter(|&field| self.get(field).trim().is_empty())
            .collect();
        if !missing.is_empty() {
            return Err(FormError::Missing(missing));
        }

        let url = self.draft.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(FormError::InvalidUrl);
        }

        self.submitting = true;
        Ok(NewLink {
            title: self.draft.title.trim().to_string(),
            url: url.to_string(),
            description: self.draft.description.trim().to_string(),
            category: self.draft.category.trim().to_string(),
            is_public: self.draft.is_public,
        })
    }

    /// Settle a submit. Success resets the form; failure keeps the draft.
    pub fn finish_submit(&mut self, result: Result<Link, ApiError>) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(link) => {
                self.draft = NewLink::default();
                SubmitOutcome::Created(link)
            }
            Err(e) => {
                tracing::warn!("create link failed: {e}");
                SubmitOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::testing::{far_future, mint_token, stub_client};
    use api::Method;

    fn filled() -> CreateLinkForm {
        let mut form = CreateLinkForm::default();
        form.set(LinkField::Title, "Rust Book");
        form.set(LinkField::Url, "https://doc.rust-lang.org/book/");
        form.set(LinkField::Description, " The official guide ");
        form.set(LinkField::Category, "rust");
        form
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let mut form = CreateLinkForm::default();
        form.set(LinkField::Title, "Only a title");
        form.set(LinkField::Category, "   ");

        assert_eq!(
            form.begin_submit(),
            Err(FormError::Missing(vec![
                LinkField::Url,
                LinkField::Description,
                LinkField::Category
            ]))
        );
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_url_needs_http_scheme() {
        let mut form = filled();
        form.set(LinkField::Url, "doc.rust-lang.org");
        assert_eq!(form.begin_submit(), Err(FormError::InvalidUrl));
    }

    #[test]
    fn test_payload_is_trimmed_and_private_by_default() {
        let mut form = filled();
        let payload = form.begin_submit().unwrap();
        assert_eq!(payload.description, "The official guide");
        assert!(!payload.is_public);
        assert!(form.is_submitting());
        assert_eq!(form.begin_submit(), Err(FormError::AlreadySubmitting));
    }

    #[tokio::test]
    async fn test_successful_submit_clears_form() {
        let (client, stub, _) = stub_client();
        client
            .session()
            .establish(mint_token("1", "a@b.c", far_future()))
            .unwrap();
        stub.respond(
            Method::Post,
            "/links",
            201,
            r#"{"_id":"abc","title":"Rust Book","url":"https://doc.rust-lang.org/book/","description":"The official guide","category":"rust","isPublic":true}"#,
        );

        let mut form = filled();
        form.set_public(true);
        let payload = form.begin_submit().unwrap();
        let outcome = form.finish_submit(client.create_link(&payload).await);

        assert!(matches!(outcome, SubmitOutcome::Created(ref link) if link.title == "Rust Book"));
        assert_eq!(form, CreateLinkForm::default());

        let sent = stub.last_request().unwrap().body.unwrap();
        assert_eq!(sent["isPublic"], true);
    }

    #[tokio::test]
    async fn test_network_failure_keeps_draft() {
        let (client, stub, _) = stub_client();
        stub.fail(Method::Post, "/links");

        let mut form = filled();
        let payload = form.begin_submit().unwrap();
        let outcome = form.finish_submit(client.create_link(&payload).await);

        assert!(matches!(outcome, SubmitOutcome::Failed(ApiError::Network(_))));
        assert_eq!(form.get(LinkField::Title), "Rust Book");
        assert_eq!(form.get(LinkField::Url), "https://doc.rust-lang.org/book/");
        assert!(!form.is_submitting());
    }
}
