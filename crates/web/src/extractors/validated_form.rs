//! Validated form extractor.

use axum::{
    async_trait,
    extract::{rejection::FormRejection, FromRequest, Request},
    Form,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use common::{AppError, Flash};

/// A form posted from a page the user is sent back to when it is rejected.
pub trait FormPage {
    const PAGE: &'static str;
}

/// URL-encoded form extractor that validates the payload.
///
/// Validation error codes are flash codes; a rejected form becomes a flash
/// message and a redirect back to [`FormPage::PAGE`].
pub struct ValidatedForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + FormPage,
    Form<T>: FromRequest<S, Rejection = FormRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "Malformed form body");
            AppError::validation(Flash::InvalidRequest, T::PAGE)
        })?;

        value
            .validate()
            .map_err(|e| AppError::validation(first_flash(&e), T::PAGE))?;

        Ok(ValidatedForm(value))
    }
}

/// Flash for the first failing rule, fields taken in name order.
fn first_flash(errors: &ValidationErrors) -> Flash {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().collect();
    fields.sort();

    fields
        .first()
        .and_then(|field| field_errors.get(*field))
        .and_then(|errors| errors.first())
        .and_then(|error| Flash::from_code(&error.code))
        .unwrap_or(Flash::InvalidRequest)
}
