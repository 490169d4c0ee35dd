//! Form extractor for `POST /hash`.
//!
//! Fields come from the query string and, when the body is
//! `application/x-www-form-urlencoded`, from the body as well. Across both
//! there must be exactly one `password` field. Missing, repeated, or
//! unparsable input is rejected as a validation error before any identifier
//! is reserved.

use axum::Form;
use axum::extract::{FromRequest, Query, Request};
use axum::http::{HeaderMap, header};

use crate::http::error::AppError;

/// Form field carrying the secret.
pub const PASSWORD_FIELD: &str = "password";

/// The single `password` value from a form body.
#[derive(Debug)]
pub struct PasswordForm(pub String);

impl<S> FromRequest<S> for PasswordForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Query(mut fields) = Query::<Vec<(String, String)>>::try_from_uri(req.uri())
            .map_err(|e| AppError::Validation(e.body_text()))?;

        if is_form_body(req.headers()) {
            let Form(body_fields) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            fields.extend(body_fields);
        }

        single_password(fields).map(PasswordForm)
    }
}

fn is_form_body(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

fn single_password(fields: Vec<(String, String)>) -> Result<String, AppError> {
    let mut values = fields
        .into_iter()
        .filter(|(key, _)| key == PASSWORD_FIELD)
        .map(|(_, value)| value);

    match (values.next(), values.next()) {
        (Some(value), None) => Ok(value),
        (None, _) => Err(AppError::Validation(format!(
            "missing '{PASSWORD_FIELD}' field"
        ))),
        (Some(_), Some(_)) => Err(AppError::Validation(format!(
            "expected exactly one '{PASSWORD_FIELD}' field"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn picks_the_password_field() {
        let value = single_password(pairs(&[("user", "x"), ("password", "angryMonkey")])).unwrap();
        assert_eq!(value, "angryMonkey");
    }

    #[test]
    fn missing_password_is_rejected() {
        assert!(matches!(
            single_password(pairs(&[("pass", "x")])),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(single_password(Vec::new()), Err(AppError::Validation(_))));
    }

    #[test]
    fn repeated_password_is_rejected() {
        assert!(matches!(
            single_password(pairs(&[("password", "a"), ("password", "b")])),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn only_urlencoded_bodies_are_parsed() {
        let mut headers = HeaderMap::new();
        assert!(!is_form_body(&headers));

        headers.insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
        assert!(!is_form_body(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded; charset=utf-8".parse().unwrap(),
        );
        assert!(is_form_body(&headers));
    }

    #[test]
    fn empty_value_is_left_to_the_service() {
        assert_eq!(single_password(pairs(&[("password", "")])).unwrap(), "");
    }
}
