//! Extractors that report rejections as 400 envelopes carrying the request path.
use std::collections::BTreeMap;
use std::convert::Infallible;

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use models::audit::Actor;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::errors::ApiError;
use crate::state::ServerState;

/// JSON body that has passed `validator` checks.
pub struct ValidatedJson<T>(pub T);

/// `display_order` -> `displayOrder`, matching the wire format.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// One message per field, keyed by wire name.
pub fn field_errors(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|e| {
                let message = e.message.as_ref().map(|m| m.to_string()).unwrap_or_else(|| format!("invalid value ({})", e.code));
                (camel_case(&field.to_string()), message)
            })
        })
        .collect()
}

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let path = req.uri().path().to_owned();
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rej| ApiError::bad_request(rej.body_text()).at(path.clone()))?;
        value.validate().map_err(|e| ApiError::validation(field_errors(&e)).at(path))?;
        Ok(Self(value))
    }
}

/// Path parameters; a malformed id becomes a 400 envelope.
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(v)) => Ok(Self(v)),
            Err(rej) => Err(ApiError::bad_request(rej.body_text()).at(parts.uri.path())),
        }
    }
}

pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(v)) => Ok(Self(v)),
            Err(rej) => Err(ApiError::bad_request(rej.body_text()).at(parts.uri.path())),
        }
    }
}

/// Actor resolved once per request from the configured auditor.
pub struct CurrentActor(pub Actor);

#[async_trait]
impl FromRequestParts<ServerState> for CurrentActor {
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        Ok(Self(state.auditor.current_actor()))
    }
}

#[cfg(test)]
mod tests {
    use super::camel_case;

    #[test]
    fn snake_to_camel() {
        assert_eq!(camel_case("display_order"), "displayOrder");
        assert_eq!(camel_case("parent_id"), "parentId");
        assert_eq!(camel_case("name"), "name");
    }
}
