//! Body extractor accepting either JSON or urlencoded form data.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::web::error::ApiError;

/// A request body decoded from JSON or from an urlencoded form.
///
/// Requests with a `application/json` content type are read as JSON;
/// everything else is read as a form. An empty body decodes to the
/// payload's defaults.
pub struct Payload<T>(pub T);

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim_start().starts_with("application/json"))
        .unwrap_or(false)
}

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e)))?;
            return Ok(Payload(value));
        }

        let has_content_type = req.headers().contains_key(CONTENT_TYPE);
        match Form::<T>::from_request(req, state).await {
            Ok(Form(value)) => Ok(Payload(value)),
            // Bodyless requests (e.g. a bare DELETE) carry no content type.
            Err(_) if !has_content_type => Ok(Payload(T::default())),
            Err(e) => Err(ApiError::bad_request(format!("Invalid form body: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::dto::CreateThreadRequest;
    use axum::body::Body;

    #[tokio::test]
    async fn test_json_body() {
        let req = axum::http::Request::builder()
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text":"hi","delete_password":"pw"}"#))
            .unwrap();
        let Payload(body) = Payload::<CreateThreadRequest>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(body.text, "hi");
        assert_eq!(body.delete_password, "pw");
    }

    #[tokio::test]
    async fn test_form_body() {
        let req = axum::http::Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("text=hello+world&delete_password=pw"))
            .unwrap();
        let Payload(body) = Payload::<CreateThreadRequest>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(body.text, "hello world");
        assert_eq!(body.delete_password, "pw");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let req = axum::http::Request::builder()
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let err = Payload::<CreateThreadRequest>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.code(), crate::web::error::ErrorCode::BadRequest);
    }
}
