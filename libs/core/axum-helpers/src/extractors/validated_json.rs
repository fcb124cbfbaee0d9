//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Deserializes the body and runs the `validator` crate's `Validate` trait.
/// Every failure is rejected with `400 Bad Request` and a structured
/// [`ErrorResponse`](crate::errors::ErrorResponse): body problems (syntax,
/// missing fields, wrong types, wrong content type) as `JSON_EXTRACTION`,
/// rule violations as `VALIDATION_ERROR` with per-field details.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct Restock {
///     #[validate(range(min = 0))]
///     quantity: i32,
/// }
///
/// async fn restock(ValidatedJson(payload): ValidatedJson<Restock>) -> String {
///     format!("Restocking {}", payload.quantity)
/// }
///
/// let app = Router::new().route("/restock", post(restock));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
