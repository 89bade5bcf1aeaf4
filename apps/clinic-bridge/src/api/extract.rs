//! Extrator JSON com validação de presença dos campos

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::Request;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ClinicError;

/// Como `Json<T>`, mas roda `Validate` e devolve erros no formato `{error}`
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S, B> FromRequest<S, B> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    B: Send + 'static,
    Json<T>: FromRequest<S, B, Rejection = JsonRejection>,
{
    type Rejection = ClinicError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ClinicError::Validation(format!(
                    "Corpo da requisição inválido: {}",
                    rejection.body_text()
                ))
            })?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
