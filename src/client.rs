//! Cliente del endpoint `check_plagiarism`.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::submission::Submission;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("fallo de transporte: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("la respuesta no es JSON válido: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Transporte hacia el servicio de plagio.
///
/// Devuelve el cuerpo JSON tal cual; interpretar `error` frente a informe es
/// cosa del manejador del formulario.
#[async_trait]
pub trait PlagiarismService: Send + Sync {
    async fn check(&self, submission: Submission) -> Result<Value, CheckError>;
}

/// Implementación HTTP con `reqwest`.
#[derive(Debug, Clone)]
pub struct CheckerClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl CheckerClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PlagiarismService for CheckerClient {
    async fn check(&self, submission: Submission) -> Result<Value, CheckError> {
        let field = submission.field_name();
        let form = submission.into_multipart()?;

        debug!(endpoint = %self.endpoint, field, "Enviando petición al servicio de plagio");

        // Sin timeout: se espera a la respuesta o a un fallo de transporte.
        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        // El cuerpo se interpreta sea cual sea el código HTTP; los errores
        // del servidor llegan como `{"error": ...}` con 400/500.
        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, bytes = body.len(), "Respuesta recibida");

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl<T: PlagiarismService + ?Sized> PlagiarismService for std::sync::Arc<T> {
    async fn check(&self, submission: Submission) -> Result<Value, CheckError> {
        (**self).check(submission).await
    }
}
