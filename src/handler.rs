//! Manejador del envío del formulario: valida, envía, interpreta y pinta.

use tracing::{error, info, Instrument};
use uuid::Uuid;

use crate::client::PlagiarismService;
use crate::models::CheckResponse;
use crate::page::{FormBindings, Page};
use crate::render::{self, RenderOutcome};
use crate::submission::{FormInput, Submission, EMPTY_SUBMISSION_ALERT};

/// Resultado de un ciclo completo de envío.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Sin fichero ni texto: alerta y ninguna petición.
    Blocked,
    /// El servidor devolvió `error`; se muestra tal cual.
    ServerError(String),
    Rendered(RenderOutcome),
    /// Fallo de red o de parseo; se muestra el mensaje genérico.
    Failed,
}

/// Manejador ligado a un formulario concreto.
#[derive(Debug, Clone)]
pub struct SubmissionHandler<S> {
    service: S,
    bindings: FormBindings,
}

/// Liga el formulario descrito por `bindings` al servicio indicado.
pub fn bind_form<S: PlagiarismService>(service: S, bindings: FormBindings) -> SubmissionHandler<S> {
    info!(form = %bindings.form, results = %bindings.results, "Formulario ligado");
    SubmissionHandler { service, bindings }
}

impl<S: PlagiarismService> SubmissionHandler<S> {
    pub fn bindings(&self) -> &FormBindings {
        &self.bindings
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Ejecuta un ciclo de envío sobre `page` con el estado actual del formulario.
    pub async fn on_submit(&self, page: &mut Page, input: FormInput) -> SubmitOutcome {
        let span = tracing::info_span!("submit", cycle = %Uuid::new_v4());
        self.run_cycle(page, input).instrument(span).await
    }

    async fn run_cycle(&self, page: &mut Page, input: FormInput) -> SubmitOutcome {
        let results_id = self.bindings.results.as_str();

        if let Some(results) = page.get_element_by_id_mut(results_id) {
            results.clear_children();
        }

        let submission = match Submission::from_form(input) {
            Ok(submission) => submission,
            Err(_) => {
                page.alert(EMPTY_SUBMISSION_ALERT);
                return SubmitOutcome::Blocked;
            }
        };

        info!(field = submission.field_name(), "Comprobando plagio");

        let value = match self.service.check(submission).await {
            Ok(value) => value,
            Err(e) => {
                error!("Error consultando el servicio de plagio: {}", e);
                render::display_failure(page, results_id);
                return SubmitOutcome::Failed;
            }
        };

        match CheckResponse::from_value(value) {
            Ok(CheckResponse::Error(message)) => {
                info!("El servicio devolvió un error: {}", message);
                render::display_error(page, results_id, &message);
                SubmitOutcome::ServerError(message)
            }
            Ok(CheckResponse::Report(report)) => {
                if let Some(id) = report.submission_id.as_deref() {
                    info!(submission_id = id, timestamp = ?report.timestamp, "Informe recibido");
                }
                SubmitOutcome::Rendered(render::display_results(page, results_id, &report))
            }
            Err(e) => {
                error!("Respuesta con forma inesperada: {}", e);
                render::display_failure(page, results_id);
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::CheckError;
    use crate::render::GENERIC_FAILURE_MESSAGE;
    use crate::submission::SelectedFile;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Servicio falso que registra los envíos y devuelve una respuesta fija.
    struct FakeService {
        reply: fn() -> Result<Value, CheckError>,
        seen: Mutex<Vec<Submission>>,
    }

    impl FakeService {
        fn new(reply: fn() -> Result<Value, CheckError>) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PlagiarismService for FakeService {
        async fn check(&self, submission: Submission) -> Result<Value, CheckError> {
            self.seen.lock().unwrap().push(submission);
            (self.reply)()
        }
    }

    fn report_reply() -> Result<Value, CheckError> {
        Ok(json!({
            "overall_similarity": 42,
            "chunks": [{
                "chunk_id": 1,
                "similarity": 80,
                "chunk_text": "sample",
                "matches": [{ "url": "http://example.com", "similarity": 95 }]
            }]
        }))
    }

    fn text_input(text: &str) -> FormInput {
        FormInput {
            files: Vec::new(),
            text: text.to_string(),
        }
    }

    fn run(service: FakeService, page: &mut Page, input: FormInput) -> (SubmitOutcome, Vec<Submission>) {
        let handler = bind_form(service, FormBindings::default());
        let outcome = tokio_test::block_on(handler.on_submit(page, input));
        let seen = handler.service().seen.lock().unwrap().clone();
        (outcome, seen)
    }

    #[test]
    fn blank_input_alerts_without_request() {
        let mut page = Page::with_form(&FormBindings::default());
        let (outcome, seen) = run(FakeService::new(report_reply), &mut page, text_input("  "));
        assert_eq!(outcome, SubmitOutcome::Blocked);
        assert!(seen.is_empty());
        assert_eq!(page.alerts(), [EMPTY_SUBMISSION_ALERT]);
    }

    #[test]
    fn file_is_sent_even_with_text_present() {
        let mut page = Page::with_form(&FormBindings::default());
        let input = FormInput {
            files: vec![SelectedFile {
                name: "essay.txt".to_string(),
                content_type: Some("text/plain".to_string()),
                bytes: b"hola".to_vec(),
            }],
            text: "ignored".to_string(),
        };
        let (outcome, seen) = run(FakeService::new(report_reply), &mut page, input);
        assert_eq!(outcome, SubmitOutcome::Rendered(RenderOutcome::Rendered { chunks: 1 }));
        assert_eq!(seen.len(), 1);
        assert!(matches!(&seen[0], Submission::File(f) if f.name == "essay.txt"));
    }

    #[test]
    fn server_error_is_shown_verbatim() {
        let mut page = Page::with_form(&FormBindings::default());
        let (outcome, _) = run(
            FakeService::new(|| Ok(json!({ "error": "bad file" }))),
            &mut page,
            text_input("hello"),
        );
        assert_eq!(outcome, SubmitOutcome::ServerError("bad file".to_string()));
        let results = page.get_element_by_id("results").unwrap();
        assert!(results.text_content().contains("bad file"));
        assert!(results.find_all_by_tag("h2").is_empty());
    }

    #[test]
    fn transport_failure_shows_generic_message() {
        let mut page = Page::with_form(&FormBindings::default());
        let (outcome, _) = run(
            FakeService::new(|| Err(serde_json::from_str::<Value>("<html>").unwrap_err().into())),
            &mut page,
            text_input("hello"),
        );
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(
            page.get_element_by_id("results").unwrap().text_content(),
            GENERIC_FAILURE_MESSAGE
        );
    }

    #[test]
    fn malformed_report_is_a_failure() {
        let mut page = Page::with_form(&FormBindings::default());
        let (outcome, _) = run(
            FakeService::new(|| Ok(json!({ "chunks": [] }))),
            &mut page,
            text_input("hello"),
        );
        assert_eq!(outcome, SubmitOutcome::Failed);
    }

    #[test]
    fn resubmitting_clears_previous_results() {
        let mut page = Page::with_form(&FormBindings::default());
        run(FakeService::new(report_reply), &mut page, text_input("first"));
        assert!(page
            .get_element_by_id("results")
            .unwrap()
            .text_content()
            .contains("sample"));

        let (outcome, _) = run(
            FakeService::new(|| Ok(json!({ "overall_similarity": 7 }))),
            &mut page,
            text_input("second"),
        );
        assert_eq!(outcome, SubmitOutcome::Rendered(RenderOutcome::NoChunks));
        let results = page.get_element_by_id("results").unwrap();
        assert_eq!(results.text_content(), "Overall Similarity: 7%");
    }

    #[test]
    fn blocked_submit_still_clears_previous_results() {
        let mut page = Page::with_form(&FormBindings::default());
        run(FakeService::new(report_reply), &mut page, text_input("first"));
        run(FakeService::new(report_reply), &mut page, text_input(""));
        assert!(page.get_element_by_id("results").unwrap().is_empty());
    }
}
