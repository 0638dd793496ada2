//! Renderizado del informe de plagio sobre el contenedor de resultados.

use tracing::{error, info, warn};

use crate::dom::Element;
use crate::models::{format_percent, Chunk, Match, Report};
use crate::page::Page;

/// Mensaje genérico para fallos de red o de parseo.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while checking for plagiarism.";

/// Resultado explícito de renderizar un informe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Se escribieron la cabecera y `chunks` bloques.
    Rendered { chunks: usize },
    /// Sólo la cabecera: el informe no trae chunks.
    NoChunks,
    /// No existe el contenedor de resultados; no se tocó la página.
    MissingContainer,
}

/// Escribe el informe en el contenedor `results_id` de la página.
pub fn display_results(page: &mut Page, results_id: &str, report: &Report) -> RenderOutcome {
    let Some(results) = page.get_element_by_id_mut(results_id) else {
        error!("No se encontró el contenedor de resultados #{results_id}");
        return RenderOutcome::MissingContainer;
    };

    results.replace_children(Element::new("h2").text(format!(
        "Overall Similarity: {}%",
        format_percent(report.overall_similarity)
    )));

    let chunks = match report.chunks.as_deref() {
        Some(chunks) if !chunks.is_empty() => chunks,
        _ => {
            info!("El informe no contiene chunks");
            return RenderOutcome::NoChunks;
        }
    };

    for chunk in chunks {
        results.append_child(chunk_block(chunk));
    }

    RenderOutcome::Rendered {
        chunks: chunks.len(),
    }
}

/// Mensaje de error devuelto por el servidor, en rojo y en lugar del informe.
pub fn display_error(page: &mut Page, results_id: &str, message: &str) {
    show_failure(page, results_id, format!("Error: {message}"));
}

/// Mensaje genérico para fallos de transporte o de parseo.
pub fn display_failure(page: &mut Page, results_id: &str) {
    show_failure(page, results_id, GENERIC_FAILURE_MESSAGE.to_string());
}

fn show_failure(page: &mut Page, results_id: &str, text: String) {
    match page.get_element_by_id_mut(results_id) {
        Some(results) => results.replace_children(
            Element::new("p")
                .attr("class", "error")
                .attr("style", "color: red;")
                .text(text),
        ),
        None => warn!("No se encontró el contenedor de resultados #{results_id}"),
    }
}

fn chunk_block(chunk: &Chunk) -> Element {
    let list = chunk
        .matches
        .iter()
        .fold(Element::new("ul"), |ul, m| ul.child(match_item(m)));

    Element::new("div")
        .attr("class", "chunk")
        .child(Element::new("h3").text(format!(
            "Chunk {} (Similarity: {}%)",
            chunk.chunk_id,
            format_percent(chunk.similarity)
        )))
        .child(Element::new("p").text(chunk.chunk_text.as_str()))
        .child(Element::new("h4").text("Matches:"))
        .child(list)
}

fn match_item(m: &Match) -> Element {
    Element::new("li")
        .child(
            Element::new("a")
                .attr("href", m.url.as_str())
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .text(m.url.as_str()),
        )
        .text(format!(" - Similarity: {}%", format_percent(m.similarity)))
}
