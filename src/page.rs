//! Página del formulario: plantilla, identificadores de elementos y alertas.

use crate::dom::Element;

/// Identificadores de los elementos de la página con los que trabaja el formulario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormBindings {
    pub form: String,
    pub file_input: String,
    pub text_input: String,
    pub results: String,
}

impl Default for FormBindings {
    fn default() -> Self {
        Self {
            form: "plagiarism-form".to_string(),
            file_input: "file-upload".to_string(),
            text_input: "text-input".to_string(),
            results: "results".to_string(),
        }
    }
}

/// Documento de la página en memoria.
#[derive(Debug, Clone)]
pub struct Page {
    root: Element,
    alerts: Vec<String>,
}

impl Page {
    /// Página construida a partir de un árbol arbitrario.
    pub fn from_root(root: Element) -> Self {
        Self {
            root,
            alerts: Vec::new(),
        }
    }

    /// Plantilla estándar con el formulario y el contenedor de resultados.
    pub fn with_form(bindings: &FormBindings) -> Self {
        let form = Element::new("form")
            .attr("id", bindings.form.as_str())
            .attr("method", "post")
            .attr("action", "/")
            .attr("enctype", "multipart/form-data")
            .child(
                Element::new("label")
                    .attr("for", bindings.file_input.as_str())
                    .text("Upload a file (.pdf or .txt):"),
            )
            .child(
                Element::new("input")
                    .attr("type", "file")
                    .attr("id", bindings.file_input.as_str())
                    .attr("name", bindings.file_input.as_str())
                    .attr("accept", ".pdf,.txt"),
            )
            .child(
                Element::new("label")
                    .attr("for", bindings.text_input.as_str())
                    .text("Or paste your text:"),
            )
            .child(
                Element::new("textarea")
                    .attr("id", bindings.text_input.as_str())
                    .attr("name", bindings.text_input.as_str())
                    .attr("rows", "10"),
            )
            .child(
                Element::new("button")
                    .attr("type", "submit")
                    .text("Check for Plagiarism"),
            );

        let root = Element::new("html")
            .attr("lang", "en")
            .child(
                Element::new("head")
                    .child(Element::new("meta").attr("charset", "utf-8"))
                    .child(Element::new("title").text("Plagiarism Checker"))
                    .child(
                        Element::new("link")
                            .attr("rel", "stylesheet")
                            .attr("href", "/style.css"),
                    ),
            )
            .child(
                Element::new("body")
                    .child(Element::new("h1").text("Plagiarism Checker"))
                    .child(form)
                    .child(Element::new("div").attr("id", bindings.results.as_str())),
            );

        Self::from_root(root)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        self.root.find_by_id(id)
    }

    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.root.find_by_id_mut(id)
    }

    /// Alerta bloqueante: se registra y se muestra como diálogo abierto.
    pub fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
        let dialog = Element::new("dialog")
            .attr("open", "open")
            .attr("role", "alertdialog")
            .child(Element::new("p").text(message))
            .child(
                Element::new("form")
                    .attr("method", "dialog")
                    .child(Element::new("button").text("OK")),
            );
        match self.root.find_by_tag_mut("body") {
            Some(body) => body.append_child(dialog),
            None => self.root.append_child(dialog),
        }
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn to_html(&self) -> String {
        format!("<!DOCTYPE html>{}", self.root.to_html())
    }
}
