//! Recogida y validación de lo que el usuario envía desde el formulario.

use mime_guess::MimeGuess;
use reqwest::multipart::{Form, Part};
use thiserror::Error;

/// Mensaje de la alerta cuando no hay fichero ni texto.
pub const EMPTY_SUBMISSION_ALERT: &str = "Please upload a file or enter text.";

/// Fichero seleccionado en el control de subida.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// Tipo MIME declarado o, si falta, deducido de la extensión.
    pub fn mime(&self) -> String {
        self.content_type
            .clone()
            .filter(|ct| !ct.is_empty())
            .unwrap_or_else(|| {
                MimeGuess::from_path(&self.name)
                    .first_or_octet_stream()
                    .essence_str()
                    .to_string()
            })
    }
}

/// Estado de los controles del formulario en el momento del envío.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub files: Vec<SelectedFile>,
    pub text: String,
}

/// Lo que finalmente se envía: un fichero o un texto, nunca ambos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    File(SelectedFile),
    Text(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{}", EMPTY_SUBMISSION_ALERT)]
pub struct EmptySubmission;

impl Submission {
    /// El primer fichero gana; si no hay, el texto recortado si no está vacío.
    pub fn from_form(input: FormInput) -> Result<Self, EmptySubmission> {
        if let Some(file) = input.files.into_iter().next() {
            return Ok(Submission::File(file));
        }
        let text = input.text.trim();
        if text.is_empty() {
            return Err(EmptySubmission);
        }
        Ok(Submission::Text(text.to_string()))
    }

    /// Nombre del campo multipart que llevará el contenido.
    pub fn field_name(&self) -> &'static str {
        match self {
            Submission::File(_) => "file",
            Submission::Text(_) => "text",
        }
    }

    pub fn into_multipart(self) -> Result<Form, reqwest::Error> {
        let form = match self {
            Submission::File(file) => {
                let mime = file.mime();
                let part = Part::bytes(file.bytes)
                    .file_name(file.name)
                    .mime_str(&mime)?;
                Form::new().part("file", part)
            }
            Submission::Text(text) => Form::new().text("text", text),
        };
        Ok(form)
    }
}
