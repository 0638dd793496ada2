//! Modelos del informe devuelto por el servicio de plagio.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// Identificador de un chunk. Es opaco: sólo se usa para mostrarlo.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ChunkId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkId::Number(n) => match n.as_f64() {
                Some(v) if n.is_f64() => f.write_str(&format_percent(v)),
                _ => write!(f, "{n}"),
            },
            ChunkId::Text(s) => f.write_str(s),
        }
    }
}

/// Una fuente encontrada para un chunk.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Match {
    pub url: String,
    pub similarity: f64,
    /// Extracto del contenido coincidente; no se muestra.
    #[serde(default)]
    pub matched_content: Option<String>,
}

/// Segmento del texto enviado, puntuado por separado en el servidor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Chunk {
    pub chunk_id: ChunkId,
    pub similarity: f64,
    pub chunk_text: String,
    pub matches: Vec<Match>,
}

/// Informe completo de similitud.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Report {
    pub overall_similarity: f64,
    #[serde(default)]
    pub chunks: Option<Vec<Chunk>>,
    #[serde(default)]
    pub submission_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Respuesta interpretada del endpoint `check_plagiarism`.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckResponse {
    /// El servidor informó de un error en el campo `error`.
    Error(String),
    Report(Report),
}

impl CheckResponse {
    /// Interpreta el cuerpo JSON ya parseado.
    ///
    /// Un campo `error` con valor "verdadero" (no nulo, no `false`, no cadena
    /// vacía, no cero) tiene prioridad y el resto del objeto se ignora.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        if let Some(error) = value.get("error").filter(|e| is_truthy(e)) {
            let message = match error {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return Ok(CheckResponse::Error(message));
        }
        serde_json::from_value(value).map(CheckResponse::Report)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Formatea un porcentaje como lo mostraría la página: `42`, `42.5`.
pub fn format_percent(value: f64) -> String {
    // Display de f64 ya omite la parte decimal en valores enteros.
    format!("{value}")
}
