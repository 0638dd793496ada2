//! Carga y gestión de configuración de la aplicación (servidor + servicio de plagio).

use std::env;

use anyhow::{anyhow, Context, Result};
use url::Url;

/// Ruta relativa del endpoint del servicio, resuelta contra la URL de la página.
pub const CHECK_ENDPOINT_PATH: &str = "quizzes/plagarism-checker/check_plagiarism";

/// Configuración completa de la aplicación.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_addr: String,
    /// URL de la página que aloja el formulario; el endpoint se resuelve contra ella.
    pub checker_page_url: Url,
    pub frontend_dir: String,
    pub max_upload_bytes: usize,
    pub open_browser: bool,
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno (usando .env si existe).
    pub fn from_env() -> Result<Self> {
        let server_addr =
            env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:3322".to_string());

        let page_url_str = env::var("CHECKER_PAGE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000/".to_string());
        let checker_page_url = Url::parse(&page_url_str)
            .with_context(|| format!("CHECKER_PAGE_URL no es una URL válida: {page_url_str}"))?;

        let frontend_dir = env::var("FRONTEND_DIR").unwrap_or_else(|_| "frontend".to_string());

        let max_upload_mb = match env::var("MAX_UPLOAD_MB") {
            Ok(raw) => raw
                .parse::<usize>()
                .map_err(|_| anyhow!("MAX_UPLOAD_MB debe ser un entero: {raw}"))?,
            Err(_) => 16,
        };

        let open_browser = match env::var("OPEN_BROWSER") {
            Ok(raw) => parse_flag(&raw)?,
            Err(_) => true,
        };

        Ok(Self {
            server_addr,
            checker_page_url,
            frontend_dir,
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            open_browser,
        })
    }

    /// URL absoluta del endpoint `check_plagiarism`.
    pub fn check_endpoint(&self) -> Result<Url> {
        resolve_endpoint(&self.checker_page_url)
    }
}

/// Resuelve la ruta relativa del endpoint igual que lo haría un navegador
/// desde la página que aloja el formulario.
pub fn resolve_endpoint(page_url: &Url) -> Result<Url> {
    page_url
        .join(CHECK_ENDPOINT_PATH)
        .with_context(|| format!("No se pudo resolver el endpoint contra {page_url}"))
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("Valor booleano no soportado: {other}")),
    }
}
