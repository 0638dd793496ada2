use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tracing::{error, info};

use crate::{
    app_state::AppState,
    page::{FormBindings, Page},
    render,
    submission::{FormInput, SelectedFile},
};

// --- Router ---

pub fn create_router(app_state: AppState) -> Router {
    let max_upload = app_state.config.max_upload_bytes;
    Router::new()
        .route("/", get(form_page_handler).post(submit_handler))
        .layer(DefaultBodyLimit::max(max_upload))
        .with_state(app_state)
}

// --- Handlers ---

#[axum::debug_handler]
async fn form_page_handler(State(state): State<AppState>) -> Html<String> {
    Html(Page::with_form(state.handler.bindings()).to_html())
}

/// Recibe el envío del formulario, ejecuta el ciclo y devuelve la página resultante.
#[axum::debug_handler]
async fn submit_handler(State(state): State<AppState>, multipart: Multipart) -> impl IntoResponse {
    let bindings = state.handler.bindings();
    let mut page = Page::with_form(bindings);

    let input = match read_form_input(multipart, bindings).await {
        Ok(input) => input,
        Err(e) => {
            error!("Error leyendo el formulario: {}", e);
            render::display_failure(&mut page, &bindings.results);
            return (StatusCode::BAD_REQUEST, Html(page.to_html()));
        }
    };

    let outcome = state.handler.on_submit(&mut page, input).await;
    info!(?outcome, "Ciclo de envío terminado");

    (StatusCode::OK, Html(page.to_html()))
}

/// Lee los controles del formulario del cuerpo multipart.
///
/// Un control de fichero sin selección llega con nombre de fichero vacío y
/// se ignora. Los campos desconocidos se descartan.
async fn read_form_input(
    mut multipart: Multipart,
    bindings: &FormBindings,
) -> Result<FormInput, axum::extract::multipart::MultipartError> {
    let mut input = FormInput::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if name == bindings.file_input {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await?;
            if file_name.is_empty() {
                continue;
            }
            input.files.push(SelectedFile {
                name: file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
        } else if name == bindings.text_input {
            input.text = field.text().await?;
        }
    }

    Ok(input)
}
