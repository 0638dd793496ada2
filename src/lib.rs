//! Frontal web del servicio de detección de plagio.
//!
//! Sirve el formulario, envía el fichero o el texto al endpoint
//! `check_plagiarism` y pinta el informe de similitud en la página.

pub mod api;
pub mod app_state;
pub mod client;
pub mod config;
pub mod dom;
pub mod handler;
pub mod models;
pub mod page;
pub mod render;
pub mod submission;
