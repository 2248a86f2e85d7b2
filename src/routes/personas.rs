use axum::Json;

use crate::models::{persona::PERSONAS, Persona};

/// Lists the built-in personas; the first one is the fallback
pub async fn list() -> Json<&'static [Persona]> {
    Json(&PERSONAS)
}
