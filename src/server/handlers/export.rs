use axum::http::header;
use axum::response::IntoResponse;
use axum::Form;
use serde::Deserialize;

/// The export path is an opaque pass-through: whatever the client holds
/// in the form field comes back verbatim, no validation.
#[derive(Debug, Deserialize)]
pub struct ExportForm {
    #[serde(default = "default_output_json")]
    pub output_json: String,
}

fn default_output_json() -> String {
    "{}".to_string()
}

pub async fn download(Form(form): Form<ExportForm>) -> impl IntoResponse {
    let headers = [
        (header::CONTENT_TYPE, "application/json"),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=response.json",
        ),
    ];

    (headers, form.output_json)
}
