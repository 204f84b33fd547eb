use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::Form;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::pipeline::QueryPipeline;
use crate::server::page;
use crate::state::AppState;

pub const MISSING_QUERY_MESSAGE: &str = "Missing 'query' field in JSON.";

#[derive(Debug, Deserialize)]
pub struct QueryForm {
    pub input_json: String,
}

pub async fn read_form(State(_state): State<Arc<AppState>>) -> Html<String> {
    let default_json = serde_json::to_string_pretty(&json!({
        "query": "Tell me about yourself"
    }))
    .unwrap_or_default();

    Html(page::render(&default_json, None))
}

pub async fn handle_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<QueryForm>,
) -> Html<String> {
    let output = shape_output(&form.input_json, &state.pipeline).await;
    let pretty = serde_json::to_string_pretty(&output).unwrap_or_default();

    Html(page::render(&form.input_json, Some(&pretty)))
}

/// Turn the submitted JSON into either `{query, response}` or `{error}`.
/// Pipeline failures never escape as a fault; they become the error
/// payload and the form stays usable.
pub async fn shape_output(input_json: &str, pipeline: &QueryPipeline) -> Value {
    let data: Value = match serde_json::from_str(input_json) {
        Ok(data) => data,
        Err(err) => return json!({ "error": err.to_string() }),
    };

    let query = match data.get("query").and_then(|v| v.as_str()) {
        Some(query) if !query.is_empty() => query.to_string(),
        _ => return json!({ "error": MISSING_QUERY_MESSAGE }),
    };

    match pipeline.answer(&query).await {
        Ok(response) => json!({ "query": query, "response": response }),
        Err(err) => json!({ "error": err.to_string() }),
    }
}
