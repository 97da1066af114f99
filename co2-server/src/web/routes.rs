//! HTTP route handlers.

use askama::Template;
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::{
    Form, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use super::dto::*;
use super::messages::ResultView;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/about", get(about_page))
        .route("/api/cities", get(list_cities))
        .route("/api/calculate", post(calculate_json))
        .route("/calculate", post(calculate_form))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the calculation form.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let template = IndexTemplate {
        cities: state.cities.as_ref().clone(),
        modes: ModeOption::all(),
    };
    render(&template).map(Html)
}

/// About page, listing the emission factors in use.
async fn about_page(State(state): State<AppState>) -> AboutTemplate {
    AboutTemplate {
        factors: FactorView::from_table(&state.factors),
    }
}

/// Known cities, for autocomplete.
async fn list_cities(State(state): State<AppState>) -> Json<CitiesResponse> {
    Json(CitiesResponse {
        cities: state.cities.as_ref().clone(),
    })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Calculate from a submitted HTML form.
///
/// Returns the result panel fragment for HTML clients, JSON otherwise.
/// Validation failures are normal outcomes and use status 200; a body that
/// cannot be read as a form is a 400.
async fn calculate_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Form<CalculateForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = body.map_err(|e| {
        warn!("rejected calculation form: {e}");
        AppError::BadRequest {
            message: e.body_text(),
        }
    })?;

    let request = form.into_request();
    let outcome = state.resolver().resolve(&request);
    info!(
        origin = %request.origin.trim(),
        destination = %request.destination.trim(),
        ok = outcome.is_ok(),
        "calculation"
    );

    if accepts_html(&headers) {
        let view = ResultView::from_outcome(&request.origin, &request.destination, &outcome);
        let html = render(&ResultTemplate::from(view))?;
        Ok(Html(html).into_response())
    } else {
        Ok(Json(CalculateResponse::from_outcome(&outcome)).into_response())
    }
}

/// Calculate from a JSON body.
async fn calculate_json(
    State(state): State<AppState>,
    body: Result<Json<CalculateForm>, JsonRejection>,
) -> Result<Json<CalculateResponse>, AppError> {
    let Json(form) = body.map_err(|e| {
        warn!("rejected calculation body: {e}");
        AppError::BadRequest {
            message: e.body_text(),
        }
    })?;

    let request = form.into_request();
    let outcome = state.resolver().resolve(&request);
    Ok(Json(CalculateResponse::from_outcome(&outcome)))
}

/// Render a template, mapping failures to an internal error.
fn render(template: &impl Template) -> Result<String, AppError> {
    template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => {
                error!("{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Catalog;
    use axum::body::{Body, to_bytes};
    use axum::extract::FromRequest;
    use axum::http::{HeaderValue, Request};

    fn state() -> AppState {
        AppState::new(Catalog::default())
    }

    fn form_request(content_type: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri("/calculate");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn post_form(content_type: Option<&str>, body: &str) -> Response {
        let request = form_request(content_type, body);
        let form = Form::<CalculateForm>::from_request(request, &()).await;
        match calculate_form(State(state()), HeaderMap::new(), form).await {
            Ok(response) => response,
            Err(e) => e.into_response(),
        }
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const FORM: &str = "application/x-www-form-urlencoded";

    #[test]
    fn accepts_html_header() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_html(&headers));

        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        assert!(!accepts_html(&headers));

        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml"),
        );
        assert!(accepts_html(&headers));
    }

    #[test]
    fn app_error_status() {
        let response = AppError::BadRequest {
            message: "bad".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::Internal {
            message: "boom".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn calculate_form_valid_body() {
        let response = post_form(
            Some(FORM),
            "origin=S%C3%A3o+Paulo&destination=Rio+de+Janeiro&transport=car",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["emission_kg"], 51.48);
    }

    #[tokio::test]
    async fn calculate_form_duplicate_field_is_bad_request() {
        let response = post_form(
            Some(FORM),
            "origin=A&origin=B&destination=C&transport=car",
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert!(body["error"].as_str().is_some_and(|e| e.contains("origin")));
    }

    #[tokio::test]
    async fn calculate_form_without_content_type_is_bad_request() {
        let response = post_form(None, "origin=A&destination=B&transport=car").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert!(body["error"].is_string());
    }
}
