//! OpenAPI document and the documentation UI routes.

use crate::error::ErrorBody;
use crate::model::{AssetKind, ModelType, ShellForm, ShellUpdateForm};
use crate::response::{DeletedBody, GeneratedIdBody, ShellListBody, ShellView};
use axum::{
    response::{Html, Redirect},
    routing::get,
    Json, Router,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Asset Administration Shell Repository",
        version = "1.0.0",
        description = "Manages Asset Administration Shell records over an embedded SQLite store"
    ),
    paths(
        crate::handlers::shell::create_shell,
        crate::handlers::shell::list_shells,
        crate::handlers::shell::get_shell,
        crate::handlers::shell::update_shell,
        crate::handlers::shell::delete_shell,
        crate::handlers::shell::generate_shell_id,
    ),
    components(schemas(
        ShellForm,
        ShellUpdateForm,
        ShellView,
        ShellListBody,
        DeletedBody,
        GeneratedIdBody,
        ErrorBody,
        AssetKind,
        ModelType,
    )),
    tags(
        (name = "Asset Administration Shell", description = "This interface allows managing Asset Administration Shells")
    )
)]
pub struct ApiDoc;

// `dom_id: "#swagger-ui"` contains `"#`, so the delimiter needs two hashes.
const SWAGGER_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <title>Asset Administration Shell Repository</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css"/>
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {
      SwaggerUIBundle({ url: "/openapi.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

async fn home() -> Redirect {
    Redirect::to("/docs")
}

async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_PAGE)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET / (redirect), /docs (Swagger UI), /openapi.json.
pub fn docs_routes() -> Router {
    Router::new()
        .route("/", get(home))
        .route("/docs", get(swagger_ui))
        .route("/openapi.json", get(openapi_json))
}
