//! Shell CRUD routes.

use crate::handlers::shell::{
    create_shell, delete_shell, generate_shell_id, get_shell, list_shells, update_shell,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn shell_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/aas",
            get(get_shell)
                .post(create_shell)
                .put(update_shell)
                .delete(delete_shell),
        )
        .route("/aas_list", get(list_shells))
        .route("/generate_id", get(generate_shell_id))
        .with_state(state)
}
