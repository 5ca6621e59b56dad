//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::api::handlers::{health_handler, user_handler};
use crate::domain::User;

/// OpenAPI documentation for the users API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        version = "0.1.0",
        description = "CRUD over a PostgreSQL users table",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        health_handler::root,
        health_handler::health,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
    ),
    components(
        schemas(
            User,
            user_handler::UserPayload,
            health_handler::HealthResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and database health"),
        (name = "Users", description = "User CRUD operations")
    )
)]
pub struct ApiDoc;
