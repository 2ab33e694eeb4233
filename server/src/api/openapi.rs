//! OpenAPI specification and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{health, ingredients, links, recipes, tags, users};
use crate::api::types::PaginationMeta;
use crate::data::types::{
    IngredientAmount, IngredientRow, IngredientTotal, RecipeIngredientDetail, TagRow,
};
use crate::domain::catalog::{RecipeDetail, RecipePreview, SubscriptionView, UserView};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ladle API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Recipe sharing backend"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "users", description = "User profiles and subscriptions"),
        (name = "ingredients", description = "Ingredient dictionary"),
        (name = "tags", description = "Tag dictionary"),
        (name = "recipes", description = "Recipes, favorites and the shopping list"),
        (name = "links", description = "Short-link resolution")
    ),
    paths(
        // Health
        health::health,
        // Users
        users::list_users,
        users::create_user,
        users::get_current_user,
        users::list_subscriptions,
        users::get_user,
        users::subscribe,
        users::unsubscribe,
        // Ingredients
        ingredients::list_ingredients,
        ingredients::get_ingredient,
        ingredients::create_ingredient,
        ingredients::delete_ingredient,
        // Tags
        tags::list_tags,
        tags::get_tag,
        tags::create_tag,
        tags::delete_tag,
        // Recipes
        recipes::list_recipes,
        recipes::create_recipe,
        recipes::get_recipe,
        recipes::update_recipe,
        recipes::delete_recipe,
        recipes::add_favorite,
        recipes::remove_favorite,
        recipes::add_to_shopping_cart,
        recipes::remove_from_shopping_cart,
        recipes::download_shopping_cart,
        recipes::get_short_link,
        // Links
        links::resolve_short_link,
    ),
    components(schemas(
        // API types
        PaginationMeta,
        // Health
        health::HealthResponse,
        // Users
        users::types::CreateUserRequest,
        users::types::ListUsersQuery,
        users::types::SubscriptionsQuery,
        UserView,
        SubscriptionView,
        // Ingredients
        ingredients::types::CreateIngredientRequest,
        ingredients::types::ListIngredientsQuery,
        IngredientRow,
        IngredientTotal,
        // Tags
        tags::types::CreateTagRequest,
        TagRow,
        // Recipes
        recipes::types::RecipeRequest,
        recipes::types::ListRecipesQuery,
        recipes::types::ShortLinkResponse,
        RecipePreview,
        RecipeDetail,
        RecipeIngredientDetail,
        IngredientAmount,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Serve Swagger UI from CDN
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Ladle API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        html { box-sizing: border-box; overflow-y: scroll; }
        *, *:before, *:after { box-sizing: inherit; }
        body { margin: 0; background: #fafafa; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: "/api/openapi.json",
                dom_id: '#swagger-ui',
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout",
                deepLinking: true,
                showExtensions: true,
                showCommonExtensions: true
            });
        };
    </script>
</body>
</html>"#;
