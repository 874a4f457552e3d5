use axum::response::Html;

use crate::render;

pub async fn home() -> Html<String> {
    Html(render::home::page())
}

pub async fn team() -> Html<String> {
    Html(render::team::page())
}
