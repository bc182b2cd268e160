use axum::response::Html;

/// Browser form for entering a topic and reading the generated article.
pub async fn index_page() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}
