//! Server-rendered preview of user-authored pages

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use super::leads::LangQuery;
use super::AppState;
use crate::content::Page;
use crate::helpers::html_escape;
use crate::i18n::Lang;

/// `GET /p/:slug`: published pages only
pub(super) async fn page_preview(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<LangQuery>,
) -> Response {
    let lang = query.lang.unwrap_or(state.language);

    let (page, brand) = {
        let mut store = state.store.lock().await;
        let page = store
            .get_page_by_slug(&slug)
            .filter(|p| p.published)
            .cloned();
        (page, store.get_settings().brand_name.clone())
    };

    match page {
        Some(page) => Html(render_page(&page, &brand, lang)).into_response(),
        None => {
            tracing::debug!("No published page for slug '{}'", slug);
            let message = html_escape(&state.catalog.t(lang, "page.not_found"));
            (
                StatusCode::NOT_FOUND,
                Html(document(lang, &message, &format!("<h1>{}</h1>", message))),
            )
                .into_response()
        }
    }
}

/// Render a page with its hero and every section block
pub fn render_page(page: &Page, brand: &str, lang: Lang) -> String {
    let hero_title = if page.hero.title.is_blank() {
        page.title.get(lang)
    } else {
        page.hero.title.get(lang)
    };

    let mut body = String::from(r#"<header class="hero">"#);
    if let Some(image) = page.hero.image.as_deref().filter(|s| !s.is_empty()) {
        body.push_str(&format!(r#"<img src="{}" alt="">"#, html_escape(image)));
    }
    body.push_str(&format!("<h1>{}</h1>", html_escape(hero_title)));
    let subtitle = page.hero.subtitle.get(lang);
    if !subtitle.trim().is_empty() {
        body.push_str(&format!("<p>{}</p>", html_escape(subtitle)));
    }
    body.push_str("</header><main>");
    for section in &page.sections {
        body.push_str(&section.render_html(lang));
    }
    body.push_str("</main>");

    let title = if brand.is_empty() {
        html_escape(page.title.get(lang))
    } else {
        format!("{} | {}", html_escape(page.title.get(lang)), html_escape(brand))
    };
    document(lang, &title, &body)
}

fn document(lang: Lang, title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"{}\"><head><meta charset=\"utf-8\"><title>{}</title></head><body>{}</body></html>",
        lang.code(),
        title,
        body
    )
}
