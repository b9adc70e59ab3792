//! Page section blocks

use pulldown_cmark::{html, Options, Parser};
use serde::{Deserialize, Serialize};

use crate::helpers::html_escape;
use crate::i18n::{I18nString, Lang};

/// One block of a dynamic page, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SectionBlock {
    /// Heading plus a markdown body
    #[serde(rename_all = "camelCase")]
    Text {
        id: String,
        #[serde(default)]
        title: I18nString,
        body: I18nString,
    },
    /// Image beside a markdown body
    #[serde(rename_all = "camelCase")]
    ImageText {
        id: String,
        image: String,
        #[serde(default)]
        title: I18nString,
        body: I18nString,
        #[serde(default)]
        image_left: bool,
    },
    /// Call-to-action banner
    #[serde(rename_all = "camelCase")]
    Cta {
        id: String,
        title: I18nString,
        button_label: I18nString,
        button_href: String,
    },
}

impl SectionBlock {
    pub fn id(&self) -> &str {
        match self {
            SectionBlock::Text { id, .. }
            | SectionBlock::ImageText { id, .. }
            | SectionBlock::Cta { id, .. } => id,
        }
    }

    pub fn title(&self) -> &I18nString {
        match self {
            SectionBlock::Text { title, .. }
            | SectionBlock::ImageText { title, .. }
            | SectionBlock::Cta { title, .. } => title,
        }
    }

    /// Render the block as an HTML fragment in the given language
    pub fn render_html(&self, lang: Lang) -> String {
        match self {
            SectionBlock::Text { title, body, .. } => format!(
                r#"<section class="block block-text">{}<div class="body">{}</div></section>"#,
                heading(title, lang),
                render_markdown(body.get(lang))
            ),
            SectionBlock::ImageText {
                image,
                title,
                body,
                image_left,
                ..
            } => {
                let side = if *image_left { "left" } else { "right" };
                format!(
                    r#"<section class="block block-image-text image-{}"><img src="{}" alt="{}">{}<div class="body">{}</div></section>"#,
                    side,
                    html_escape(image),
                    html_escape(title.get(lang)),
                    heading(title, lang),
                    render_markdown(body.get(lang))
                )
            }
            SectionBlock::Cta {
                title,
                button_label,
                button_href,
                ..
            } => format!(
                r#"<section class="block block-cta"><h2>{}</h2><a class="button" href="{}">{}</a></section>"#,
                html_escape(title.get(lang)),
                html_escape(button_href),
                html_escape(button_label.get(lang))
            ),
        }
    }
}

fn heading(title: &I18nString, lang: Lang) -> String {
    let text = title.get(lang);
    if text.trim().is_empty() {
        String::new()
    } else {
        format!("<h2>{}</h2>", html_escape(text))
    }
}

/// Render a markdown body; raw HTML in the source is escaped
fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        pulldown_cmark::Event::Html(raw) | pulldown_cmark::Event::InlineHtml(raw) => {
            pulldown_cmark::Event::Text(html_escape(&raw).into())
        }
        other => other,
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
