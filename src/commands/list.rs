//! List store content

use anyhow::Result;

use crate::helpers::truncate;
use crate::i18n::Lang;
use crate::Atelier;

/// List store content by type
pub fn run(atelier: &Atelier, content_type: &str) -> Result<()> {
    let mut store = atelier.open_store();
    let lang = atelier.config.language;

    match content_type {
        "project" | "projects" => {
            let projects = store.get_projects();
            println!("Projects ({}):", projects.len());
            for project in projects {
                println!(
                    "  {} - {} [{}]{}",
                    project.id,
                    project.title.get(lang),
                    project.project_type,
                    if project.published { "" } else { " (draft)" }
                );
            }
        }
        "media" => {
            let media = store.get_media(None);
            println!("Media ({}):", media.len());
            for item in media {
                println!(
                    "  {} - {} #{} {:?} [{}]",
                    item.id,
                    item.project_id,
                    item.order,
                    item.stage,
                    truncate(&item.url, 48, None)
                );
            }
        }
        "page" | "pages" => {
            let pages = store.get_pages();
            println!("Pages ({}):", pages.len());
            for page in pages {
                println!(
                    "  /{} - {} ({} sections)",
                    page.slug,
                    page.title.get(lang),
                    page.sections.len()
                );
            }
        }
        "lead" | "leads" => {
            let leads = store.get_leads();
            println!("Leads ({}):", leads.len());
            for lead in leads {
                println!(
                    "  {} - {} <{}> {:?}: {}",
                    lead.created_at.format("%Y-%m-%d %H:%M"),
                    lead.name,
                    if lead.email.is_empty() { &lead.phone } else { &lead.email },
                    lead.status,
                    truncate(&lead.message, 40, None)
                );
            }
        }
        "review" | "reviews" => {
            let reviews = store.get_reviews();
            println!("Reviews ({}):", reviews.len());
            for review in reviews {
                println!(
                    "  {} - {} {}/5 {:?}{}: {}",
                    review.id,
                    review.name,
                    review.rating,
                    review.status,
                    if review.consent_public { "" } else { " (no consent)" },
                    truncate(review.text.get(Lang::Ro), 40, None)
                );
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: projects, media, pages, leads, reviews",
                content_type
            );
        }
    }

    Ok(())
}
