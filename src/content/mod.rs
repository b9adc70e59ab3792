//! Content module - the site document, its records and the seed content

mod model;
pub mod seed;
mod section;

pub use model::*;
pub use section::SectionBlock;
