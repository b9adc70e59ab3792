//! Helper functions shared by page rendering and lead notifications

mod html;

pub use html::*;
