//! Site content records
//!
//! Everything the site shows lives in one [`AppDatabase`] document. JSON keys
//! are camelCase so documents exported from the store can be edited by hand
//! and imported back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SectionBlock;
use crate::i18n::I18nString;

/// Schema generation written by this build
pub const CURRENT_VERSION: u32 = 4;

/// A record addressable by id inside one of the document's collections
pub trait Record {
    fn id(&self) -> &str;
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn id(&self) -> &str {
                    &self.id
                }
            }
        )*
    };
}

/// Generate a fresh record id
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// The whole site: settings plus every content collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDatabase {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub media: Vec<Media>,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub leads: Vec<Lead>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub process_steps: Vec<ProcessStep>,
    #[serde(default)]
    pub about: AboutContent,
    #[serde(default)]
    pub contact: ContactInfo,
}

/// Site-wide settings singleton
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub nav: Vec<NavItem>,
    pub active_theme: String,
    pub brand_name: String,
    pub tagline: I18nString,
    /// Room vocabulary used to tag media
    pub rooms: Vec<VocabularyItem>,
    /// Project type vocabulary
    pub categories: Vec<VocabularyItem>,
    pub admin_password: String,
    pub hero: HeroConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub label: I18nString,
    pub href: String,
    #[serde(default = "default_true")]
    pub visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub id: String,
    pub label: I18nString,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroMode {
    #[default]
    Slider,
    Static,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroConfig {
    pub mode: HeroMode,
    pub slides: Vec<HeroSlide>,
    /// Autoplay interval for the slider
    pub interval_ms: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSlide {
    pub id: String,
    pub image: String,
    pub title: I18nString,
    #[serde(default)]
    pub subtitle: I18nString,
}

/// A finished furniture project shown in the portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Empty on create; the store assigns one
    #[serde(default)]
    pub id: String,
    pub title: I18nString,
    #[serde(default)]
    pub summary: I18nString,
    /// Category tag, one of `Settings::categories`
    #[serde(rename = "type")]
    pub project_type: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub cover_media_id: Option<String>,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaStage {
    Design,
    Production,
    #[default]
    Installed,
}

/// An image belonging to a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[serde(default)]
    pub id: String,
    /// Owning project; orphans are tolerated
    pub project_id: String,
    /// Plain URL or a `data:` URI
    pub url: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub stage: MediaStage,
    /// Star rating, 0-5
    #[serde(default)]
    pub rating: u8,
    /// Position within the owning project
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub alt: I18nString,
}

/// A user-authored page built from section blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub id: String,
    pub slug: String,
    pub title: I18nString,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub hero: PageHero,
    #[serde(default)]
    pub sections: Vec<SectionBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageHero {
    pub title: I18nString,
    pub subtitle: I18nString,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Quoted,
    Won,
    Lost,
}

/// An inbound contact-form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub city: String,
    pub message: String,
    #[serde(default)]
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Hidden,
}

/// A customer testimonial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub city: String,
    pub text: I18nString,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub status: ReviewStatus,
    /// Customer agreed to have the review shown publicly
    #[serde(default)]
    pub consent_public: bool,
    #[serde(default)]
    pub project_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn is_public(&self) -> bool {
        self.status == ReviewStatus::Approved && self.consent_public
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default)]
    pub id: String,
    pub title: I18nString,
    #[serde(default)]
    pub description: I18nString,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStep {
    #[serde(default)]
    pub id: String,
    pub title: I18nString,
    #[serde(default)]
    pub description: I18nString,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutContent {
    pub title: I18nString,
    pub body: I18nString,
    pub image: Option<String>,
    pub stats: Vec<AboutStat>,
}

impl AboutContent {
    pub fn is_blank(&self) -> bool {
        self.title.is_blank() && self.body.is_blank()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AboutStat {
    pub value: String,
    pub label: I18nString,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
    pub address: I18nString,
    pub hours: I18nString,
    pub map_url: Option<String>,
    pub socials: Vec<SocialLink>,
}

impl ContactInfo {
    pub fn is_blank(&self) -> bool {
        self.phone.trim().is_empty() && self.email.trim().is_empty() && self.address.is_blank()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub network: String,
    pub url: String,
}

fn default_true() -> bool {
    true
}

impl_record!(Project, Media, Page, Lead, Review, Service, ProcessStep);
