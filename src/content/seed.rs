//! Hard-coded seed document
//!
//! Used on first run, when the persisted document is unreadable or older than
//! [`CURRENT_VERSION`], and to refill collections found empty. Seed ids are
//! fixed so that two seed documents always compare equal.

use chrono::{DateTime, Utc};

use super::*;
use crate::i18n::I18nString;

fn t(ro: &str, en: &str) -> I18nString {
    I18nString::new(ro, en)
}

fn seed_date(unix_secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(unix_secs, 0).unwrap_or_default()
}

/// Build the complete seed document
pub fn seed_database() -> AppDatabase {
    AppDatabase {
        version: CURRENT_VERSION,
        settings: seed_settings(),
        projects: seed_projects(),
        media: seed_media(),
        pages: seed_pages(),
        leads: Vec::new(),
        reviews: seed_reviews(),
        services: seed_services(),
        process_steps: seed_process_steps(),
        about: seed_about(),
        contact: seed_contact(),
    }
}

pub fn seed_settings() -> Settings {
    let nav = [
        ("Acasă", "Home", "/"),
        ("Proiecte", "Projects", "/proiecte"),
        ("Servicii", "Services", "/servicii"),
        ("Despre", "About", "/despre"),
        ("Contact", "Contact", "/contact"),
    ]
    .into_iter()
    .map(|(ro, en, href)| NavItem {
        label: t(ro, en),
        href: href.to_string(),
        visible: true,
    })
    .collect();

    let rooms = [
        ("bucatarie", "Bucătărie", "Kitchen"),
        ("living", "Living", "Living room"),
        ("dormitor", "Dormitor", "Bedroom"),
        ("baie", "Baie", "Bathroom"),
        ("birou", "Birou", "Office"),
    ]
    .into_iter()
    .map(|(id, ro, en)| VocabularyItem {
        id: id.to_string(),
        label: t(ro, en),
    })
    .collect();

    let categories = [
        ("rezidential", "Rezidențial", "Residential"),
        ("comercial", "Comercial", "Commercial"),
        ("horeca", "HoReCa", "Hospitality"),
    ]
    .into_iter()
    .map(|(id, ro, en)| VocabularyItem {
        id: id.to_string(),
        label: t(ro, en),
    })
    .collect();

    let slides = [
        (
            "/images/hero/kitchen.jpg",
            "Mobilier la comandă, făcut să dureze",
            "Custom furniture, built to last",
        ),
        (
            "/images/hero/wardrobe.jpg",
            "Dressinguri gândite pe milimetru",
            "Wardrobes planned to the millimetre",
        ),
        (
            "/images/hero/living.jpg",
            "Livinguri cu personalitate",
            "Living rooms with character",
        ),
        (
            "/images/hero/office.jpg",
            "Spații de lucru care inspiră",
            "Workspaces that inspire",
        ),
        (
            "/images/hero/workshop.jpg",
            "Din atelierul nostru, direct la tine",
            "From our workshop straight to your home",
        ),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (image, ro, en))| HeroSlide {
        id: format!("slide-{}", i + 1),
        image: image.to_string(),
        title: t(ro, en),
        subtitle: t(
            "Proiectare, producție și montaj",
            "Design, manufacturing and installation",
        ),
    })
    .collect();

    Settings {
        nav,
        active_theme: "obsidian".to_string(),
        brand_name: "Atelier Mobila".to_string(),
        tagline: t("Mobilier la comandă", "Custom furniture"),
        rooms,
        categories,
        admin_password: "admin".to_string(),
        hero: HeroConfig {
            mode: HeroMode::Slider,
            slides,
            interval_ms: 6000,
        },
    }
}

pub fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: "p-kitchen-floreasca".to_string(),
            title: t("Bucătărie Floreasca", "Floreasca kitchen"),
            summary: t(
                "Bucătărie în U cu fronturi din furnir de stejar și blat din cuarț.",
                "U-shaped kitchen with oak veneer fronts and a quartz worktop.",
            ),
            project_type: "rezidential".to_string(),
            published: true,
            cover_media_id: Some("m-floreasca-1".to_string()),
            year: Some(2023),
            city: "București".to_string(),
        },
        Project {
            id: "p-wardrobe-cluj".to_string(),
            title: t("Dressing walk-in Cluj", "Cluj walk-in wardrobe"),
            summary: t(
                "Dressing cu iluminare integrată și uși glisante din sticlă fumurie.",
                "Walk-in wardrobe with built-in lighting and smoked glass sliding doors.",
            ),
            project_type: "rezidential".to_string(),
            published: true,
            cover_media_id: Some("m-cluj-1".to_string()),
            year: Some(2024),
            city: "Cluj-Napoca".to_string(),
        },
        Project {
            id: "p-cafe-brasov".to_string(),
            title: t("Cafenea centrul vechi", "Old town café"),
            summary: t(
                "Bar, rafturi și mese realizate din lemn masiv de nuc.",
                "Bar counter, shelving and tables made from solid walnut.",
            ),
            project_type: "horeca".to_string(),
            published: true,
            cover_media_id: Some("m-brasov-1".to_string()),
            year: Some(2022),
            city: "Brașov".to_string(),
        },
    ]
}

pub fn seed_media() -> Vec<Media> {
    let entries = [
        ("m-floreasca-1", "p-kitchen-floreasca", "bucatarie", MediaStage::Installed, 5),
        ("m-floreasca-2", "p-kitchen-floreasca", "bucatarie", MediaStage::Production, 4),
        ("m-floreasca-3", "p-kitchen-floreasca", "bucatarie", MediaStage::Design, 3),
        ("m-cluj-1", "p-wardrobe-cluj", "dormitor", MediaStage::Installed, 5),
        ("m-cluj-2", "p-wardrobe-cluj", "dormitor", MediaStage::Design, 4),
        ("m-brasov-1", "p-cafe-brasov", "living", MediaStage::Installed, 5),
        ("m-brasov-2", "p-cafe-brasov", "living", MediaStage::Production, 4),
    ];

    let mut media = Vec::with_capacity(entries.len());
    let mut order_in_project = 0;
    let mut last_project = "";
    for (id, project_id, room, stage, rating) in entries {
        if project_id != last_project {
            order_in_project = 0;
            last_project = project_id;
        }
        media.push(Media {
            id: id.to_string(),
            project_id: project_id.to_string(),
            url: format!("/images/projects/{}.jpg", id),
            room: room.to_string(),
            stage,
            rating,
            order: order_in_project,
            alt: I18nString::default(),
        });
        order_in_project += 1;
    }
    media
}

pub fn seed_pages() -> Vec<Page> {
    vec![Page {
        id: "page-materiale".to_string(),
        slug: "materiale".to_string(),
        title: t("Materiale", "Materials"),
        published: true,
        hero: PageHero {
            title: t("Materialele cu care lucrăm", "The materials we work with"),
            subtitle: t(
                "Lemn masiv, furnir, PAL melaminat și feronerie premium",
                "Solid wood, veneer, melamine board and premium hardware",
            ),
            image: Some("/images/pages/materials.jpg".to_string()),
        },
        sections: vec![
            SectionBlock::Text {
                id: "sec-materiale-intro".to_string(),
                title: t("Lemn masiv", "Solid wood"),
                body: t(
                    "Folosim **stejar**, **nuc** și **frasin** uscate în cuptor.",
                    "We use kiln-dried **oak**, **walnut** and **ash**.",
                ),
            },
            SectionBlock::ImageText {
                id: "sec-materiale-feronerie".to_string(),
                image: "/images/pages/hardware.jpg".to_string(),
                title: t("Feronerie", "Hardware"),
                body: t(
                    "Balamale și glisiere cu închidere lină, garantate pe viață.",
                    "Soft-close hinges and runners with a lifetime warranty.",
                ),
                image_left: true,
            },
            SectionBlock::Cta {
                id: "sec-materiale-cta".to_string(),
                title: t("Vrei o ofertă?", "Want a quote?"),
                button_label: t("Contactează-ne", "Contact us"),
                button_href: "/contact".to_string(),
            },
        ],
    }]
}

pub fn seed_reviews() -> Vec<Review> {
    vec![
        Review {
            id: "r-andreea".to_string(),
            name: "Andreea M.".to_string(),
            city: "București".to_string(),
            text: t(
                "Bucătăria a ieșit exact cum ne-am imaginat. Montaj impecabil.",
                "The kitchen turned out exactly as we imagined. Flawless installation.",
            ),
            rating: 5,
            status: ReviewStatus::Approved,
            consent_public: true,
            project_id: Some("p-kitchen-floreasca".to_string()),
            created_at: seed_date(1_696_156_800),
        },
        Review {
            id: "r-mihai".to_string(),
            name: "Mihai P.".to_string(),
            city: "Cluj-Napoca".to_string(),
            text: t(
                "Comunicare excelentă și termene respectate.",
                "Excellent communication and deadlines met.",
            ),
            rating: 5,
            status: ReviewStatus::Approved,
            consent_public: true,
            project_id: Some("p-wardrobe-cluj".to_string()),
            created_at: seed_date(1_709_251_200),
        },
        Review {
            id: "r-elena".to_string(),
            name: "Elena D.".to_string(),
            city: "Brașov".to_string(),
            text: t(
                "Mobilierul a transformat complet cafeneaua.",
                "The furniture completely transformed the café.",
            ),
            rating: 4,
            status: ReviewStatus::Approved,
            consent_public: true,
            project_id: Some("p-cafe-brasov".to_string()),
            created_at: seed_date(1_661_990_400),
        },
    ]
}

pub fn seed_services() -> Vec<Service> {
    [
        ("svc-kitchens", "Bucătării", "Kitchens", "kitchen"),
        ("svc-wardrobes", "Dressinguri", "Wardrobes", "wardrobe"),
        ("svc-living", "Mobilier living", "Living room furniture", "sofa"),
        ("svc-commercial", "Amenajări comerciale", "Commercial fit-outs", "store"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (id, ro, en, icon))| Service {
        id: id.to_string(),
        title: t(ro, en),
        description: t(
            "Proiectare 3D, producție proprie și montaj.",
            "3D design, in-house manufacturing and installation.",
        ),
        icon: icon.to_string(),
        order: i as u32,
    })
    .collect()
}

pub fn seed_process_steps() -> Vec<ProcessStep> {
    [
        ("step-consult", "Consultanță", "Consultation", "Discutăm nevoile și bugetul.", "We discuss your needs and budget."),
        ("step-measure", "Măsurători", "Measurements", "Venim la tine și măsurăm spațiul.", "We visit and measure the space."),
        ("step-design", "Proiect 3D", "3D design", "Primești randări fotorealiste.", "You receive photorealistic renders."),
        ("step-build", "Producție", "Manufacturing", "Realizăm mobilierul în atelierul propriu.", "We build the furniture in our own workshop."),
        ("step-install", "Montaj", "Installation", "Montăm și predăm la cheie.", "We install and hand over turnkey."),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (id, ro, en, dro, den))| ProcessStep {
        id: id.to_string(),
        title: t(ro, en),
        description: t(dro, den),
        order: i as u32 + 1,
    })
    .collect()
}

pub fn seed_about() -> AboutContent {
    AboutContent {
        title: t("Despre atelier", "About the workshop"),
        body: t(
            "Suntem o echipă de tâmplari și designeri care produce mobilier la comandă din 2009.",
            "We are a team of cabinetmakers and designers building custom furniture since 2009.",
        ),
        image: Some("/images/about/team.jpg".to_string()),
        stats: vec![
            AboutStat {
                value: "15+".to_string(),
                label: t("ani de experiență", "years of experience"),
            },
            AboutStat {
                value: "800+".to_string(),
                label: t("proiecte livrate", "projects delivered"),
            },
        ],
    }
}

pub fn seed_contact() -> ContactInfo {
    ContactInfo {
        phone: "+40 722 000 000".to_string(),
        email: "contact@ateliermobila.ro".to_string(),
        address: t(
            "Str. Fabricii 12, București",
            "12 Fabricii St., Bucharest",
        ),
        hours: t("Luni-Vineri 9:00-18:00", "Monday-Friday 9:00-18:00"),
        map_url: Some("https://maps.google.com/?q=Str.+Fabricii+12+Bucuresti".to_string()),
        socials: vec![
            SocialLink {
                network: "instagram".to_string(),
                url: "https://instagram.com/ateliermobila".to_string(),
            },
            SocialLink {
                network: "facebook".to_string(),
                url: "https://facebook.com/ateliermobila".to_string(),
            },
        ],
    }
}
