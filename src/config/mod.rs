//! Configuration module

mod site;

pub use site::ChatConfig;
pub use site::EmailConfig;
pub use site::LeadConfig;
pub use site::ServerConfig;
pub use site::SiteConfig;
