//! Configuration module

mod site;

pub use site::IndexPageConfig;
pub use site::MarkdownConfig;
pub use site::MarkerConfig;
pub use site::NavLink;
pub use site::SiteConfig;
pub use site::ValidationMode;
