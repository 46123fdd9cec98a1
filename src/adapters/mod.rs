// Adapters layer: concrete implementations of the domain ports (workflow host, scraping library).

pub mod host;
pub mod instagram;
