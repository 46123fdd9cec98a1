// Domain layer: models, library-boundary errors and ports (host runtime, scraping library, storage).

pub mod model;
pub mod ports;
