pub mod app;
pub mod client;
pub mod error;
pub mod settings;
pub mod models {
    pub mod dispersion;
    pub mod document;
    pub mod query;
}
pub mod upstream {
    pub mod client;
    pub mod normalize;
}
pub mod services {
    pub mod catalog;
    pub mod corpus;
    pub mod dispersion;
    pub mod fallback;
    pub mod outcome;
    pub mod transform;
}
pub mod api {
    pub mod corpus;
    pub mod dispersion;
    pub mod document;
    pub mod errors;
    pub mod health;
}
