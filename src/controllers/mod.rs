//! Demo controllers for the bundled sample application.
//!
//! Each controller groups related endpoints and hands its bindings to the
//! registry in one batch. They double as working examples of the three
//! binding shapes: literal paths, a restricted method set, and `ALLOW_ALL`
//! wildcard patterns.

mod api;
mod assets;
mod pages;

pub use api::ApiController;
pub use assets::AssetsController;
pub use pages::PagesController;
