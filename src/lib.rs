//! Portfolio site front-end
//!
//! Contact form validation and submission plus the page effects of a static
//! portfolio site. Controllers are headless: they render through view traits
//! and talk to the network through [`form::FormSubmitter`], so everything
//! runs natively under test. The `web` module binds them to the live DOM when
//! compiled for `wasm32`.

pub mod clock;
pub mod config;
pub mod effects;
pub mod form;
pub mod logging;

#[cfg(target_arch = "wasm32")]
mod web;

pub use clock::Clock;
pub use config::SiteConfig;
pub use effects::PageEffectsController;
pub use form::FormController;
