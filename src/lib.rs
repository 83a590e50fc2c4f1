//! # fieldshell - Form Field Shells
//!
//! fieldshell renders a complete form field (label, element, description,
//! decoration, error text) from a single declarative call. The element itself
//! comes from a pluggable widget renderer; fieldshell decides which wrapper
//! markup goes around it.
//!
//! ## Features
//!
//! - **3 Presentation Variants**: Standard (`<div>`), Table (`<tr>`), Simple (bare)
//! - **Custom Variants**: override only the templates that differ, inherit the rest
//! - **Derived Labels**: `first_name` → `First name`, with colon and required marker
//! - **Composite Widgets**: radio groups, multi-choice checkboxes, date selects, field sets
//! - **Safe by Default**: caller text is escaped, presentation options never leak as attributes
//!
//! ## Quick Start
//!
//! ```rust
//! use fieldshell::adapters::form_builder::FormBuilder;
//! use fieldshell::domain::FieldOptions;
//! use serde_json::json;
//!
//! # fn main() -> fieldshell::error::FormResult<()> {
//! let form = FormBuilder::new("cc", json!({ "number": "123" }))?;
//! let html = form.text_field("number", FieldOptions::new().with("required", true))?;
//! assert!(html.as_str().contains("Number<span class=\"required\">*</span>"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! fieldshell is split into ports and adapters:
//! - **Domain**: options, markup, field kinds and the widget renderer port
//! - **Adapters**: label derivation, shell building, variants, HTML renderer, form builder
//! - **Config**: form defaults loaded from file and environment

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;

pub use adapters::form_builder::FormBuilder;
pub use domain::{FieldKind, FieldOptions, Markup, PresentationVariant};
pub use error::{FormError, FormResult};
