pub mod form_builder;
pub mod html_renderer;
pub mod label;
pub mod shell;
pub mod variants;

#[cfg(test)]
mod shell_test;
