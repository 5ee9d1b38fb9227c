//! Field presets carrying the rules their kind usually needs.

mod checkbox;
mod select;
mod text;

pub use checkbox::{acceptance_field, boolean_field};
pub use select::choice_field;
pub use text::{char_field, email_field, number_field, password_fields, text_field};
