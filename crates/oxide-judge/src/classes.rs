//! Class and attribute names shared with stylesheets and server markup.
//!
//! Icons use Font Awesome glyph classes; the page must load that font.

/// Marker attribute of a validatable field.
pub const FIELD_ATTR: &str = "data-validate";

/// Form attribute opting out of validation when set to `true`.
pub const FORM_NO_VALIDATE_ATTR: &str = "data-novalidate";

/// Added to the parent of every validated field.
pub const PARENT_BASE: &str = "has-feedback";
pub const PARENT_SUCCESS: &str = "has-success";
pub const PARENT_ERROR: &str = "has-error";

pub const FIELD_SUCCESS: &str = "success";
pub const FIELD_ERROR: &str = "error";

/// Class of the inline error-message block.
pub const MESSAGE: &str = "help-block";

/// Tag of status icons. Every child of the parent with this tag is
/// treated as an icon.
pub const ICON_TAG: &str = "i";
pub const ICON_BASE: &str = "form-control-feedback";
pub const ICON_SUCCESS: &str = "fa fa-check";
pub const ICON_ERROR: &str = "fa fa-times";

/// Added once to identifiable inputs when a form is attached.
pub const INPUT_BASE: &str = "form-control";
