/// Form validation layer
///
/// Submissions are read into a `FormInput`, checked against a declarative
/// `FormSchema`, and only then handed to the REST client or the mail relay.

// Reading urlencoded and multipart bodies
pub mod upload;

// Rules, schemas and per-field errors
pub mod validation;

// The portal's concrete forms
pub mod schemas;

pub use upload::{FormInput, UploadedFile};
pub use validation::{FormSchema, Rule, ValidationErrors};
