/// Validation schemas for every form the portal accepts

use crate::forms::validation::{FormSchema, Rule, MB};

/// Largest accepted image upload
pub const IMAGE_LIMIT: u64 = 5 * MB;

/// Largest accepted document upload
pub const DOCUMENT_LIMIT: u64 = 15 * MB;

/// Public report form: text fields and an image are mandatory, a document is optional
pub fn report_schema() -> FormSchema {
    FormSchema::new()
        .field("title", [Rule::Required("Project title is required")])
        .field("county", [Rule::Required("County is required")])
        .field("details", [Rule::Required("Details are required")])
        .field(
            "images",
            [
                Rule::RequiredFile("Images are required"),
                Rule::MaxBytes(IMAGE_LIMIT, "Image should be less than 5 MB"),
            ],
        )
        .field(
            "documents",
            [Rule::MaxBytes(DOCUMENT_LIMIT, "Document should be less than 15 MB")],
        )
}

/// Dashboard county create/edit form
pub fn county_schema() -> FormSchema {
    FormSchema::new()
        .field("name", [Rule::Required("County name is required")])
        .field(
            "county_number",
            [
                Rule::Required("County number is required"),
                Rule::WholeNumber("County number must be a whole number"),
            ],
        )
}

/// Dashboard project edit form; new files are optional
pub fn project_schema() -> FormSchema {
    FormSchema::new()
        .field("title", [Rule::Required("Title is required")])
        .field("county", [Rule::Required("County is required")])
        .field("status", [Rule::Required("Project status is required")])
        .field("description", [Rule::Required("Description is required")])
        .field("docs", [Rule::MaxBytes(DOCUMENT_LIMIT, "Docs should be less than 15 MB")])
        .field("images", [Rule::MaxBytes(IMAGE_LIMIT, "Image should be less than 5 MB")])
}
