//! Frontmatter post-processing: field rules, cleaning, serialization and
//! validation.
//!
//! The compiler runs these in order for every (spec, platform) pair:
//!
//! 1. [`fields::transform_fields`] drops fields the platform does not support
//! 2. [`fields::add_platform_metadata`] attaches the generated `metadata` block
//! 3. [`cleaner::clean`] removes empty fields
//! 4. [`serializer`] writes the platform dialect
//! 5. [`validator::validate`] parses the text back

pub mod cleaner;
pub mod fields;
pub mod serializer;
pub mod validator;

use crate::platform::Platform;
use crate::value::FrontmatterDocument;

/// Serialize `document` in `platform`'s dialect.
#[must_use]
pub fn serialize_frontmatter(document: &FrontmatterDocument, platform: Platform) -> String {
    platform.profile().serializer().serialize(document)
}
