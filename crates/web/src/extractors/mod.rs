//! Custom extractors.

mod validated_form;

pub use validated_form::{FormPage, ValidatedForm};
