pub mod entry_review;
pub mod field_input;
pub mod logbook_entries;
pub mod template_builder;
pub mod template_preview;
