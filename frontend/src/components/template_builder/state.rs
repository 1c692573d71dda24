//! State of the template builder page.
//!
//! The draft is the single source of truth. Lint issues and the dirty flag are
//! derived from it after every edit.

use common::builder::{lint_schema, SchemaIssue};
use common::model::template::TemplateDraft;
use yew::prelude::*;

use crate::helpers::{compute_md5, set_window_dirty_flag};

pub struct TemplateBuilder {
    /// Template being edited, as it will be sent on save.
    pub draft: TemplateDraft,

    /// Everything that currently blocks saving.
    pub issues: Vec<SchemaIssue>,

    /// MD5 of the draft as last loaded or saved.
    pub saved_md5: Option<String>,

    /// Guard for the first-render load.
    pub loaded: bool,

    pub loading: bool,
    pub saving: bool,
    pub alert: Option<String>,

    /// Top sheet holding the live preview.
    pub preview_ref: NodeRef,
}

impl TemplateBuilder {
    pub fn new(created_by: &str) -> Self {
        let mut builder = Self {
            draft: TemplateDraft {
                created_by: created_by.to_string(),
                ..TemplateDraft::default()
            },
            issues: Vec::new(),
            saved_md5: None,
            loaded: false,
            loading: false,
            saving: false,
            alert: None,
            preview_ref: NodeRef::default(),
        };
        builder.mark_saved();
        builder
    }

    pub fn draft_md5(&self) -> String {
        compute_md5(&serde_json::to_string(&self.draft).unwrap_or_default())
    }

    pub fn is_dirty(&self) -> bool {
        self.saved_md5
            .as_ref()
            .map_or(true, |saved| saved != &self.draft_md5())
    }

    /// Re-derives issues and the dirty flag. Call after any draft change.
    pub fn refresh(&mut self) {
        self.issues = lint_schema(&self.draft.dynamic_schema);
        set_window_dirty_flag(self.is_dirty());
    }

    pub fn mark_saved(&mut self) {
        self.saved_md5 = Some(self.draft_md5());
        self.refresh();
    }
}
