use std::collections::HashMap;

use common::entries::{EntryList, RowId};
use common::fetch::RequestSequencer;
use common::model::entry::LogbookEntry;
use common::model::schema::TemplateSchema;
use common::model::template::{Template, TemplateFilter};
use common::validation::FieldKey;

use super::messages::FilterField;

/// State of the student logbook page.
pub struct LogbookEntries {
    pub filter: TemplateFilter,

    /// Template matching the current filter, once loaded.
    pub template: Option<Template>,

    pub entries: EntryList,

    /// Files picked in file fields. Only their names go into the value bag.
    pub files: HashMap<(RowId, FieldKey), web_sys::File>,

    /// Orders page loads so a late answer for an old filter is dropped.
    pub sequencer: RequestSequencer,

    pub loading: bool,
    pub saving: Option<RowId>,
    pub alert: Option<String>,
    pub loaded: bool,
}

impl LogbookEntries {
    pub fn new() -> Self {
        Self {
            filter: TemplateFilter::default(),
            template: None,
            entries: EntryList::default(),
            files: HashMap::new(),
            sequencer: RequestSequencer::default(),
            loading: false,
            saving: None,
            alert: None,
            loaded: false,
        }
    }

    pub fn set_filter(&mut self, field: FilterField, value: String) {
        let value = (!value.trim().is_empty()).then_some(value);
        match field {
            FilterField::AcademicYear => self.filter.academic_year_id = value,
            FilterField::Batch => self.filter.batch_id = value,
            FilterField::Subject => self.filter.subject_id = value,
            FilterField::Module => self.filter.module_id = value,
        }
    }

    pub fn filter_value(&self, field: FilterField) -> String {
        let value = match field {
            FilterField::AcademicYear => &self.filter.academic_year_id,
            FilterField::Batch => &self.filter.batch_id,
            FilterField::Subject => &self.filter.subject_id,
            FilterField::Module => &self.filter.module_id,
        };
        value.clone().unwrap_or_default()
    }

    pub fn page_schema(&self) -> Option<&TemplateSchema> {
        self.template.as_ref().map(|t| &t.dynamic_schema)
    }

    /// Schema an entry was written against: its embedded template when the
    /// backend sent one, else the page's template.
    pub fn schema_for<'a>(&'a self, entry: &'a LogbookEntry) -> Option<&'a TemplateSchema> {
        entry
            .template
            .as_ref()
            .map(|t| &t.dynamic_schema)
            .or_else(|| self.page_schema())
    }

    pub fn schema_for_row(&self, id: &RowId) -> Option<TemplateSchema> {
        match self.entries.get(id)?.persisted() {
            Some(entry) => self.schema_for(entry).cloned(),
            None => self.page_schema().cloned(),
        }
    }

    pub fn drop_files_of(&mut self, id: &RowId) {
        self.files.retain(|(row, _), _| row != id);
    }
}
