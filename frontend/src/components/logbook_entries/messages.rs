use common::entries::RowId;
use common::fetch::RequestToken;
use common::model::entry::{EntryStatus, LogbookEntry};
use common::model::field::FieldValue;
use common::model::template::Template;
use common::validation::FieldKey;

/// Members of the filter bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterField {
    AcademicYear,
    Batch,
    Subject,
    Module,
}

pub enum Msg {
    SetFilter(FilterField, String),
    ApplyFilter,
    Loaded(RequestToken, Option<Template>, Vec<LogbookEntry>),
    LoadFailed(RequestToken, String),
    NewEntry,
    Edit(String),
    Cancel(RowId),
    SetValue(RowId, FieldKey, FieldValue),
    SetFile(RowId, FieldKey, Option<web_sys::File>),
    SetRemarks(RowId, String),
    Save(RowId, EntryStatus),
    Saved(RowId, LogbookEntry),
    SaveFailed(RowId, String),
    DismissAlert,
}
