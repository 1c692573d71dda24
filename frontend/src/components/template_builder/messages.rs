use common::builder::FieldPatch;
use common::model::template::{Template, TemplateType};

pub enum Msg {
    Loaded(Template),
    LoadFailed(String),
    SetName(String),
    SetDescription(String),
    SetType(TemplateType),
    SetSubject(String),
    AddGroup,
    RemoveGroup(usize),
    RenameGroup(usize, String),
    MoveGroupUp(usize),
    MoveGroupDown(usize),
    AddField(usize),
    RemoveField(usize, usize),
    PatchField(usize, usize, FieldPatch),
    MoveFieldUp(usize, usize),
    MoveFieldDown(usize, usize),
    OpenPreview,
    Save,
    Saved(Template),
    SaveFailed(String),
    DismissAlert,
}
