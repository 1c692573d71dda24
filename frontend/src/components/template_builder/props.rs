use std::rc::Rc;

use yew::prelude::*;

use crate::config::{AppConfig, Session};

#[derive(Properties, PartialEq, Clone)]
pub struct TemplateBuilderProps {
    pub config: Rc<AppConfig>,
    pub session: Rc<Session>,
    /// Template to edit. `None` starts a new one.
    #[prop_or_default]
    pub template_id: Option<String>,
}
