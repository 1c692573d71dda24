use std::rc::Rc;

use yew::prelude::*;

use crate::config::{AppConfig, Session};

#[derive(Properties, PartialEq, Clone)]
pub struct LogbookEntriesProps {
    pub config: Rc<AppConfig>,
    pub session: Rc<Session>,
}
