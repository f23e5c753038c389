use reedline::{Prompt, PromptEditMode, PromptHistorySearch};
use std::borrow::Cow;

use contacts::Route;

pub(crate) struct MyPrompt {
    route: Route,
    user: Option<String>,
}

impl MyPrompt {
    pub(crate) fn new(route: Route, user: Option<&str>) -> Self {
        Self {
            route,
            user: user.map(|v| v.to_string()),
        }
    }
}

impl Prompt for MyPrompt {
    fn render_prompt_left(&self) -> Cow<str> {
        match self.user.as_ref() {
            Some(user) => format!("contatos:{}@{}$ ", user, self.route).into(),
            None => format!("contatos:{}$ ", self.route).into(),
        }
    }

    fn render_prompt_right(&self) -> Cow<str> {
        "".into()
    }

    fn render_prompt_indicator(&self, _: PromptEditMode) -> Cow<str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        "... ".into()
    }

    fn render_prompt_history_search_indicator(&self, _: PromptHistorySearch) -> Cow<str> {
        "".into()
    }
}
