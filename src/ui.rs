use crate::error::Result;
use crate::render::ListView;

/// Kind of notice shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A user-visible alert or banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, title: title.into(), message: message.into() }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, title: title.into(), message: message.into() }
    }
}

/// Field of a credential form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Name,
    Password,
}

/// A single input the gateway asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub kind: FieldKind,
    pub label: &'static str,
    pub help: &'static str,
}

/// The surface the list client talks to: rendering, notices and prompts.
///
/// Prompt methods block until the user answers; `Ok(None)` / `Ok(false)`
/// mean the user dismissed the prompt.
pub trait Ui {
    /// Redraw the list
    fn render(&mut self, view: &ListView);

    /// Show an alert or banner
    fn notify(&mut self, notice: Notice);

    /// Ask a yes/no question
    fn confirm(&mut self, message: &str) -> Result<bool>;

    /// Open a form titled `title` (called once per form)
    fn open_form(&mut self, title: &str, subtitle: &str);

    /// Read one field; `None` when the form was cancelled
    fn ask(&mut self, field: &Field) -> Result<Option<String>>;

    /// A submitted field was blank; move the cursor back to it
    fn refocus(&mut self, field: &Field);
}

#[cfg(test)]
pub(crate) mod scripted {
    use std::collections::VecDeque;

    use super::*;

    /// Ui driven by canned answers that records everything it is shown
    #[derive(Default)]
    pub struct ScriptedUi {
        pub answers: VecDeque<Option<String>>,
        pub confirms: VecDeque<bool>,
        pub renders: Vec<ListView>,
        pub notices: Vec<Notice>,
        pub forms: Vec<String>,
        pub asked: Vec<FieldKind>,
        pub refocused: Vec<FieldKind>,
    }

    impl ScriptedUi {
        pub fn answering(answers: &[Option<&str>]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.map(String::from)).collect(),
                ..Default::default()
            }
        }

        pub fn confirming(answer: bool) -> Self {
            Self {
                confirms: VecDeque::from([answer]),
                ..Default::default()
            }
        }

        pub fn last_notice(&self) -> Option<&Notice> {
            self.notices.last()
        }
    }

    impl Ui for ScriptedUi {
        fn render(&mut self, view: &ListView) {
            self.renders.push(view.clone());
        }

        fn notify(&mut self, notice: Notice) {
            self.notices.push(notice);
        }

        fn confirm(&mut self, _message: &str) -> Result<bool> {
            Ok(self.confirms.pop_front().unwrap_or(false))
        }

        fn open_form(&mut self, title: &str, _subtitle: &str) {
            self.forms.push(title.to_string());
        }

        fn ask(&mut self, field: &Field) -> Result<Option<String>> {
            self.asked.push(field.kind);
            Ok(self.answers.pop_front().flatten())
        }

        fn refocus(&mut self, field: &Field) {
            self.refocused.push(field.kind);
        }
    }
}
