//! Terminal implementation of the `Ui` trait: colored output and inquire prompts

use colored::Colorize;
use inquire::error::InquireError;
use inquire::{Confirm, Password, PasswordDisplayMode, Text};

use wishlist::prefs::Theme;
use wishlist::render::ListView;
use wishlist::ui::{Field, FieldKind, Notice, NoticeLevel, Ui};
use wishlist::WishlistError;

/// A value shown in a select prompt under a friendly label
#[derive(Clone)]
pub struct Choice<T> {
    pub value: T,
    pub label: String,
}

impl<T> Choice<T> {
    pub fn new(value: T, label: impl Into<String>) -> Self {
        Self { value, label: label.into() }
    }
}

impl<T> std::fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

/// Map an inquire result so Esc / Ctrl+C read as a dismissed prompt
pub fn dismissable<T>(result: std::result::Result<T, InquireError>) -> wishlist::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(WishlistError::PromptError(e.to_string())),
    }
}

pub struct TerminalUi {
    theme: Theme,
    interactive: bool,
    assume_yes: bool,
    show_list: bool,
    preset_name: Option<String>,
    preset_password: Option<String>,
}

impl TerminalUi {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            interactive: atty::is(atty::Stream::Stdin),
            assume_yes: false,
            show_list: true,
            preset_name: None,
            preset_password: None,
        }
    }

    /// Answer every confirmation with yes (`--yes`)
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Skip printing the list after a reload
    pub fn quiet(mut self) -> Self {
        self.show_list = false;
        self
    }

    /// Values given as flags, used instead of prompting once each
    pub fn with_presets(mut self, name: Option<String>, password: Option<String>) -> Self {
        self.preset_name = name;
        self.preset_password = password;
        self
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn set_show_list(&mut self, show: bool) {
        self.show_list = show;
    }

    fn require_terminal(&self, what: &str) -> wishlist::Result<()> {
        if self.interactive {
            Ok(())
        } else {
            Err(WishlistError::PromptError(format!(
                "{} needs an interactive terminal",
                what
            )))
        }
    }
}

impl Ui for TerminalUi {
    fn render(&mut self, view: &ListView) {
        if self.show_list {
            println!("{}", view.to_terminal(self.theme));
        }
    }

    fn notify(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => {
                println!("{} {}", "✓".green().bold(), notice.message);
            }
            NoticeLevel::Error => {
                eprintln!("{} {}", format!("{}:", notice.title).red().bold(), notice.message);
            }
        }
    }

    fn confirm(&mut self, message: &str) -> wishlist::Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        self.require_terminal("Confirmation")?;
        let answer = dismissable(Confirm::new(message).with_default(false).prompt())?;
        if answer != Some(true) {
            println!("Cancelled.");
        }
        Ok(answer.unwrap_or(false))
    }

    fn open_form(&mut self, title: &str, subtitle: &str) {
        println!("\n{}", title.bold());
        println!("{}\n", subtitle.dimmed());
    }

    fn ask(&mut self, field: &Field) -> wishlist::Result<Option<String>> {
        let preset = match field.kind {
            FieldKind::Name => self.preset_name.take(),
            FieldKind::Password => self.preset_password.take(),
        };
        if let Some(value) = preset {
            return Ok(Some(value));
        }

        self.require_terminal(field.label)?;
        let answer = match field.kind {
            FieldKind::Name => dismissable(
                Text::new(&format!("{}:", field.label))
                    .with_help_message(field.help)
                    .prompt(),
            )?,
            FieldKind::Password => dismissable(
                Password::new(&format!("{}:", field.label))
                    .with_help_message(field.help)
                    .with_display_mode(PasswordDisplayMode::Masked)
                    .without_confirmation()
                    .prompt(),
            )?,
        };
        if answer.is_none() {
            println!("Cancelled.");
        }
        Ok(answer)
    }

    fn refocus(&mut self, field: &Field) {
        eprintln!("{} {} is required", "!".yellow().bold(), field.label);
    }
}
