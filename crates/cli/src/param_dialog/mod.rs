//! Interactive resolution of snippet template parameters.
//!
//! Given a template like `ssh <user=root>@<host>`, this module opens a
//! full-screen form with one editable field per parameter plus a read-only
//! preview of the template, collects values, and substitutes them into the
//! final command. Templates without parameters skip the form entirely.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use ratatui::DefaultTerminal;

use shelf_core::error::{Error, Result};
use shelf_core::params::extract_parameters;

pub mod form;
mod ui;

use form::{FormAction, FormEvent, FormState};

/// Resolves a snippet template into an executable command line.
///
/// Returns the template unchanged when it contains no parameters. Otherwise
/// opens the parameter form and blocks until the user commits or cancels.
///
/// # Errors
///
/// Returns [`Error::DialogCancelled`] when the user aborts the form,
/// [`Error::TerminalInit`] when the terminal cannot be acquired, and
/// [`Error::Terminal`] for IO failures while the form is running. The
/// terminal is restored on every exit path.
pub fn resolve(template: &str) -> Result<String> {
    let parameters = extract_parameters(template);
    if parameters.is_empty() {
        debug!("No parameters in template, skipping dialog.");
        return Ok(template.to_string());
    }

    let terminal = ratatui::try_init().map_err(Error::TerminalInit)?;
    let _restore_guard = RestoreGuard;

    let mut form = FormState::new(template, parameters);
    run_dialog(terminal, &mut form)
}

fn run_dialog(mut terminal: DefaultTerminal, form: &mut FormState) -> Result<String> {
    loop {
        terminal
            .draw(|frame| ui::render(frame, form))
            .map_err(Error::Terminal)?;

        let event = crossterm::event::read().map_err(Error::Terminal)?;
        let Event::Key(key) = event else {
            continue;
        };

        let Some(form_event) = translate_key(key) else {
            continue;
        };

        match form.handle(form_event) {
            FormAction::Continue => {}
            FormAction::Commit(command) => return Ok(command),
            FormAction::Cancel => return Err(Error::DialogCancelled),
        }
    }
}

fn translate_key(key: KeyEvent) -> Option<FormEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(FormEvent::Cancel),
            KeyCode::Char('k') => Some(FormEvent::ClearField),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Tab => Some(FormEvent::NextField),
        KeyCode::BackTab => Some(FormEvent::PrevField),
        KeyCode::Up => Some(FormEvent::CycleUp),
        KeyCode::Down => Some(FormEvent::CycleDown),
        KeyCode::Enter => Some(FormEvent::Commit),
        KeyCode::Backspace => Some(FormEvent::Backspace),
        KeyCode::Char(ch) => Some(FormEvent::Insert(ch)),
        _ => None,
    }
}

/// Restores the terminal when the dialog ends, on any path out.
struct RestoreGuard;

impl Drop for RestoreGuard {
    fn drop(&mut self) {
        ratatui::restore();
    }
}
