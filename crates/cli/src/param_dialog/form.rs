//! Pure state machine behind the parameter dialog.
//!
//! The dialog is modelled as an explicit [`FormState`] plus a dispatch
//! function, `FormState::handle(event) -> FormAction`. The terminal event
//! loop only translates key presses into [`FormEvent`]s and acts on the
//! returned [`FormAction`], so every transition here is testable without a
//! terminal.

use std::collections::HashMap;

use shelf_core::params::{substitute, Parameter};

/// An input event the form reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    NextField,
    PrevField,
    CycleUp,
    CycleDown,
    Insert(char),
    Backspace,
    ClearField,
    Commit,
    Cancel,
}

/// What the event loop should do after dispatching an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Keep the session running.
    Continue,
    /// Tear down the terminal and return the final command.
    Commit(String),
    /// Tear down the terminal with nothing produced.
    Cancel,
}

/// One editable field, owned by exactly one form session.
#[derive(Debug, Clone)]
pub struct FieldState {
    pub name: String,
    pub buffer: String,
    choices: Vec<String>,
    choice_index: usize,
}

impl FieldState {
    fn new(parameter: Parameter) -> Self {
        let buffer = parameter.initial_value().to_string();
        Self {
            name: parameter.name,
            buffer,
            choices: parameter.choices,
            choice_index: 0,
        }
    }

    #[must_use]
    pub fn is_multi_choice(&self) -> bool {
        self.choices.len() > 1
    }

    /// One-based position within the choice list, for display.
    #[must_use]
    pub fn choice_position(&self) -> (usize, usize) {
        (self.choice_index + 1, self.choices.len())
    }

    fn cycle(&mut self, forward: bool) {
        // Single-choice fields silently ignore cycling
        if !self.is_multi_choice() {
            return;
        }

        self.choice_index = if forward {
            (self.choice_index + 1) % self.choices.len()
        } else if self.choice_index == 0 {
            self.choices.len() - 1
        } else {
            self.choice_index - 1
        };

        self.buffer = self.choices[self.choice_index].clone();
    }
}

/// The state of one interactive resolution session.
#[derive(Debug, Clone)]
pub struct FormState {
    template: String,
    pub fields: Vec<FieldState>,
    pub focus: usize,
    pub(crate) field_scroll: usize,
}

impl FormState {
    /// Builds a form with one field per parameter, focus on the first.
    ///
    /// Callers must only construct a form for a non-empty parameter list;
    /// templates without parameters never open a session.
    #[must_use]
    pub fn new(template: &str, parameters: Vec<Parameter>) -> Self {
        debug_assert!(!parameters.is_empty());

        Self {
            template: template.to_string(),
            fields: parameters.into_iter().map(FieldState::new).collect(),
            focus: 0,
            field_scroll: 0,
        }
    }

    /// The raw template shown in the read-only preview region.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    fn focused(&self) -> &FieldState {
        &self.fields[self.focus]
    }

    fn focused_mut(&mut self) -> &mut FieldState {
        &mut self.fields[self.focus]
    }

    /// Dispatches one event against the form, returning what to do next.
    pub fn handle(&mut self, event: FormEvent) -> FormAction {
        match event {
            FormEvent::NextField => {
                self.focus = (self.focus + 1) % self.fields.len();
            }
            FormEvent::PrevField => {
                self.focus = if self.focus == 0 {
                    self.fields.len() - 1
                } else {
                    self.focus - 1
                };
            }
            FormEvent::CycleUp => self.focused_mut().cycle(false),
            FormEvent::CycleDown => self.focused_mut().cycle(true),
            FormEvent::Insert(ch) => self.focused_mut().buffer.push(ch),
            FormEvent::Backspace => {
                self.focused_mut().buffer.pop();
            }
            FormEvent::ClearField => self.focused_mut().buffer.clear(),
            FormEvent::Commit => {
                return FormAction::Commit(substitute(&self.template, &self.committed_values()));
            }
            FormEvent::Cancel => {
                // An in-progress edit must not be discarded by accident: the
                // cancel key only cancels on an empty focused field.
                if self.focused().buffer.is_empty() {
                    return FormAction::Cancel;
                }
            }
        }

        FormAction::Continue
    }

    /// The committed name/value map, buffers trimmed of trailing newlines and
    /// surrounding whitespace.
    fn committed_values(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .map(|field| (field.name.clone(), field.buffer.trim().to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::params::extract_parameters;

    fn form_for(template: &str) -> FormState {
        FormState::new(template, extract_parameters(template))
    }

    #[test]
    fn test_fields_seeded_from_defaults_in_order() {
        let form = form_for("<b> <a=1> <b=2>");
        let names: Vec<&str> = form.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(form.fields[0].buffer, "2");
        assert_eq!(form.fields[1].buffer, "1");
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn test_next_field_wraps() {
        let mut form = form_for("<a> <b> <c>");
        assert_eq!(form.handle(FormEvent::NextField), FormAction::Continue);
        assert_eq!(form.focus, 1);
        form.handle(FormEvent::NextField);
        form.handle(FormEvent::NextField);
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn test_prev_field_wraps_backwards() {
        let mut form = form_for("<a> <b>");
        form.handle(FormEvent::PrevField);
        assert_eq!(form.focus, 1);
    }

    #[test]
    fn test_choice_cycling_wraps_both_directions() {
        let mut form = form_for("<env=a|b|c>");
        assert_eq!(form.fields[0].buffer, "a");

        form.handle(FormEvent::CycleDown);
        assert_eq!(form.fields[0].buffer, "b");

        // Back to "a", then wrapping up lands on the last choice.
        form.handle(FormEvent::CycleUp);
        assert_eq!(form.fields[0].buffer, "a");
        form.handle(FormEvent::CycleUp);
        assert_eq!(form.fields[0].buffer, "c");
        assert_eq!(form.fields[0].choice_position(), (3, 3));
    }

    #[test]
    fn test_single_choice_field_ignores_cycling() {
        let mut form = form_for("<name=fixed>");
        form.handle(FormEvent::CycleDown);
        form.handle(FormEvent::CycleUp);
        assert_eq!(form.fields[0].buffer, "fixed");
        assert_eq!(form.fields[0].choice_position(), (1, 1));
    }

    #[test]
    fn test_editing_focused_buffer() {
        let mut form = form_for("<a> <b=keep>");
        form.handle(FormEvent::Insert('h'));
        form.handle(FormEvent::Insert('i'));
        assert_eq!(form.fields[0].buffer, "hi");
        assert_eq!(form.fields[1].buffer, "keep");

        form.handle(FormEvent::Backspace);
        assert_eq!(form.fields[0].buffer, "h");
    }

    #[test]
    fn test_clear_field_keeps_choice_index() {
        let mut form = form_for("<env=a|b|c>");
        form.handle(FormEvent::CycleDown);
        form.handle(FormEvent::ClearField);
        assert_eq!(form.fields[0].buffer, "");
        // The next cycle continues from the retained index.
        form.handle(FormEvent::CycleDown);
        assert_eq!(form.fields[0].buffer, "c");
    }

    #[test]
    fn test_commit_substitutes_all_fields() {
        let mut form = form_for("<a=1> <a> <b> hello");
        form.handle(FormEvent::ClearField);
        for ch in "test".chars() {
            form.handle(FormEvent::Insert(ch));
        }
        form.handle(FormEvent::NextField);
        for ch in "case".chars() {
            form.handle(FormEvent::Insert(ch));
        }

        let action = form.handle(FormEvent::Commit);
        assert_eq!(action, FormAction::Commit("test test case hello".to_string()));
    }

    #[test]
    fn test_commit_trims_buffers() {
        let mut form = form_for("run <arg>");
        for ch in "  value \n".chars() {
            form.handle(FormEvent::Insert(ch));
        }
        let action = form.handle(FormEvent::Commit);
        assert_eq!(action, FormAction::Commit("run value".to_string()));
    }

    #[test]
    fn test_commit_with_empty_buffer_substitutes_empty() {
        let mut form = form_for("echo <silent> done");
        let action = form.handle(FormEvent::Commit);
        assert_eq!(action, FormAction::Commit("echo  done".to_string()));
    }

    #[test]
    fn test_cancel_guard_swallows_on_non_empty_buffer() {
        let mut form = form_for("<a=partial>");
        assert_eq!(form.handle(FormEvent::Cancel), FormAction::Continue);
        // Still editable afterwards
        form.handle(FormEvent::Insert('!'));
        assert_eq!(form.fields[0].buffer, "partial!");
    }

    #[test]
    fn test_cancel_on_empty_buffer_cancels() {
        let mut form = form_for("<a=partial>");
        form.handle(FormEvent::ClearField);
        assert_eq!(form.handle(FormEvent::Cancel), FormAction::Cancel);
    }

    #[test]
    fn test_cancel_guard_follows_focus() {
        let mut form = form_for("<filled=x> <empty>");
        // Focused field has content: swallowed.
        assert_eq!(form.handle(FormEvent::Cancel), FormAction::Continue);
        // Move to the empty field: cancels.
        form.handle(FormEvent::NextField);
        assert_eq!(form.handle(FormEvent::Cancel), FormAction::Cancel);
    }
}
