//! Rendering for the parameter dialog.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use super::form::{FieldState, FormState};

const PREVIEW_TITLE: &str = "Command (Tab: next field, Enter: run, Ctrl+C: cancel)";
const HELP_LINE: &str = "Tab next field  ↑/↓ cycle choices  Ctrl+K clear  Enter run  Ctrl+C cancel";

pub(super) fn render(frame: &mut Frame, form: &mut FormState) {
    let area = frame.area();

    // Preview height follows the template, capped so the fields keep room.
    let template_lines = form.template().lines().count().max(1) as u16;
    let preview_height = (template_lines + 2).min(area.height / 2);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(preview_height),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_preview(frame, form.template(), layout[0]);
    render_fields(frame, form, layout[1]);

    let help = Paragraph::new(HELP_LINE).style(Style::new().fg(Color::DarkGray));
    frame.render_widget(help, layout[2]);
}

fn render_preview(frame: &mut Frame, template: &str, area: Rect) {
    let paragraph = Paragraph::new(template)
        .block(Block::bordered().title(PREVIEW_TITLE))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_fields(frame: &mut Frame, form: &mut FormState, area: Rect) {
    let block = Block::bordered().title("Parameters");
    let view_height = area.height.saturating_sub(2) as usize;

    form.field_scroll = ensure_visible(form.field_scroll, form.focus, view_height);

    let start = form.field_scroll;
    let end = (start + view_height.max(1)).min(form.fields.len());
    let visible = &form.fields[start..end];

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(offset, field)| field_item(field, start + offset == form.focus))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::new().bg(Color::Blue).fg(Color::White));

    let mut state = ListState::default();
    if form.focus >= start && form.focus < end {
        state.select(Some(form.focus - start));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn field_item(field: &FieldState, is_focused: bool) -> ListItem<'static> {
    let mut spans = vec![
        Span::styled(field.name.clone(), Style::new().fg(Color::Green)),
        Span::raw(": "),
        Span::raw(field.buffer.clone()),
    ];

    if is_focused {
        spans.push(Span::raw("▏"));
    }

    if field.is_multi_choice() {
        let (position, total) = field.choice_position();
        spans.push(Span::styled(
            format!("  ‹{position}/{total}›"),
            Style::new().fg(Color::DarkGray),
        ));
    }

    ListItem::new(Line::from(spans))
}

fn ensure_visible(current_scroll: usize, focus: usize, view_height: usize) -> usize {
    if view_height == 0 {
        return 0;
    }
    let mut scroll = current_scroll;
    if focus < scroll {
        scroll = focus;
    } else if focus >= scroll + view_height {
        scroll = focus + 1 - view_height;
    }
    scroll
}
