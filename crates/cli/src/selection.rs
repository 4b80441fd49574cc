//! Interactive snippet selection.
//!
//! A raw-mode terminal list over the loaded snippets: arrow keys move the
//! selection with wraparound, `/` starts fuzzy filtering over descriptions
//! and tags, Enter picks, and `q` or Ctrl+C quits without picking.

use std::cmp::Ordering;
use std::io::{stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::Color::{DarkGreen, Reset, Yellow};
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::{cursor, queue, terminal};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use shelf_core::error::Result;
use shelf_core::snippet::SnippetDefinition;

use crate::selection::CycleDirection::{Down, Up};

/// The outcome of the selection UI.
pub enum SnippetChoice {
    Index(usize),
    Quit,
}

struct DisplayMode {
    is_filtering: bool,
}

struct ViewportState {
    offset: usize,
    height: u16,
    width: u16,
}

enum CycleDirection {
    Up,
    Down,
}

fn print_header(
    header_mode: &DisplayMode,
    selected_index: usize,
    snippet_display_count: usize,
) -> Result<()> {
    let mut stdout = stdout();
    let (width, _) = terminal::size()?;

    let left_padding_size = 2usize;
    let left_padding = " ".repeat(left_padding_size);

    let instructions = if header_mode.is_filtering {
        "<esc>: Stop Filtering".to_string()
    } else {
        format!(
            "/: Begin Filtering   |   {}/{}   |   q: Quit",
            selected_index + 1,
            snippet_display_count
        )
    };

    let right_padding = " ".repeat(
        (width as usize).saturating_sub(left_padding_size + instructions.len()),
    );

    queue!(
        stdout,
        MoveTo(0, 0),
        SetBackgroundColor(DarkGreen),
        Print(left_padding),
        Print(instructions),
        Print(right_padding),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;

    Ok(())
}

fn clear_and_write_snippet_row(
    row: u16,
    snippet: &SnippetDefinition,
    is_selected: bool,
    terminal_width: u16,
) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, MoveTo(0, row), Clear(ClearType::CurrentLine))?;

    let content = format!("{snippet}");
    let padding = if content.len() < (terminal_width as usize) {
        " ".repeat(terminal_width as usize - content.len())
    } else {
        String::new()
    };

    if is_selected {
        queue!(
            stdout,
            SetAttribute(Attribute::Bold),
            SetBackgroundColor(Color::DarkBlue),
            SetForegroundColor(Yellow),
        )?;
    }

    queue!(stdout, Print(content), Print(padding))?;

    queue!(
        stdout,
        SetAttribute(Attribute::Reset),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;
    stdout.flush()?;

    Ok(())
}

fn print_snippets_with_selection(
    snippets: &[SnippetDefinition],
    indexes_to_display: &[usize],
    selected_index: usize,
    viewport: &ViewportState,
) -> Result<()> {
    let mut stdout = stdout();

    let visible_snippets = indexes_to_display
        .iter()
        .skip(viewport.offset)
        .take(viewport.height as usize);

    for (row, index) in visible_snippets.enumerate() {
        let is_selected = row + viewport.offset == selected_index;

        clear_and_write_snippet_row(
            row as u16 + 1,
            &snippets[*index],
            is_selected,
            viewport.width,
        )?;
        queue!(stdout, cursor::MoveToNextLine(1))?;
    }

    stdout.flush()?;

    Ok(())
}

fn move_selected_index(
    current_index: usize,
    viewport: &mut ViewportState,
    display_length: usize,
    direction: &CycleDirection,
) -> usize {
    if display_length == 0 {
        return 0;
    }

    let mut new_index = current_index;

    match direction {
        Up => {
            if new_index == 0 {
                new_index = display_length - 1;
                viewport.offset =
                    new_index.saturating_sub((viewport.height as usize).saturating_sub(1));
            } else {
                new_index -= 1;
                if new_index < viewport.offset {
                    viewport.offset = new_index;
                }
            }
        }
        Down => {
            new_index = (new_index + 1) % display_length;
            if new_index < current_index {
                viewport.offset = 0;
            } else if new_index >= viewport.offset + viewport.height as usize {
                viewport.offset = new_index - viewport.height as usize + 1;
            }
        }
    }

    new_index
}

fn filter_displayed_indexes(snippets: &[SnippetDefinition], predicate: &str) -> Vec<usize> {
    if predicate.is_empty() {
        return (0..snippets.len()).collect();
    }

    let matcher = SkimMatcherV2::default();

    snippets
        .iter()
        .enumerate()
        .filter_map(|(i, snippet)| {
            matcher
                .fuzzy_match(&snippet.to_string(), predicate)
                .map(|_| i)
        })
        .collect()
}

/// Runs the selection UI over the given snippets.
///
/// Raw mode is enabled for the duration of the prompt and released on every
/// path out through a scoped guard.
///
/// # Errors
///
/// Returns an error if terminal IO fails.
pub fn prompt_for_snippet_choice(snippets: &[SnippetDefinition]) -> Result<SnippetChoice> {
    let mut stdout = stdout();

    let mut selected_index: usize = 0;
    enable_raw_mode()?;

    // When this goes out of scope, raw mode is disabled
    let _raw_mode_guard = RawModeGuard;

    let mut should_reprint = true;
    let mut filter_text = String::new();
    let mut display_mode = DisplayMode {
        is_filtering: false,
    };

    let mut indexes_to_display = filter_displayed_indexes(snippets, &filter_text);

    let (width, height) = terminal::size()?;

    let mut viewport = ViewportState {
        offset: 0,
        height: height.saturating_sub(2), // Subtract 2 for header and filter line
        width,
    };

    loop {
        if should_reprint {
            let indexes_before = std::mem::take(&mut indexes_to_display);
            indexes_to_display = filter_displayed_indexes(snippets, &filter_text);

            if indexes_before != indexes_to_display {
                selected_index = 0;
                viewport.offset = 0;
            }

            queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

            print_header(&display_mode, selected_index, indexes_to_display.len())?;

            if indexes_to_display.is_empty() {
                queue!(
                    stdout,
                    MoveTo(0, 1),
                    SetForegroundColor(Color::Red),
                    Print("No matching snippets!".to_string()),
                    SetAttribute(Attribute::Reset),
                    cursor::MoveToNextLine(1)
                )?;
            } else {
                print_snippets_with_selection(
                    snippets,
                    &indexes_to_display,
                    selected_index,
                    &viewport,
                )?;
            }

            if display_mode.is_filtering {
                queue!(
                    stdout,
                    MoveTo(0, viewport.height + 1),
                    SetAttribute(Attribute::Bold),
                    Print(format!("Filter: {filter_text}")),
                    SetAttribute(Attribute::Reset)
                )?;
            }

            stdout.flush()?;
            should_reprint = false;
        }

        if !event::poll(Duration::from_millis(500))? {
            continue;
        }

        let mut index_change_direction: Option<CycleDirection> = None;

        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                match key_event.code {
                    KeyCode::Up | KeyCode::Down => {
                        index_change_direction = if key_event.code == KeyCode::Up {
                            Some(Up)
                        } else {
                            Some(Down)
                        };
                    }
                    KeyCode::Enter => {
                        if let Some(snippet_index) = indexes_to_display.get(selected_index) {
                            return Ok(SnippetChoice::Index(*snippet_index));
                        }
                        // Nothing selectable under the filter: ring the bell
                        queue!(stdout, Print("\x07"))?;
                        stdout.flush()?;
                    }
                    KeyCode::Backspace => {
                        if filter_text.pop().is_some() {
                            should_reprint = true;
                        }
                    }
                    KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(SnippetChoice::Quit);
                    }
                    KeyCode::Char(c) if display_mode.is_filtering => {
                        filter_text.push(c);
                        should_reprint = true;
                    }
                    KeyCode::Esc if display_mode.is_filtering => {
                        display_mode.is_filtering = false;
                        should_reprint = true;
                        filter_text.clear();
                    }
                    KeyCode::Char('/') => {
                        display_mode.is_filtering = true;
                        should_reprint = true;
                    }
                    KeyCode::Char('q') => {
                        return Ok(SnippetChoice::Quit);
                    }
                    _ => {}
                }
            }
            Event::Resize(width, height) => {
                let new_height = height.saturating_sub(2);
                viewport.width = width;

                // If shrinking, keep the selection inside the new window
                match new_height.cmp(&viewport.height) {
                    Ordering::Greater if viewport.offset > 0 => {
                        let height_increase = new_height - viewport.height;
                        viewport.offset = viewport.offset.saturating_sub(height_increase as usize);
                    }
                    Ordering::Less if selected_index >= viewport.offset + new_height as usize => {
                        viewport.offset =
                            selected_index.saturating_sub((new_height as usize).saturating_sub(1));
                    }
                    _ => {}
                }

                viewport.height = new_height;
                should_reprint = true;
            }
            _ => {}
        }

        if let Some(direction) = index_change_direction {
            selected_index = move_selected_index(
                selected_index,
                &mut viewport,
                indexes_to_display.len(),
                &direction,
            );
            should_reprint = true;
        }
    }
}

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Disable raw mode on drop
        let _ = disable_raw_mode();
    }
}
