use std::env;
use std::io::{stdin, stdout, Write};
use std::process::ExitCode;

use arboard::Clipboard;
use clap::Parser;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use itertools::Itertools;
use log::debug;

use shelf_core::config::{self, DEFAULT_EDITOR, DEFAULT_SHELL};
use shelf_core::error::{Error, Result};
use shelf_core::file_handling::{load_snippets, save_snippets};
use shelf_core::snippet::{sort_snippets, SnippetDefinition};
use shelf_core::execution;

use shelf_cli::cli_args::{Args, ShelfCommand};
use shelf_cli::param_dialog;
use shelf_cli::selection::{prompt_for_snippet_choice, SnippetChoice};

fn execute() -> Result<()> {
    let args = Args::parse();

    let snippet_path = config::get_snippet_path(&args.snippet_file);
    debug!("Snippet file: `{snippet_path}`");

    let command = args.command.unwrap_or(ShelfCommand::Exec {
        tag: None,
        dry_run: false,
    });

    match command {
        ShelfCommand::Exec { tag, dry_run } => run_exec(&snippet_path, &args.sort_by, tag, dry_run),
        ShelfCommand::List { tag } => run_list(&snippet_path, &args.sort_by, tag),
        ShelfCommand::New { command } => run_new(&snippet_path, command),
        ShelfCommand::Edit => run_edit(&snippet_path),
        ShelfCommand::Clip { tag } => run_clip(&snippet_path, &args.sort_by, tag),
    }
}

/// Loads snippets, applies tag filter and sorting, and runs the selection UI.
///
/// Returns `None` when there is nothing to select or the user quit.
fn select_snippet(
    snippet_path: &str,
    sort_by: &str,
    tag: Option<String>,
) -> Result<Option<SnippetDefinition>> {
    let mut snippets = load_snippets(snippet_path)?;

    if let Some(tag) = &tag {
        snippets.retain(|snippet| snippet.has_tag(tag));
    }

    if snippets.is_empty() {
        print_empty_store_hint(tag.as_deref());
        return Ok(None);
    }

    sort_snippets(&mut snippets, sort_by);

    let choice = prompt_for_snippet_choice(&snippets)?;

    // Leave the list screen behind before anything else is printed
    let mut stdout = stdout();
    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    stdout.flush()?;

    match choice {
        SnippetChoice::Index(index) => Ok(Some(snippets[index].clone())),
        SnippetChoice::Quit => Ok(None),
    }
}

fn print_empty_store_hint(tag: Option<&str>) {
    match tag {
        Some(tag) => println!("No snippets tagged `{tag}`."),
        None => println!("No snippets stored yet. Add one with `shelf new`."),
    }
}

/// Resolves a snippet's parameters, or `None` when the dialog was cancelled.
fn resolve_snippet(snippet: &SnippetDefinition) -> Result<Option<String>> {
    let template = snippet.command_template();

    match param_dialog::resolve(&template) {
        Ok(final_command) => Ok(Some(final_command)),
        Err(Error::DialogCancelled) => {
            // User backed out: nothing runs, nothing is reported.
            debug!("Parameter dialog cancelled.");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn run_exec(snippet_path: &str, sort_by: &str, tag: Option<String>, dry_run: bool) -> Result<()> {
    let Some(snippet) = select_snippet(snippet_path, sort_by, tag)? else {
        return Ok(());
    };

    let Some(final_command) = resolve_snippet(&snippet)? else {
        return Ok(());
    };

    println!("> {final_command}");

    if dry_run {
        debug!("Dry run specified, not executing.");
        return Ok(());
    }

    let shell = env::var("SHELL").unwrap_or_else(|_| DEFAULT_SHELL.to_string());
    execution::run_in_shell(&shell, &final_command)
}

fn run_clip(snippet_path: &str, sort_by: &str, tag: Option<String>) -> Result<()> {
    let Some(snippet) = select_snippet(snippet_path, sort_by, tag)? else {
        return Ok(());
    };

    let Some(final_command) = resolve_snippet(&snippet)? else {
        return Ok(());
    };

    Clipboard::new()
        .and_then(|mut clipboard| clipboard.set_text(final_command.clone()))
        .map_err(|e| Error::Clipboard(e.to_string()))?;

    println!("Copied to clipboard: {final_command}");
    Ok(())
}

fn run_list(snippet_path: &str, sort_by: &str, tag: Option<String>) -> Result<()> {
    let mut snippets = load_snippets(snippet_path)?;

    if let Some(tag) = &tag {
        snippets.retain(|snippet| snippet.has_tag(tag));
    }

    if snippets.is_empty() {
        print_empty_store_hint(tag.as_deref());
        return Ok(());
    }

    sort_snippets(&mut snippets, sort_by);

    for snippet in &snippets {
        println!("{}:", snippet.description);
        for command in &snippet.commands {
            println!("    {command}");
        }
        if !snippet.tags.is_empty() {
            let tags = snippet.tags.iter().map(|tag| format!("#{tag}")).join(" ");
            println!("    {tags}");
        }
    }

    Ok(())
}

fn run_new(snippet_path: &str, command_args: Vec<String>) -> Result<()> {
    let command = if command_args.is_empty() {
        prompt_line("Command")?
    } else {
        command_args.join(" ")
    };

    if command.is_empty() {
        return Err(Error::Misc("Cannot store an empty command.".to_string()));
    }

    let description = prompt_line("Description")?;
    if description.is_empty() {
        return Err(Error::Misc(
            "Cannot store a snippet without a description.".to_string(),
        ));
    }

    let tags_line = prompt_line("Tags (space separated, optional)")?;
    let tags: Vec<String> = tags_line
        .split_whitespace()
        .map(ToString::to_string)
        .collect();

    let mut snippets = load_snippets(snippet_path)?;

    if snippets.iter().any(|s| s.description == description) {
        return Err(Error::DuplicateSnippetDescription(description));
    }

    snippets.push(SnippetDefinition {
        description,
        commands: vec![command],
        tags,
        output: None,
    });

    save_snippets(snippet_path, &snippets)?;
    println!("Stored snippet in `{snippet_path}`.");
    Ok(())
}

fn run_edit(snippet_path: &str) -> Result<()> {
    let editor = env::var("EDITOR").unwrap_or_else(|_| DEFAULT_EDITOR.to_string());
    execution::open_in_editor(&editor, snippet_path)?;

    // Surface validation problems right after editing instead of at the
    // next selection.
    let snippets = load_snippets(snippet_path)?;
    println!("{} snippets in `{snippet_path}`.", snippets.len());
    Ok(())
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}: ");
    stdout().flush()?;

    let mut input = String::new();
    stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
