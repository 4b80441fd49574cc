use std::process::{Command, Stdio};

use log::info;

use crate::error::{Error, Result};

/// Runs a fully resolved command line through the user's shell.
///
/// The shell is started interactively (`-i`) so it reads its rc file before
/// running the command.
///
/// # Errors
///
/// Returns an error if the shell cannot be spawned or exits with non-zero
/// status.
pub fn run_in_shell(shell: &str, command_line: &str) -> Result<()> {
    info!("Running through `{shell}`: {command_line}");

    let subprocess_exit_success = Command::new(shell)
        .args(["-i", "-c", command_line])
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()?
        .wait()?
        .success();

    if subprocess_exit_success {
        Ok(())
    } else {
        Err(Error::SubProcessExit)
    }
}

/// Opens a file in the given editor and waits for it to exit.
///
/// # Errors
///
/// Returns an error if the editor cannot be spawned or exits with non-zero
/// status.
pub fn open_in_editor(editor: &str, path: &str) -> Result<()> {
    info!("Opening `{path}` in `{editor}`");

    let subprocess_exit_success = Command::new(editor)
        .arg(path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()?
        .wait()?
        .success();

    if subprocess_exit_success {
        Ok(())
    } else {
        Err(Error::SubProcessExit)
    }
}
