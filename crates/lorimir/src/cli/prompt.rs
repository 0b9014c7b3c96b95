//! Interactive reads from the terminal.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use console::Term;
use lorimir_api::Credentials;

/// Ask for the download directory; an empty answer keeps the current
/// one.
pub fn output_dir() -> Result<PathBuf> {
    let term = Term::stdout();
    term.write_str("Download directory absolute path:\n(press ENTER for current directory) ")
        .context("terminal write failed")?;
    let answer = term.read_line().context("terminal read failed")?;

    let answer = answer.trim();
    if answer.is_empty() {
        env::current_dir().context("current directory unavailable")
    } else {
        Ok(PathBuf::from(answer))
    }
}

/// Username echoed, password hidden.
pub fn credentials() -> Result<Credentials> {
    let term = Term::stdout();
    term.write_str("username: ").context("terminal write failed")?;
    let username = term.read_line().context("terminal read failed")?;
    term.write_str("password: ").context("terminal write failed")?;
    let password = term.read_secure_line().context("terminal read failed")?;

    Ok(Credentials {
        username: username.trim().to_owned(),
        password,
    })
}
