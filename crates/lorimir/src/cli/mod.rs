//! Command-line surface: flags, prompts, progress rendering, run loop.

mod app;
mod progress;
mod prompt;

pub use app::App;

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use lorimir_api::{BASE_URL, Error as ApiError, HOSTNAME, Session};
use lorimir_sync::{SyncEvent, SyncOptions, mirror_bids, mirror_minc};
use tracing::{debug, info};

use crate::cli::app::Mode;
use crate::cli::progress::Renderer;

pub async fn run(app: App) -> anyhow::Result<()> {
    app.validate_modalities()?;
    let outputdir = resolve_output_dir(&app)?;

    println!("\n*******************************************");
    println!("Files will be downloaded in {}/", outputdir.display());
    println!("*******************************************\n");

    println!("Login on {HOSTNAME}");
    let credentials = prompt::credentials()?;
    let login = Session::login(BASE_URL, &credentials).await;
    if let Err(ApiError::LoginRejected { status, body }) = &login {
        // The server's own message, verbatim, before failing.
        println!("{body}");
        bail!("login rejected with HTTP {status}");
    }
    let session = login.context("login request failed")?;
    println!("login successful\n");

    let renderer = Arc::new(Renderer::new(app.mode));
    let events = renderer.clone();
    let mut options = SyncOptions::default()
        .on_event(Arc::new(move |event: &SyncEvent| events.handle(event)));
    options.modalities = app.modality_set();

    let report = match app.mode {
        Mode::Bids => mirror_bids(&session, &outputdir, &options).await,
        Mode::Minc => mirror_minc(&session, &outputdir, &options).await,
    }
    .context("sync aborted")?;

    info!(
        files = report.files,
        downloaded = report.downloaded,
        unmodified = report.unmodified,
        "run finished"
    );
    renderer.finish(&report);
    Ok(())
}

fn resolve_output_dir(app: &App) -> anyhow::Result<PathBuf> {
    let dir = if app.interactive {
        prompt::output_dir()?
    } else {
        match &app.outputdir {
            Some(dir) => dir.clone(),
            None => env::current_dir().context("current directory unavailable")?,
        }
    };

    let meta = std::fs::metadata(&dir)
        .with_context(|| format!("outputdir {} not usable", dir.display()))?;
    if !meta.is_dir() {
        bail!("outputdir {} is not a directory", dir.display());
    }
    if meta.permissions().readonly() {
        bail!("outputdir {} not writable", dir.display());
    }
    debug!(dir = %dir.display(), "output directory resolved");
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn missing_output_dir_is_rejected() {
        let app = App::parse_from(["lorimir", "-o", "/no/such/dir"]);
        assert!(resolve_output_dir(&app).is_err());
    }

    #[test]
    fn existing_dir_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let app = App::parse_from(["lorimir", "-o", dir.path().to_str().unwrap()]);
        assert_eq!(resolve_output_dir(&app).unwrap(), dir.path());
    }

    #[test]
    fn plain_file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, b"x").unwrap();
        let app = App::parse_from(["lorimir", "-o", file.to_str().unwrap()]);
        assert!(resolve_output_dir(&app).is_err());
    }

    #[test]
    fn readonly_dir_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut perms = std::fs::metadata(dir.path()).unwrap().permissions();
        perms.set_readonly(true);
        std::fs::set_permissions(dir.path(), perms).unwrap();

        let app = App::parse_from(["lorimir", "-o", dir.path().to_str().unwrap()]);
        assert!(resolve_output_dir(&app).is_err());

        // restore write bits so the tempdir can be cleaned up
        let mut perms = std::fs::metadata(dir.path()).unwrap().permissions();
        perms.set_readonly(false);
        std::fs::set_permissions(dir.path(), perms).unwrap();
    }
}
