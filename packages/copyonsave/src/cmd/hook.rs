//! Responds to editor save hooks.

use std::{env, io};

use clap::Args;
use color_eyre::{Result, eyre::Context};
use copyonsave::{
    hook::{DocumentSavedPayload, DocumentSavedResponse, Hook},
    interceptor,
    notification::{Collector, Notification},
};
use tap::Pipe;
use tracing::instrument;

#[derive(Args, Clone, Debug)]
pub struct Config {}

#[instrument]
pub fn main(_config: Config) -> Result<()> {
    let stdin = io::stdin();
    let hook = serde_json::from_reader::<_, Hook>(stdin).context("read hook event")?;

    match hook {
        Hook::DocumentSaved(payload) => main_documentsaved(payload),
        Hook::Other => Ok(()), // Passthrough for unhandled events
    }
}

fn main_documentsaved(payload: DocumentSavedPayload) -> Result<()> {
    let cwd = env::current_dir().context("get current directory")?;
    let workspace = payload.workspace(&cwd);
    let notifier = Collector::default();
    match payload.document(&workspace) {
        Some(document) => {
            let report = interceptor::on_save(&workspace, &document, &notifier);
            tracing::debug!(?report, "handled save");
        }
        None => tracing::debug!("no workspace folder open"),
    }

    notifier.take().pipe(respond_documentsaved)
}

fn respond_documentsaved(notifications: Vec<Notification>) -> Result<()> {
    if !notifications.is_empty() {
        let response = DocumentSavedResponse::from(notifications)
            .pipe_ref(serde_json::to_string)
            .context("serialize response")?;
        println!("{response}");
    }

    Ok(())
}
