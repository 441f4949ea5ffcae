//! `storefront` command-line client.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};

use storefront_auth::{AuthContext, FileSessionStore, Gate, Session, protect};
use storefront_client::{AuthApi, ClientConfig, HttpProductApi, SubmissionError, SubmissionPipeline};
use storefront_core::{Notification, NotificationLevel, Notifier};
use storefront_products::{
    FileHandle, InputResetPolicy, PreviewUrls, ProductForm, SubmitBlocked, UploadPolicy,
};

#[derive(Debug, Parser)]
#[command(name = "storefront", version, about = "Submit products to the storefront backend")]
struct Cli {
    /// Backend base URL (overrides STOREFRONT_API_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file (overrides STOREFRONT_SESSION_FILE).
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Request timeout in seconds (overrides STOREFRONT_TIMEOUT_SECS).
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and persist the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the persisted session.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// Create a product with up to six pictures (3 MB each).
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        quantity: String,
        /// Empty the file list when a selection is rejected (legacy web form behaviour).
        #[arg(long)]
        legacy_input_reset: bool,
        pictures: Vec<PathBuf>,
    },
}

/// Prints notifications to the terminal.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => eprintln!("error: {}", notification.message),
            NotificationLevel::Success | NotificationLevel::Info => {
                println!("{}", notification.message)
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    storefront_observability::init_pretty();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config = config.with_api_url(api_url)?;
    }
    if let Some(session_file) = cli.session_file {
        config = config.with_session_file(session_file);
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    tracing::debug!(
        api_url = %config.api_url,
        session_file = ?config.session_file,
        "configuration loaded"
    );

    let store = Arc::new(FileSessionStore::new(&config.session_file));
    let mut auth = AuthContext::restore(store)
        .with_context(|| format!("failed to read session from {:?}", config.session_file))?;
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);

    match cli.command {
        Command::Login { email, password } => {
            let api = AuthApi::new(&config).context("failed to build HTTP client")?;
            match api.login(&email, &password).await {
                Ok(session) => match auth.login(session) {
                    Ok(()) => {
                        notifier.notify(Notification::success("Logged in"));
                        Ok(ExitCode::SUCCESS)
                    }
                    Err(e) => {
                        notifier.notify(Notification::error(format!(
                            "logged in, but the session could not be saved: {e}"
                        )));
                        Ok(ExitCode::FAILURE)
                    }
                },
                Err(e) => {
                    notifier.notify(Notification::error(e.to_string()));
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Logout => {
            let next = auth.logout(notifier.as_ref());
            tracing::debug!(route = %next, "navigating");
            Ok(ExitCode::SUCCESS)
        }
        Command::Whoami => match protect(&auth, &|s: &Session| s.user_id().to_string()) {
            Gate::Render(user_id) => {
                notifier.notify(Notification::info(user_id));
                Ok(ExitCode::SUCCESS)
            }
            Gate::Redirect(route) => {
                eprintln!("not logged in (redirect to {route}); run `storefront login`");
                Ok(ExitCode::from(2))
            }
        },
        Command::Submit {
            name,
            price,
            quantity,
            legacy_input_reset,
            pictures,
        } => {
            if let Gate::Redirect(route) = protect(&auth, &|_: &Session| ()) {
                eprintln!("not logged in (redirect to {route}); run `storefront login`");
                return Ok(ExitCode::from(2));
            }

            let reset_policy = if legacy_input_reset {
                InputResetPolicy::ClearOnReject
            } else {
                InputResetPolicy::KeepCommitted
            };
            let mut form = ProductForm::new(UploadPolicy::default(), PreviewUrls::new())
                .with_reset_policy(reset_policy);
            form.set_name(name);
            form.set_price(price);
            form.set_quantity(quantity);

            let mut files = Vec::with_capacity(pictures.len());
            for path in pictures {
                let meta = tokio::fs::metadata(&path)
                    .await
                    .with_context(|| format!("failed to stat picture {path:?}"))?;
                files.push(FileHandle::on_disk(path, meta.len()));
            }
            if let Err(e) = form.add_files(files) {
                eprintln!("error: {e}");
                return Ok(ExitCode::FAILURE);
            }

            let api = HttpProductApi::new(&config).context("failed to build HTTP client")?;
            let pipeline = SubmissionPipeline::new(api, notifier.clone());

            match pipeline.submit(&mut form, &auth).await {
                Ok(()) => Ok(ExitCode::SUCCESS),
                Err(SubmissionError::Blocked(SubmitBlocked::Invalid(errors))) => {
                    for error in errors.iter() {
                        eprintln!("{}: {}", error.field(), error);
                    }
                    Ok(ExitCode::FAILURE)
                }
                // Already reported through the notifier.
                Err(_) => Ok(ExitCode::FAILURE),
            }
        }
    }
}
