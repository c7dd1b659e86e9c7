mod logging;
mod render;
mod shell;

use admin_client::auth::LoginForm;
use admin_client::{AdminApi, AdminApp, AuthStatus, Config};
use anyhow::bail;
use clap::{Parser, Subcommand};
use colored::Colorize;

#[derive(Parser)]
#[command(name = "admin-cli")]
#[command(about = "Command line access to the admin panel API")]
#[command(version)]
struct Cli {
    /// Origin of the admin API
    #[arg(long, env = "API_URL")]
    api_url: Option<String>,

    /// Admin email, used when no session cookie is available
    #[arg(long, env = "ADMIN_EMAIL")]
    email: Option<String>,

    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Enable debug logging
    #[arg(long, short, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the session and print the auth status
    Status,
    /// Manage reference clients
    Clients {
        #[command(subcommand)]
        action: ResourceAction,
    },
    /// Manage portfolio projects
    Projects {
        #[command(subcommand)]
        action: ResourceAction,
    },
    /// Log in, then close the server session again
    Logout,
    /// Interactive admin shell
    Shell,
}

#[derive(Subcommand)]
enum ResourceAction {
    List {
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },
    Delete {
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.debug);

    let mut config = Config::new();
    if let Some(api_url) = &cli.api_url {
        config = Config::with_api_base(api_url).max_retries(config.max_retries);
    }
    log::debug!("Using API at {}", config.api_base);

    let app = AdminApp::new(config)?;

    match cli.command {
        Commands::Status => {
            let status = app.start().await;
            println!("{} {}", "Status:".bold(), render::status(status));
            Ok(())
        }
        Commands::Clients { action } => {
            sign_in(&app, &cli.email, &cli.password).await?;
            match action {
                ResourceAction::List { json } => {
                    let clients = app.api().list_reference_clients().await?;
                    if json {
                        println!("{}", serde_json::to_string_pretty(&clients)?);
                    } else {
                        render::reference_clients(&clients);
                    }
                }
                ResourceAction::Delete { id } => {
                    app.api().delete_reference_client(&id).await?;
                    println!("{}", format!("Deleted reference client {id}").green());
                }
            }
            Ok(())
        }
        Commands::Projects { action } => {
            sign_in(&app, &cli.email, &cli.password).await?;
            match action {
                ResourceAction::List { json } => {
                    let projects = app.api().list_projects().await?;
                    if json {
                        println!("{}", serde_json::to_string_pretty(&projects)?);
                    } else {
                        render::projects(&projects);
                    }
                }
                ResourceAction::Delete { id } => {
                    app.api().delete_project(&id).await?;
                    println!("{}", format!("Deleted project {id}").green());
                }
            }
            Ok(())
        }
        Commands::Logout => {
            sign_in(&app, &cli.email, &cli.password).await?;
            app.session().logout().await;
            println!("{} {}", "Status:".bold(), render::status(app.session().status()));
            Ok(())
        }
        Commands::Shell => shell::run(&app, cli.email).await,
    }
}

/// Resolves the session, logging in with the given credentials when the
/// session cookie does not yield a token.
async fn sign_in(
    app: &AdminApp,
    email: &Option<String>,
    password: &Option<String>,
) -> anyhow::Result<()> {
    if app.start().await == AuthStatus::Authed {
        return Ok(());
    }
    let (Some(email), Some(password)) = (email, password) else {
        bail!("Not logged in. Pass --email and --password (or ADMIN_EMAIL / ADMIN_PASSWORD)");
    };
    app.login_flow()
        .submit(&LoginForm::new(email.as_str(), password.as_str()))
        .await?;
    Ok(())
}
