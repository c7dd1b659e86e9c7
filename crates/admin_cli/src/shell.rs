//! Interactive shell that walks the admin area the way a browser would:
//! routes go through the protected-route gate, and a guest is sent to the
//! login prompt and back to where they were heading.

use std::io::{self, Write};

use admin_client::api::models::{parse_max_leads, DEFAULT_MAX_LEADS_PER_WEEK};
use admin_client::api::{NewReferenceClient, ProjectType};
use admin_client::auth::LoginForm;
use admin_client::routes::{DEFAULT_ADMIN_ROUTE, LOADING_PLACEHOLDER, LOGIN_ROUTE};
use admin_client::utils::Mount;
use admin_client::{AdminApi, AdminApp, GateDecision};
use anyhow::bail;
use colored::Colorize;

use crate::render;

const HELP: &str = "\
Commands:
  goto <path>               open an admin route (/admin, /admin/projects, /admin/reference-clients)
  login [email]             log in
  add-client <name> <email> [type] [max-leads]
                            create a reference client (type: landing|business|shop|other)
  delete-client <id>        delete a reference client
  delete-project <id>       delete a project
  status                    print the auth status
  logout                    end the session
  help                      show this help
  quit                      leave the shell";

fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

pub async fn run(app: &AdminApp, email: Option<String>) -> anyhow::Result<()> {
    println!("{}", "Admin shell".cyan().bold());
    println!("{}", format!("API: {}", app.config().api_base).dimmed());
    println!("{}", LOADING_PLACEHOLDER.dimmed());

    let status = app.start().await;
    println!("{} {}", "Status:".bold(), render::status(status));
    println!("{}", "Type 'help' for commands".dimmed());

    let mut email = email;
    loop {
        let Some(line) = prompt(&format!("{} ", "admin>".cyan().bold()))? else {
            break;
        };
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        let outcome: anyhow::Result<()> = match command {
            "quit" | "exit" => break,
            "help" => {
                println!("{HELP}");
                Ok(())
            }
            "status" => {
                println!("{} {}", "Status:".bold(), render::status(app.session().status()));
                Ok(())
            }
            "goto" => goto(app, words.next().unwrap_or(DEFAULT_ADMIN_ROUTE), &mut email).await,
            "login" => {
                if let Some(given) = words.next() {
                    email = Some(given.to_string());
                }
                login(app, &mut email).await.map(|destination| {
                    println!("{}", format!("Continue with: goto {destination}").dimmed());
                })
            }
            "add-client" => match client_draft(words.collect()) {
                Ok(draft) => app
                    .api()
                    .create_reference_client(draft)
                    .await
                    .map(|created| {
                        println!("{}", format!("Created reference client {}", created.id).green());
                    })
                    .map_err(Into::into),
                Err(e) => Err(e),
            },
            "delete-client" => match words.next() {
                Some(id) => app
                    .api()
                    .delete_reference_client(id)
                    .await
                    .map(|()| println!("{}", format!("Deleted reference client {id}").green()))
                    .map_err(Into::into),
                None => Err(anyhow::anyhow!("usage: delete-client <id>")),
            },
            "delete-project" => match words.next() {
                Some(id) => app
                    .api()
                    .delete_project(id)
                    .await
                    .map(|()| println!("{}", format!("Deleted project {id}").green()))
                    .map_err(Into::into),
                None => Err(anyhow::anyhow!("usage: delete-project <id>")),
            },
            "logout" => {
                app.session().logout().await;
                println!("{} {}", "Status:".bold(), render::status(app.session().status()));
                Ok(())
            }
            other => Err(anyhow::anyhow!("unknown command '{other}', try 'help'")),
        };

        if let Err(e) = outcome {
            println!("{}", format!("Error: {e}").red());
        }
    }

    println!("{}", "Goodbye!".cyan());
    Ok(())
}

/// Builds a reference client draft from `<name> <email> [type] [max-leads]`.
fn client_draft(args: Vec<&str>) -> anyhow::Result<NewReferenceClient> {
    let [name, email, rest @ ..] = args.as_slice() else {
        bail!("usage: add-client <name> <email> [type] [max-leads]");
    };
    let project_type = match rest.first() {
        Some(value) => value.parse::<ProjectType>().map_err(anyhow::Error::msg)?,
        None => ProjectType::default(),
    };
    Ok(NewReferenceClient {
        name: name.to_string(),
        email: email.to_string(),
        project_type,
        max_leads_per_week: rest.get(1).map_or(DEFAULT_MAX_LEADS_PER_WEEK, |v| parse_max_leads(v)),
        ..Default::default()
    })
}

/// Opens `path` through the gate. A guest is taken through the login prompt
/// and then to the remembered destination.
async fn goto(app: &AdminApp, path: &str, email: &mut Option<String>) -> anyhow::Result<()> {
    let gate = app.protected_route();
    let mut path = path.to_string();

    if let GateDecision::RedirectToLogin { from } = gate.resolve(&path).await {
        println!("{}", format!("{from} requires login, redirecting to {LOGIN_ROUTE}").yellow());
        path = login(app, email).await?;
    }
    if path == LOGIN_ROUTE {
        login(app, email).await?;
        return Ok(());
    }

    match gate.check(&path) {
        GateDecision::Render => show(app, &path).await,
        GateDecision::Loading => {
            println!("{}", LOADING_PLACEHOLDER.dimmed());
            Ok(())
        }
        GateDecision::RedirectToLogin { .. } => Err(anyhow::anyhow!("still not logged in")),
    }
}

async fn login(app: &AdminApp, email: &mut Option<String>) -> anyhow::Result<String> {
    let address = match email.clone() {
        Some(address) => address,
        None => prompt("Email: ")?.unwrap_or_default(),
    };
    let password = prompt("Password: ")?.unwrap_or_default();

    let destination = app
        .login_flow()
        .submit(&LoginForm::new(address.as_str(), password))
        .await?;
    *email = Some(address);
    println!("{} {}", "Status:".bold(), render::status(app.session().status()));
    Ok(destination)
}

async fn show(app: &AdminApp, path: &str) -> anyhow::Result<()> {
    match path.split(['?', '#']).next().unwrap_or(path) {
        "/admin/projects" => render::projects(&app.api().list_projects().await?),
        "/admin/reference-clients" => {
            render::reference_clients(&app.api().list_reference_clients().await?)
        }
        _ => {
            let dashboard = app.dashboard();
            let mount = Mount::new();
            if dashboard.load(&mount.handle()).await? {
                render::dashboard(&dashboard.snapshot(), &dashboard.sorted_reference_clients());
            }
        }
    }
    Ok(())
}
