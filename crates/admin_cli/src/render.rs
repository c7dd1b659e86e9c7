use admin_client::api::{Project, ReferenceClient};
use admin_client::dashboard::DashboardState;
use admin_client::AuthStatus;
use colored::{ColoredString, Colorize};

pub fn status(status: AuthStatus) -> ColoredString {
    match status {
        AuthStatus::Loading => status.to_string().yellow(),
        AuthStatus::Authed => status.to_string().green(),
        AuthStatus::Guest => status.to_string().red(),
    }
}

fn active(is_active: bool) -> ColoredString {
    if is_active {
        "active".green()
    } else {
        "hidden".dimmed()
    }
}

pub fn reference_clients(clients: &[ReferenceClient]) {
    if clients.is_empty() {
        println!("{}", "No reference clients".dimmed());
        return;
    }
    for client in clients {
        println!(
            "{}  {}  {}  {}  {}",
            client.id.dimmed(),
            client.name.bold(),
            client.business_name.as_deref().unwrap_or("-"),
            client.email.cyan(),
            active(client.is_active)
        );
    }
}

pub fn projects(projects: &[Project]) {
    if projects.is_empty() {
        println!("{}", "No projects".dimmed());
        return;
    }
    for project in projects {
        println!(
            "{}  {}  {}  #{}  {}",
            project.id.dimmed(),
            project.client_name.bold(),
            project.project_type,
            project.order,
            active(project.is_active)
        );
    }
}

pub fn dashboard(state: &DashboardState, sorted_clients: &[ReferenceClient]) {
    println!(
        "{}",
        format!(
            "Dashboard: {} reference clients, {} projects",
            state.reference_clients.len(),
            state.projects.len()
        )
        .cyan()
        .bold()
    );
    reference_clients(sorted_clients);
    println!();
    projects(&state.projects);
}
