//! keystone-rights - administer Keystone roles and check rights
//!
//! Seeds the reference roles, prints the hierarchy and answers rights
//! questions against the configured database.

#![allow(missing_docs)]

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use keystone_rights::config::Config;
use keystone_rights::rights::{self, MemberGuard, RightsRepository, RoleGraph};
use keystone_rights::storage::StorageLayer;
use keystone_rights::storage::database::Database;
use keystone_rights::utils::logging::init_logging;
use keystone_rights::{Environment, Project, RoleLookup, User, UserRight};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "keystone-rights", version, about)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "KEYSTONE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create or update the database schema
    Migrate,
    /// Create the reference roles, environment types and rights
    Seed,
    /// Print the role hierarchy and the rights matrix
    Roles,
    /// Print what a user may do on an environment
    Check {
        /// User handle
        #[arg(long)]
        user: String,
        /// Project ID or UUID
        #[arg(long)]
        project: String,
        /// Environment ID, or environment type name within the project
        #[arg(long)]
        environment: String,
        /// Only check this right
        #[arg(long)]
        right: Option<String>,
    },
    /// Tell whether a member may give a role to another member
    CanSetRole {
        /// Acting user handle
        #[arg(long)]
        acting: String,
        /// Target user handle
        #[arg(long)]
        target: String,
        /// Role to give
        #[arg(long)]
        role: String,
        /// Project ID or UUID
        #[arg(long)]
        project: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(config.logging()) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: Config) -> anyhow::Result<()> {
    match command {
        Command::Migrate => {
            let mut database_config = config.database().clone();
            database_config.enabled = false;
            let database = Database::new(&database_config)
                .await
                .context("connecting to the database")?;
            database.migrate().await.context("running migrations")?;
            println!("migrations applied");
        }
        Command::Seed => {
            let storage = StorageLayer::new(&config.keystone).await?;
            let report = storage.database.seed_default_rights().await?;
            if report.is_empty() {
                println!("already seeded");
            } else {
                println!(
                    "created {} role(s), {} environment type(s), {} rights row(s)",
                    report.roles_created, report.environment_types_created, report.rights_created
                );
            }
        }
        Command::Roles => {
            let storage = StorageLayer::new(&config.keystone).await?;
            print_roles(&storage.database).await?;
        }
        Command::Check {
            user,
            project,
            environment,
            right,
        } => {
            let storage = StorageLayer::new(&config.keystone).await?;
            let user = find_user(&storage.database, &user).await?;
            let project = find_project(&storage.database, &project).await?;
            let environment = find_environment(&storage.database, &project, &environment).await?;

            let wanted = match right {
                Some(right) => vec![right.parse::<UserRight>()?],
                None => UserRight::ALL.to_vec(),
            };

            for right in wanted {
                let allowed = rights::can_user_has_right(
                    storage.rights.as_ref(),
                    &user,
                    &project,
                    &environment,
                    right,
                )
                .await?;
                println!("{:<7} {}", right.as_str(), verdict(allowed));
            }
        }
        Command::CanSetRole {
            acting,
            target,
            role,
            project,
        } => {
            let storage = StorageLayer::new(&config.keystone).await?;
            let acting = find_user(&storage.database, &acting).await?;
            let target = find_user(&storage.database, &target).await?;
            let project = find_project(&storage.database, &project).await?;
            let role = storage.rights.get_role(RoleLookup::name(role)).await?;

            let allowed = MemberGuard::new(storage.rights.as_ref())
                .with_policy(config.rights().assignment_policy())
                .can_user_set_member_role(&acting, &target, &role, &project)
                .await?;
            println!("{}", verdict(allowed));
        }
    }

    Ok(())
}

async fn print_roles(database: &Database) -> anyhow::Result<()> {
    let graph: RoleGraph = database.role_graph().await?;
    let environment_types = database.list_environment_types().await?;

    for role in graph.roles() {
        let children: Vec<String> = graph
            .children_of(role)
            .into_iter()
            .map(|child| child.name)
            .collect();
        let parent = graph
            .parent_of(role)
            .map_or_else(|| "-".to_string(), |parent| parent.name.clone());

        println!(
            "{:<12} parent: {:<12} add members: {:<5} manages: [{}]",
            role.name,
            parent,
            role.can_add_member,
            children.join(", ")
        );

        for environment_type in &environment_types {
            let row = database
                .find_roles_environment_type(role.id, environment_type.id)
                .await?;
            let flags = UserRight::ALL
                .iter()
                .filter(|right| row.is_some_and(|row| row.allows(**right)))
                .map(|right| right.as_str())
                .collect::<Vec<_>>();
            println!("    {:<10} {}", environment_type.name, flags.join(" "));
        }
    }

    Ok(())
}

async fn find_user(database: &Database, handle: &str) -> anyhow::Result<User> {
    database
        .find_user(handle)
        .await?
        .ok_or_else(|| anyhow!("unknown user '{}'", handle))
}

async fn find_project(database: &Database, key: &str) -> anyhow::Result<Project> {
    if let Ok(id) = key.parse::<i32>() {
        return Ok(database.get_project(id).await?);
    }

    database
        .find_project_by_uuid(key)
        .await?
        .ok_or_else(|| anyhow!("unknown project '{}'", key))
}

async fn find_environment(
    database: &Database,
    project: &Project,
    key: &str,
) -> anyhow::Result<Environment> {
    if let Ok(id) = key.parse::<i32>() {
        let environment = database.get_environment(id).await?;
        if environment.project_id != project.id {
            return Err(anyhow!(
                "environment #{} does not belong to project #{}",
                id,
                project.id
            ));
        }
        return Ok(environment);
    }

    database
        .list_environments(project.id)
        .await?
        .into_iter()
        .find(|environment| environment.name == key)
        .ok_or_else(|| anyhow!("project #{} has no environment '{}'", project.id, key))
}

fn verdict(allowed: bool) -> &'static str {
    if allowed { "allowed" } else { "denied" }
}
