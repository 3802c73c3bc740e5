//! Database command implementations

use crate::cli::{CredentialsCommands, DbCommands, DestroyTarget};
use crate::connection::CommandContext;
use crate::error::Result;
use crate::output::{self, emph};
use crate::prompt;
use serde_json::json;
use tracing::{debug, warn};
use tursoctl_core::connection_url::{database_http_url, database_url, instance_url};
use tursoctl_core::workflows::{destroy_database, destroy_instance, destroy_region};
use tursoctl_core::{DatabaseSettings, PlatformApi, Settings};

/// Handle database commands
pub async fn handle_db_command(db_cmd: &DbCommands, ctx: &CommandContext) -> Result<()> {
    match db_cmd {
        DbCommands::List => handle_list(ctx).await,
        DbCommands::Show {
            name,
            url,
            http_url,
        } => handle_show(ctx, name, *url, *http_url).await,
        DbCommands::Locations => handle_locations(ctx).await,
        DbCommands::Destroy {
            name,
            location,
            instance,
            yes,
        } => {
            let target = DestroyTarget::from_args(location.as_deref(), instance.as_deref());
            handle_destroy(ctx, name, target, *yes).await
        }
        DbCommands::Credentials(cmd) => handle_credentials(ctx, cmd).await,
    }
}

async fn handle_list(ctx: &CommandContext) -> Result<()> {
    let mut settings = ctx.load_settings()?;
    let client = ctx.create_client(&settings)?;
    let databases = client.list_databases().await?;
    debug!("Fetched {} database(s)", databases.len());

    settings.set_db_names_cache(databases.iter().map(|db| db.name.clone()).collect());
    if let Err(e) = ctx.save_settings(&settings) {
        warn!("Could not refresh cached database names: {}", e);
    }

    if ctx.output.is_structured() {
        return output::print_output(&databases, ctx.output);
    }

    let rows = databases
        .iter()
        .map(|db| {
            vec![
                db.name.clone(),
                output::format_regions(db),
                database_url(&settings, db, false),
            ]
        })
        .collect();
    output::print_table(&["name", "locations", "url"], rows);
    Ok(())
}

async fn handle_show(ctx: &CommandContext, name: &str, url: bool, http_url: bool) -> Result<()> {
    let settings = ctx.load_settings()?;
    let client = ctx.create_client(&settings)?;
    let db = client.get_database(name).await?;

    if url {
        println!("{}", database_url(&settings, &db, true));
        return Ok(());
    }
    if http_url {
        println!("{}", database_http_url(&settings, &db));
        return Ok(());
    }

    let instances = client.list_instances(&db.name).await?;

    if ctx.output.is_structured() {
        let instances: Vec<_> = instances
            .iter()
            .map(|inst| {
                json!({
                    "name": inst.name,
                    "type": inst.instance_type.to_string(),
                    "location": inst.region,
                    "hostname": inst.hostname,
                    "url": instance_url(&settings, &db, inst),
                })
            })
            .collect();
        let data = json!({
            "name": db.name,
            "id": db.id,
            "hostname": db.hostname,
            "url": database_url(&settings, &db, false),
            "locations": db.regions,
            "primary_location": db.primary_region,
            "instances": instances,
        });
        return output::print_output(&data, ctx.output);
    }

    println!("Name:          {}", db.name);
    println!("URL:           {}", database_url(&settings, &db, false));
    println!("ID:            {}", db.id);
    println!("Locations:     {}", output::format_regions(&db));
    println!();
    println!("Database Instances:");

    let rows = instances
        .iter()
        .map(|inst| {
            vec![
                inst.name.clone(),
                inst.instance_type.to_string(),
                inst.region.clone(),
                instance_url(&settings, &db, inst),
            ]
        })
        .collect();
    output::print_table(&["name", "type", "location", "url"], rows);
    Ok(())
}

async fn handle_locations(ctx: &CommandContext) -> Result<()> {
    let settings = ctx.load_settings()?;
    let client = ctx.create_client(&settings)?;
    let locations = client.list_locations().await?;

    if ctx.output.is_structured() {
        return output::print_output(&locations, ctx.output);
    }

    let rows = locations
        .into_iter()
        .map(|l| vec![l.code, l.description])
        .collect();
    output::print_table(&["id", "location"], rows);
    Ok(())
}

fn confirmation_prompt(name: &str, target: &DestroyTarget) -> String {
    match target {
        DestroyTarget::Database => format!(
            "Database {}, all its replicas, and data will be destroyed.\nAre you sure you want to do this?",
            emph(name)
        ),
        DestroyTarget::Instance(instance) => format!(
            "Instance {} of database {} will be destroyed.\nAre you sure you want to do this?",
            emph(instance),
            emph(name)
        ),
        DestroyTarget::Location(location) => format!(
            "All replicas of database {} in location {} will be destroyed.\nAre you sure you want to do this?",
            emph(name),
            emph(location)
        ),
    }
}

async fn handle_destroy(
    ctx: &CommandContext,
    name: &str,
    target: DestroyTarget,
    yes: bool,
) -> Result<()> {
    let settings = ctx.load_settings()?;
    let client = ctx.create_client(&settings)?;

    if !yes {
        let question = confirmation_prompt(name, &target);
        if ctx.output.is_structured() {
            if !prompt::confirm_on_stderr(&question)? {
                eprintln!("Destroy cancelled.");
                return Ok(());
            }
        } else if !prompt::confirm(&question)? {
            println!("Destroy cancelled.");
            return Ok(());
        }
    }

    match target {
        DestroyTarget::Location(location) => {
            let report = destroy_region(&client, name, &location).await?;

            if ctx.output.is_structured() {
                let data = json!({
                    "database": report.database,
                    "location": report.location,
                    "destroyed": report.destroyed,
                    "retained_primary": report.retained_primary.as_ref().map(|p| &p.name),
                });
                return output::print_output(&data, ctx.output);
            }

            println!(
                "Destroyed {} instances in location {} of database {}.",
                report.destroyed,
                emph(&report.location),
                emph(&report.database)
            );
            if report.retained_primary.is_some() {
                println!(
                    "Primary was not destroyed. To destroy it, with the whole database, run 'tursoctl db destroy {}'",
                    name
                );
            }
        }
        DestroyTarget::Instance(instance) => {
            destroy_instance(&client, name, &instance).await?;

            if ctx.output.is_structured() {
                let data = json!({ "database": name, "instance": instance, "destroyed": true });
                return output::print_output(&data, ctx.output);
            }
            println!("Destroyed instance {} of database {}.", emph(&instance), emph(name));
        }
        DestroyTarget::Database => {
            let spinner = output::start_spinner(format!("Destroying database {}... ", emph(name)));
            let result = destroy_database(&client, name, &ctx.settings_path).await;
            spinner.finish_and_clear();
            let report = result?;

            if ctx.output.is_structured() {
                let data = json!({
                    "database": report.database,
                    "elapsed_seconds": report.elapsed.as_secs(),
                    "destroyed": true,
                });
                return output::print_output(&data, ctx.output);
            }
            println!(
                "Destroyed database {} in {} seconds.",
                emph(&report.database),
                report.elapsed.as_secs()
            );
        }
    }

    Ok(())
}

async fn handle_credentials(ctx: &CommandContext, cmd: &CredentialsCommands) -> Result<()> {
    let mut settings = ctx.load_settings()?;

    match cmd {
        CredentialsCommands::Set {
            name,
            username,
            password,
        } => {
            let client = ctx.create_client(&settings)?;
            let db = client.get_database(name).await?;
            store_credentials(&mut settings, &db.id, &db.name, username, password);
            ctx.save_settings(&settings)?;
            println!("Stored credentials for database {}.", emph(&db.name));
        }
        CredentialsCommands::Remove { name } => {
            let removed = settings.delete_database(name);
            ctx.save_settings(&settings)?;
            if removed == 0 {
                println!("No stored credentials for database {}.", emph(name));
            } else {
                println!("Removed stored credentials for database {}.", emph(name));
            }
        }
    }
    Ok(())
}

/// Key new credentials by database ID, dropping any older entries for the same name
fn store_credentials(settings: &mut Settings, id: &str, name: &str, username: &str, password: &str) {
    settings.delete_database(name);
    settings.set_database_settings(
        id.to_string(),
        DatabaseSettings {
            username: username.to_string(),
            password: password.to_string(),
            database: Some(name.to_string()),
        },
    );
}
