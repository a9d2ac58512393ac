//! Prepdesk content shelf CLI
//!
//! Repository-local administration of exam-prep study materials with
//! deterministic, machine-friendly outputs.

use anyhow::Result;
use clap::Parser;
use prepdesk::cli::{Cli, Commands};
use prepdesk::commands::CommandExecutor;
use prepdesk::domain::ContentType;
use prepdesk::output::{ExitCode, JsonOutput, OutputContext};
use prepdesk::query::MaterialQuery;
use prepdesk::storage::JsonFileStorage;
use prepdesk::{embed, subjects};
use std::env;

/// Helper to determine exit code from error message
fn error_to_exit_code(error: &anyhow::Error) -> ExitCode {
    let error_msg = error.to_string().to_lowercase();

    // Check root cause for IO errors
    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        return match io_error.kind() {
            std::io::ErrorKind::NotFound => ExitCode::NotFound,
            std::io::ErrorKind::PermissionDenied => ExitCode::PermissionDenied,
            _ => ExitCode::ExternalError,
        };
    }

    // Check error message patterns
    if error_msg.contains("not found") || error_msg.contains("no such file") {
        ExitCode::NotFound
    } else if error_msg.contains("not an administrator") {
        ExitCode::PermissionDenied
    } else if error_msg.contains("unknown subject")
        || error_msg.contains("must not be empty")
        || error_msg.contains("ambiguous")
    {
        ExitCode::ValidationFailed
    } else if error_msg.contains("unknown content type") || error_msg.contains("at least 4") {
        ExitCode::InvalidArgument
    } else if error_msg.contains("already exists") {
        ExitCode::AlreadyExists
    } else if error_msg.contains("failed to read") || error_msg.contains("io error") {
        ExitCode::ExternalError
    } else {
        ExitCode::GenericError
    }
}

fn main() {
    let exit_code = match run() {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {}", e);
            error_to_exit_code(&e)
        }
    };

    if exit_code != ExitCode::Success {
        std::process::exit(exit_code.code());
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    // Acting account: --actor flag, then PREPDESK_ACTOR, then "local"
    let actor = cli
        .actor
        .clone()
        .or_else(|| env::var("PREPDESK_ACTOR").ok())
        .unwrap_or_else(|| "local".to_string());

    let current_dir = env::current_dir()?;

    // Data directory: PREPDESK_DATA_DIR env var or default to .prepdesk/
    let data_dir = if let Ok(custom_dir) = env::var("PREPDESK_DATA_DIR") {
        current_dir.join(custom_dir)
    } else {
        current_dir.join(".prepdesk")
    };

    let storage = JsonFileStorage::new(&data_dir);
    let executor = CommandExecutor::new(storage);

    match cli.command {
        Commands::Init => {
            let output = OutputContext::new(quiet, false);
            executor.init()?;
            output.print_success(format!(
                "Initialized prepdesk shelf at {}",
                data_dir.display()
            ))?;
        }

        Commands::Add {
            title,
            subject,
            content_type,
            url,
            hidden,
            json,
        } => {
            let output = OutputContext::new(quiet, json);
            executor.access_policy()?.require_local_admin(&actor)?;

            let content_type: ContentType = content_type.parse()?;
            let id = executor.add_material(title, subject, content_type, url, actor)?;
            if hidden {
                executor.set_visibility(&id, false)?;
            }

            if json {
                let envelope = JsonOutput::success(serde_json::json!({ "id": id }), "add");
                println!("{}", envelope.to_json_string()?);
            } else {
                output.print_success(format!("Added {} ({})", content_type, &id[..8]))?;
                output.print_data(&id)?;
            }
        }

        Commands::List {
            content_type,
            subject,
            all,
            json,
        } => {
            let output = OutputContext::new(quiet, json);

            let mut query = MaterialQuery::new();
            if let Some(ct) = content_type {
                query = query.with_content_type(ct.parse()?);
            }
            if let Some(s) = subject {
                query = query.with_subject(s);
            }
            if all {
                query = query.include_hidden();
            }

            let materials = executor.list_materials(&query)?;

            if json {
                let envelope = JsonOutput::success(&materials, "list");
                println!("{}", envelope.to_json_string()?);
            } else {
                if materials.is_empty() {
                    output.print_info("No materials found")?;
                }
                for m in &materials {
                    let marker = if m.visible { " " } else { "·" };
                    output.print_data(format!(
                        "{} {}  {:<8} {:<12} {}",
                        marker,
                        m.short_id(),
                        m.content_type.as_str(),
                        m.subject,
                        m.title
                    ))?;
                }
            }
        }

        Commands::Show { id, json } => {
            let output = OutputContext::new(quiet, json);
            let material = executor.show_material(&id)?;
            let embed_url = embed::to_embeddable(&material.url);

            if json {
                let envelope = JsonOutput::success(
                    serde_json::json!({ "material": material, "embed_url": embed_url }),
                    "show",
                );
                println!("{}", envelope.to_json_string()?);
            } else {
                output.print_data(format!("Title:    {}", material.title))?;
                output.print_data(format!("Subject:  {}", material.subject))?;
                output.print_data(format!("Type:     {}", material.content_type))?;
                output.print_data(format!("Visible:  {}", material.visible))?;
                output.print_data(format!("URL:      {}", material.url))?;
                output.print_data(format!("Embed:    {}", embed_url))?;
                output.print_data(format!("Added by: {}", material.created_by))?;
                output.print_data(format!("Added at: {}", material.created_at.to_rfc3339()))?;
            }
        }

        Commands::Visibility { id, state, json } => {
            let output = OutputContext::new(quiet, json);
            executor.access_policy()?.require_local_admin(&actor)?;

            let visible = state == "on";
            let material = executor.set_visibility(&id, visible)?;

            if json {
                let envelope = JsonOutput::success(&material, "visibility");
                println!("{}", envelope.to_json_string()?);
            } else {
                output.print_success(format!(
                    "{} is now {}",
                    material.title,
                    if visible { "visible" } else { "hidden" }
                ))?;
            }
        }

        Commands::Update {
            id,
            title,
            subject,
            url,
            json,
        } => {
            let output = OutputContext::new(quiet, json);
            executor.access_policy()?.require_local_admin(&actor)?;

            let material = executor.update_material(&id, title, subject, url)?;

            if json {
                let envelope = JsonOutput::success(&material, "update");
                println!("{}", envelope.to_json_string()?);
            } else {
                output.print_success(format!("Updated {}", material.short_id()))?;
            }
        }

        Commands::Delete { id, json } => {
            let output = OutputContext::new(quiet, json);
            executor.access_policy()?.require_local_admin(&actor)?;

            let deleted_id = executor.delete_material(&id)?;

            if json {
                let envelope =
                    JsonOutput::success(serde_json::json!({ "id": deleted_id }), "delete");
                println!("{}", envelope.to_json_string()?);
            } else {
                output.print_success(format!("Deleted {}", &deleted_id[..8]))?;
            }
        }

        Commands::Subjects { json } => {
            let output = OutputContext::new(quiet, json);
            let catalog = subjects::catalog();

            if json {
                let envelope = JsonOutput::success(catalog, "subjects");
                println!("{}", envelope.to_json_string()?);
            } else {
                for s in catalog {
                    output.print_data(format!("{:<12} {}", s.id, s.description))?;
                }
            }
        }

        Commands::Embed { url, json } => {
            let output = OutputContext::new(quiet, json);
            let embed_url = embed::to_embeddable(&url);
            let video_id = embed::video_id(&url);

            if json {
                let envelope = JsonOutput::success(
                    serde_json::json!({
                        "input": url,
                        "embed_url": embed_url,
                        "video_id": video_id,
                    }),
                    "embed",
                );
                println!("{}", envelope.to_json_string()?);
            } else {
                output.print_data(&embed_url)?;
            }
        }

        Commands::Events {
            limit,
            material,
            json,
        } => {
            let output = OutputContext::new(quiet, json);

            let events = match material {
                Some(ref id) => executor.events_for_material(id)?,
                None => executor.list_events(limit)?,
            };

            if json {
                let envelope = JsonOutput::success(&events, "events");
                println!("{}", envelope.to_json_string()?);
            } else {
                if events.is_empty() {
                    output.print_info("No events recorded")?;
                }
                for event in &events {
                    output.print_data(format!(
                        "{:<20} {}",
                        event.kind(),
                        &event.material_id()[..8.min(event.material_id().len())]
                    ))?;
                }
            }
        }
    }

    Ok(())
}
