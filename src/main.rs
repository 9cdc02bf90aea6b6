use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use configuration::{LogFormat, Settings};
use core_types::SystemConstant;
use database::{migrations, DbRepository, SchemaContext};
use indicatif::{ProgressBar, ProgressStyle};
use sqlx::PgPool;
use std::collections::HashSet;
use std::path::PathBuf;
use view_models::AllCodeSets;

/// The main entry point for the restoration tracking service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let mut settings = configuration::load_config(cli.config.as_deref())?;
    if let Some(format) = cli.log_format {
        settings.log.format = format;
    }
    // The guard flushes the log file on drop; keep it alive until exit.
    let _log_guard = configuration::init_tracing(&settings.log)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve => web_server::run_server(settings).await,
        Commands::Migrate => handle_migrate(&settings).await,
        Commands::Migrations => handle_list_migrations(&settings).await,
        Commands::Codes(args) => handle_codes(&settings, args).await,
        Commands::Constant(args) => handle_constant(&settings, args).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Restoration project tracking: public API, schema migrations and lookups.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the configured console log format.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve,
    /// Apply all pending schema migrations.
    Migrate,
    /// List known migrations and whether each has been applied.
    Migrations,
    /// Print every code set used to populate form selectors.
    Codes(CodesArgs),
    /// Look up a system constant, e.g. ORGANIZATION_URL.
    Constant(ConstantArgs),
}

#[derive(Parser)]
struct CodesArgs {
    /// Print the same JSON payload the API serves instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ConstantArgs {
    /// The constant name (case-insensitive).
    name: String,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn connect(settings: &Settings) -> anyhow::Result<(PgPool, SchemaContext)> {
    let ctx = web_server::schema_context(&settings.database)?;
    let pool = database::connect(&web_server::pool_settings(&settings.database), &ctx).await?;
    Ok((pool, ctx))
}

/// Applies pending migrations one at a time behind a progress bar.
/// `serve` applies them in one go through the sqlx migrator instead.
async fn handle_migrate(settings: &Settings) -> anyhow::Result<()> {
    let (pool, ctx) = connect(settings).await?;
    let pending = migrations::pending_migrations(&pool, &ctx).await?;
    if pending.is_empty() {
        println!("Schema '{}' is up to date.", ctx.schema());
        return Ok(());
    }

    let progress_bar = ProgressBar::new(pending.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut applied = 0;
    for migration in pending {
        progress_bar.set_message(format!("{} {}", migration.version, migration.description));
        if migrations::apply_migration(&pool, &ctx, migration).await? {
            applied += 1;
        }
        progress_bar.inc(1);
    }

    progress_bar.finish_with_message(format!("Applied {applied} migration(s)."));
    Ok(())
}

async fn handle_list_migrations(settings: &Settings) -> anyhow::Result<()> {
    let (pool, ctx) = connect(settings).await?;
    let applied: HashSet<i64> = migrations::applied_versions(&pool, &ctx)
        .await?
        .into_iter()
        .collect();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Version", "Description", "Status"]);
    for migration in migrations::all() {
        let status = if applied.contains(&migration.version) { "applied" } else { "pending" };
        table.add_row(vec![
            Cell::new(migration.version),
            Cell::new(migration.description),
            Cell::new(status),
        ]);
    }

    println!("{table}");
    Ok(())
}

async fn handle_codes(settings: &Settings, args: CodesArgs) -> anyhow::Result<()> {
    let (pool, _) = connect(settings).await?;
    let codes = AllCodeSets::from(DbRepository::new(pool).get_all_code_sets().await?);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&codes)?);
        return Ok(());
    }

    let sets = [
        ("first_nations", &codes.first_nations),
        ("funding_source", &codes.funding_source),
        ("regions", &codes.regions),
        ("species", &codes.species),
        ("system_roles", &codes.system_roles),
        ("project_roles", &codes.project_roles),
        (
            "administrative_activity_status_type",
            &codes.administrative_activity_status_type,
        ),
    ];
    for (title, set) in sets {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec!["ID", "Name"]);
        for code in set {
            table.add_row(vec![Cell::new(code.id), Cell::new(&code.name)]);
        }
        println!("{title} ({})\n{table}", set.len());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["ID", "Funding Source ID", "Name"]);
    for code in &codes.investment_action_category {
        table.add_row(vec![
            Cell::new(code.id),
            Cell::new(code.fs_id),
            Cell::new(&code.name),
        ]);
    }
    println!(
        "investment_action_category ({})\n{table}",
        codes.investment_action_category.len()
    );
    Ok(())
}

async fn handle_constant(settings: &Settings, args: ConstantArgs) -> anyhow::Result<()> {
    let constant: SystemConstant = args.name.to_uppercase().parse()?;
    let (pool, _) = connect(settings).await?;

    match DbRepository::new(pool).get_system_constant(constant).await? {
        Some(value) => println!("{constant} = {value}"),
        None => {
            tracing::warn!(%constant, "System constant has no value.");
            println!("{constant} is not set");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_json_flag() {
        let cli = Cli::try_parse_from(["restoration", "codes", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Codes(CodesArgs { json: true })));

        let cli = Cli::try_parse_from(["restoration", "--log-format", "compact", "codes"]).unwrap();
        assert!(matches!(cli.command, Commands::Codes(CodesArgs { json: false })));
        assert!(matches!(cli.log_format, Some(LogFormat::Compact)));
    }

    #[test]
    fn test_codes_json_is_the_api_payload() {
        let json = serde_json::to_value(AllCodeSets::default()).unwrap();
        assert!(json["investment_action_category"].as_array().unwrap().is_empty());
        assert!(json["first_nations"].is_array());
    }
}
