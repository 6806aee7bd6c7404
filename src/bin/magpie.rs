//! Magpie CLI
//!
//! Command-line surface over the agent catalog: listing, inspection,
//! selection, validation, and the offline skill export/migration adapters.

use anyhow::Result;
use clap::{Parser, Subcommand};
use magpie::agent::{
    load_catalog, select, AgentContext, AgentRecord, Catalog, LoadOutcome, RuntimeMode, Tier,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "magpie")]
#[command(about = "Magpie - declarative agent registry", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Agents directory
    #[arg(short = 'd', long, default_value = "agents")]
    agents_dir: PathBuf,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List agents, grouped by tier
    List {
        /// Filter by tier
        #[arg(long)]
        tier: Option<Tier>,

        /// Filter by category
        #[arg(long)]
        category: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one agent's metadata
    Info {
        /// Agent name
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one agent's full instructions
    Instructions {
        /// Agent name
        name: String,
    },

    /// Select the best agent for a task description
    Select {
        /// Task description to match against
        task: String,

        /// Explicitly request an agent by name, bypassing scoring
        #[arg(long)]
        agent: Option<String>,
    },

    /// Run an agent against a task and show the synthesized report
    Run {
        /// Agent name
        name: String,

        /// Task description
        task: String,

        /// Task severity
        #[arg(long)]
        severity: Option<String>,

        /// Environment context
        #[arg(long)]
        environment: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate every agent declaration and report problems
    Validate,

    /// Export preload agents as skill artifacts
    ExportSkills {
        /// Output directory for generated skills
        #[arg(short, long, default_value = "skills")]
        output: PathBuf,
    },

    /// Migrate legacy frontmatter skills into agent declarations
    MigrateSkills {
        /// Directory of legacy skills
        source: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("magpie=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("magpie=warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::List { tier, category, json } => {
            let outcome = load_catalog(&cli.agents_dir)?;
            list_agents(&outcome.catalog, tier, category.as_deref(), json)?;
        }
        Commands::Info { name, json } => {
            let outcome = load_catalog(&cli.agents_dir)?;
            match outcome.catalog.get(&name) {
                Some(record) if json => println!("{}", serde_json::to_string_pretty(record)?),
                Some(record) => print_info(record),
                None => println!("Agent '{}' not found.", name),
            }
        }
        Commands::Instructions { name } => {
            let outcome = load_catalog(&cli.agents_dir)?;
            match outcome.catalog.get(&name) {
                Some(record) if record.instructions.is_empty() => {
                    println!("No instructions found for agent '{}'.", name)
                }
                Some(record) => println!("{}", record.instructions),
                None => println!("Agent '{}' not found.", name),
            }
        }
        Commands::Select { task, agent } => {
            let outcome = load_catalog(&cli.agents_dir)?;
            match select(&outcome.catalog, &task, agent.as_deref()) {
                Some(record) => {
                    println!("Selected agent: {}", record.name);
                    println!("  Description: {}", record.description);
                    println!("  Tier: {}", record.tier.as_str());
                    println!("  Category: {}", record.category);
                    let matched = record.matched_keywords(&task);
                    if !matched.is_empty() {
                        println!("  Matched keywords: {}", matched.join(", "));
                    }
                    if !record.delegates_to.is_empty() {
                        println!("  Can delegate to: {}", record.delegates_to.join(", "));
                    }
                }
                None => println!("No suitable agent found for task: {}", task),
            }
        }
        Commands::Run {
            name,
            task,
            severity,
            environment,
            json,
        } => {
            let outcome = load_catalog(&cli.agents_dir)?;
            let Some(record) = outcome.catalog.get(&name) else {
                println!("Agent '{}' not found.", name);
                return Ok(());
            };
            let context = AgentContext {
                task_description: task,
                repository_path: None,
                environment,
                severity,
            };
            let report = record.run(&context);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Validate => {
            let outcome = load_catalog(&cli.agents_dir)?;
            if !print_validation(&outcome) {
                std::process::exit(1);
            }
        }
        Commands::ExportSkills { output } => {
            let outcome = load_catalog(&cli.agents_dir)?;
            let report = magpie::export::export_skills(&outcome.catalog, &output)?;
            for name in &report.generated {
                println!("  [OK]   {}", name);
            }
            for name in &report.skipped {
                println!("  [SKIP] {} (on-demand mode)", name);
            }
            println!(
                "\nGenerated {} skills, skipped {} on-demand agents",
                report.generated.len(),
                report.skipped.len()
            );
            println!("Output: {}", output.display());
        }
        Commands::MigrateSkills { source } => {
            let report = magpie::migrate::migrate_skills(&source, &cli.agents_dir)?;
            for name in &report.migrated {
                println!("  [OK]   {}", name);
            }
            for name in &report.skipped {
                println!("  [SKIP] {} (no skill file)", name);
            }
            println!(
                "\nMigrated {} skills to {}",
                report.migrated.len(),
                cli.agents_dir.display()
            );
        }
    }

    Ok(())
}

fn list_agents(
    catalog: &Catalog,
    tier: Option<Tier>,
    category: Option<&str>,
    json: bool,
) -> Result<()> {
    let records: Vec<&AgentRecord> = catalog
        .iter()
        .filter(|r| tier.map_or(true, |t| r.tier == t))
        .filter(|r| category.map_or(true, |c| r.category == c))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    let strategic: Vec<_> = records.iter().filter(|r| r.tier == Tier::Strategic).collect();
    let tactical: Vec<_> = records.iter().filter(|r| r.tier == Tier::Tactical).collect();

    if !strategic.is_empty() {
        println!("Strategic Agents ({})", strategic.len());
        for record in &strategic {
            print_list_entry(record);
        }
        println!();
    }

    if !tactical.is_empty() {
        println!("Tactical Agents ({})", tactical.len());
        for record in &tactical {
            print_list_entry(record);
        }
        println!();
    }

    println!("Total: {} agents", records.len());
    Ok(())
}

fn print_list_entry(record: &AgentRecord) {
    println!("  {} ({})", record.name, record.category);
    println!("    {}", record.description);
    if !record.delegates_to.is_empty() {
        println!("    Delegates to: {}", record.delegates_to.join(", "));
    }
}

fn print_info(record: &AgentRecord) {
    println!("{}", record.name);
    println!("  Description: {}", record.description);
    println!("  Tier: {}", record.tier.as_str());
    println!("  Category: {}", record.category);
    println!("  Runtime mode: {}", record.runtime_mode.as_str());
    println!(
        "  Requires opus: {}",
        if record.requires_opus { "yes" } else { "no" }
    );
    if !record.keywords.is_empty() {
        println!("  Keywords:");
        for kw in &record.keywords {
            println!("    - {}", kw);
        }
    }
    if !record.delegates_to.is_empty() {
        println!("  Delegates to:");
        for delegate in &record.delegates_to {
            println!("    - {}", delegate);
        }
    }
}

fn print_report(report: &magpie::agent::AgentReport) {
    println!("Agent: {}", report.agent);
    println!("  Status: {}", report.status);
    println!("  Message: {}", report.message);
    println!("  Tier: {}", report.tier.as_str());
    println!("  Category: {}", report.category);
    if !report.matched_keywords.is_empty() {
        println!("  Matched keywords: {}", report.matched_keywords.join(", "));
    }
    if let Some(plan) = &report.plan {
        println!("  Plan ({} steps):", plan.len());
        for step in plan {
            match &step.delegate_to {
                Some(target) => println!("    {}. {} -> {}", step.step, step.action, target),
                None => println!("    {}. {}", step.step, step.action),
            }
        }
    }
    if let Some(delegations) = &report.delegations {
        println!("  Delegation targets: {}", delegations.join(", "));
    }
}

/// Print the validation report. Returns false when any declaration failed.
fn print_validation(outcome: &LoadOutcome) -> bool {
    let warned: Vec<&str> = outcome.warnings.iter().map(|w| w.agent.as_str()).collect();

    for record in outcome.catalog.iter() {
        if warned.contains(&record.name.as_str()) {
            println!("  [WARN]  {}", record.name);
            for warning in outcome.warnings.iter().filter(|w| w.agent == record.name) {
                println!("          {}", warning.message);
            }
        } else {
            println!("  [OK]    {}", record.name);
        }
    }

    for issue in &outcome.issues {
        println!("  [ERROR] {}", issue);
    }

    let valid = outcome
        .catalog
        .iter()
        .filter(|r| !warned.contains(&r.name.as_str()))
        .count();
    let strategic = outcome.catalog.by_tier(Tier::Strategic).len();
    let tactical = outcome.catalog.by_tier(Tier::Tactical).len();
    let preload = outcome
        .catalog
        .iter()
        .filter(|r| r.runtime_mode == RuntimeMode::Preload)
        .count();

    println!();
    println!("Summary:");
    println!("  Total agents: {}", outcome.catalog.len() + outcome.issues.len());
    println!("  Valid: {}", valid);
    println!("  Warnings: {}", outcome.warnings.len());
    println!("  Errors: {}", outcome.issues.len());
    println!();
    println!("  Strategic: {}", strategic);
    println!("  Tactical: {}", tactical);
    println!("  Preload: {}", preload);

    if outcome.issues.is_empty() {
        println!("\nValidation PASSED");
        true
    } else {
        println!("\nValidation FAILED with {} errors", outcome.issues.len());
        false
    }
}
