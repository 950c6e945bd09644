use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{error, info, warn};

use comprendre_scoring::cli::{Cli, Commands, SessionArgs, ValidateArgs};
use comprendre_scoring::input::prompt::run_guided_entry;
use comprendre_scoring::input::{
    NormsLibrary, RawScore, ReferenceTable, RejectedEntry, load_score_sheet,
};
use comprendre_scoring::logging;
use comprendre_scoring::model::interference::InterferencePolicy;
use comprendre_scoring::pipeline::stage4_report::write_bundle;
use comprendre_scoring::pipeline::{ScoringOutcome, ScoringRequest, score_request};
use comprendre_scoring::report::{format_trimmed, sanitize_child_id};
use comprendre_scoring::tasks::audit::audit_table;
use comprendre_scoring::tasks::defs::{builtin_tasks, entry_groups, entry_tasks};

fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log_level);
    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => {
            let config = RunConfig::from_args(&args.session)?;
            let table = load_table(&config)?;
            let sheet = load_score_sheet(&args.scores)
                .with_context(|| format!("failed to read score sheet {}", args.scores.display()))?;
            if !sheet.rejected.is_empty() {
                warn!(
                    rejected = sheet.rejected.len(),
                    "some score entries were refused; correct them in the sheet and run again"
                );
            }
            score_and_write(&config, &table, &sheet.scores, &sheet.rejected)
        }
        Commands::Prompt(args) => {
            let config = RunConfig::from_args(&args.session)?;
            let table = load_table(&config)?;
            let stdin = io::stdin();
            let stdout = io::stdout();
            let entry = run_guided_entry(&table, stdin.lock(), stdout.lock())
                .context("guided entry failed")?;
            info!(
                entered = entry.scores.len(),
                retries = entry.retries,
                without_norms = entry.without_norms.len(),
                "guided entry finished"
            );
            if entry.interrupted {
                println!("input closed early: {} task(s) entered", entry.scores.len());
            }
            score_and_write(&config, &table, &entry.scores, &[])
        }
        Commands::Validate(args) => validate(&args),
        Commands::Catalog => {
            print_catalog();
            Ok(())
        }
    }
}

#[derive(Debug, Clone)]
struct RunConfig {
    norms_dir: PathBuf,
    age_group: String,
    child_id: String,
    out_dir: PathBuf,
    policy: InterferencePolicy,
    chart_tasks: Option<Vec<String>>,
}

impl RunConfig {
    fn from_args(args: &SessionArgs) -> Result<Self> {
        sanitize_child_id(&args.child_id).context("a child id is required")?;
        let chart_tasks = args.tasks.as_ref().map(|tasks| {
            tasks
                .iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect()
        });
        Ok(Self {
            norms_dir: args.norms.clone(),
            age_group: args.age_group.trim().to_string(),
            child_id: args.child_id.trim().to_string(),
            out_dir: args.out.clone(),
            policy: args.policy(),
            chart_tasks,
        })
    }
}

fn load_table(config: &RunConfig) -> Result<ReferenceTable> {
    let library = NormsLibrary::open(&config.norms_dir)?;
    let table = library
        .load(&config.age_group)
        .with_context(|| format!("failed to load norms for '{}'", config.age_group))?;
    let audit = audit_table(&table);
    info!(
        age_group = %audit.age_group,
        normed = audit.n_tasks_normed,
        defined = audit.n_tasks_defined,
        "reference table ready"
    );
    Ok(table)
}

fn score_and_write(
    config: &RunConfig,
    table: &ReferenceTable,
    scores: &[RawScore],
    rejected: &[RejectedEntry],
) -> Result<()> {
    let request = ScoringRequest {
        child_id: &config.child_id,
        table,
        scores,
        rejected,
        policy: config.policy,
    };
    let outcome = score_request(&request);
    let paths = write_bundle(&outcome, &config.out_dir, config.chart_tasks.as_deref())
        .context("failed to write report bundle")?;
    print_outcome(&outcome);
    println!("bundle: {}", paths.dir.display());
    println!("archive: {}", paths.archive.display());
    Ok(())
}

fn print_outcome(outcome: &ScoringOutcome) {
    println!(
        "{} ({}): {} task(s) scored",
        outcome.child_id,
        outcome.age_group,
        outcome.results.len()
    );
    for r in &outcome.results {
        println!(
            "{}\t{}\tz={}\tp={}",
            r.task,
            format_trimmed(r.score),
            format_trimmed(r.z_score),
            format_trimmed(r.percentile)
        );
    }
    if !outcome.warnings.is_empty() {
        println!("warnings:");
        for w in &outcome.warnings {
            println!("- {w}");
        }
    }
}

fn validate(args: &ValidateArgs) -> Result<()> {
    let library = NormsLibrary::open(&args.norms)?;
    println!("norms: {}", library.root().display());
    let groups: Vec<String> = match &args.age_group {
        Some(group) => vec![group.clone()],
        None => library.age_groups().map(str::to_string).collect(),
    };

    let mut failures = 0usize;
    for group in &groups {
        let table = match library.load(group) {
            Ok(table) => table,
            Err(err) => {
                error!(age_group = %group, "{err}");
                println!("{group}\tERROR\t{err}");
                failures += 1;
                continue;
            }
        };
        let audit = audit_table(&table);
        println!(
            "{}\t{}\t{}/{}\tunmapped={}\twithout_norms={}",
            audit.age_group,
            table.len(),
            audit.n_tasks_normed,
            audit.n_tasks_defined,
            audit.unmapped.join(","),
            audit.without_norms.join(",")
        );
        if !audit.is_clean() {
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{failures} of {} reference table(s) failed validation", groups.len());
    }
    println!("ok: {} reference table(s)", groups.len());
    Ok(())
}

fn print_catalog() {
    for group in entry_groups() {
        println!("# {}", group.title);
        for (left, right) in group.pairs {
            println!("#   {left} | {right}");
        }
    }
    println!("#");
    for def in builtin_tasks() {
        println!("# {}\t{}", def.category.label(), def.name);
    }
    println!("Tâche\tScore");
    for task in entry_tasks() {
        println!("{task}\t");
    }
}
