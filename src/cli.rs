use crate::{
    command::{apply_all, load_commands, PlanCommand},
    config::Config,
    engine::{native::LopdfEngine, Engine},
    split::{check_page_count, resolve_output_dir, should_execute, Splitter},
    split_plan::{render_preview, FinalizedPlan, SplitPlan},
    util::{ensure_dir, source_stem},
};
use anyhow::{anyhow, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "pdf-manual-split")]
#[command(about = "Split a PDF into multiple documents at chosen pages")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./pdf-split.toml if present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Shorthand for --log-level debug.
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the PDF backend can write and read a document.
    Doctor {},
    /// Print page count and size of a PDF.
    Info {
        #[arg(long)]
        input: PathBuf,
    },
    /// Preview the documents a split plan would produce.
    Plan {
        #[command(flatten)]
        plan: PlanArgs,
        /// Print the plan as JSON instead of the text preview.
        #[arg(long)]
        json: bool,
    },
    /// Write one PDF per planned document plus a JSON summary.
    Split {
        #[command(flatten)]
        plan: PlanArgs,
        /// Output folder; relative paths resolve against the PDF's directory.
        #[arg(long, short = 'o')]
        output_folder: Option<PathBuf>,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct PlanArgs {
    #[arg(long)]
    pub input: PathBuf,

    /// Toggle a split after this page (repeatable; toggling twice removes it).
    #[arg(long = "split-after", value_name = "PAGE")]
    pub split_after: Vec<u32>,

    /// Name document N (1-based) in the final plan, e.g. --name 2=Chapter2.pdf
    #[arg(long = "name", value_name = "N=FILE", value_parser = parse_name_arg)]
    pub names: Vec<(usize, String)>,

    /// JSON file with a list of plan commands, applied before the flags above.
    #[arg(long)]
    pub commands: Option<PathBuf>,
}

impl PlanArgs {
    /// Commands in application order: command file, toggles, then names.
    pub fn to_commands(&self) -> Result<Vec<PlanCommand>> {
        let mut cmds = match &self.commands {
            Some(path) => load_commands(path)?,
            None => Vec::new(),
        };
        cmds.extend(
            self.split_after
                .iter()
                .map(|&after_page| PlanCommand::ToggleSplit { after_page }),
        );
        cmds.extend(self.names.iter().map(|(n, name)| PlanCommand::SetName {
            index: n - 1,
            name: name.clone(),
        }));
        Ok(cmds)
    }
}

pub fn parse_name_arg(raw: &str) -> std::result::Result<(usize, String), String> {
    let (n, name) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected N=FILE, got {raw:?}"))?;
    let n: usize = n
        .trim()
        .parse()
        .map_err(|_| format!("invalid document number: {n:?}"))?;
    if n == 0 {
        return Err("document numbers start at 1".to_string());
    }
    Ok((n, name.to_string()))
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg = match resolve_config_path(args.config.as_deref()) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    match &args.cmd {
        Command::Doctor {} => {
            let _guard = init_logging(&args, &cfg, resolve_log_path(&cfg, None).as_deref())?;
            doctor()
        }
        Command::Info { input } => {
            let _guard = init_logging(&args, &cfg, resolve_log_path(&cfg, None).as_deref())?;
            info_cmd(&cfg, input)
        }
        Command::Plan { plan, json } => {
            let _guard = init_logging(&args, &cfg, resolve_log_path(&cfg, None).as_deref())?;
            plan_cmd(&cfg, plan, *json)
        }
        Command::Split {
            plan,
            output_folder,
        } => split_cmd(&args, &cfg, plan, output_folder.as_deref()),
    }
}

fn resolve_config_path(user: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = user {
        return Some(p.to_path_buf());
    }
    let default = PathBuf::from("pdf-split.toml");
    default.exists().then_some(default)
}

fn init_logging(args: &Args, cfg: &Config, file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .or(args.debug.then_some("debug"))
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = file_path {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn doctor() -> Result<()> {
    let diag = LopdfEngine::new().doctor()?;
    println!("{}", serde_json::to_string_pretty(&diag)?);
    Ok(())
}

fn info_cmd(cfg: &Config, input: &Path) -> Result<()> {
    validate_input(cfg, input)?;
    let probe = crate::probe::probe_pdf(cfg, &LopdfEngine::new(), input)?;
    println!("{}", serde_json::to_string_pretty(&probe)?);
    Ok(())
}

/// Probes the input and replays the plan commands. `None` means the
/// document is too short to be worth splitting.
fn build_plan(cfg: &Config, engine: &dyn Engine, args: &PlanArgs) -> Result<Option<FinalizedPlan>> {
    validate_input(cfg, &args.input)?;
    let probe = crate::probe::probe_pdf(cfg, engine, &args.input)?;
    info!("file={} pages={}", probe.path, probe.page_count);

    if let Err(skip) = check_page_count(cfg, probe.page_count) {
        println!("{skip}");
        return Ok(None);
    }

    let mut plan = SplitPlan::new(probe.page_count)?;
    let cmds = args.to_commands()?;
    debug!(?cmds, "plan commands");
    apply_all(&mut plan, &cmds)?;

    Ok(Some(plan.finalize(&source_stem(&args.input))))
}

fn plan_cmd(cfg: &Config, args: &PlanArgs, json: bool) -> Result<()> {
    let Some(plan) = build_plan(cfg, &LopdfEngine::new(), args)? else {
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", render_preview(&plan));
    }
    Ok(())
}

fn split_cmd(args: &Args, cfg: &Config, plan_args: &PlanArgs, folder: Option<&Path>) -> Result<()> {
    let output_dir = resolve_output_dir(cfg, &plan_args.input, folder);
    let log_path = resolve_log_path(cfg, Some(&output_dir));
    let _guard = init_logging(args, cfg, log_path.as_deref())?;

    let engine = LopdfEngine::new();
    let Some(plan) = build_plan(cfg, &engine, plan_args)? else {
        return Ok(());
    };

    if let Err(skip) = should_execute(cfg, plan.total_pages, &plan) {
        println!("{skip}");
        return Ok(());
    }

    if cfg.debug.dump_effective_config {
        ensure_dir(&output_dir)?;
        let raw = toml::to_string(cfg).unwrap_or_default();
        std::fs::write(output_dir.join("effective-config.toml"), raw)?;
    }

    let splitter = Splitter::new(cfg, engine);
    let outcome = splitter.run(&plan_args.input, &plan, &output_dir)?;

    if cfg.global.print_summary {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "output_dir": outcome.output_dir,
                "attempted": outcome.attempted,
                "succeeded": outcome.succeeded,
                "failed": outcome.failed,
                "manifest": outcome.manifest_path,
                "manifest_error": outcome.manifest_error,
                "status": if outcome.all_ok() { "ok" } else { "partial" },
            }))?
        );
    }

    if let Some(err) = &outcome.manifest_error {
        return Err(anyhow!("summary not written: {err}"));
    }
    if !outcome.all_ok() {
        return Err(anyhow!(
            "{} of {} document(s) failed",
            outcome.failed,
            outcome.attempted
        ));
    }
    Ok(())
}

fn validate_input(cfg: &Config, input: &Path) -> Result<()> {
    let input_str = input.display().to_string();

    if cfg.security.reject_url_inputs && looks_like_url(&input_str) {
        return Err(anyhow!("URL inputs are disabled: {input_str}"));
    }

    if !input.exists() {
        return Err(anyhow!("input does not exist: {}", input.display()));
    }

    if let Some(ext) = input.extension().and_then(|s| s.to_str()) {
        if !ext.eq_ignore_ascii_case("pdf") {
            return Err(anyhow!("input is not a PDF: {}", input.display()));
        }
    } else {
        warn!("input has no extension; assuming PDF: {}", input.display());
    }

    Ok(())
}

fn looks_like_url(s: &str) -> bool {
    let s = s.to_ascii_lowercase();
    s.starts_with("http://") || s.starts_with("https://") || s.starts_with("file://")
}

fn resolve_log_path(cfg: &Config, output_dir: Option<&Path>) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }

    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }

    output_dir.map(|dir| dir.join("pdf-split.log"))
}
