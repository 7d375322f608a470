use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sketchpad::rand_scene::{draw_scene, RandomSceneCfg, ReplayToken};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod report;
mod script;

use report::FrameReport;
use script::{parse_script, Shell};

#[derive(Parser)]
#[command(name = "sketchpad")]
#[command(about = "Replay and inspect dynamic-geometry scenes")]
struct Cmd {
    /// Log level for diagnostics on stderr (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log: tracing::Level,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Replay a command script and print one JSON report per `frame` command
    Script {
        #[arg(long)]
        input: PathBuf,
        /// Write the reports here (plus a provenance sidecar) instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Click-to-pick radius used by `connect`
        #[arg(long, default_value_t = 10.0)]
        tolerance: f64,
    },
    /// Draw a reproducible random scene and print its frame report
    Random {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long, default_value_t = 16)]
        circles: usize,
        #[arg(long, default_value_t = 8)]
        lines: usize,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(cmd.log)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Script {
            input,
            out,
            tolerance,
        } => run_script(&input, out.as_deref(), tolerance),
        Action::Random {
            seed,
            index,
            circles,
            lines,
        } => random(seed, index, circles, lines),
        Action::Report => report(),
    }
}

fn run_script(input: &Path, out: Option<&Path>, tolerance: f64) -> Result<()> {
    tracing::info!(input = %input.display(), tolerance, "script");
    let src = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let commands = parse_script(&src)?;
    let mut shell = Shell::new(tolerance);
    shell.run(&commands)?;
    let summary = provenance::SceneSummary {
        commands: commands.len(),
        frames: shell.reports.len(),
        circles: shell.scene.circle_count(),
        lines: shell.scene.line_count(),
        valid_lines: shell.scene.list_valid_lines().len(),
    };
    tracing::info!(?summary, "script done");

    let json = serde_json::to_vec_pretty(&shell.reports)?;
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(out, &json).with_context(|| format!("writing {}", out.display()))?;
            let payload = provenance::Payload::new(serde_json::json!({
                "command": "script",
                "tolerance": tolerance,
            }))
            .with_input(input)
            .with_scene(summary);
            provenance::write_sidecar(out, payload)?;
        }
        None => println!("{}", String::from_utf8_lossy(&json)),
    }
    Ok(())
}

fn random(seed: u64, index: u64, circles: usize, lines: usize) -> Result<()> {
    let cfg = RandomSceneCfg {
        circles,
        lines,
        ..RandomSceneCfg::default()
    };
    let scene = draw_scene(cfg, ReplayToken { seed, index })?;
    let frame = scene.frame();
    let report = FrameReport::capture(0, &frame);
    tracing::info!(
        seed,
        index,
        circle_points = report.circle_intersections.len(),
        line_points = report.line_intersections.len(),
        "random"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "sketchpad_version": sketchpad::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
