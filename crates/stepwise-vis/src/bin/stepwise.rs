//! Stepwise command-line harness
//!
//! List algorithms, dump a trace, or auto-play one in the terminal.

use std::env;
use std::io::Read;
use std::time::Duration;

use anyhow::{bail, Context};
use serde_json::Value;
use stepwise_playback::{PlaybackConfig, PlaybackState};
use stepwise_trace::Frame;
use stepwise_vis::{build_trace, AlgorithmId, Session};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "\
Usage: stepwise <command> [args]

Commands:
  list                              List every algorithm id
  trace <algorithm> [params] [--json]
                                    Build a trace and print its frames
  play <algorithm> [params]         Auto-play a trace, printing each frame
  help                              Show this message

[params] is a JSON file path, '-' for stdin, or inline JSON starting with '{'.
Without it the algorithm's demo parameters are used.

Playback honours STEPWISE_BASE_MS, STEPWISE_SPEED and STEPWISE_LOOP.";

/// How often `play` checks the cursor.
const POLL_MS: u64 = 20;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stepwise=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("help");

    match command {
        "list" => list(),
        "trace" => {
            let json = args.iter().any(|a| a == "--json");
            let rest: Vec<&str> = args[1..]
                .iter()
                .map(String::as_str)
                .filter(|a| *a != "--json")
                .collect();
            let (id, params) = algorithm_and_params(&rest)?;
            trace(id, &params, json)
        }
        "play" => {
            let rest: Vec<&str> = args[1..].iter().map(String::as_str).collect();
            let (id, params) = algorithm_and_params(&rest)?;
            play(id, &params).await
        }
        "help" | "-h" | "--help" => {
            println!("{}", USAGE);
            Ok(())
        }
        other => bail!("unknown command '{}'\n\n{}", other, USAGE),
    }
}

fn list() -> anyhow::Result<()> {
    println!("Stepwise algorithms");
    println!("===================");
    let mut family = None;
    for &id in AlgorithmId::ALL {
        if family != Some(id.family()) {
            family = Some(id.family());
            println!();
            println!("{}:", id.family());
        }
        println!("  {:<16} {}", id.as_str(), id.summary());
    }
    Ok(())
}

fn algorithm_and_params(args: &[&str]) -> anyhow::Result<(AlgorithmId, Value)> {
    let Some(name) = args.first() else {
        bail!("missing algorithm id\n\n{}", USAGE);
    };
    let id: AlgorithmId = name.parse()?;
    let params = match args.get(1) {
        None => Value::Null,
        Some(source) => read_params(source)?,
    };
    Ok((id, params))
}

fn read_params(source: &str) -> anyhow::Result<Value> {
    let text = if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading parameters from stdin")?;
        text
    } else if source.trim_start().starts_with('{') {
        source.to_string()
    } else {
        std::fs::read_to_string(source).with_context(|| format!("reading {}", source))?
    };
    serde_json::from_str(&text).context("parameters are not valid JSON")
}

fn print_frame(index: usize, total: usize, frame: &Frame<Value>) {
    println!("[{:>3}/{}] {}", index + 1, total, frame.title);
    if !frame.description.is_empty() {
        println!("          {}", frame.description);
    }
}

fn trace(id: AlgorithmId, params: &Value, json: bool) -> anyhow::Result<()> {
    let trace = build_trace(id, params)?
        .into_json()
        .context("serializing trace payloads")?;

    if json {
        println!("{}", serde_json::to_string_pretty(trace.frames())?);
        return Ok(());
    }

    println!("{} ({} frames)", id, trace.len());
    for (i, frame) in trace.iter().enumerate() {
        print_frame(i, trace.len(), frame);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Frame(usize),
    Loop,
}

/// Turns polled cursor positions into the frames `play` still has to print.
#[derive(Debug)]
struct Cursor {
    total: usize,
    /// First frame not yet printed.
    next: usize,
    last_seen: usize,
}

impl Cursor {
    fn new(total: usize) -> Self {
        Self {
            total,
            next: 0,
            last_seen: 0,
        }
    }

    /// A position behind the previous one means a looping trace wrapped
    /// between polls; the skipped tail is printed before the loop marker.
    fn observe(&mut self, current: usize) -> Vec<Step> {
        let mut steps = Vec::new();
        if current < self.last_seen {
            steps.extend((self.next..self.total).map(Step::Frame));
            steps.push(Step::Loop);
            self.next = 0;
        }
        steps.extend((self.next..=current).map(Step::Frame));
        self.next = self.next.max(current + 1);
        self.last_seen = current;
        steps
    }
}

async fn play(id: AlgorithmId, params: &Value) -> anyhow::Result<()> {
    let config = PlaybackConfig::from_env();
    tracing::info!(algorithm = %id, base_ms = config.base_ms, speed = ?config.speed, "starting playback");

    let mut session = Session::new(config);
    let total = session.load(id, params).await?.total_frames;
    session.play().await?;

    let mut cursor = Cursor::new(total);
    loop {
        let status = session.status().await?;
        for step in cursor.observe(status.current_frame) {
            match step {
                Step::Frame(index) => {
                    if let Some(frame) = session.frame_at(index).await? {
                        print_frame(index, total, &frame);
                    }
                }
                Step::Loop => println!("-- loop --"),
            }
        }
        if status.state != PlaybackState::Playing {
            break;
        }
        tokio::time::sleep(Duration::from_millis(POLL_MS)).await;
    }

    session.wait().await;
    Ok(())
}
