//! wheel-runner: headless driver for the wheel spinner.
//!
//! Usage:
//!   wheel-runner --seed 12345 --spins 100 --db wheel.db
//!   wheel-runner --items "Pizza,Sushi,Ramen" --config wheel.json
//!   wheel-runner --db wheel.db --ipc-mode

use anyhow::Result;
use chrono::Utc;
use std::env;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use wheel_core::{
    config::WheelConfig,
    engine::WheelEngine,
    event::WheelEvent,
    items::Segment,
    report::StatsSummary,
    rng::WheelRng,
    store::WheelStore,
};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    AddItem { item: String },
    RemoveItem { item: String },
    ClearItems,
    /// Start a spin; the caller drives time with `advance`.
    Spin,
    Advance { ms: u64 },
    /// Start a spin and play the whole reveal sequence at once.
    SpinToCompletion,
    ClearStatistics,
    SetTheme { theme: String },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    phase:    &'static str,
    busy:     bool,
    theme:    String,
    segments: Vec<Segment>,
    summary:  StatsSummary,
}

#[derive(serde::Serialize)]
struct IpcReply {
    events: Vec<WheelEvent>,
    state:  UiState,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed: Option<u64> = args
        .windows(2)
        .find(|w| w[0] == "--seed")
        .and_then(|w| w[1].parse().ok());
    let spins = parse_arg(&args, "--spins", 10u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = str_arg(&args, "--db").unwrap_or(":memory:");

    let config = match str_arg(&args, "--config") {
        Some(path) => WheelConfig::load(path)?,
        None => WheelConfig::default(),
    };
    let rng = match seed {
        Some(seed) => WheelRng::new(seed),
        None => WheelRng::from_entropy(),
    };

    if !ipc_mode {
        println!("wheel-runner");
        match seed {
            Some(seed) => println!("  seed:   {seed}"),
            None => println!("  seed:   (entropy)"),
        }
        println!("  spins:  {spins}");
        println!("  db:     {db}");
        println!();
    }

    let store = WheelStore::open(db)?;
    store.migrate()?;
    let mut engine = WheelEngine::open(store, config, rng);

    if let Some(list) = str_arg(&args, "--items") {
        engine.clear_items();
        for item in list.split(',') {
            engine.add_item(item);
        }
    }

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
    } else {
        for _ in 0..spins {
            engine.spin_to_completion(Utc::now());
        }
        print_summary(&engine);
    }

    Ok(())
}

fn run_ipc_loop(engine: &mut WheelEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let events: Vec<WheelEvent> = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => vec![],
            IpcCommand::AddItem { item } => engine.add_item(&item).into_iter().collect(),
            IpcCommand::RemoveItem { item } => engine.remove_item(&item).into_iter().collect(),
            IpcCommand::ClearItems => vec![engine.clear_items()],
            IpcCommand::Spin => engine.spin(),
            IpcCommand::Advance { ms } => engine.advance(Duration::from_millis(ms), Utc::now()),
            IpcCommand::SpinToCompletion => engine.spin_to_completion(Utc::now()),
            IpcCommand::ClearStatistics => vec![engine.clear_statistics()],
            IpcCommand::SetTheme { theme } => vec![engine.set_theme(&theme)],
        };

        let reply = IpcReply { events, state: build_ui_state(engine) };
        writeln!(stdout, "{}", serde_json::to_string(&reply)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn build_ui_state(engine: &WheelEngine) -> UiState {
    UiState {
        phase:    engine.phase().name(),
        busy:     engine.is_busy(),
        theme:    engine.theme.clone(),
        segments: engine.layout(),
        summary:  engine.summary(Utc::now()),
    }
}

fn print_summary(engine: &WheelEngine) {
    let summary = engine.summary(Utc::now());

    println!("=== WHEEL SUMMARY ===");
    println!("  items:          {}", summary.unique_items);
    println!("  total spins:    {}", summary.total_spins);
    println!("  average chance: {:.1}%", summary.average_chance);
    println!(
        "  most frequent:  {}",
        summary.most_frequent.as_deref().unwrap_or("-")
    );

    println!();
    println!("=== WINS ===");
    if summary.rows.is_empty() {
        println!("  (No spins yet)");
    } else {
        for row in &summary.rows {
            println!(
                "  {:<16} | wins: {:>5} | {:>5.1}% | week: {:>3} | month: {:>3} | year: {:>4}",
                row.item,
                row.wins,
                row.percentage,
                row.wins_this_week,
                row.wins_this_month,
                row.wins_this_year
            );
        }
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
