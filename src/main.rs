use binsim::Circuit;
use binsim::core::config::{self, ConfigLog, ResolvedConfig};
use binsim::core::logic::{InputPolicy, RippleCarryResult, ripple_carry_adder_with};
use binsim::core::state::View;
use binsim::tui;

use clap::{Parser, Subcommand};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "binsim", about = "Interactive digital logic workbench")]
struct Args {
    /// Page to open on startup
    #[arg(short, long, value_enum)]
    view: Option<View>,

    /// Reject non-binary characters in adder operands instead of stripping them
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Add two binary numbers with the ripple-carry adder and print each stage
    Add {
        a: String,
        b: String,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the truth table of a circuit
    Table {
        #[arg(value_enum)]
        circuit: Circuit,
        /// Select/address bits for mux, demux, decoder and encoder
        #[arg(short, long)]
        bits: Option<usize>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Config decides where the log goes, so its messages wait for the logger.
    let mut config_log = ConfigLog::default();
    let loaded = config::load_config(&mut config_log);
    let (file_config, load_error) = match loaded {
        Ok(c) => (c, None),
        Err(e) => (config::BinsimConfig::default(), Some(e)),
    };
    let resolved = config::resolve(&file_config, args.view, args.strict, &mut config_log);

    init_logger(&resolved);
    config_log.flush();
    if let Some(e) = load_error {
        log::warn!("Falling back to default config: {}", e);
        eprintln!("binsim: {e} (using defaults)");
    }
    log::info!("BinSim starting up: {:?}", resolved);

    match args.command {
        None => match tui::run(resolved) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("Terminal error: {}", e);
                eprintln!("binsim: {e}");
                ExitCode::FAILURE
            }
        },
        Some(Command::Add { a, b, json }) => run_add(&a, &b, json, resolved.input_policy),
        Some(Command::Table { circuit, bits }) => match circuit.truth_table(bits) {
            Ok(table) => {
                print!("{}", table.render_plain());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("binsim: {e}");
                ExitCode::from(2)
            }
        },
    }
}

fn init_logger(config: &ResolvedConfig) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }
}

fn run_add(a: &str, b: &str, json: bool, policy: InputPolicy) -> ExitCode {
    let result = match ripple_carry_adder_with(a, b, policy) {
        Ok(result) => result,
        Err(e) => {
            log::warn!("add rejected: {}", e);
            eprintln!("binsim: {e}");
            return ExitCode::from(2);
        }
    };

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("binsim: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", format_steps(&result));
    }
    ExitCode::SUCCESS
}

/// Stage-by-stage listing, most significant stage first.
fn format_steps(result: &RippleCarryResult) -> String {
    let mut out = String::from("bit  cin  a  b  sum  cout\n");
    for step in result.steps.iter().rev() {
        out.push_str(&format!(
            "{:>3}  {:>3}  {}  {}  {:>3}  {:>4}\n",
            step.index, step.carry_in, step.a, step.b, step.sum, step.carry_out
        ));
    }
    out.push_str(&format!("result: {}", result.result_bits));
    if let Some(value) = result.value() {
        out.push_str(&format!(" ({value})"));
    }
    if result.overflow {
        out.push_str(" [carry out]");
    }
    out.push('\n');
    out
}
