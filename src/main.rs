use std::{path::Path, process, sync::Once};

use clap::Parser;
use tessel::{execute, interpreter::evaluator::core::Context, parse_file, parse_source};

/// tessel is a small, dynamically typed scripting language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells tessel to treat the contents as a path to a script file.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode automatically prints out the last value produced by a
    /// top-level statement.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Runs without the native prelude (`print`, `len`, `push`, ...).
    #[arg(long)]
    bare: bool,

    contents: String,
}

static TRACING_INIT: Once = Once::new();

/// Installs a tracing subscriber, but only when `RUST_LOG` is set.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
                    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

                    if std::env::var("RUST_LOG").is_ok() {
                        tracing_subscriber::registry().with(fmt::layer().with_target(true).with_level(true))
                                                      .with(EnvFilter::from_default_env())
                                                      .init();
                    }
                });
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let program = if args.file {
        parse_file(Path::new(&args.contents))
    } else {
        parse_source(&args.contents)
    };

    let mut context = if args.bare { Context::bare() } else { Context::new() };

    let result = program.map_err(tessel::Error::from)
                        .and_then(|program| execute(&mut context, &program, args.pipe_mode));

    if let Err(e) = result {
        eprintln!("{e}");
        process::exit(1);
    }
}
