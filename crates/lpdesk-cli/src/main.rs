use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use lpdesk_session::{ConstraintInput, Direction, LoadError, Session, Solution, Status};
use lpdesk_solver::{Engine, Solver};

#[derive(Parser)]
#[command(name = "lpdesk")]
#[command(about = "Build and solve small linear programs with shadow prices", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Solving engine
    #[arg(long, global = true, value_enum, default_value_t = EngineArg::Simplex)]
    engine: EngineArg,

    /// Pivot tolerance for the simplex
    #[arg(long, global = true, default_value_t = 1e-9)]
    tolerance: f64,

    /// Maximum simplex iterations per phase
    #[arg(long, global = true, default_value_t = 10000)]
    max_iterations: usize,

    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress log output entirely
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a fresh session with default rows as JSON
    Init {
        /// Number of decision variables (2-4)
        #[arg(long, default_value_t = 2)]
        vars: usize,
        /// Number of constraints (1-10)
        #[arg(long, default_value_t = 1)]
        constraints: usize,
        /// Objective direction
        #[arg(long, default_value = "max")]
        direction: String,
    },
    /// Solve a session (.json) or model file and print the result
    Solve {
        /// The session or model file
        file: PathBuf,
        /// Replacement constraint, e.g. "x1 + x2 <= 10"; when given, all
        /// constraints are replaced and the model is solved again
        #[arg(short, long = "modify")]
        modify: Vec<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
        /// Write the session with its last solution to this path
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Check a session or model file for errors
    Check {
        /// The file to check
        file: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EngineArg {
    /// Tableau simplex, vertex optima
    Simplex,
    /// Clarabel interior point
    Interior,
}

impl From<EngineArg> for Engine {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Simplex => Engine::Simplex,
            EngineArg::Interior => Engine::Interior,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

fn init_logging(cli: &Cli) {
    if cli.quiet || cli.verbose == 0 {
        return;
    }
    let level = if cli.verbose >= 2 { Level::TRACE } else { Level::DEBUG };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        fail(format!("Failed to set tracing subscriber: {}", e));
    }
}

fn load(file: &Path) -> Session {
    let source = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => fail(format!("Error reading file: {}", e)),
    };

    let is_json = file.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let session: Session = match serde_json::from_str(&source) {
            Ok(s) => s,
            Err(e) => fail(format!("Invalid session JSON: {}", e)),
        };
        if let Err(e) = session.validate() {
            fail(format!("Invalid session: {}", e));
        }
        session
    } else {
        match lpdesk_session::load_session(&source) {
            Ok(s) => s,
            Err(LoadError::Parse(e)) => fail(format!("Parse error: {}", e)),
            Err(e) => fail(format!("Model error: {}", e)),
        }
    }
}

fn parse_rows(rows: &[String], variable_count: usize) -> Vec<ConstraintInput> {
    rows.iter()
        .map(|row| {
            let line = match lpdesk_session::Parser::parse_row(row) {
                Ok(l) => l,
                Err(e) => fail(format!("Parse error in '{}': {}", row, e)),
            };
            match line.to_input(variable_count) {
                Ok(input) => input,
                Err(term) => fail(format!(
                    "'{}' uses x{} but the session has {} variables",
                    row, term.variable, variable_count
                )),
            }
        })
        .collect()
}

fn print_solution(title: &str, solution: &Solution, format: Format) {
    match format {
        Format::Pretty => {
            println!("{}", title);
            print!("{}", solution);
            println!();
        }
        Format::Json => match serde_json::to_string_pretty(solution) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(format!("Error encoding solution: {}", e)),
        },
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let solver = Solver::new()
        .with_engine(cli.engine.into())
        .with_tolerance(cli.tolerance)
        .with_max_iterations(cli.max_iterations);

    match cli.command {
        Commands::Init {
            vars,
            constraints,
            direction,
        } => {
            let direction: Direction = match direction.parse() {
                Ok(d) => d,
                Err(e) => fail(e),
            };
            let mut session = match Session::new(vars, direction) {
                Ok(s) => s,
                Err(e) => fail(e),
            };
            if let Err(e) = session.set_constraint_count(constraints) {
                fail(e);
            }
            match serde_json::to_string_pretty(&session) {
                Ok(json) => println!("{}", json),
                Err(e) => fail(format!("Error encoding session: {}", e)),
            }
        }
        Commands::Solve {
            file,
            modify,
            format,
            save,
        } => {
            let mut session = load(&file);

            let mut status = match session.solve(&solver) {
                Ok(solution) => {
                    print_solution("Result", solution, format);
                    solution.status
                }
                Err(e) => fail(e),
            };

            if !modify.is_empty() {
                let rows = parse_rows(&modify, session.variable_count());
                status = match session.rebuild_and_resolve(rows, &solver) {
                    Ok(solution) => {
                        print_solution("Result with new constraints", solution, format);
                        solution.status
                    }
                    Err(e) => fail(e),
                };
            }

            if let Some(path) = save {
                let json = match serde_json::to_string_pretty(&session) {
                    Ok(j) => j,
                    Err(e) => fail(format!("Error encoding session: {}", e)),
                };
                if let Err(e) = std::fs::write(&path, json) {
                    fail(format!("Error writing {}: {}", path.display(), e));
                }
            }

            if status != Status::Optimal {
                std::process::exit(1);
            }
        }
        Commands::Check { file } => {
            let session = load(&file);
            println!("✓ {} is valid", file.display());
            println!("  {} variables", session.variable_count());
            println!("  objective: {}", session.direction());
            println!("  {} constraints", session.constraints().len());
        }
    }
}
