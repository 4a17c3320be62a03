use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use treelox as lox;

use lox::ast_printer::AstPrinter;
use lox::error::LoxError;
use lox::lox::{Lox, RunError};
use lox::scanner::Scanner;

#[derive(ClapParser, Debug)]
#[command(version, about = "Tree-walking Lox interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to treelox.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Print the token list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parses a file and prints each statement's AST
    Parse { filename: PathBuf },

    /// Runs a file as a Lox program
    Run { filename: PathBuf },

    /// Starts an interactive prompt
    Repl,
}

/// Reads a whole file as UTF-8 text
fn read_file(filename: &PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);

    let file = File::open(filename).with_context(|| format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .with_context(|| format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    String::from_utf8(buf)
        .map_err(LoxError::from)
        .with_context(|| format!("Failed to decode {:?}", filename))
}

fn init_logger() -> Result<()> {
    let log_file = File::create("treelox.log").context("Failed to create treelox.log")?;

    Builder::new()
        .format(|buf, record| {
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("treelox::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .init();

    info!("Logger initialized, writing to treelox.log");
    Ok(())
}

fn report(error: &RunError) {
    for e in error.errors() {
        eprintln!("{}", e);
    }
}

fn tokenize(filename: &PathBuf, json: bool) -> Result<i32> {
    let source = read_file(filename)?;
    let (tokens, errors) = Scanner::new(&source).scan_tokens();

    for e in &errors {
        eprintln!("{}", e);
    }

    if json {
        let out = serde_json::to_string_pretty(&tokens).context("Failed to serialize tokens")?;
        println!("{}", out);
    } else {
        for token in &tokens {
            println!("{}", token);
        }
    }

    if errors.is_empty() {
        info!("Tokenization completed successfully");
        Ok(0)
    } else {
        debug!("Tokenization failed with {} errors", errors.len());
        Ok(65)
    }
}

fn parse(filename: &PathBuf) -> Result<i32> {
    let source = read_file(filename)?;

    match Lox::parse(&source) {
        Ok(statements) => {
            for stmt in &statements {
                println!("{}", AstPrinter::print_stmt(stmt));
            }
            Ok(0)
        }
        Err(e) => {
            report(&e);
            Ok(e.exit_code())
        }
    }
}

fn run(filename: &PathBuf) -> Result<i32> {
    let source = read_file(filename)?;
    debug!("Provided input:\n {}", source);

    match Lox::new().run(&source) {
        Ok(()) => {
            info!("Program executed successfully");
            Ok(0)
        }
        Err(e) => {
            report(&e);
            Ok(e.exit_code())
        }
    }
}

fn repl() -> Result<i32> {
    let mut session = Lox::new();
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush prompt")?;

        line.clear();
        if stdin.lock().read_line(&mut line).context("Failed to read input")? == 0 {
            // ctrl-d
            println!();
            return Ok(0);
        }

        // errors are reported but never end the session
        if let Err(e) = session.run(&line) {
            report(&e);
        }
    }
}

fn main() {
    let args: Cli = Cli::parse();

    if args.log {
        if let Err(e) = init_logger() {
            eprintln!("{:#}", e);
            process::exit(74);
        }
    } else {
        Builder::new().filter_level(log::LevelFilter::Off).init();
    }

    info!("CLI arguments: {:?}", args);

    let result = match &args.commands {
        Commands::Tokenize { filename, json } => tokenize(filename, *json),
        Commands::Parse { filename } => parse(filename),
        Commands::Run { filename } => run(filename),
        Commands::Repl => repl(),
    };

    match result {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{:#}", e);
            process::exit(74);
        }
    }
}
