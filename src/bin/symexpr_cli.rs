use std::env;
use std::error::Error;
use std::io::{self, BufRead, Write};

use log::{debug, error, trace, warn};
use symexpr::{evaluate, logging, EngineError, Mode, VarEnv};

fn print_usage(program_name: &str) {
    println!("Usage:");
    println!("  {} \"expression\"          Evaluate a single expression", program_name);
    println!("  {} --interactive | -i      Start interactive mode", program_name);
    println!("  {} --degrees | -d ...      Evaluate trig functions in degrees instead of radians", program_name);
    println!("  {} --help | -h             Show this help", program_name);
}

fn format_error(err: EngineError) -> String {
    match err {
        EngineError::Lex(err) => format!("SyntaxError: {}", err),
        EngineError::Parse(err) => format!("SyntaxError: {}", err),
        EngineError::Eval(err) => format!("RuntimeError: {}", err),
    }
}

fn list_variables(vars: &VarEnv) {
    let mut entries: Vec<(&String, &symexpr::Expression)> = vars.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    if entries.is_empty() {
        println!("No variables defined.");
        return;
    }

    let max_name_len = entries.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, value) in entries {
        println!("{:width$} = {}", name, value, width = max_name_len);
    }
}

fn interactive_mode(mode: Mode) -> Result<(), Box<dyn Error>> {
    println!("Interactive calculator mode ({:?})", mode);
    println!("Type \"exit\" or \"quit\" to leave");
    println!("Type \"vars\" to list assigned variables");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut vars = VarEnv::new();

    loop {
        print!(">>> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        match input.to_lowercase().as_str() {
            "exit" | "quit" => break,
            "vars" => {
                list_variables(&vars);
                continue;
            }
            "" => continue,
            _ => {}
        }

        if let Some((name, expression)) = split_assignment(input) {
            trace!("evaluating assignment: {} = {}", name, expression);
            match evaluate(expression, mode, &vars) {
                Ok(result) => {
                    debug!("{} bound to {}", name, result);
                    vars.insert(name.to_string(), result.clone());
                    println!("{} = {}", name, result);
                }
                Err(err) => {
                    warn!("assignment '{}' failed: {}", input, err);
                    eprintln!("{}", format_error(err));
                }
            }
            continue;
        }

        trace!("evaluating: {}", input);
        match evaluate(input, mode, &vars) {
            Ok(result) => {
                debug!("{} => {}", input, result);
                println!("{}", result);
            }
            Err(err) => {
                warn!("evaluation of '{}' failed: {}", input, err);
                eprintln!("{}", format_error(err));
            }
        }
    }

    Ok(())
}

/// Recognizes a bare `name = expression` line. Deliberately simple: only a
/// single `=` with an identifier on the left is treated as an assignment;
/// everything else (including `==`-free comparisons, which this engine has
/// no concept of) falls through to plain evaluation.
fn split_assignment(input: &str) -> Option<(&str, &str)> {
    let (name, expression) = input.split_once('=')?;
    let name = name.trim();
    let expression = expression.trim();
    let is_identifier = !name.is_empty()
        && name.chars().next().map_or(false, |c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if is_identifier && !expression.is_empty() {
        Some((name, expression))
    } else {
        None
    }
}

fn main() {
    logging::setup_logger();

    let args: Vec<String> = env::args().collect();
    let program_name = args.first().cloned().unwrap_or_else(|| "symexpr-cli".to_string());

    let mode = if args.iter().any(|a| a == "--degrees" || a == "-d") { Mode::Degrees } else { Mode::Radians };
    let positional: Vec<&String> = args.iter().skip(1).filter(|a| *a != "--degrees" && *a != "-d").collect();

    let result = match positional.first().map(|s| s.as_str()) {
        None | Some("--help") | Some("-h") => {
            print_usage(&program_name);
            Ok(())
        }
        Some("--interactive") | Some("-i") => interactive_mode(mode),
        Some(expression) => {
            debug!("evaluating argv expression: {}", expression);
            match evaluate(expression, mode, &VarEnv::new()) {
                Ok(result) => println!("{}", result),
                Err(err) => {
                    warn!("evaluation of '{}' failed: {}", expression, err);
                    eprintln!("{}", format_error(err));
                }
            }
            Ok(())
        }
    };

    if let Err(err) = result {
        error!("fatal: {}", err);
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
