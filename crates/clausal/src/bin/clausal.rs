//! Command line front end over JSON-encoded problems

use clausal::json::{ClauseSetJson, ModelJson, ProblemJson, ProofJson, ProveResultJson};
use clausal::prover::{clausify, refute};
use clausal::{ClauseSet, Formula, FreshNames, ProveError};
use serde::Serialize;
use std::collections::HashSet;
use tracing_subscriber::EnvFilter;

fn usage(program: &str) {
    eprintln!("Usage: {} <command> <problem.json> [options]", program);
    eprintln!("\nCommands:");
    eprintln!("  prove      Refute the axioms together with the negated claim");
    eprintln!("  solve      Davis-Putnam search for a model of the axioms and the negated claim");
    eprintln!("  clausify   Print the clause set of the axioms and the negated claim");
    eprintln!("\nOptions:");
    eprintln!("  --text     Print plain text instead of JSON");
    eprintln!("\nLog output is controlled by RUST_LOG (default: warn)");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        usage(&args[0]);
        std::process::exit(1);
    }

    let command = args[1].as_str();
    let filename = &args[2];
    let mut text = false;

    for arg in &args[3..] {
        match arg.as_str() {
            "--text" => text = true,
            _ => eprintln!("Unknown option: {}", arg),
        }
    }

    let result = match command {
        "prove" | "solve" | "clausify" => run(command, filename, text),
        _ => {
            eprintln!("Unknown command: {}", command);
            usage(&args[0]);
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: &str, filename: &str, text: bool) -> Result<(), ProveError> {
    let content = std::fs::read_to_string(filename)?;
    let problem: ProblemJson = serde_json::from_str(&content)?;

    let mut formulas = problem.axioms.clone();
    if let Some(claim) = &problem.claim {
        formulas.push(Formula::not(claim.clone()));
    }

    let mut fresh = FreshNames::new();
    let mut clauses = clausify(&formulas, &problem.config, &mut fresh)?;
    clauses.extend(problem.clauses.iter().cloned());

    match command {
        "prove" => prove(&clauses, &problem, &mut fresh, text),
        "solve" => solve(&clauses, text),
        _ => {
            if text {
                for clause in &clauses {
                    println!("{}", clause);
                }
                Ok(())
            } else {
                print_json(&ClauseSetJson::from(&clauses))
            }
        }
    }
}

fn prove(
    clauses: &ClauseSet,
    problem: &ProblemJson,
    fresh: &mut FreshNames,
    text: bool,
) -> Result<(), ProveError> {
    let outcome = match refute(clauses, &problem.config, fresh) {
        Ok(proof) => {
            if text {
                println!("{}", proof);
                return Ok(());
            }
            ProveResultJson::Proof {
                proof: ProofJson::from(&proof),
            }
        }
        Err(ProveError::SaturationDivergence { clauses }) => {
            if text {
                println!("No refutation found: saturated at {} clauses", clauses);
                return Ok(());
            }
            ProveResultJson::Saturated { clauses }
        }
        Err(e) => return Err(e),
    };
    print_json(&outcome)
}

fn solve(clauses: &ClauseSet, text: bool) -> Result<(), ProveError> {
    let solution = clausal::solve(clauses, &HashSet::new());
    if !text {
        return print_json(&ModelJson::from(&solution));
    }
    match solution.model() {
        Some(model) => {
            println!("Satisfiable");
            for clause in model {
                println!("{}", clause);
            }
        }
        None => println!("Unsatisfiable"),
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ProveError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
