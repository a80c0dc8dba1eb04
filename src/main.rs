use clap::{value_t, App, AppSettings, Arg, ArgMatches, SubCommand};
use log::info;
use rustprove::formula::dimacs;
use rustprove::fol::parse_problem;
use rustprove::*;
use std::fs::File;

fn main() {
    env_logger::init();

    let matches = App::new("rustprove")
        .about("CNF conversion, DPLL satisfiability and first-order resolution")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("cnf")
                .about("convert a propositional formula to CNF")
                .arg(Arg::with_name("FORMULA").help("formula, e.g. '(P -> Q) & ~R'").required(true).index(1)),
        )
        .subcommand(
            SubCommand::with_name("sat")
                .about("decide satisfiability with DPLL")
                .arg(Arg::with_name("INPUT").help("input file (in DIMACS CNF)").index(1))
                .arg(
                    Arg::with_name("formula")
                        .long("formula")
                        .short("f")
                        .takes_value(true)
                        .conflicts_with("INPUT")
                        .help("solve a propositional formula instead of a DIMACS file"),
                ),
        )
        .subcommand(
            SubCommand::with_name("prove")
                .about("refute first-order clauses with resolution")
                .arg(Arg::with_name("INPUT").help("input file, one clause per line").index(1))
                .arg(
                    Arg::with_name("max-iterations")
                        .long("max-iterations")
                        .short("n")
                        .takes_value(true)
                        .help("give up after this many saturation rounds [default: 1000]"),
                ),
        )
        .get_matches();

    let exit_code = match matches.subcommand() {
        ("cnf", Some(m)) => cnf(m),
        ("sat", Some(m)) => sat(m),
        ("prove", Some(m)) => prove(m),
        _ => unreachable!("clap requires a subcommand"),
    };

    match exit_code {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("parse error: {}", e);
            std::process::exit(-1);
        }
    }
}

fn cnf(matches: &ArgMatches) -> Result<i32> {
    let expr: Expr = matches.value_of("FORMULA").unwrap_or_default().parse()?;
    println!("{}", to_cnf(&expr));
    Ok(0)
}

fn sat(matches: &ArgMatches) -> Result<i32> {
    let formula = if let Some(text) = matches.value_of("formula") {
        to_cnf(&text.parse::<Expr>()?)
    } else if let Some(path) = matches.value_of("INPUT") {
        dimacs::parse_file(path)?
    } else {
        dimacs::parse(std::io::stdin())?
    };
    info!("{} clauses over {} variables", formula.len(), formula.variables().len());

    let mut solver = Solver::new(formula.clone());
    let result = solver.solve();
    let stats = solver.stats();
    info!(
        "{} decisions, {} propagations, {} backtracks",
        stats.decisions, stats.propagations, stats.backtracks
    );

    Ok(match result {
        SatResult::Satisfiable(model) => {
            debug_assert!(formula.is_satisfied_by(&model));
            println!("SAT");
            println!("{}", model);
            0
        }
        SatResult::Unsatisfiable => {
            println!("UNSAT");
            1
        }
    })
}

fn prove(matches: &ArgMatches) -> Result<i32> {
    let mut config = ProverConfig::default();
    if matches.is_present("max-iterations") {
        config.max_iterations = value_t!(matches, "max-iterations", usize).unwrap_or_else(|e| e.exit());
    }

    let clauses = if let Some(path) = matches.value_of("INPUT") {
        parse_problem(File::open(path)?)?
    } else {
        parse_problem(std::io::stdin())?
    };
    info!("{} input clauses, at most {} iterations", clauses.len(), config.max_iterations);

    let result = Prover::new(clauses, config).prove();
    print!("{}", result);
    Ok(if result.is_unsat() { 0 } else { 1 })
}
