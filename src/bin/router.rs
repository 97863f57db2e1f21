use colored::*;
use netroute::network::{EngineKind, RouteReport};
use netroute::{Network, TieBreakPolicy};
use std::env;
use std::fs::File;
use std::io;
use std::process;

const USAGE: &str = "usage: router [FILE] [--source DEVICE] [--tie-break POLICY] [--engine marking|heap]

Reads a network description from FILE (or stdin) and prints the minimum-cost
route from the source device to every other device. Without --source, routes
from every device are printed.

POLICY is one of name, address, listed, optionally suffixed with -desc.";

#[derive(Debug, Default)]
struct Options {
    file: Option<String>,
    source: Option<String>,
    tie_break: TieBreakPolicy,
    engine: EngineKind,
}

fn parse_args(args: &[String]) -> Result<Options, Box<dyn std::error::Error>> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", USAGE);
                process::exit(0);
            }
            "-s" | "--source" => {
                options.source = Some(iter.next().ok_or("--source needs a device name")?.clone());
            }
            "-t" | "--tie-break" => {
                options.tie_break = iter.next().ok_or("--tie-break needs a policy")?.parse()?;
            }
            "-e" | "--engine" => {
                options.engine = iter.next().ok_or("--engine needs a name")?.parse()?;
            }
            flag if flag.starts_with('-') => {
                return Err(format!("unknown option {}\n\n{}", flag, USAGE).into());
            }
            file => {
                if options.file.replace(file.to_string()).is_some() {
                    return Err("only one network file can be given".into());
                }
            }
        }
    }

    Ok(options)
}

fn print_report(report: &RouteReport) {
    println!(
        "{} {} (tie-break {})",
        "Routes from".bold(),
        report.source.bold().cyan(),
        report.tie_break
    );
    for route in &report.routes {
        if route.cost.is_some() {
            println!("  {}", route);
        } else {
            println!("  {}", route.to_string().yellow());
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = parse_args(&args)?;

    let network = match &options.file {
        Some(path) => Network::from_reader(File::open(path)?)?,
        None => Network::from_reader(io::stdin().lock())?,
    };

    match &options.source {
        Some(source) => {
            let report = network.routes_from_with(source, options.tie_break, options.engine)?;
            print_report(&report);
        }
        None if options.engine == EngineKind::Marking => {
            for report in network.routing_table(options.tie_break)? {
                print_report(&report);
            }
        }
        None => {
            for device in network.devices() {
                let report =
                    network.routes_from_with(&device.name, options.tie_break, options.engine)?;
                print_report(&report);
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("{} {}", "error:".red().bold(), err);
        process::exit(1);
    }
}
