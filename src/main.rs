//! Terminal front end for the competition simulator.
//!
//! Collects runners and a competition definition from delimited input lines,
//! re-prompting on per-field errors, then conducts the competition and prints
//! the final leaderboard.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use serde_json::{json, Value};
use track_meet::{Competition, CountrySet, Error, Runner};

#[derive(Parser)]
#[command(name = "track-meet", about = "Sprint and marathon competition simulator")]
struct Args {
    /// Country reference CSV used to validate runner nationalities.
    #[arg(long, default_value = "countries.csv")]
    countries: PathBuf,
    /// Print the final leaderboard as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn parse_runner(fields: &[&str], countries: &CountrySet) -> track_meet::Result<Runner> {
    let age: u32 = fields[1]
        .trim()
        .parse()
        .map_err(|_| Error::InvalidType("age should be an integer".into()))?;
    let sprint: f64 = fields[3]
        .trim()
        .parse()
        .map_err(|_| Error::InvalidType("sprint speed should be a number".into()))?;
    let endurance: f64 = fields[4]
        .trim()
        .parse()
        .map_err(|_| Error::InvalidType("marathon speed should be a number".into()))?;
    Runner::new(
        fields[0].trim(),
        age,
        fields[2].trim(),
        sprint,
        endurance,
        countries,
    )
}

fn parse_distances(field: &str) -> track_meet::Result<Vec<f64>> {
    field
        .split(',')
        .map(|d| {
            d.trim()
                .parse::<f64>()
                .map_err(|_| Error::InvalidType("distances should be numbers".into()))
        })
        .collect()
}

fn parse_competition(fields: &[&str], runners: &[Runner]) -> track_meet::Result<Competition> {
    let rounds: u32 = fields[0]
        .trim()
        .parse()
        .map_err(|_| Error::InvalidType("rounds should be an integer".into()))?;
    let short = parse_distances(fields[1])?;
    let marathon = parse_distances(fields[2])?;
    Competition::new(runners.to_vec(), rounds, short, marathon)
}

fn prompt(text: &str) -> io::Result<()> {
    print!("{text}");
    io::stdout().flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let countries = CountrySet::load(&args.countries)?;
    log::info!(
        "loaded {} countries from {}",
        countries.len(),
        args.countries.display()
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    // Build the roster, one runner per line, until a blank line.
    let mut runners = Vec::new();
    loop {
        prompt("Add runner - name/age/country/sprint speed/marathon speed (blank line stops): ")?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        let fields: Vec<&str> = line.split('/').collect();
        if fields.len() != 5 {
            eprintln!("ERROR: expected 5 fields");
            continue;
        }
        match parse_runner(&fields, &countries) {
            Ok(runner) => {
                log::info!("added {runner}");
                runners.push(runner);
            }
            Err(err) => eprintln!("ERROR: {err}"),
        }
    }
    println!("Done creating runners!\n");

    let mut competition = loop {
        prompt("Create competition - rounds/sprint distances/marathon distances: ")?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;
        let fields: Vec<&str> = line.trim().split('/').collect();
        if fields.len() != 3 {
            eprintln!("ERROR: expected 3 fields");
            continue;
        }
        match parse_competition(&fields, &runners) {
            Ok(competition) => break competition,
            Err(err) => {
                eprintln!("ERROR: {err}");
                eprintln!("Reminding you that the number of distances should equal the number of rounds");
            }
        }
    };
    println!("Done creating competition!\n");

    println!("Executing the competition!");
    competition.conduct_competition()?;
    println!("Competition concluded!\n");

    if args.json {
        let board: serde_json::Map<String, Value> = competition
            .leaderboard()
            .iter()
            .map(|(rank, slot)| {
                let value = match slot {
                    Some((name, score)) => json!([name, score]),
                    None => Value::Null,
                };
                (rank, value)
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&Value::Object(board))?);
    } else {
        println!("{}", competition.leaderboard());
    }
    Ok(())
}
