use anyhow::{Error, Result};
use chrono::DateTime;
use clap::{Parser, Subcommand};
use log::info;
use rdfgraph::{Datatype, Duration, GraphConfig, GregorianDate, Literal, NamespaceTable};
use serde_json::json;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "rdfgraph")]
#[command(about = "Inspect RDF literals, dates, durations and datatypes")]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Verbose mode - sets the RUST_LOG level to info, defaults to warning level
    #[clap(long, short, action, default_value = "false", global = true)]
    verbose: bool,
    /// Debug mode - sets the RUST_LOG level to debug, defaults to warning level
    #[clap(long, action, default_value = "false", global = true)]
    debug: bool,
    /// Print results as JSON instead of plain text
    #[clap(long, action, default_value = "false", global = true)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse a lexical form against a datatype and print its typed views
    Literal {
        /// The lexical form
        text: String,
        /// Datatype IRI, `xsd:` name or bare XML Schema local name
        #[clap(long, short = 't')]
        datatype: Option<String>,
        /// Language tag; implies xsd:string
        #[clap(long, short)]
        lang: Option<String>,
    },
    /// Parse a literal written in SPARQL notation, e.g. '"3"^^xsd:int'
    Parse {
        /// The SPARQL literal
        sparql: String,
    },
    /// Inspect an XML Schema date, time or recurring value
    Date {
        /// The lexical form, e.g. 2002-10-10Z or ---25
        text: String,
        /// Reference instant (RFC 3339) used to find the previous and next occurrence
        #[clap(long)]
        at: Option<String>,
    },
    /// Inspect an XML Schema duration
    Duration {
        /// The lexical form, e.g. P1Y2MT3H
        text: String,
        /// Instant (RFC 3339) to add the duration to
        #[clap(long)]
        from: Option<String>,
    },
    /// Print the derivation chain of a datatype
    Datatype {
        /// Datatype IRI, `xsd:` name or bare XML Schema local name
        name: String,
    },
    /// Print the graph configuration, either the defaults or one loaded from a file
    Config {
        /// JSON configuration file to load
        #[clap(long, short)]
        file: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    rdfgraph::init_logging();
    let cmd = Cli::parse();
    execute(cmd)
}

pub fn run_from_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    rdfgraph::init_logging();
    let cmd = Cli::try_parse_from(args).map_err(Error::from)?;
    execute(cmd)
}

fn execute(cmd: Cli) -> Result<()> {
    // CLI flags take precedence over RDFGRAPH_LOG / RUST_LOG
    if cmd.debug {
        std::env::set_var("RUST_LOG", "debug");
    } else if cmd.verbose {
        std::env::set_var("RUST_LOG", "info");
    } else if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "warn");
    }
    let _ = env_logger::try_init();

    match cmd.command {
        Commands::Literal {
            text,
            datatype,
            lang,
        } => {
            let literal = match (lang, datatype) {
                (Some(_), Some(_)) => {
                    return Err(anyhow::anyhow!(
                        "--lang and --datatype cannot be combined"
                    ))
                }
                (Some(lang), None) => Literal::with_language(&text, &lang)?,
                (None, Some(name)) => Literal::new(&text, Some(resolve_datatype(&name)?))?,
                (None, None) => Literal::new(&text, None)?,
            };
            print_literal(&literal, cmd.json)?;
        }
        Commands::Parse { sparql } => {
            let namespaces = NamespaceTable::with_defaults();
            let literal = Literal::from_sparql(&sparql, Some(&namespaces))?;
            print_literal(&literal, cmd.json)?;
        }
        Commands::Date { text, at } => {
            let date = GregorianDate::parse(&text)?;
            let at = at
                .map(|s| DateTime::parse_from_rfc3339(&s))
                .transpose()
                .map_err(|e| anyhow::anyhow!("Invalid --at instant: {}", e))?;
            print_date(&date, at, cmd.json)?;
        }
        Commands::Duration { text, from } => {
            let duration = Duration::parse(&text)?;
            let from = from
                .map(|s| DateTime::parse_from_rfc3339(&s))
                .transpose()
                .map_err(|e| anyhow::anyhow!("Invalid --from instant: {}", e))?;
            let moved = match from {
                Some(instant) => Some(duration.add_to(instant).ok_or_else(|| {
                    anyhow::anyhow!("{} moves {} out of range", duration, instant)
                })?),
                None => None,
            };
            if cmd.json {
                let value = json!({
                    "duration": duration.to_string(),
                    "positive": duration.is_positive(),
                    "years": duration.year_count(),
                    "months": duration.month_count(),
                    "days": duration.day_count(),
                    "hours": duration.hour_count(),
                    "minutes": duration.minute_count(),
                    "seconds": duration.second_count().to_string(),
                    "result": moved.map(|m| m.to_rfc3339()),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("duration: {}", duration);
                println!("negated: {}", duration.negated());
                if let Some(moved) = moved {
                    println!("result: {}", moved.to_rfc3339());
                }
            }
        }
        Commands::Datatype { name } => {
            let datatype = resolve_datatype(&name)?;
            let mut chain = vec![datatype.clone()];
            chain.extend(datatype.ancestors());
            if cmd.json {
                let value = json!({
                    "datatype": datatype.iri(),
                    "list": datatype.is_list_datatype(),
                    "chain": chain.iter().map(|dt| dt.iri().to_string()).collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                let names: Vec<String> = chain.iter().map(display_datatype).collect();
                println!("{}", names.join(" -> "));
                if datatype.is_list_datatype() {
                    println!("(list datatype)");
                }
            }
        }
        Commands::Config { file } => {
            let config = match file {
                Some(path) => {
                    info!("Loading configuration from {}", path.display());
                    GraphConfig::from_file(&path)?
                }
                None => GraphConfig::default(),
            };
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                config.print();
            }
        }
    }

    Ok(())
}

fn resolve_datatype(name: &str) -> Result<Datatype> {
    if let Some(builtin) = Datatype::from_local_name(name) {
        return Ok(builtin);
    }
    Ok(Datatype::parse(name)?)
}

fn display_datatype(datatype: &Datatype) -> String {
    datatype
        .short_name()
        .unwrap_or_else(|| format!("<{}>", datatype.iri()))
}

fn print_literal(literal: &Literal, as_json: bool) -> Result<()> {
    let datatype = literal.datatype().map(display_datatype);
    if as_json {
        let value = json!({
            "value": literal.string_value(),
            "datatype": literal.datatype().map(|dt| dt.iri().to_string()),
            "language": literal.language(),
            "sparql": literal.sparql(),
            "integer": literal.integer(),
            "decimal": literal.decimal().map(|d| d.to_string()),
            "double": literal.double(),
            "boolean": literal.boolean(),
            "duration": literal.duration().map(|d| d.to_string()),
            "date": literal.gregorian_date().map(|d| d.to_string()),
            "bytes": literal.bytes().map(|b| b.len()),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }
    println!("value: {}", literal.string_value());
    if let Some(datatype) = datatype {
        println!("datatype: {}", datatype);
    }
    if let Some(language) = literal.language() {
        println!("language: {}", language);
    }
    println!("sparql: {}", literal.sparql());
    if let Some(i) = literal.integer() {
        println!("integer: {}", i);
    }
    if let Some(d) = literal.decimal() {
        println!("decimal: {}", d);
    }
    if let Some(d) = literal.double() {
        println!("double: {}", d);
    }
    if let Some(b) = literal.boolean() {
        println!("boolean: {}", b);
    }
    if let Some(bytes) = literal.bytes() {
        println!("bytes: {}", bytes.len());
    }
    if let Some(duration) = literal.duration() {
        println!("duration: {}", duration);
    }
    if let Some(date) = literal.gregorian_date() {
        println!("date: {}", date);
    }
    Ok(())
}

fn print_date(
    date: &GregorianDate,
    at: Option<DateTime<chrono::FixedOffset>>,
    as_json: bool,
) -> Result<()> {
    let previous = at.and_then(|instant| date.previous_start_time_before(instant));
    let next = at.and_then(|instant| date.next_start_time_after(instant));
    let matches = at.map(|instant| date.is_recurring_at(instant));
    if as_json {
        let value = json!({
            "value": date.to_string(),
            "datatype": date.datatype().iri(),
            "recurring": date.is_recurring(),
            "grain": date.grain().to_string(),
            "period": date.period().map(|p| p.to_string()),
            "dateTime": date.date_time(),
            "date": date.date(),
            "gYearMonth": date.g_year_month(),
            "gYear": date.g_year(),
            "time": date.time(),
            "gMonthDay": date.g_month_day(),
            "gMonth": date.g_month(),
            "gDay": date.g_day(),
            "start": date.start_instant().map(|i| i.to_rfc3339()),
            "end": date.end_instant().map(|i| i.to_rfc3339()),
            "previous": previous.map(|i| i.to_rfc3339()),
            "next": next.map(|i| i.to_rfc3339()),
            "matches": matches,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }
    println!("value: {}", date);
    println!("datatype: {}", display_datatype(&date.datatype()));
    println!("grain: {}", date.grain());
    if let Some(period) = date.period() {
        println!("period: {}", period);
    }
    let projections = [
        ("dateTime", date.date_time()),
        ("date", date.date()),
        ("gYearMonth", date.g_year_month()),
        ("gYear", date.g_year()),
        ("time", date.time()),
        ("gMonthDay", date.g_month_day()),
        ("gMonth", date.g_month()),
        ("gDay", date.g_day()),
    ];
    for (name, projection) in projections {
        if let Some(projection) = projection {
            println!("{}: {}", name, projection);
        }
    }
    if let (Some(start), Some(end)) = (date.start_instant(), date.end_instant()) {
        println!("interval: {} .. {}", start.to_rfc3339(), end.to_rfc3339());
    }
    if let Some(previous) = previous {
        println!("previous: {}", previous.to_rfc3339());
    }
    if let Some(next) = next {
        println!("next: {}", next.to_rfc3339());
    }
    if let Some(matches) = matches {
        println!("matches: {}", matches);
    }
    Ok(())
}
