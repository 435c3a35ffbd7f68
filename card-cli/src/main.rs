// Command-line interface for cardhtml
//
// This binary renders one side of a flashcard from the JSON output of the template-expansion
// step, and exposes the media reference resolution used to schedule playback.
//
// Usage:
//  cardhtml render <card.json> [--side front|back] [--output <file>]  - Composed markup for a side
//  cardhtml tags <card.json> --side <side> [--from <side>]            - Media references as JSON
//  cardhtml strip <card.json>                                         - Answer without front-side audio
//  cardhtml template                                                  - Print the default card shell
//
// Configuration is read from the embedded defaults, then ./cardhtml.toml when present, then
// the file given with --config. Log output goes to stderr, filtered by RUST_LOG or the
// `logging.filter` setting.

use card_config::{CardConfig, Loader};
use card_render::{CardData, CardHtml, CardTemplate, Side};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::fs;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const SIDES: &[&str] = &["front", "back", "question", "answer"];

fn side_arg(name: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_parser(clap::builder::PossibleValuesParser::new(SIDES))
        .ignore_case(true)
        .value_hint(ValueHint::Other)
}

fn card_arg() -> Arg {
    Arg::new("card")
        .help("Path to the card JSON file")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("cardhtml")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render flashcard sides and resolve their media references")
        .long_about(
            "cardhtml turns the template-expansion output of a card into the markup shown\n\
            for one side, and reports which [sound:...] references each side owns.\n\n\
            Card files are JSON objects with the fields:\n  \
            ord, question, answer, answer_format, question_text, question_tags, answer_tags\n\n\
            Examples:\n  \
            cardhtml render card.json                   # Front markup to stdout\n  \
            cardhtml render card.json --side back -o back.html\n  \
            cardhtml tags card.json --side back         # Back references as JSON\n  \
            cardhtml tags card.json --side front --from back",
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a cardhtml.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .about("Compose the markup for one side of a card")
                .arg(card_arg())
                .arg(side_arg("side").help("Side to render (defaults to front)"))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("tags")
                .about("Print the media references owned by a side")
                .long_about(
                    "Print the ordered media references owned by --side as a JSON array.\n\n\
                    --from selects the side being rendered (defaults to --side). References\n\
                    of the front requested while rendering the back need `question_tags`\n\
                    in the card file; without them the command fails.",
                )
                .arg(card_arg())
                .arg(side_arg("side").help("Side whose references to print").required(true))
                .arg(side_arg("from").help("Side being rendered (defaults to --side)"))
                .arg(
                    Arg::new("kinds")
                        .long("kinds")
                        .help("Include the media kind of every reference")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("strip")
                .about("Print the answer with audio inherited through {{FrontSide}} removed")
                .arg(card_arg()),
        )
        .subcommand(Command::new("template").about("Output the default card template shell"))
}

fn main() {
    let matches = build_cli().get_matches();

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    init_logging(&config);

    match matches.subcommand() {
        Some(("render", sub_matches)) => handle_render_command(sub_matches, &config),
        Some(("tags", sub_matches)) => handle_tags_command(sub_matches),
        Some(("strip", sub_matches)) => handle_strip_command(sub_matches),
        Some(("template", _)) => print!("{}", CardTemplate::default_source()),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the render command
fn handle_render_command(matches: &ArgMatches, config: &CardConfig) {
    let card = read_card(matches);
    let side = parse_side(matches, "side").unwrap_or(Side::Front);

    let context = config.render.to_context().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    info!(%side, ord = card.ord, "rendering card");
    let html = CardHtml::from_card(&card, side).template_html(&context);

    match matches.get_one::<String>("output") {
        Some(path) => {
            fs::write(path, html).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{html}"),
    }
}

/// Handle the tags command
fn handle_tags_command(matches: &ArgMatches) {
    let card = read_card(matches);
    let side = parse_side(matches, "side").unwrap_or(Side::Front);
    let from = parse_side(matches, "from").unwrap_or(side);

    debug!(%side, %from, "resolving media references");
    let mut html = CardHtml::from_card(&card, from);
    let refs = html.sound_tags(side).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let value = if matches.get_flag("kinds") {
        serde_json::Value::Array(
            refs.iter()
                .map(|r| serde_json::json!({ "filename": r.filename(), "kind": r.kind() }))
                .collect(),
        )
    } else {
        serde_json::json!(refs)
    };

    let output = serde_json::to_string_pretty(&value).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    println!("{output}");
}

/// Handle the strip command
fn handle_strip_command(matches: &ArgMatches) {
    let card = read_card(matches);
    print!("{}", card.answer_without_front_side());
}

fn read_card(matches: &ArgMatches) -> CardData {
    let path = matches
        .get_one::<String>("card")
        .expect("card is required");
    CardData::from_file(path).unwrap_or_else(|e| {
        eprintln!("Error reading card '{path}': {e}");
        std::process::exit(1);
    })
}

fn parse_side(matches: &ArgMatches, name: &str) -> Option<Side> {
    matches.get_one::<String>(name).map(|raw| {
        raw.parse().unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        })
    })
}

fn load_cli_config(explicit_path: Option<&str>) -> CardConfig {
    let loader = Loader::new().with_optional_file("cardhtml.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn init_logging(config: &CardConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
