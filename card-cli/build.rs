use clap::{Arg, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
const SIDES: &[&str] = &["front", "back", "question", "answer"];

fn card_arg() -> Arg {
    Arg::new("card")
        .help("Path to the card JSON file")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn side_arg(name: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_parser(clap::builder::PossibleValuesParser::new(SIDES))
        .ignore_case(true)
        .value_hint(ValueHint::Other)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("cardhtml")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render flashcard sides and resolve their media references")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .arg(card_arg())
                .arg(side_arg("side"))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("tags")
                .arg(card_arg())
                .arg(side_arg("side").required(true))
                .arg(side_arg("from"))
                .arg(
                    Arg::new("kinds")
                        .long("kinds")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("strip").arg(card_arg()))
        .subcommand(Command::new("template"));

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "cardhtml", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "cardhtml", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "cardhtml", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
