mod banner;
mod cli;
mod env;
mod eval;
mod lex;
mod models;
mod parse;
mod prompt;
mod script;
mod shell;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    shell::run(cli::Cli::parse())
}
