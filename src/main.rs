#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

mod listing;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use newton::{assemble, decode_instruction, Word};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
  /// Log rejected words and literals.
  #[arg(short, long, global = true)]
  verbose: bool,
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Assemble a literal file into big-endian instruction words.
  Assemble {
    #[arg(short, long)]
    input: PathBuf,
    #[arg(short, long, default_value = "out.bin")]
    output: PathBuf,
  },
  /// Print a listing of a file of big-endian instruction words.
  Disassemble {
    #[arg(short, long)]
    input: PathBuf,
  },
  /// Decode words given in hex (`1E0A`, `0x1E0A`) or binary (`0b0001111000001010`).
  Decode {
    #[arg(required = true)]
    words: Vec<String>,
  },
}

fn words_to_bytes(words: &[Word]) -> Vec<u8> {
  words.iter().flat_map(|word| word.to_be_bytes()).collect()
}

fn words_from_bytes(bytes: &[u8]) -> Result<Vec<Word>> {
  if bytes.len() % 2 != 0 {
    bail!("{} bytes is not a whole number of two byte words", bytes.len());
  }
  Ok(
    bytes
      .chunks_exact(2)
      .map(|pair| Word::from_be_bytes([pair[0], pair[1]]))
      .collect()
  )
}

fn parse_word(text: &str) -> Result<Word> {
  let word =
    if let Some(bits) = text.strip_prefix("0b") {
      Word::from_str_radix(&bits.replace('_', ""), 2)
    } else {
      let digits = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")).unwrap_or(text);
      Word::from_str_radix(digits, 16)
    };
  word.with_context(|| format!("`{}` is not a 16 bit word", text))
}

fn run_assemble(input: &Path, output: &Path) -> Result<()> {
  let source = fs::read_to_string(input)
    .with_context(|| format!("failed to read `{}`", input.display()))?;
  let words = assemble(&source)?;
  info!("assembled {} instructions from `{}`", words.len(), input.display());

  let bytes = words_to_bytes(&words);
  fs::write(output, &bytes)
    .with_context(|| format!("failed to write `{}`", output.display()))?;
  println!("{} instructions, {} bytes written to `{}`", words.len(), bytes.len(), output.display());
  Ok(())
}

fn run_disassemble(input: &Path) -> Result<()> {
  let bytes = fs::read(input)
    .with_context(|| format!("failed to read `{}`", input.display()))?;
  let words = words_from_bytes(&bytes)?;

  let listing = listing::make_listing(&words);
  print!("{}", listing.table);
  if listing.invalid > 0 {
    bail!("{} of {} words are not valid instructions", listing.invalid, words.len());
  }
  Ok(())
}

fn run_decode(words: &[String]) -> Result<()> {
  for text in words {
    let word = parse_word(text)?;
    let instruction = decode_instruction(word)?;
    println!("{:#06X}  {:<12} {:?}", word, instruction.to_string(), instruction);
  }
  Ok(())
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let mut logger = env_logger::Builder::from_default_env();
  if cli.verbose {
    logger.filter_level(log::LevelFilter::Debug);
  }
  logger.init();

  match &cli.command {
    Commands::Assemble { input, output } => run_assemble(input, output),
    Commands::Disassemble { input }      => run_disassemble(input),
    Commands::Decode { words }           => run_decode(words),
  }
}
