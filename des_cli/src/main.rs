use clap::Parser;
use des_cipher::crypto::cipher_context::CipherContext;
use des_cipher::crypto::cipher_types::{CipherInput, CipherOutput, Direction, Key};
use des_cipher::crypto::keys::{generate_keys, keys_to_string, parse_keys};
use des_cipher::CipherError;
use std::io::{self, BufRead, Write};
use thiserror::Error;

const STDIO: &str = "-";

/// Encrypts or decrypts a stream with DES or Triple-DES.
#[derive(Parser, Debug)]
#[command(name = "des", version, about)]
struct Args {
    /// Encrypt input (default)
    #[arg(long, conflicts_with = "decrypt")]
    encrypt: bool,

    /// Decrypt input
    #[arg(long)]
    decrypt: bool,

    /// Output a new key and exit
    #[arg(long)]
    newkey: bool,

    /// Encrypt/decrypt using Triple DES
    #[arg(long = "3des")]
    triple_des: bool,

    /// Input file, "-" for standard input
    #[arg(short = 'i', default_value = STDIO)]
    input: String,

    /// Output file, "-" for standard output
    #[arg(short = 'o', default_value = STDIO)]
    output: String,

    /// Cipher key: up to 16 hex digits, or three such keys separated by ':'
    #[arg(short = 'k')]
    key: Option<String>,
}

impl Args {
    fn direction(&self) -> Direction {
        if self.decrypt {
            Direction::Decrypt
        } else {
            Direction::Encrypt
        }
    }

    fn key_count(&self) -> usize {
        if self.triple_des {
            3
        } else {
            1
        }
    }
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error("Failed to read key: {0}")]
    Prompt(io::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

fn prompt_for_key() -> Result<Option<String>, CliError> {
    eprint!("Enter key: ");
    io::stderr().flush().map_err(CliError::Prompt)?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(CliError::Prompt)?;

    let key = line.trim().to_string();
    Ok((!key.is_empty()).then_some(key))
}

/// Returns the keys to use and whether they were freshly generated.
fn resolve_keys(args: &Args) -> Result<(Vec<Key>, bool), CliError> {
    let direction = args.direction();
    let key_text = match &args.key {
        Some(text) if !text.is_empty() => Some(text.clone()),
        // stdin carries the ciphertext, so only file input can be prompted for
        _ if direction == Direction::Decrypt && args.input != STDIO => prompt_for_key()?,
        _ => None,
    };

    match key_text {
        Some(text) => Ok((parse_keys(&text)?, false)),
        None if direction == Direction::Decrypt => Err(CipherError::MissingKey.into()),
        None => Ok((generate_keys(args.key_count()), true)),
    }
}

/// `out` receives `--newkey` output, `report` the generated-key notice.
async fn run(args: Args, out: &mut dyn Write, report: &mut dyn Write) -> Result<(), CliError> {
    if args.newkey {
        writeln!(out, "{}", keys_to_string(&generate_keys(args.key_count())))?;
        return Ok(());
    }

    let direction = args.direction();
    let (keys, generated) = resolve_keys(&args)?;
    let ctx = CipherContext::from_keys(&keys, args.triple_des)?;
    if generated {
        writeln!(report, "Using key: {}", keys_to_string(&keys))?;
    }
    log::info!(
        "{:?} {} -> {} with {} key(s)",
        direction,
        args.input,
        args.output,
        keys.len()
    );

    let input = if args.input == STDIO {
        CipherInput::Stdin
    } else {
        CipherInput::File(args.input.clone())
    };
    let mut output = if args.output == STDIO {
        CipherOutput::Stdout
    } else {
        CipherOutput::File(args.output.clone())
    };

    match direction {
        Direction::Encrypt => ctx.encrypt(input, &mut output).await?,
        Direction::Decrypt => ctx.decrypt(input, &mut output).await?,
    }
    log::debug!("Done");
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    let result = run(args, &mut io::stdout(), &mut io::stderr()).await;
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
