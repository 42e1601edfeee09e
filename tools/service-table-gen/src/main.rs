use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use service_table_gen::{parse_table, render_service_ids, render_wrap_list};

/// Generate secure service artifacts from `secure_service.tbl`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the secure service table.
    #[arg(value_name = "TBL")]
    table: PathBuf,
    /// Write the `ServiceId` module here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,
    /// Print the REE `-Wl,--wrap=` linker arguments instead of the module.
    #[arg(long, conflicts_with = "out")]
    wrap: bool,
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let input = fs::read_to_string(&cli.table)?;
    let services = parse_table(&input)?;

    if cli.wrap {
        print!("{}", render_wrap_list(&services));
        return Ok(());
    }

    let module = render_service_ids(&services)?;
    match &cli.out {
        Some(path) => {
            fs::write(path, module)?;
            eprintln!(
                "wrote {} secure services to {}",
                services.len(),
                path.display()
            );
        }
        None => print!("{module}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}
