use std::env::args_os;
use std::process::ExitCode;

use raster_gfx::{filter_ppm, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match filter_ppm(&arguments) {
        Ok(_) => {
            println!("Filter applied successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Filtering failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
