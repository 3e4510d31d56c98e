use std::error::Error;

use crate::cli;
use crate::plot;

pub fn cmd(args: cli::Arguments) -> Result<(), Box<dyn Error>> {
    match args.cmd {
        cli::SubCommand::Plot(options) => plot::plot(&options)?,
    }
    Ok(())
}
