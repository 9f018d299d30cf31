//! List builtin palettes.

use crate::error::Result;
use crate::output::{plural, Printer};
use crate::types::Palette;

pub fn run(printer: &Printer) -> Result<()> {
    let names = Palette::builtin_names();
    for name in names {
        if let Some(palette) = Palette::builtin(name) {
            println!("{:<10} {}", name, printer.dim(&plural(palette.len(), "colour", "colours")));
        }
    }
    printer.info("Builtin", &plural(names.len(), "palette", "palettes"));
    Ok(())
}
