use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use dispensary::{catalog::Catalog, render};

use crate::cli::{AddArg, fill_cart};

#[derive(Debug, Args)]
pub(crate) struct CartArgs {
    /// Product to add, as ID or ID:QTY (repeatable)
    #[arg(short, long = "add", value_name = "ID[:QTY]", required = true)]
    adds: Vec<AddArg>,
}

pub(crate) fn run(catalog: &Catalog, args: &CartArgs) -> Result<()> {
    let (store, notes) = fill_cart(catalog, &args.adds)?;
    let mut out = io::stdout().lock();

    for note in &notes {
        writeln!(out, " ! {note}")?;
    }

    render::write_cart(&mut out, store.cart())?;

    Ok(())
}
