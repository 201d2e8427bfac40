// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::Result;
use clap::Parser;
use google_play_publish::cli::Args;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if let Some(option) = args.missing_options().first() {
        eprintln!("missing option: {option}");
        std::process::exit(1);
    }
    args.run().map_err(|error| {
        eprintln!("Unable to publish app to Play Store. Full error:");
        error
    })
}
