mod platform;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = platform::Args::parse();
    platform::run_app(args)
}
