use anyhow::Result;

use exif_rename::{app, cli};

fn main() -> Result<()> {
    let args = cli::parse();
    app::run(args)
}
