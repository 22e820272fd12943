//! # photo-organize CLI
//!
//! Command-line interface for the photo organizer.
//!
//! ## Usage
//! ```bash
//! photo-organize organize --source ~/Camera --destination ~/Photos
//! photo-organize dedupe --report ~/Photos/duplicates.csv --yes
//! ```

mod cli;

use photo_organizer::Result;

fn main() -> Result<()> {
    photo_organizer::init_tracing();
    cli::run()
}
