//! `portrait` command: show where a survivor's portrait is expected.

use clap::Args;

use crate::cli::common::{CliResult, Session};
use crate::constants::NO_IMAGE_LABEL;
use crate::models::card::portrait_path;
use crate::services::ImageFormat;

/// Print the portrait path of a survivor and whether it loads
#[derive(Args, Debug)]
pub struct PortraitArgs {
    /// Survivor name; names outside the catalog are slugified as given
    #[arg(value_name = "NAME")]
    name: String,
}

impl PortraitArgs {
    /// Execute portrait command
    pub fn execute(&self, session: &Session) -> CliResult<()> {
        let catalog = session.config().load_catalog().unwrap_or_default();
        let name = catalog
            .find_ignore_case(self.name.trim())
            .unwrap_or(self.name.as_str());

        let path = portrait_path(name);
        println!("{path}");

        match session.assets().load(&path) {
            Ok(ImageFormat::Webp) => println!("Image: webp"),
            Ok(ImageFormat::Png) => println!("Image: png"),
            Err(e) => println!("Image: {NO_IMAGE_LABEL} ({e:#})"),
        }

        Ok(())
    }
}
