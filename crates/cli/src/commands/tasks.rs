use anyhow::{Result, bail};
use std::path::Path;
use tracing::debug;

use crate::display::print_view;
use crate::host::ConsoleHost;

pub fn tasks_command(cwd: Option<&Path>, build_file: &str, json: bool) -> Result<i32> {
    let host = ConsoleHost::open(cwd)?;
    let build_file = host.expand_build_file(build_file)?;
    debug!("Listing tasks of {build_file}");

    let view = host.scheduler().views_for(&build_file);
    // Let the display thread print any error dialog before we report
    host.shutdown();

    match view {
        Some(view) => {
            print_view(&view, json)?;
            Ok(0)
        }
        None => bail!("No task information for {build_file}"),
    }
}
