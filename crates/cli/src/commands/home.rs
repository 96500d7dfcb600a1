use anyhow::Result;
use std::path::Path;

use crate::host::ConsoleHost;

pub fn home_command(cwd: Option<&Path>) -> Result<i32> {
    let host = ConsoleHost::open(cwd)?;
    let home = host.scheduler().builder_home();
    host.shutdown();

    let home = home?;
    println!("{}", home.display());
    if let Some(folder) = host.scheduler().homes().init_script_folder() {
        if folder.is_dir() {
            println!("   init scripts: {}", folder.display());
        }
    }
    Ok(0)
}
