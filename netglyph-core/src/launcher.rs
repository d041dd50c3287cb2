/*!
 * Terminal launcher
 * Opens the backend's network picker in a new, classed terminal window
 */

use tracing::info;

use crate::config::LauncherConfig;
use crate::error::Result;
use crate::runner::CommandRunner;

/// Arguments for `<terminal> start --class <class> -- <program...>`.
pub fn terminal_args(config: &LauncherConfig, program: &[String]) -> Vec<String> {
    let mut args = vec![
        "start".to_string(),
        "--class".to_string(),
        config.window_class.clone(),
        "--".to_string(),
    ];
    args.extend(program.iter().cloned());
    args
}

/// Spawn the terminal and return without waiting on it.
pub fn launch<R: CommandRunner>(
    runner: &R,
    config: &LauncherConfig,
    program: &[String],
) -> Result<()> {
    let args = terminal_args(config, program);
    info!("Launching {} {}", config.terminal, args.join(" "));
    runner.spawn_detached(&config.terminal, &args)
}
