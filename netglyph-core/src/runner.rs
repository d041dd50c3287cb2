/*!
 * Subprocess plumbing
 * Every backend, launcher and notification call goes through a CommandRunner
 */

use std::fs;
use std::future::Future;
use std::io::ErrorKind;
use std::os::unix::process::CommandExt;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};

pub trait CommandRunner {
    /// Whether `program` resolves on `PATH`.
    fn is_installed(&self, program: &str) -> bool;

    /// Whether a process named `name` is alive.
    fn is_daemon_running(&self, name: &str) -> bool;

    /// Run `program` to completion and return its stdout. A non-zero exit
    /// status is an error.
    fn output(&self, program: &str, args: &[&str]) -> impl Future<Output = Result<String>>;

    /// Start `program` without waiting for it.
    fn spawn_detached(&self, program: &str, args: &[String]) -> Result<()>;
}

pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for SystemRunner {
    fn is_installed(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    fn is_daemon_running(&self, name: &str) -> bool {
        let Ok(entries) = fs::read_dir("/proc") else {
            return false;
        };

        entries
            .flatten()
            .filter(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .bytes()
                    .all(|b| b.is_ascii_digit())
            })
            .any(|entry| {
                fs::read_to_string(entry.path().join("comm"))
                    .is_ok_and(|comm| comm.trim_end() == name)
            })
    }

    async fn output(&self, program: &str, args: &[&str]) -> Result<String> {
        debug!("Running: {} {}", program, args.join(" "));

        // Backend output is parsed, so it must not be translated.
        let child = Command::new(program)
            .args(args)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, child).await {
            Ok(result) => result.map_err(|source| spawn_error(program, source))?,
            Err(_) => {
                return Err(Error::Timeout {
                    program: program.to_string(),
                    timeout: self.timeout,
                })
            }
        };

        if !output.status.success() {
            return Err(Error::Failed {
                program: program.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn spawn_detached(&self, program: &str, args: &[String]) -> Result<()> {
        debug!("Spawning: {} {}", program, args.join(" "));

        // Own process group so the child outlives us and ignores our signals.
        std::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .process_group(0)
            .spawn()
            .map(drop)
            .map_err(|source| spawn_error(program, source))
    }
}

fn spawn_error(program: &str, source: std::io::Error) -> Error {
    if source.kind() == ErrorKind::NotFound {
        Error::NotInstalled(program.to_string())
    } else {
        Error::Spawn {
            program: program.to_string(),
            source,
        }
    }
}

#[cfg(test)]
pub(crate) mod scripted {
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use super::CommandRunner;
    use crate::error::{Error, Result};

    /// Runner answering from a table of canned command lines.
    #[derive(Default)]
    pub(crate) struct ScriptedRunner {
        installed: HashSet<String>,
        daemons: HashSet<String>,
        responses: HashMap<String, std::result::Result<String, String>>,
        calls: Mutex<Vec<String>>,
        spawned: Mutex<Vec<Vec<String>>>,
    }

    impl ScriptedRunner {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn install(mut self, program: &str) -> Self {
            self.installed.insert(program.to_string());
            self
        }

        pub(crate) fn daemon(mut self, name: &str) -> Self {
            self.daemons.insert(name.to_string());
            self
        }

        pub(crate) fn respond(mut self, command_line: &str, stdout: &str) -> Self {
            self.install_from(command_line);
            self.responses
                .insert(command_line.to_string(), Ok(stdout.to_string()));
            self
        }

        pub(crate) fn fail(mut self, command_line: &str, stderr: &str) -> Self {
            self.install_from(command_line);
            self.responses
                .insert(command_line.to_string(), Err(stderr.to_string()));
            self
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        pub(crate) fn spawned(&self) -> Vec<Vec<String>> {
            self.spawned.lock().unwrap().clone()
        }

        fn install_from(&mut self, command_line: &str) {
            if let Some(program) = command_line.split_whitespace().next() {
                self.installed.insert(program.to_string());
            }
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn is_installed(&self, program: &str) -> bool {
            self.installed.contains(program)
        }

        fn is_daemon_running(&self, name: &str) -> bool {
            self.daemons.contains(name)
        }

        async fn output(&self, program: &str, args: &[&str]) -> Result<String> {
            let line = std::iter::once(program)
                .chain(args.iter().copied())
                .collect::<Vec<_>>()
                .join(" ");
            self.calls.lock().unwrap().push(line.clone());

            if !self.is_installed(program) {
                return Err(Error::NotInstalled(program.to_string()));
            }

            match self.responses.get(&line) {
                Some(Ok(stdout)) => Ok(stdout.clone()),
                Some(Err(stderr)) => Err(Error::Failed {
                    program: program.to_string(),
                    status: "exit status: 1".to_string(),
                    stderr: stderr.clone(),
                }),
                None => Err(Error::Failed {
                    program: program.to_string(),
                    status: "exit status: 1".to_string(),
                    stderr: format!("unscripted: {line}"),
                }),
            }
        }

        fn spawn_detached(&self, program: &str, args: &[String]) -> Result<()> {
            if !self.is_installed(program) {
                return Err(Error::NotInstalled(program.to_string()));
            }
            let mut argv = vec![program.to_string()];
            argv.extend(args.iter().cloned());
            self.spawned.lock().unwrap().push(argv);
            Ok(())
        }
    }
}
