// sh! command execution

use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use anyhow::bail;
use derive_builder::Builder;

/// Trait for types that can configure a `Command` before execution.
pub trait ShConfig {
    /// Apply configuration to the given `Command`.
    fn apply(&self, cmd: &mut Command);

    /// Whether the command line should stay out of the info log.
    fn quiet(&self) -> bool {
        false
    }
}

// Allow using `&T` where `T: ShConfig`.
impl<T: ShConfig + ?Sized> ShConfig for &T {
    fn apply(&self, cmd: &mut Command) {
        (*self).apply(cmd)
    }

    fn quiet(&self) -> bool {
        (*self).quiet()
    }
}

#[derive(Clone, Debug)]
pub enum StreamMode {
    Inherit,
    Pipe,
    Null,
}

impl StreamMode {
    fn stdio(&self) -> Stdio {
        match self {
            StreamMode::Inherit => Stdio::inherit(),
            StreamMode::Pipe => Stdio::piped(),
            StreamMode::Null => Stdio::null(),
        }
    }
}

#[derive(Clone, Debug, Builder)]
#[builder(default)]
pub struct ShOptions {
    pub stdout: StreamMode,
    pub stderr: StreamMode,
    pub cwd: Option<PathBuf>,
    pub envs: Vec<(String, String)>,
    pub quiet: bool,
}

impl Default for ShOptions {
    fn default() -> Self {
        Self {
            stdout: StreamMode::Inherit,
            stderr: StreamMode::Inherit,
            cwd: None,
            envs: Vec::new(),
            quiet: false,
        }
    }
}

impl ShConfig for ShOptions {
    fn apply(&self, cmd: &mut Command) {
        cmd.stdout(self.stdout.stdio());
        cmd.stderr(self.stderr.stdio());

        if let Some(ref dir) = self.cwd {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
    }

    fn quiet(&self) -> bool {
        self.quiet
    }
}

#[derive(Debug)]
pub struct ShOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

#[macro_export]
macro_rules! sh {
    // Single command with explicit options
    (options($opts:expr), $cmd:expr $(,)?) => {{ $crate::sh::sh($cmd, $opts) }};

    // Single command with default options
    ($cmd:expr $(,)?) => {{ $crate::sh::sh($cmd, $crate::sh::ShOptions::default()) }};
}

pub fn sh<S, O>(cmd: S, opts: O) -> anyhow::Result<ShOutput>
where
    S: AsRef<str>,
    O: ShConfig,
{
    let cmd = cmd.as_ref();
    if opts.quiet() {
        log::debug!("[sh] {}", cmd);
    } else {
        log::info!("[sh] {}", cmd);
    }

    let mut command = Command::new("sh");
    command.arg("-c").arg(cmd);
    opts.apply(&mut command);

    let output = command.output()?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        bail!(
            "command failed: {}\nexit code: {:?}\n{}",
            cmd,
            output.status.code(),
            stderr.trim_end(),
        );
    }

    Ok(ShOutput {
        status: output.status,
        stdout,
        stderr,
    })
}
