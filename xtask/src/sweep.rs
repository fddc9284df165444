use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, ensure, Context};
use blur::{Kernel, Schedule};
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::sh::{ShOptions, StreamMode};

const DEFAULT_COMMAND: &str = "cargo run --release --quiet -p gaussian-blur -- \
     {input} --kernel {kernel} --schedule {schedule} --threads {threads} --no-output";

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Path to YAML config (defaults to `<workspace>/sweep.yaml`)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the number of runs per configuration
    #[arg(long)]
    pub runs: Option<usize>,

    /// Override the report path from the config
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Print the commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Print commands and their output as they run
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SweepConfig {
    #[serde(default = "default_runs")]
    runs: usize,
    threads: Vec<usize>,
    #[serde(default = "default_schedules")]
    schedules: Vec<String>,
    #[serde(default = "default_kernels")]
    kernels: Vec<usize>,
    #[serde(default)]
    inputs: Vec<Input>,
    /// Command template; `{input}`, `{kernel}`, `{schedule}`, `{threads}`
    /// and `{workspace}` are substituted.
    command: Option<String>,
    #[serde(default = "default_report")]
    report: PathBuf,
}

fn default_runs() -> usize {
    5
}

fn default_schedules() -> Vec<String> {
    vec!["static".into(), "dynamic".into()]
}

fn default_kernels() -> Vec<usize> {
    vec![3]
}

fn default_report() -> PathBuf {
    PathBuf::from("sweep-report.md")
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
enum Input {
    /// `- input_1024x768.jpg`
    File(String),
    /// `- { size: 1920x1080, pattern: noise }`
    Synthetic {
        size: String,
        #[serde(default)]
        pattern: Option<String>,
    },
}

impl Input {
    fn label(&self) -> String {
        match self {
            Input::File(path) => path.clone(),
            Input::Synthetic { size, pattern } => {
                format!("{} {}", pattern.as_deref().unwrap_or("gradient"), size)
            }
        }
    }

    fn args(&self) -> String {
        match self {
            Input::File(path) => format!("--input \"{path}\""),
            Input::Synthetic { size, pattern } => match pattern {
                Some(p) => format!("--size {size} --pattern {p}"),
                None => format!("--size {size}"),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Point {
    schedule: Schedule,
    threads: usize,
    seconds: f64,
    speedup: f64,
    efficiency: f64,
}

#[derive(Debug, Serialize)]
struct SweepResult {
    input: String,
    kernel: usize,
    baseline_seconds: f64,
    points: Vec<Point>,
}

fn load_config(path: &Path) -> anyhow::Result<SweepConfig> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let cfg: SweepConfig =
        serde_yaml::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &SweepConfig) -> anyhow::Result<()> {
    ensure!(cfg.runs > 0, "`runs` must be at least 1");
    ensure!(!cfg.threads.is_empty(), "`threads` must list at least one count");
    ensure!(
        cfg.threads.iter().all(|&t| t > 0),
        "thread counts must be positive"
    );
    for k in &cfg.kernels {
        ensure!(
            Kernel::SIZES.contains(k),
            "unsupported kernel {k} (expected one of {:?})",
            Kernel::SIZES
        );
    }
    parse_schedules(&cfg.schedules)?;
    Ok(())
}

fn parse_schedules(names: &[String]) -> anyhow::Result<Vec<Schedule>> {
    names
        .iter()
        .map(|s| s.parse::<Schedule>().map_err(|e| anyhow!(e)))
        .filter(|s| !matches!(s, Ok(Schedule::Sequential)))
        .collect()
}

fn render_template(
    template: &str,
    workspace: &Path,
    input: &Input,
    kernel: usize,
    schedule: Schedule,
    threads: usize,
) -> String {
    template
        .replace("{workspace}", &workspace.to_string_lossy())
        .replace("{input}", &input.args())
        .replace("{kernel}", &kernel.to_string())
        .replace("{schedule}", schedule.name())
        .replace("{threads}", &threads.to_string())
}

/// The timing is the last non-empty line of the program's stdout.
fn parse_seconds(stdout: &str) -> anyhow::Result<f64> {
    let line = stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or_else(|| anyhow!("no output to read the timing from"))?;
    line.parse::<f64>()
        .with_context(|| format!("last output line '{line}' is not a number of seconds"))
}

fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

struct Runner {
    opts: ShOptions,
    runs: usize,
    verbose: bool,
    dry_run: bool,
}

impl Runner {
    /// Mean seconds over `runs` executions of `cmd`.
    fn average(&self, name: &str, cmd: &str) -> anyhow::Result<f64> {
        println!("[sweep] {name}");
        if self.verbose || self.dry_run {
            println!("{cmd}");
        }
        if self.dry_run {
            return Ok(0.0);
        }

        let mut samples = Vec::with_capacity(self.runs);
        for i in 0..self.runs {
            let out = crate::sh!(options(&self.opts), cmd)?;
            if self.verbose && !out.stderr.is_empty() {
                eprint!("{}", out.stderr);
            }
            let secs = parse_seconds(&out.stdout).with_context(|| format!("{name}, run {}", i + 1))?;
            log::debug!("{name} run {}: {secs:.6}s", i + 1);
            samples.push(secs);
        }
        Ok(mean(&samples))
    }
}

fn point(schedule: Schedule, threads: usize, seconds: f64, baseline: f64) -> Point {
    let speedup = if seconds > 0.0 { baseline / seconds } else { 0.0 };
    Point {
        schedule,
        threads,
        seconds,
        speedup,
        efficiency: speedup / threads as f64,
    }
}

fn render_report(results: &[SweepResult], runs: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Gaussian blur schedule sweep\n");
    let _ = writeln!(out, "Each time is the mean of {runs} runs.\n");

    for r in results {
        let _ = writeln!(out, "## {} ({}x{} kernel)\n", r.input, r.kernel, r.kernel);
        let _ = writeln!(out, "Sequential baseline: {:.4} s\n", r.baseline_seconds);

        let mut by_threads: BTreeMap<usize, Vec<&Point>> = BTreeMap::new();
        let mut schedules: Vec<Schedule> = Vec::new();
        for p in &r.points {
            by_threads.entry(p.threads).or_default().push(p);
            if !schedules.contains(&p.schedule) {
                schedules.push(p.schedule);
            }
        }

        let mut header = String::from("| Threads |");
        let mut rule = String::from("|---------|");
        for s in &schedules {
            let _ = write!(header, " {s} time (s) | {s} speedup | {s} efficiency |");
            rule.push_str("---|---|---|");
        }
        let _ = writeln!(out, "{header}");
        let _ = writeln!(out, "{rule}");

        for (threads, points) in &by_threads {
            let mut line = format!("| {threads} |");
            for s in &schedules {
                match points.iter().find(|p| p.schedule == *s) {
                    Some(p) => {
                        let _ = write!(
                            line,
                            " {:.4} | {:.2}x | {:.0}% |",
                            p.seconds,
                            p.speedup,
                            p.efficiency * 100.0
                        );
                    }
                    None => line.push_str(" - | - | - |"),
                }
            }
            let _ = writeln!(out, "{line}");
        }
        let _ = writeln!(out);
    }
    out
}

/// Config file and the directory commands run in.
///
/// An explicit config needs no workspace: its own directory is used instead.
fn locate_config(config: Option<&Path>) -> anyhow::Result<(PathBuf, PathBuf)> {
    match config {
        Some(path) => {
            let dir = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => PathBuf::from("."),
            };
            Ok((path.to_path_buf(), dir))
        }
        None => {
            let workspace = crate::findup::workspace_root()?;
            Ok((workspace.join("sweep.yaml"), workspace))
        }
    }
}

pub fn run(args: SweepArgs) -> anyhow::Result<()> {
    let (config_path, workspace) = locate_config(args.config.as_deref())?;
    let cfg = load_config(&config_path)?;

    let runs = args.runs.unwrap_or(cfg.runs);
    if runs == 0 {
        bail!("--runs must be at least 1");
    }
    let schedules = parse_schedules(&cfg.schedules)?;
    let template = cfg.command.as_deref().unwrap_or(DEFAULT_COMMAND);
    let inputs = if cfg.inputs.is_empty() {
        vec![Input::Synthetic {
            size: "1920x1080".into(),
            pattern: None,
        }]
    } else {
        cfg.inputs.clone()
    };

    let runner = Runner {
        opts: ShOptions {
            stdout: StreamMode::Pipe,
            stderr: StreamMode::Pipe,
            cwd: Some(workspace.clone()),
            envs: vec![("RUST_LOG".into(), "warn".into())],
            quiet: !args.verbose,
        },
        runs,
        verbose: args.verbose,
        dry_run: args.dry_run,
    };

    let mut results = Vec::new();
    for input in &inputs {
        for &kernel in &cfg.kernels {
            let label = input.label();
            let base_cmd =
                render_template(template, &workspace, input, kernel, Schedule::Sequential, 1);
            let baseline =
                runner.average(&format!("{label} k={kernel} sequential"), &base_cmd)?;

            let mut points = Vec::new();
            for &schedule in &schedules {
                for &threads in &cfg.threads {
                    let cmd = render_template(template, &workspace, input, kernel, schedule, threads);
                    let name = format!("{label} k={kernel} {schedule} t={threads}");
                    let secs = runner.average(&name, &cmd)?;
                    points.push(point(schedule, threads, secs, baseline));
                }
            }

            results.push(SweepResult {
                input: label,
                kernel,
                baseline_seconds: baseline,
                points,
            });
        }
    }

    if args.dry_run {
        println!("[sweep] dry run, no report written");
        return Ok(());
    }

    let report_path = args.report.clone().unwrap_or_else(|| workspace.join(&cfg.report));
    std::fs::write(&report_path, render_report(&results, runs))
        .with_context(|| format!("writing {}", report_path.display()))?;
    let json_path = report_path.with_extension("json");
    std::fs::write(&json_path, serde_json::to_string_pretty(&results)?)
        .with_context(|| format!("writing {}", json_path.display()))?;

    println!("[sweep] wrote {} and {}", report_path.display(), json_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
runs: 3
threads: [1, 2, 4]
schedules: [static, dynamic, sequential]
kernels: [3, 7]
inputs:
  - input_640x480.jpg
  - size: 800x600
    pattern: noise
  - size: 64x64
"#;

    #[test]
    fn test_parse_config() {
        let cfg: SweepConfig = serde_yaml::from_str(CONFIG).unwrap();
        validate(&cfg).unwrap();
        assert_eq!(cfg.runs, 3);
        assert_eq!(cfg.threads, [1, 2, 4]);
        assert_eq!(cfg.kernels, [3, 7]);
        assert_eq!(cfg.report, PathBuf::from("sweep-report.md"));
        assert_eq!(
            cfg.inputs,
            [
                Input::File("input_640x480.jpg".into()),
                Input::Synthetic {
                    size: "800x600".into(),
                    pattern: Some("noise".into())
                },
                Input::Synthetic {
                    size: "64x64".into(),
                    pattern: None
                },
            ]
        );
        // The sequential baseline always runs; it is not a sweep column.
        assert_eq!(
            parse_schedules(&cfg.schedules).unwrap(),
            [Schedule::Static, Schedule::Dynamic]
        );
    }

    #[test]
    fn test_defaults() {
        let cfg: SweepConfig = serde_yaml::from_str("threads: [2]").unwrap();
        assert_eq!(cfg.runs, 5);
        assert_eq!(cfg.kernels, [3]);
        assert_eq!(cfg.schedules, ["static", "dynamic"]);
        assert!(cfg.inputs.is_empty());
        assert!(cfg.command.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_kernel: SweepConfig = serde_yaml::from_str("threads: [1]\nkernels: [4]").unwrap();
        assert!(validate(&bad_kernel).is_err());

        let bad_schedule: SweepConfig =
            serde_yaml::from_str("threads: [1]\nschedules: [guided]").unwrap();
        assert!(validate(&bad_schedule).is_err());

        let zero_threads: SweepConfig = serde_yaml::from_str("threads: [0, 2]").unwrap();
        assert!(validate(&zero_threads).is_err());

        assert!(serde_yaml::from_str::<SweepConfig>("threads: [1]\nbogus: 1").is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.yaml");
        std::fs::write(&path, CONFIG).unwrap();
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.inputs.len(), 3);
        assert!(load_config(&dir.path().join("missing.yaml")).is_err());
    }

    #[test]
    fn test_render_template() {
        let input = Input::Synthetic {
            size: "640x480".into(),
            pattern: Some("checkerboard".into()),
        };
        let cmd = render_template(
            "{workspace}/blur {input} -k {kernel} -s {schedule} -t {threads}",
            Path::new("/ws"),
            &input,
            5,
            Schedule::Dynamic,
            8,
        );
        assert_eq!(
            cmd,
            "/ws/blur --size 640x480 --pattern checkerboard -k 5 -s dynamic -t 8"
        );

        let file = Input::File("my image.jpg".into());
        assert_eq!(file.args(), "--input \"my image.jpg\"");
        assert_eq!(file.label(), "my image.jpg");
    }

    #[test]
    fn test_explicit_config_skips_workspace_lookup() {
        let (path, dir) = locate_config(Some(Path::new("/tmp/sweeps/a.yaml"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/sweeps/a.yaml"));
        assert_eq!(dir, PathBuf::from("/tmp/sweeps"));

        let (_, dir) = locate_config(Some(Path::new("a.yaml"))).unwrap();
        assert_eq!(dir, PathBuf::from("."));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_writes_reports() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("sweep.yaml");
        std::fs::write(
            &config,
            r#"
runs: 3
threads: [1, 2, 4]
schedules: [static, dynamic]
kernels: [3]
inputs:
  - size: 64x64
command: "echo call >> calls.log; case {schedule} in sequential) echo 1.0;; *) echo 0.25;; esac"
report: out/report.md
"#,
        )
        .unwrap();
        std::fs::create_dir(dir.path().join("out")).unwrap();

        run(SweepArgs {
            config: Some(config),
            runs: Some(2),
            report: None,
            dry_run: false,
            verbose: false,
        })
        .unwrap();

        let md_path = dir.path().join("out/report.md");
        let json_path = dir.path().join("out/report.json");
        assert!(md_path.exists());
        assert!(json_path.exists());

        let md = std::fs::read_to_string(&md_path).unwrap();
        assert!(md.contains("Each time is the mean of 2 runs."));
        assert!(md.contains("Sequential baseline: 1.0000 s"));

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        let results = json.as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["baseline_seconds"], 1.0);

        let points = results[0]["points"].as_array().unwrap();
        assert_eq!(points.len(), 2 * 3);
        for p in points {
            let threads = p["threads"].as_f64().unwrap();
            assert_eq!(p["seconds"], 0.25);
            assert_eq!(p["speedup"], 4.0);
            assert_eq!(p["efficiency"].as_f64().unwrap(), 4.0 / threads);
        }

        // baseline + six points, two runs each
        let calls = std::fs::read_to_string(dir.path().join("calls.log")).unwrap();
        assert_eq!(calls.lines().count(), (1 + 6) * 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_run_reports_bad_timing() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("sweep.yaml");
        std::fs::write(&config, "runs: 1\nthreads: [2]\ncommand: echo finished\n").unwrap();

        let err = run(SweepArgs {
            config: Some(config),
            runs: None,
            report: None,
            dry_run: false,
            verbose: false,
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("not a number of seconds"));
        assert!(!dir.path().join("sweep-report.md").exists());
    }

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("Running with 4 threads\n0.125000\n\n").unwrap(), 0.125);
        assert!(parse_seconds("").is_err());
        assert!(parse_seconds("done\n").is_err());
    }

    #[test]
    fn test_point_and_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(mean(&[]), 0.0);

        let p = point(Schedule::Static, 4, 0.5, 1.0);
        assert_eq!(p.speedup, 2.0);
        assert_eq!(p.efficiency, 0.5);
    }

    #[test]
    fn test_render_report() {
        let results = vec![SweepResult {
            input: "noise 800x600".into(),
            kernel: 3,
            baseline_seconds: 1.0,
            points: vec![
                point(Schedule::Static, 1, 1.0, 1.0),
                point(Schedule::Dynamic, 1, 1.25, 1.0),
                point(Schedule::Static, 2, 0.5, 1.0),
            ],
        }];
        let md = render_report(&results, 3);
        assert!(md.contains("## noise 800x600 (3x3 kernel)"));
        assert!(md.contains("Sequential baseline: 1.0000 s"));
        assert!(md.contains("| 1 | 1.0000 | 1.00x | 100% | 1.2500 | 0.80x | 80% |"));
        assert!(md.contains("| 2 | 0.5000 | 2.00x | 100% | - | - | - |"));
    }
}
