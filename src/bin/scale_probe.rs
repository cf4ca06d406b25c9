use std::env;
use std::time::Instant;

use dc_align::{Aligner, AlignmentSet, DcEngine, DpEngine, Mode, Score, ScoringModel};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

const SIZES: &[usize] = &[64, 128, 256, 512, 1024, 2048, 4096];

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("scale_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("dc-align scaling probe: divide-and-conquer vs full matrix");
    eprintln!("{}", "=".repeat(80));
    eprintln!();
    eprintln!("Every scenario runs the linear-space engine at growing sizes. Up to");
    eprintln!(
        "length {} the full-matrix engine runs too and both alignment sets must",
        options.verify_limit
    );
    eprintln!("match exactly.");
    eprintln!();
    eprintln!("  wall_s         wall-clock seconds of the divide-and-conquer run");
    eprintln!("  rss_delta_kib  resident memory growth across the measurement");
    eprintln!("  status         passed | failed | not_checked (beyond verify limit)");
    eprintln!();

    let mut sys = System::new();
    let mut measurements = Vec::new();

    eprintln!("[1/3] Global alignment of mutated copies...");
    measurements.extend(run_scenario(
        "global_mutated",
        Mode::Global,
        &options,
        &mut sys,
        |len| {
            let base = pseudo_random_dna(len, 0x5eed);
            let copy = mutate(&base, 0xbeef);
            (base, copy)
        },
    ));
    eprintln!();

    eprintln!("[2/3] Local alignment of a motif inside long flanks...");
    measurements.extend(run_scenario(
        "local_motif",
        Mode::Local,
        &options,
        &mut sys,
        |len| {
            let flank = "A".repeat(len / 2);
            (format!("{flank}GTCTGA{flank}"), "GTCTGA".to_string())
        },
    ));
    eprintln!();

    eprintln!("[3/3] Local alignment of mutated copies...");
    measurements.extend(run_scenario(
        "local_mutated",
        Mode::Local,
        &options,
        &mut sys,
        |len| {
            let base = pseudo_random_dna(len, 0xc0ffee);
            let copy = mutate(&base, 0xfeed);
            (base, copy)
        },
    ));
    eprintln!();

    print_summary(&measurements, &options);

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("scale_probe output error: {err}");
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
    max_len: usize,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 512usize;
        let mut max_len = 2048usize;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if let Some(value) = arg.strip_prefix("--format=") {
                format = OutputFormat::from_str(value)?;
            } else if arg == "--format" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --format".to_string())?
                    .into();
                format = OutputFormat::from_str(&value)?;
            } else if let Some(value) = arg.strip_prefix("--verify-limit=") {
                verify_limit = parse_len(value, "verify limit")?;
            } else if arg == "--verify-limit" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --verify-limit".to_string())?
                    .into();
                verify_limit = parse_len(&value, "verify limit")?;
            } else if let Some(value) = arg.strip_prefix("--max-len=") {
                max_len = parse_len(value, "max length")?;
            } else if arg == "--max-len" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --max-len".to_string())?
                    .into();
                max_len = parse_len(&value, "max length")?;
            } else {
                return Err(format!("unrecognized argument '{arg}'"));
            }
        }

        Ok(Self {
            format,
            verify_limit,
            max_len,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --release --bin scale_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Longest input also aligned with the full matrix (default: 512)
  --max-len <N>                 Skip sizes above N (default: 2048)
  -h, --help                    Print this help message

Examples:
  cargo run --release --bin scale_probe
  cargo run --release --bin scale_probe -- --format table --verify-limit 256
"
        );
    }
}

fn parse_len(value: &str, what: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| format!("{what} must be a positive integer"))
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

#[derive(Clone)]
struct Measurement {
    scenario: &'static str,
    size_desc: String,
    score: Score,
    alignments: usize,
    wall_s: f64,
    rss_delta_kib: u64,
    verification_status: VerificationStatus,
    verification_detail: Option<String>,
}

#[derive(Clone, Copy)]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            VerificationStatus::Passed => "✓",
            VerificationStatus::Failed => "✗",
            VerificationStatus::NotChecked => "○",
        }
    }
}

fn run_scenario<G>(
    scenario: &'static str,
    mode: Mode,
    options: &Options,
    sys: &mut System,
    generate: G,
) -> Vec<Measurement>
where
    G: Fn(usize) -> (String, String),
{
    let scoring = ScoringModel::simple(2, -3, -4);
    let sizes: Vec<usize> = SIZES
        .iter()
        .copied()
        .filter(|&len| len <= options.max_len)
        .collect();
    let total = sizes.len();

    sizes
        .iter()
        .enumerate()
        .map(|(idx, &len)| {
            eprint!("      [{}/{}] size {}... ", idx + 1, total, len);
            let (seq1, seq2) = generate(len);
            let dc = DcEngine::new(&scoring, mode);
            let m = measure(scenario, format!("len={len}"), sys, || {
                dc.align(&seq1, &seq2).map_err(|err| err.to_string())
            });
            let m = match m {
                Ok((mut m, set)) => {
                    if len <= options.verify_limit {
                        let (status, detail) = verify(&scoring, mode, &seq1, &seq2, &set);
                        m.verification_status = status;
                        m.verification_detail = detail;
                    }
                    m
                }
                Err(err) => Measurement {
                    scenario,
                    size_desc: format!("len={len}"),
                    score: 0,
                    alignments: 0,
                    wall_s: 0.0,
                    rss_delta_kib: 0,
                    verification_status: VerificationStatus::Failed,
                    verification_detail: Some(err),
                },
            };
            eprintln!(
                "{} score={}, alignments={}, time={:.3}s, status={}",
                m.verification_status.icon(),
                m.score,
                m.alignments,
                m.wall_s,
                m.verification_status.label()
            );
            m
        })
        .collect()
}

fn verify(
    scoring: &ScoringModel,
    mode: Mode,
    seq1: &str,
    seq2: &str,
    dc_set: &AlignmentSet,
) -> (VerificationStatus, Option<String>) {
    match DpEngine::new(scoring, mode).align(seq1, seq2) {
        Ok(dp_set) if &dp_set == dc_set => (VerificationStatus::Passed, None),
        Ok(dp_set) => (
            VerificationStatus::Failed,
            Some(format!(
                "full matrix found {} alignment(s) scoring {}, divide and conquer {} scoring {}",
                dp_set.len(),
                dp_set.score(),
                dc_set.len(),
                dc_set.score()
            )),
        ),
        Err(err) => (VerificationStatus::Failed, Some(err.to_string())),
    }
}

fn print_summary(measurements: &[Measurement], options: &Options) {
    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Summary");
    eprintln!("{}", "=".repeat(80));

    let mut passed = 0;
    let mut failed = 0;
    let mut not_checked = 0;
    for m in measurements {
        match m.verification_status {
            VerificationStatus::Passed => passed += 1,
            VerificationStatus::Failed => failed += 1,
            VerificationStatus::NotChecked => not_checked += 1,
        }
    }

    let total = measurements.len().max(1) as f64;
    eprintln!("  Runs: {}", measurements.len());
    eprintln!("  ✓ Passed: {} ({:.1}%)", passed, 100.0 * passed as f64 / total);
    eprintln!("  ✗ Failed: {} ({:.1}%)", failed, 100.0 * failed as f64 / total);
    eprintln!(
        "  ○ Not checked (len > {}): {} ({:.1}%)",
        options.verify_limit,
        not_checked,
        100.0 * not_checked as f64 / total
    );

    if failed > 0 {
        eprintln!();
        eprintln!("Failures:");
        for m in measurements {
            if matches!(m.verification_status, VerificationStatus::Failed) {
                eprintln!("  ✗ {} ({})", m.scenario, m.size_desc);
                if let Some(ref detail) = m.verification_detail {
                    eprintln!("     {detail}");
                }
            }
        }
    }
    eprintln!("{}", "=".repeat(80));
    eprintln!();
}

fn measure<F>(
    scenario: &'static str,
    size_desc: String,
    sys: &mut System,
    compute: F,
) -> Result<(Measurement, AlignmentSet), String>
where
    F: FnOnce() -> Result<AlignmentSet, String>,
{
    let before = rss_kib(sys);
    let start = Instant::now();
    let set = compute()?;
    let duration = start.elapsed();
    let after = rss_kib(sys);

    let m = Measurement {
        scenario,
        size_desc,
        score: set.score(),
        alignments: set.len(),
        wall_s: duration.as_secs_f64(),
        rss_delta_kib: after.saturating_sub(before),
        verification_status: VerificationStatus::NotChecked,
        verification_detail: None,
    };
    Ok((m, set))
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!(
        "scenario,size_desc,score,alignments,wall_s,rss_delta_kib,\
         verification_status,verification_detail"
    );
    for m in measurements {
        let detail = m
            .verification_detail
            .as_ref()
            .map(|s| s.replace('"', "'"))
            .unwrap_or_default();
        println!(
            "{},{},{},{},{:.3},{},{},\"{}\"",
            m.scenario,
            m.size_desc,
            m.score,
            m.alignments,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    let mut col1 = "scenario".len();
    let mut col2 = "size".len();
    for m in measurements {
        col1 = col1.max(m.scenario.len());
        col2 = col2.max(m.size_desc.len());
    }

    println!(
        "{:<col1$}  {:<col2$}  {:>8}  {:>10}  {:>12}  {:>14}  {:>12}  {}",
        "scenario", "size", "score", "alignments", "wall_s", "rss_delta_kib", "status", "detail",
    );
    println!(
        "{:-<col1$}  {:-<col2$}  {:-<8}  {:-<10}  {:-<12}  {:-<14}  {:-<12}  {:-<12}",
        "", "", "", "", "", "", "", "",
    );
    for m in measurements {
        println!(
            "{:<col1$}  {:<col2$}  {:>8}  {:>10}  {:>12.3}  {:>14}  {:>12}  {}",
            m.scenario,
            m.size_desc,
            m.score,
            m.alignments,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            m.verification_detail.as_deref().unwrap_or(""),
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    println!("[");
    for (idx, m) in measurements.iter().enumerate() {
        let detail = m.verification_detail.as_ref().map(|s| s.replace('"', "'"));
        println!(
            concat!(
                "  {{\"scenario\":\"{}\",\"size\":\"{}\",\"score\":{},",
                "\"alignments\":{},\"wall_s\":{:.3},\"rss_delta_kib\":{},",
                "\"verification\":{{\"status\":\"{}\",\"detail\":{}}}}}{}"
            ),
            m.scenario,
            m.size_desc,
            m.score,
            m.alignments,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            match detail {
                Some(ref d) => format!("\"{d}\""),
                None => "null".to_string(),
            },
            if idx + 1 == measurements.len() { "" } else { "," }
        );
    }
    println!("]");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory() / 1024
    } else {
        0
    }
}

/// xorshift64; the probe needs reproducible inputs, not quality randomness.
fn next_state(state: &mut u64) -> u64 {
    *state ^= *state << 13;
    *state ^= *state >> 7;
    *state ^= *state << 17;
    *state
}

fn pseudo_random_dna(len: usize, seed: u64) -> String {
    const ALPHABET: &[u8] = b"ACGT";
    let mut state = seed.max(1);
    (0..len)
        .map(|_| ALPHABET[(next_state(&mut state) % 4) as usize] as char)
        .collect()
}

/// Roughly one substitution per 20 residues. Indels are left out: each one
/// inside a homopolymer run doubles the number of co-optimal alignments.
fn mutate(seq: &str, seed: u64) -> String {
    const ALPHABET: &[u8] = b"ACGT";
    let mut state = seed.max(1);
    seq.chars()
        .map(|c| {
            if next_state(&mut state) % 20 == 0 {
                ALPHABET[(next_state(&mut state) % 4) as usize] as char
            } else {
                c
            }
        })
        .collect()
}
