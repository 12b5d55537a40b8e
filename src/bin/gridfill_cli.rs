#[cfg(target_arch = "wasm32")]
fn main() {
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("gridfill_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use gridfill_engine::fill::{
        FillMode, GridFill, GridFillConfig, GridFillDiagnostics, InsetAxis, RecordingMesh, plan,
    };
    use std::fmt::Write as _;
    use std::fs;
    use std::path::{Path, PathBuf};

    const USAGE: &str = r#"gridfill_cli (gridfill-engine)

USAGE:
  gridfill_cli list
  gridfill_cli plan <edges> [--offset <k>]
  gridfill_cli run <scenario|all> [options]

SCENARIOS:
  ring12
  ring16
  ring24_offset
  ring13_odd
  disjoint16
  inset16
  ngon12
  degenerate6

OPTIONS (run):
  --out-dir <dir>    Write <scenario>.snap to this dir (required for `all`)
  --overwrite        Overwrite existing output files
  -h, --help         Show this help
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "list" => {
                print_scenarios();
                Ok(())
            }
            "plan" => cmd_plan(&mut args),
            "run" => cmd_run(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn print_scenarios() {
        for scenario in Scenario::ALL {
            println!("{}", scenario.name());
        }
    }

    fn cmd_plan(args: &mut Args) -> Result<(), String> {
        let edges: usize = args
            .next()
            .ok_or("missing edge count")?
            .parse()
            .map_err(|e| format!("edge count: {e}"))?;

        let mut offset = 0_i64;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--offset" => {
                    offset = args
                        .value("--offset")?
                        .parse()
                        .map_err(|e| format!("--offset: {e}"))?;
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        let (grid, warnings) = plan(edges, offset).map_err(|e| e.to_string())?;
        for warning in &warnings {
            eprintln!("warning: {warning}");
        }
        println!(
            "edges={} span={} rows={} cols={} anchors=({}, {}) cells={} relax_passes={}",
            grid.loop_len,
            grid.span,
            grid.rows,
            grid.cols,
            grid.anchor_i,
            grid.anchor_j,
            grid.cell_count(),
            if grid.relaxes() { grid.relax_passes() } else { 0 }
        );
        Ok(())
    }

    fn cmd_run(args: &mut Args) -> Result<(), String> {
        let scenario_name = args.next().ok_or("missing scenario name")?;

        let mut out_dir: Option<PathBuf> = None;
        let mut overwrite = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out-dir" => out_dir = Some(PathBuf::from(args.value("--out-dir")?)),
                "--overwrite" => overwrite = true,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        let scenarios: Vec<Scenario> = if scenario_name == "all" {
            if out_dir.is_none() {
                return Err("`run all` requires --out-dir".to_string());
            }
            Scenario::ALL.to_vec()
        } else {
            vec![Scenario::from_str(&scenario_name).ok_or_else(|| unknown_scenario(&scenario_name))?]
        };

        for scenario in scenarios {
            let output = run_scenario(scenario);
            match out_dir.as_deref() {
                Some(dir) => {
                    let path = dir.join(format!("{}.snap", scenario.name()));
                    write_text_file(&path, &output.snapshot, overwrite)?;
                    eprintln!("wrote {}", path.display());
                }
                None => print!("{}", output.snapshot),
            }
            eprintln!("{}: {}", scenario.name(), output.summary);
        }
        Ok(())
    }

    fn unknown_scenario(name: &str) -> String {
        format!("unknown scenario `{name}` (try `gridfill_cli list`)")
    }

    fn write_text_file(path: &Path, text: &str, overwrite: bool) -> Result<(), String> {
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }
        fs::write(path, normalize_snapshot_text(text)).map_err(|e| format!("write {}: {e}", path.display()))
    }

    fn normalize_snapshot_text(text: &str) -> String {
        let normalized = text.replace("\r\n", "\n");
        if normalized.ends_with('\n') {
            normalized
        } else {
            format!("{normalized}\n")
        }
    }

    #[derive(Debug, Clone, Copy)]
    enum Scenario {
        Ring12,
        Ring16,
        Ring24Offset,
        Ring13Odd,
        Disjoint16,
        Inset16,
        Ngon12,
        Degenerate6,
    }

    impl Scenario {
        const ALL: &'static [Scenario] = &[
            Scenario::Ring12,
            Scenario::Ring16,
            Scenario::Ring24Offset,
            Scenario::Ring13Odd,
            Scenario::Disjoint16,
            Scenario::Inset16,
            Scenario::Ngon12,
            Scenario::Degenerate6,
        ];

        fn name(self) -> &'static str {
            match self {
                Scenario::Ring12 => "ring12",
                Scenario::Ring16 => "ring16",
                Scenario::Ring24Offset => "ring24_offset",
                Scenario::Ring13Odd => "ring13_odd",
                Scenario::Disjoint16 => "disjoint16",
                Scenario::Inset16 => "inset16",
                Scenario::Ngon12 => "ngon12",
                Scenario::Degenerate6 => "degenerate6",
            }
        }

        fn from_str(name: &str) -> Option<Self> {
            Scenario::ALL.iter().copied().find(|s| s.name() == name)
        }

        /// Initial edge count, selection and settings.
        fn setup(self) -> (usize, Vec<String>, GridFillConfig) {
            let ring = |n: usize| vec![format!("pPlane1.e[0:{}]", n - 1)];
            let defaults = GridFillConfig::default();
            match self {
                Scenario::Ring12 => (24, ring(12), defaults),
                Scenario::Ring16 => (32, ring(16), defaults),
                Scenario::Ring24Offset => (
                    48,
                    ring(24),
                    GridFillConfig {
                        offset_enabled: true,
                        offset_amount: -3,
                        ..defaults
                    },
                ),
                Scenario::Ring13Odd => (26, ring(13), defaults),
                Scenario::Disjoint16 => (
                    60,
                    vec!["pPlane1.e[40:47]".to_string(), "pPlane1.e[4:11]".to_string()],
                    defaults,
                ),
                Scenario::Inset16 => (
                    32,
                    ring(16),
                    GridFillConfig {
                        inset_enabled: true,
                        inset_width: 0.25,
                        inset_loop_count: 2,
                        inset_axis: InsetAxis::Z,
                        ..defaults
                    },
                ),
                Scenario::Ngon12 => (
                    24,
                    ring(12),
                    GridFillConfig {
                        fill_mode: FillMode::Ngon,
                        ..defaults
                    },
                ),
                Scenario::Degenerate6 => (12, ring(6), defaults),
            }
        }
    }

    struct ScenarioOutput {
        snapshot: String,
        summary: String,
    }

    fn run_scenario(scenario: Scenario) -> ScenarioOutput {
        let (edge_count, selection, config) = scenario.setup();
        let mut mesh = RecordingMesh::new(edge_count).with_selection(selection);
        let result = GridFill::new(config).apply(&mut mesh);

        let mut snapshot = String::new();
        let _ = writeln!(snapshot, "scenario {}", scenario.name());
        let _ = writeln!(snapshot, "edges_before {edge_count}");
        snapshot.push_str(&mesh.script());

        let summary = match result {
            Ok(diagnostics) => {
                write_diagnostics(&mut snapshot, &diagnostics);
                diagnostics.summary()
            }
            Err(err) => {
                let _ = writeln!(snapshot, "error {err}");
                format!("failed: {err}")
            }
        };
        ScenarioOutput { snapshot, summary }
    }

    fn write_diagnostics(out: &mut String, diag: &GridFillDiagnostics) {
        let _ = writeln!(out, "diag.loop_len {}", diag.loop_len);
        if let Some(grid) = &diag.plan {
            let _ = writeln!(out, "diag.rows {}", grid.rows);
            let _ = writeln!(out, "diag.cols {}", grid.cols);
        }
        if let Some(bands) = &diag.bands {
            let _ = writeln!(out, "diag.row_band_start {}", bands.row_band_start.index());
            let _ = writeln!(out, "diag.col_band_start {}", bands.col_band_start.index());
        }
        let _ = writeln!(out, "diag.edges_after {}", diag.edges_after);
        for warning in &diag.warnings {
            let _ = writeln!(out, "diag.warning {warning}");
        }
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }
    }
}
