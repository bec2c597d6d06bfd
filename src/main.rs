//! Handheld Emulator - CLI Entry Point
//!
//! Commands:
//! - `handheld-emu run <program>` - Run a program and report signal strength
//! - `handheld-emu screen <program>` - Run a program and print the CRT
//! - `handheld-emu list <program>` - Print an annotated listing
//! - `handheld-emu debug <program>` - Interactive debugger
//! - `handheld-emu test` - Built-in self-test

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// The canonical example program, used by the demo and self-test.
const EXAMPLE_PROGRAM: &str = include_str!("../programs/example.txt");

#[derive(Parser)]
#[command(name = "handheld-emu")]
#[command(author = "Yigit")]
#[command(version = "0.1.0")]
#[command(about = "A cycle-accurate emulator of the handheld's signal CPU and CRT")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program and report the signal-strength sum
    Run {
        /// Path to the program file
        program: String,
        /// Maximum number of instructions to execute (default: all)
        #[arg(short, long)]
        budget: Option<u64>,
        /// Print every trace sample
        #[arg(short, long)]
        trace: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// First sampled cycle
        #[arg(long, default_value = "20")]
        first: u64,
        /// Distance between sampled cycles
        #[arg(long, default_value = "40")]
        every: u64,
        /// Last sampled cycle
        #[arg(long, default_value = "220")]
        last: u64,
    },
    /// Run a program with the CRT attached and print the screen
    Screen {
        /// Path to the program file
        program: String,
        /// Maximum number of instructions to execute (default: all)
        #[arg(short, long)]
        budget: Option<u64>,
    },
    /// Print an annotated program listing
    List {
        /// Path to the program file
        program: String,
    },
    /// Interactive debugger
    Debug {
        /// Path to the program file
        program: String,
    },
    /// Run the built-in self-test
    Test,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Run { program, budget, trace, json, first, every, last }) => {
            let window = handheld::SampleWindow::new(first, every, last);
            run_program(&program, budget, trace, json, window);
        }
        Some(Commands::Screen { program, budget }) => {
            show_screen(&program, budget);
        }
        Some(Commands::List { program }) => {
            list_program(&program);
        }
        Some(Commands::Debug { program }) => {
            debug_program(&program);
        }
        Some(Commands::Test) => {
            run_self_test();
        }
        None => {
            println!("Handheld Emulator v0.1.0");
            println!("A cycle-accurate signal CPU and CRT emulator");
            println!();
            println!("Use --help for available commands");
            println!();
            demo_example_program();
        }
    }
}

/// Install the log subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("handheld={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_or_exit(path: &str) -> handheld::Program {
    match handheld::load_program(path) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("❌ Failed to load program: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_program(path: &str, budget: Option<u64>, trace: bool, json: bool, window: handheld::SampleWindow) {
    use handheld::Cpu;

    let program = load_or_exit(path);

    let mut cpu = Cpu::new();
    let executed = match budget {
        Some(limit) => cpu.run_limited(&program, limit),
        None => cpu.run(&program),
    };
    let sum = window.sum(cpu.trace());

    if json {
        let report = serde_json::json!({
            "program": path,
            "instructions": executed,
            "cycles": cpu.trace().len(),
            "x": cpu.x(),
            "state": cpu.state,
            "window": window,
            "signal_strength_sum": sum.as_ref().ok(),
            "error": sum.as_ref().err().map(|e| e.to_string()),
        });
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("❌ Failed to encode report: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("🔧 Running: {} ({} instructions)", path, program.len());

    if trace {
        println!();
        println!("━━━ Trace ━━━");
        for sample in cpu.trace() {
            println!("{}", sample);
        }
    }

    println!();
    println!("━━━ Result ━━━");
    println!("Instructions: {}", executed);
    println!("Cycles: {}", cpu.trace().len());
    println!("State: {:?}", cpu.state);
    println!("X: {}", cpu.x());

    match sum {
        Ok(sum) => println!("Signal strength sum: {}", sum),
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

fn show_screen(path: &str, budget: Option<u64>) {
    use handheld::{Cpu, Crt, LoggingDevice};

    let program = load_or_exit(path);

    let mut cpu = Cpu::new();
    let mut device = LoggingDevice::new(Crt::new());
    match budget {
        Some(limit) => cpu.run_limited_on(&program, limit, &mut device),
        None => cpu.run_on(&program, &mut device),
    };

    println!("{}", device.inner());
}

fn list_program(path: &str) {
    let program = load_or_exit(path);
    print!("{}", handheld::listing(&program));
}

#[cfg(feature = "tui")]
fn debug_program(path: &str) {
    use handheld::tui::run_debugger;

    let program = load_or_exit(path);

    if program.is_empty() {
        eprintln!("❌ No instructions to execute");
        std::process::exit(1);
    }

    println!("🚀 Launching debugger...");

    if let Err(e) = run_debugger(program) {
        eprintln!("❌ Debugger error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "tui"))]
fn debug_program(_path: &str) {
    eprintln!("❌ Built without the `tui` feature");
    std::process::exit(1);
}

fn demo_example_program() {
    use handheld::{decode_program, signal_strength_sum, Cpu, Crt};

    println!("━━━ Example Program ━━━");
    println!();

    let program = match decode_program(EXAMPLE_PROGRAM) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let mut cpu = Cpu::new();
    let mut crt = Crt::new();
    cpu.run_on(&program, &mut crt);

    println!("{} instructions over {} cycles, X = {}", program.len(), cpu.trace().len(), cpu.x());
    if let Ok(sum) = signal_strength_sum(cpu.trace()) {
        println!("Signal strength sum: {}", sum);
    }
    println!();
    println!("{}", crt);
}

fn run_self_test() {
    use handheld::{decode_program, signal_strength_sum, Cpu, Crt, TraceSample};

    println!("━━━ Handheld Emulator Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;

    // Test 1: Small program trace
    print!("Small program trace... ");
    let ok = match decode_program("noop\naddx 3\naddx -5") {
        Ok(program) => {
            let mut cpu = Cpu::new();
            cpu.run(&program);
            let expected: Vec<TraceSample> = [(1u64, 1i64), (2, 2), (3, 3), (4, 16), (5, 20)]
                .into_iter()
                .map(TraceSample::from)
                .collect();
            cpu.x() == -1 && cpu.trace() == expected.as_slice()
        }
        Err(_) => false,
    };
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 2: Decode failure
    print!("Unknown instruction rejected... ");
    if decode_program("noop\nmul 5").is_err() {
        println!("✓");
        passed += 1;
    } else {
        println!("✗");
        failed += 1;
    }

    // Test 3: Signal strength sum
    print!("Example signal strength sum... ");
    let example = decode_program(EXAMPLE_PROGRAM);
    match &example {
        Ok(program) => {
            let mut cpu = Cpu::new();
            cpu.run(program);
            match signal_strength_sum(cpu.trace()) {
                Ok(13140) => { println!("✓"); passed += 1; }
                other => { println!("✗ (got {:?}, expected 13140)", other); failed += 1; }
            }
        }
        Err(e) => { println!("✗ ({})", e); failed += 1; }
    }

    // Test 4: CRT first row
    print!("Example CRT first row... ");
    match &example {
        Ok(program) => {
            let mut cpu = Cpu::new();
            let mut crt = Crt::new();
            cpu.run_on(program, &mut crt);
            if crt.row(0) == "##..##..##..##..##..##..##..##..##..##.." {
                println!("✓");
                passed += 1;
            } else {
                println!("✗ (got {})", crt.row(0));
                failed += 1;
            }
        }
        Err(e) => { println!("✗ ({})", e); failed += 1; }
    }

    // Test 5: Budgeted resume
    print!("Budgeted resume... ");
    match &example {
        Ok(program) => {
            let mut split = Cpu::new();
            split.run_limited(program, 1);
            split.run_limited(program, 1);
            let mut whole = Cpu::new();
            whole.run_limited(program, 2);
            if split.trace() == whole.trace() {
                println!("✓");
                passed += 1;
            } else {
                println!("✗");
                failed += 1;
            }
        }
        Err(e) => { println!("✗ ({})", e); failed += 1; }
    }

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}
