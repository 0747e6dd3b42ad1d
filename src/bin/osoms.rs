//! `osoms` - order management console and one-shot commands.

use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use osoms::persist::{self, DEFAULT_DATA_FILE};
use osoms::{
    display, synth, Command, Config, Console, Engine, LoadPolicy, Outcome, RejectReason,
    ReportKind, SearchMethod, SearchQuery, SortAlgorithm, MAX_RECORDS,
};

#[derive(Parser, Debug)]
#[command(name = "osoms", version, about = "Order sorting and management console")]
struct Cli {
    /// Order file read on start and written on save
    #[arg(long, global = true, default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Records shown by list commands
    #[arg(long, global = true, default_value_t = osoms::config::DISPLAY_LIMIT)]
    display_limit: usize,

    /// Maximum records held in memory
    #[arg(long, global = true, default_value_t = MAX_RECORDS)]
    max_records: usize,

    /// Skip malformed lines instead of failing the load
    #[arg(long, global = true)]
    skip_malformed: bool,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Interactive menu (default)
    Menu,
    /// Print the first records
    List {
        /// Quick sort by revenue first
        #[arg(long)]
        sorted: bool,
    },
    /// Sort by revenue and print statistics
    Sort {
        #[arg(value_enum)]
        algorithm: AlgorithmArg,
        /// Write the sorted order back to the data file
        #[arg(long)]
        save: bool,
    },
    /// Run both sorts on the same starting order
    Compare,
    /// Look up an order by ID and customer name
    Search(SearchArgs),
    /// Print an aggregate report
    Report {
        #[arg(value_enum)]
        kind: ReportArg,
    },
    /// Write synthetic orders to the data file
    Generate {
        #[arg(long)]
        count: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[arg(value_enum)]
    method: MethodArg,
    #[arg(long)]
    order_id: u64,
    #[arg(long)]
    customer: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AlgorithmArg {
    Insertion,
    Quick,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MethodArg {
    Linear,
    Binary,
    Sentinel,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ReportArg {
    Sales,
    Products,
    Categories,
    Customers,
}

impl From<AlgorithmArg> for SortAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Insertion => SortAlgorithm::Insertion,
            AlgorithmArg::Quick => SortAlgorithm::Quick,
        }
    }
}

impl From<MethodArg> for SearchMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Linear => SearchMethod::Linear,
            MethodArg::Binary => SearchMethod::Binary,
            MethodArg::Sentinel => SearchMethod::Sentinel,
        }
    }
}

impl From<ReportArg> for ReportKind {
    fn from(arg: ReportArg) -> Self {
        match arg {
            ReportArg::Sales => ReportKind::Sales,
            ReportArg::Products => ReportKind::Products,
            ReportArg::Categories => ReportKind::Categories,
            ReportArg::Customers => ReportKind::Customers,
        }
    }
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            data_file: self.data_file.clone(),
            display_limit: self.display_limit,
            max_records: self.max_records,
            load_policy: if self.skip_malformed {
                LoadPolicy::SkipMalformed
            } else {
                LoadPolicy::Strict
            },
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "osoms=warn",
        1 => "osoms=info",
        _ => "osoms=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = cli.config();

    let cmds = match cli.command.unwrap_or(Cmd::Menu) {
        Cmd::Menu => {
            let engine = Engine::open(config)?;
            let stdin = io::stdin();
            let mut console = Console::new(engine, stdin.lock(), io::stdout().lock());
            console.run()?;
            return Ok(());
        }
        Cmd::Generate { count, seed } => {
            let records = synth::generate(seed, count.min(config.max_records));
            let written = persist::save_all(&config.data_file, &records)?;
            info!(written, seed, "generated synthetic orders");
            println!("Wrote {} orders to {}", written, config.data_file.display());
            return Ok(());
        }
        Cmd::List { sorted } => vec![Command::List { sorted }],
        Cmd::Sort { algorithm, save } => {
            let mut cmds = vec![Command::Sort(algorithm.into())];
            if save {
                cmds.push(Command::Save);
            }
            cmds
        }
        Cmd::Compare => vec![Command::CompareSorts],
        Cmd::Search(args) => vec![Command::Search(
            args.method.into(),
            SearchQuery::new(args.order_id, args.customer),
        )],
        Cmd::Report { kind } => vec![Command::Report(kind.into())],
    };

    let mut engine = Engine::open(config)?;
    let mut out = io::stdout().lock();
    for cmd in cmds {
        let outcome = engine.process_command(cmd)?;
        print_outcome(&mut out, &engine, &outcome)?;
        if matches!(outcome, Outcome::Rejected(_)) {
            break;
        }
    }
    out.flush()?;
    Ok(())
}

fn print_outcome<W: Write>(out: &mut W, engine: &Engine, outcome: &Outcome) -> io::Result<()> {
    let records = engine.store().records();
    let limit = engine.config().display_limit;
    match outcome {
        Outcome::Listed { presort, .. } => {
            let heading = if presort.is_some() { "SORTED" } else { "UNSORTED" };
            display::write_record_table(out, heading, records, limit)
        }
        Outcome::Sorted(stats) => display::write_sort_stats(out, stats),
        Outcome::Compared(comparison) => display::write_comparison(out, comparison),
        Outcome::Searched(hit) => display::write_search(out, hit),
        Outcome::Reported(report) => display::write_report(out, report),
        Outcome::Loaded { count, .. } => writeln!(out, "Loaded {} orders", count),
        Outcome::Saved { count } => writeln!(
            out,
            "Saved {} orders to {}",
            count,
            engine.config().data_file.display()
        ),
        Outcome::Rejected(RejectReason::NoData) => writeln!(
            out,
            "No orders loaded from {}",
            engine.config().data_file.display()
        ),
    }
}
