use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use osoms::persist::DEFAULT_DATA_FILE;
use osoms::{synth, Command, Config, Engine, OrderRecord, Outcome, RecordStore};

#[derive(Parser, Debug)]
#[command(name = "osoms-tui", about = "Browse and sort orders in the terminal")]
struct Args {
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Use this many synthetic orders instead of the data file
    #[arg(long)]
    synthetic: Option<usize>,
}

/// Last thing the engine reported, one line per entry.
#[derive(Default)]
struct StatusPanel {
    lines: Vec<String>,
}

impl StatusPanel {
    fn record(&mut self, outcome: &Outcome) {
        self.lines = match outcome {
            Outcome::Sorted(stats) => vec![
                format!("{}: {:.2} ms", stats.algorithm, stats.elapsed_ms()),
                format!("Swaps: {}", stats.moves),
                format!("Worst case: {}", stats.algorithm.worst_case()),
            ],
            Outcome::Compared(comparison) => {
                let (winner, pct) = comparison.winner();
                vec![
                    format!(
                        "Insertion Sort: {:.2} ms, {} swaps",
                        comparison.insertion.elapsed_ms(),
                        comparison.insertion.moves
                    ),
                    format!(
                        "Quick Sort: {:.2} ms, {} swaps",
                        comparison.quick.elapsed_ms(),
                        comparison.quick.moves
                    ),
                    format!("{} is faster by {:.2}%", winner, pct),
                ]
            }
            Outcome::Loaded { count, skipped } => {
                vec![format!("Loaded {} orders ({} skipped)", count, skipped.len())]
            }
            Outcome::Rejected(_) => vec!["No data loaded".to_string()],
            other => vec![format!("{:?}", other)],
        };
    }
}

// Fixed-width row, matching the console table
fn render_rows(records: &[OrderRecord], offset: usize, height: usize) -> String {
    let mut out = String::new();
    for (i, r) in records.iter().enumerate().skip(offset).take(height) {
        let customer: String = r.customer_name.chars().take(20).collect();
        let product: String = r.product_name.chars().take(20).collect();
        out.push_str(&format!(
            "{:>5} {:>7}  {:<20} {:<20} {:>4} {:>12.2}\n",
            i + 1,
            r.order_id,
            customer,
            product,
            r.quantity,
            r.total_amount
        ));
    }
    out
}

fn open_engine(args: &Args) -> Result<Engine, Box<dyn std::error::Error>> {
    let config = Config {
        data_file: args.data_file.clone(),
        ..Config::default()
    };
    match args.synthetic {
        Some(count) => {
            let records = synth::generate(42, count.min(config.max_records));
            let store = RecordStore::from_records(records, config.max_records)?;
            Ok(Engine::with_store(store, config)?)
        }
        None => Ok(Engine::open(config)?),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let mut engine = open_engine(&args)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut status = StatusPanel::default();
    let mut offset = 0usize;
    let mut page = 20usize;

    loop {
        // Handle input
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                let cmd = match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char('i') => Some(Command::Sort(osoms::SortAlgorithm::Insertion)),
                    KeyCode::Char('s') => Some(Command::Sort(osoms::SortAlgorithm::Quick)),
                    KeyCode::Char('c') => Some(Command::CompareSorts),
                    KeyCode::Char('r') if args.synthetic.is_none() => Some(Command::Reload),
                    KeyCode::Down => {
                        offset = (offset + 1).min(engine.order_count().saturating_sub(1));
                        None
                    }
                    KeyCode::Up => {
                        offset = offset.saturating_sub(1);
                        None
                    }
                    KeyCode::PageDown => {
                        offset = (offset + page).min(engine.order_count().saturating_sub(1));
                        None
                    }
                    KeyCode::PageUp => {
                        offset = offset.saturating_sub(page);
                        None
                    }
                    _ => None,
                };
                if let Some(cmd) = cmd {
                    match engine.process_command(cmd) {
                        Ok(outcome) => status.record(&outcome),
                        Err(err) => status.lines = vec![format!("Error: {}", err)],
                    }
                    offset = 0;
                }
            }
        }

        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints(
                    [
                        Constraint::Length(3), // Header
                        Constraint::Min(10),   // Records
                        Constraint::Length(6), // Stats
                    ]
                    .as_ref(),
                )
                .split(f.size());

            // 1. Header
            let header = Block::default().borders(Borders::ALL).title("OSOMS Order Browser");
            let title = Paragraph::new("i insertion | s quick | c compare | r reload | arrows scroll | q quit")
                .block(header)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(title, chunks[0]);

            // 2. Records
            page = chunks[1].height.saturating_sub(2) as usize;
            let rows = render_rows(engine.store().records(), offset, page);
            let records_title = format!(
                "Orders {}-{} of {}",
                (offset + 1).min(engine.order_count()),
                (offset + page).min(engine.order_count()),
                engine.order_count()
            );
            let records_widget = Paragraph::new(rows)
                .block(Block::default().borders(Borders::ALL).title(records_title));
            f.render_widget(records_widget, chunks[1]);

            // 3. Stats
            let stats_block = Paragraph::new(status.lines.join("\n"))
                .block(Block::default().borders(Borders::ALL).title("Last Operation"))
                .style(Style::default().fg(Color::Yellow));
            f.render_widget(stats_block, chunks[2]);
        })?;
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    Ok(())
}
