//! Interactive text menus over an [`Engine`].
//!
//! Input is read one line per answer. End of input leaves every menu and
//! ends the session cleanly, so scripted sessions need no trailing `0`.

use std::io::{BufRead, Write};
use std::ops::ControlFlow;

use tracing::warn;

use crate::command::{Command, Outcome, RejectReason};
use crate::display;
use crate::engine::Engine;
use crate::error::ConsoleError;
use crate::report::ReportKind;
use crate::search::{SearchMethod, SearchQuery};
use crate::sort::SortAlgorithm;

const NO_DATA: &str = "No data available! Please generate or load data first.";

/// `Break` once input is exhausted.
type Flow = ControlFlow<()>;

/// One answer read from the input.
enum Entry {
    Number(u32),
    Other,
    Closed,
}

/// Menu-driven shell.
pub struct Console<R, W> {
    engine: Engine,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(engine: Engine, input: R, output: W) -> Self {
        Self {
            engine,
            input,
            output,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Give back the engine and the output sink.
    pub fn into_parts(self) -> (Engine, W) {
        (self.engine, self.output)
    }

    /// Run the main menu until the user exits or input ends.
    pub fn run(&mut self) -> Result<(), ConsoleError> {
        loop {
            self.write_main_menu()?;
            let flow = match self.read_entry()? {
                Entry::Closed => Flow::Break(()),
                Entry::Number(0) => {
                    writeln!(self.output, "\n  Thank you for using OSOMS!\n")?;
                    Flow::Break(())
                }
                Entry::Number(1) => self.display_menu()?,
                Entry::Number(2) => self.sorting_menu()?,
                Entry::Number(3) => self.searching_menu()?,
                Entry::Number(4) => self.reports_menu()?,
                Entry::Number(5) => self.run_and_show(Command::Reload)?,
                Entry::Number(6) => self.run_and_show(Command::Save)?,
                _ => self.invalid_choice()?,
            };
            if flow.is_break() {
                break;
            }
        }
        self.output.flush()?;
        Ok(())
    }

    // ========================================================================
    // Menus
    // ========================================================================

    fn write_main_menu(&mut self) -> Result<(), ConsoleError> {
        display::write_title(&mut self.output, "MAIN MENU")?;
        let out = &mut self.output;
        writeln!(out, "  [1] Display Orders")?;
        writeln!(out, "  [2] Sorting")?;
        writeln!(out, "  [3] Searching")?;
        writeln!(out, "  [4] Reports")?;
        writeln!(out, "  [5] Load Orders From File")?;
        writeln!(out, "  [6] Save Orders To File")?;
        writeln!(out, "  [0] Exit")?;
        writeln!(out, "------------------------------------------------------------")?;
        writeln!(out, "  Total Orders in System: {}", self.engine.order_count())?;
        writeln!(out, "============================================================")?;
        Ok(())
    }

    fn write_submenu(&mut self, title: &str, items: &[&str]) -> Result<(), ConsoleError> {
        display::write_title(&mut self.output, title)?;
        for (i, item) in items.iter().enumerate() {
            writeln!(self.output, "  [{}] {}", i + 1, item)?;
        }
        writeln!(self.output, "  [0] Back to Main Menu")?;
        writeln!(self.output, "============================================================")?;
        Ok(())
    }

    /// Shared guard for the menus that operate on loaded data.
    fn require_data(&mut self) -> Result<Option<Flow>, ConsoleError> {
        if self.engine.order_count() > 0 {
            return Ok(None);
        }
        writeln!(self.output, "\n  {}", NO_DATA)?;
        Ok(Some(self.pause()?))
    }

    fn display_menu(&mut self) -> Result<Flow, ConsoleError> {
        if let Some(flow) = self.require_data()? {
            return Ok(flow);
        }
        let limit = self.engine.config().display_limit;
        let unsorted = format!("Display First {} Unsorted Orders", limit);
        let sorted = format!("Display First {} Sorted Orders", limit);
        self.write_submenu("DISPLAY ORDERS MENU", &[&unsorted, &sorted])?;
        match self.read_entry()? {
            Entry::Closed => Ok(Flow::Break(())),
            Entry::Number(0) => Ok(Flow::Continue(())),
            Entry::Number(1) => self.run_and_show(Command::List { sorted: false }),
            Entry::Number(2) => self.run_and_show(Command::List { sorted: true }),
            _ => self.invalid_choice(),
        }
    }

    fn sorting_menu(&mut self) -> Result<Flow, ConsoleError> {
        if let Some(flow) = self.require_data()? {
            return Ok(flow);
        }
        loop {
            self.write_submenu(
                "SORTING MENU",
                &["Insertion Sort", "Quick Sort", "Compare Both Algorithms"],
            )?;
            let flow = match self.read_entry()? {
                Entry::Closed => return Ok(Flow::Break(())),
                Entry::Number(0) => return Ok(Flow::Continue(())),
                Entry::Number(1) => self.run_and_show(Command::Sort(SortAlgorithm::Insertion))?,
                Entry::Number(2) => self.run_and_show(Command::Sort(SortAlgorithm::Quick))?,
                Entry::Number(3) => self.run_and_show(Command::CompareSorts)?,
                _ => self.invalid_choice()?,
            };
            if flow.is_break() {
                return Ok(flow);
            }
        }
    }

    fn searching_menu(&mut self) -> Result<Flow, ConsoleError> {
        if let Some(flow) = self.require_data()? {
            return Ok(flow);
        }
        loop {
            self.write_submenu(
                "SEARCHING MENU",
                &[
                    "Linear Search",
                    "Binary Search",
                    "Optimized Linear Search (Sentinel)",
                ],
            )?;
            let method = match self.read_entry()? {
                Entry::Closed => return Ok(Flow::Break(())),
                Entry::Number(0) => return Ok(Flow::Continue(())),
                Entry::Number(1) => SearchMethod::Linear,
                Entry::Number(2) => SearchMethod::Binary,
                Entry::Number(3) => SearchMethod::Sentinel,
                _ => {
                    if self.invalid_choice()?.is_break() {
                        return Ok(Flow::Break(()));
                    }
                    continue;
                }
            };
            if self.search_prompt(method)?.is_break() {
                return Ok(Flow::Break(()));
            }
        }
    }

    fn search_prompt(&mut self, method: SearchMethod) -> Result<Flow, ConsoleError> {
        display::write_title(&mut self.output, &method.name().to_uppercase())?;

        let order_id = match self.prompt("Enter Order ID: ")? {
            None => return Ok(Flow::Break(())),
            Some(text) => match text.trim().parse::<u64>() {
                Ok(id) => id,
                Err(_) => {
                    writeln!(self.output, "\n  Invalid Order ID!")?;
                    return self.pause();
                }
            },
        };
        let customer_name = match self.prompt("Enter Customer Name: ")? {
            None => return Ok(Flow::Break(())),
            Some(text) => text,
        };

        let query = SearchQuery::new(order_id, customer_name);
        self.run_and_show(Command::Search(method, query))
    }

    fn reports_menu(&mut self) -> Result<Flow, ConsoleError> {
        if let Some(flow) = self.require_data()? {
            return Ok(flow);
        }
        loop {
            self.write_submenu(
                "REPORTS MENU",
                &[
                    "Calculate Total Sales (Per Order)",
                    "Total Quantity Sold (By Product)",
                    "Sales Analysis (By Category)",
                    "Top Customers (By Spending)",
                ],
            )?;
            let flow = match self.read_entry()? {
                Entry::Closed => return Ok(Flow::Break(())),
                Entry::Number(0) => return Ok(Flow::Continue(())),
                Entry::Number(1) => self.run_and_show(Command::Report(ReportKind::Sales))?,
                Entry::Number(2) => self.run_and_show(Command::Report(ReportKind::Products))?,
                Entry::Number(3) => self.run_and_show(Command::Report(ReportKind::Categories))?,
                Entry::Number(4) => self.run_and_show(Command::Report(ReportKind::Customers))?,
                _ => self.invalid_choice()?,
            };
            if flow.is_break() {
                return Ok(flow);
            }
        }
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Run a command, print its outcome and wait for Enter.
    ///
    /// Load and save failures are shown to the user; the session goes on.
    fn run_and_show(&mut self, cmd: Command) -> Result<Flow, ConsoleError> {
        let touches_file = matches!(cmd, Command::Reload | Command::Save);
        match self.engine.process_command(cmd) {
            Ok(outcome) => self.show(&outcome)?,
            Err(err) if touches_file => {
                warn!(error = %err, "file operation failed");
                writeln!(self.output, "\n  Error: {}", err)?;
            }
            Err(err) => return Err(err.into()),
        }
        self.pause()
    }

    fn show(&mut self, outcome: &Outcome) -> Result<(), ConsoleError> {
        let out = &mut self.output;
        let records = self.engine.store().records();
        let limit = self.engine.config().display_limit;

        match outcome {
            Outcome::Listed { presort, .. } => {
                let heading = if presort.is_some() { "SORTED" } else { "UNSORTED" };
                display::write_record_table(out, heading, records, limit)?;
            }
            Outcome::Sorted(stats) => {
                display::write_sort_stats(out, stats)?;
                display::write_record_table(out, "SORTED", records, limit)?;
            }
            Outcome::Compared(comparison) => display::write_comparison(out, comparison)?,
            Outcome::Searched(hit) => display::write_search(out, hit)?,
            Outcome::Reported(report) => display::write_report(out, report)?,
            Outcome::Loaded { count, skipped } => {
                writeln!(
                    out,
                    "\n  Loaded {} orders from {}",
                    count,
                    self.engine.config().data_file.display()
                )?;
                if !skipped.is_empty() {
                    writeln!(out, "  Skipped {} malformed line(s)", skipped.len())?;
                    for line in skipped {
                        writeln!(out, "    line {}: {}", line.line, line.reason)?;
                    }
                }
            }
            Outcome::Saved { count } => writeln!(
                out,
                "\n  Saved {} orders to {}",
                count,
                self.engine.config().data_file.display()
            )?,
            Outcome::Rejected(RejectReason::NoData) => writeln!(out, "\n  {}", NO_DATA)?,
        }
        Ok(())
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Next input line without its terminator, `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>, ConsoleError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>, ConsoleError> {
        write!(self.output, "  {}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_entry(&mut self) -> Result<Entry, ConsoleError> {
        Ok(match self.prompt("Enter choice: ")? {
            None => Entry::Closed,
            Some(text) => match text.trim().parse() {
                Ok(n) => Entry::Number(n),
                Err(_) => Entry::Other,
            },
        })
    }

    fn invalid_choice(&mut self) -> Result<Flow, ConsoleError> {
        writeln!(self.output, "\n  Invalid choice!")?;
        self.pause()
    }

    fn pause(&mut self) -> Result<Flow, ConsoleError> {
        write!(self.output, "\n  Press Enter to continue...")?;
        self.output.flush()?;
        Ok(match self.read_line()? {
            Some(_) => Flow::Continue(()),
            None => Flow::Break(()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::order;

    fn session(pairs: &[(u64, i64)], script: &str) -> (Engine, String) {
        let mut engine = Engine::default();
        for &(id, total) in pairs {
            engine.store_mut().push(order(id, total)).unwrap();
        }
        let mut console = Console::new(engine, script.as_bytes(), Vec::new());
        console.run().unwrap();
        let (engine, out) = console.into_parts();
        (engine, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_exit_and_eof() {
        let (_, text) = session(&[], "0\n");
        assert!(text.contains("MAIN MENU"));
        assert!(text.contains("Thank you for using OSOMS!"));

        let (_, text) = session(&[], "");
        assert!(!text.contains("Thank you"));
    }

    #[test]
    fn test_invalid_choice() {
        let (_, text) = session(&[], "9\n\nabc\n\n0\n");
        assert_eq!(text.matches("Invalid choice!").count(), 2);
    }

    #[test]
    fn test_menus_need_data() {
        let (_, text) = session(&[], "2\n\n0\n");
        assert!(text.contains(NO_DATA));
        assert!(!text.contains("SORTING MENU"));
    }

    #[test]
    fn test_sort_from_menu() {
        let (engine, text) = session(&[(1, 50), (2, 150), (3, 100)], "2\n2\n\n0\n0\n");
        assert!(text.contains("QUICK SORT RESULTS"));
        assert!(text.contains("Number of Swaps: 2"));
        assert_eq!(engine.store().order_ids(), vec![2, 3, 1]);
    }

    #[test]
    fn test_search_from_menu() {
        let script = "3\n1\n2\nCustomer 2\n\n1\n2\nSomeone Else\n\n0\n0\n";
        let (_, text) = session(&[(1, 50), (2, 150)], script);
        assert!(text.contains("Status: FOUND"));
        assert!(text.contains("Position: 2"));
        assert!(text.contains("Status: NOT FOUND"));
    }

    #[test]
    fn test_search_rejects_bad_id() {
        let (_, text) = session(&[(1, 50)], "3\n1\nxyz\n\n0\n0\n");
        assert!(text.contains("Invalid Order ID!"));
    }

    #[test]
    fn test_display_sorted() {
        let (engine, text) = session(&[(1, 50), (2, 150)], "1\n2\n\n0\n");
        assert!(text.contains("SORTED ORDERS (First 2)"));
        assert_eq!(engine.store().order_ids(), vec![2, 1]);
    }

    #[test]
    fn test_report_from_menu() {
        let (_, text) = session(&[(1, 50), (2, 150)], "4\n1\n\n4\n\n0\n0\n");
        assert!(text.contains("TOTAL SALES REPORT"));
        assert!(text.contains("TOP CUSTOMERS BY SPENDING"));
    }

    #[test]
    fn test_load_failure_keeps_session() {
        let config = crate::config::Config {
            data_file: std::env::temp_dir().join(format!("osoms-console-missing-{}.txt", std::process::id())),
            ..Default::default()
        };
        let mut console = Console::new(Engine::new(config), "5\n\n0\n".as_bytes(), Vec::new());
        console.run().unwrap();
        let (_, out) = console.into_parts();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Error: I/O error"));
        assert!(text.contains("Thank you for using OSOMS!"));
    }
}
