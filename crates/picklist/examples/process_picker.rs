//! Process Picker Example
//!
//! A complete chooser stack over a plain terminal host:
//! - the model serves a (fake) process table
//! - the host renders it with println! and reads the pick from stdin
//! - the controller runs the modal lifecycle around both
//!
//! Run with: cargo run -p picklist --example process_picker

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::Mutex;

use picklist::{
    Capabilities, ChooserController, ChooserModel, ChooserSession, ChooserSpec, Column,
    ColumnFormat, EmbeddedBacking, HookId, HostError, HostResult, ModalOutcome, OpenReply,
    PopupHook, PopupHookRegistry, ScriptTimeout, TimeoutValue, WidgetId, WindowHost,
};
use slotmap::SlotMap;

struct Process {
    pid: u32,
    name: &'static str,
    memory_kb: u64,
}

struct ProcessModel {
    processes: Vec<Process>,
}

impl ProcessModel {
    fn sample() -> Arc<Self> {
        Arc::new(Self {
            processes: vec![
                Process { pid: 1, name: "init", memory_kb: 1_024 },
                Process { pid: 412, name: "sshd", memory_kb: 5_632 },
                Process { pid: 833, name: "postgres", memory_kb: 196_608 },
                Process { pid: 901, name: "nginx", memory_kb: 12_288 },
                Process { pid: 1207, name: "redis-server", memory_kb: 65_536 },
                Process { pid: 2215, name: "firefox", memory_kb: 1_548_288 },
                Process { pid: 3042, name: "cargo", memory_kb: 131_072 },
            ],
        })
    }
}

impl ChooserModel for ProcessModel {
    fn row_count(&self) -> usize {
        self.processes.len()
    }

    fn render_row(&self, index: usize) -> Vec<String> {
        let process = &self.processes[index];
        vec![
            process.pid.to_string(),
            process.name.to_string(),
            format!("{} KiB", process.memory_kb),
        ]
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::INIT | Capabilities::CLOSE
    }

    fn on_init(&self) {
        println!("[model] process table ready ({} entries)", self.processes.len());
    }

    fn on_close(&self) {
        println!("[model] chooser closed");
    }
}

/// Modal-only host: the "window" is stdout, the "user" is stdin.
struct TerminalHost {
    widgets: Mutex<SlotMap<WidgetId, ()>>,
    hooks: PopupHookRegistry,
    timeout: Mutex<TimeoutValue>,
}

impl TerminalHost {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            widgets: Mutex::new(SlotMap::with_key()),
            hooks: PopupHookRegistry::new(),
            timeout: Mutex::new(TimeoutValue::from_raw(60)),
        })
    }

    fn render_table(session: &ChooserSession) {
        let columns = session.spec().columns();
        let selected = session.initial_selection();

        println!();
        println!("{}", session.spec().title());
        print!("      ");
        for column in columns {
            print!("{:<width$}  ", column.label, width = column.width as usize);
        }
        println!();

        for row in 0..session.row_count() {
            let marker = if selected.contains(&row) { '>' } else { ' ' };
            print!("{marker} [{row}] ");
            for (cell, column) in session.render_row(row).iter().zip(columns) {
                print!("{cell:<width$}  ", width = column.width as usize);
            }
            println!();
        }
        println!();
    }

    /// Blocks on stdin until the user picks a row or cancels.
    fn read_pick(row_count: usize) -> OpenReply {
        let stdin = io::stdin();
        loop {
            print!("row number (empty cancels): ");
            io::stdout().flush().expect("Failed to flush stdout");

            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                // EOF: treat a closed stdin as a cancel.
                Ok(0) => return OpenReply::NoSelection,
                Ok(_) => {}
                Err(err) => {
                    eprintln!("stdin error: {err}");
                    return OpenReply::NoSelection;
                }
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                return OpenReply::NoSelection;
            }
            match trimmed.parse::<usize>() {
                Ok(row) if row < row_count => return OpenReply::Chosen(row),
                _ => println!("no such row, try again"),
            }
        }
    }
}

impl ScriptTimeout for TerminalHost {
    fn suspend_timeout(&self) -> TimeoutValue {
        let mut current = self.timeout.lock().expect("timeout lock");
        let previous = *current;
        *current = TimeoutValue::DISABLED;
        previous
    }

    fn restore_timeout(&self, previous: TimeoutValue) {
        *self.timeout.lock().expect("timeout lock") = previous;
    }
}

impl WindowHost for TerminalHost {
    fn open_or_activate(&self, session: &Arc<ChooserSession>) -> HostResult<OpenReply> {
        if !session.is_modal() {
            return Err(HostError::Backend(
                "this host only supports modal display".into(),
            ));
        }

        session.initialize();
        if session.row_count() == 0 {
            return Ok(OpenReply::Empty);
        }

        let widget = self.widgets.lock().expect("widget lock").insert(());
        session.attach_widget(widget);

        Self::render_table(session);
        let reply = Self::read_pick(session.row_count());

        self.widgets.lock().expect("widget lock").remove(widget);
        session.notify_closed();
        Ok(reply)
    }

    fn activate(&self, _widget: WidgetId) -> HostResult<()> {
        Ok(())
    }

    fn refresh(&self, _widget: WidgetId) -> HostResult<()> {
        Ok(())
    }

    fn close(&self, widget: WidgetId) {
        self.widgets.lock().expect("widget lock").remove(widget);
    }

    fn create_embedded(&self, _session: &Arc<ChooserSession>) -> HostResult<WidgetId> {
        Err(HostError::Backend("embedding needs a form host".into()))
    }

    fn create_embedded_backing(
        &self,
        _session: &Arc<ChooserSession>,
    ) -> HostResult<Box<dyn EmbeddedBacking>> {
        Err(HostError::Backend("embedding needs a form host".into()))
    }

    fn register_popup_hook(&self, hook: Arc<dyn PopupHook>) -> HookId {
        self.hooks.register(hook)
    }

    fn unregister_popup_hook(&self, hook: HookId) {
        self.hooks.unregister(hook);
    }
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("╔══════════════════════════════════════════╗");
    println!("║         Picklist Process Picker          ║");
    println!("╠══════════════════════════════════════════╣");
    println!("║ Type a row number to attach, or press    ║");
    println!("║ Enter on an empty line to cancel.        ║");
    println!("╚══════════════════════════════════════════╝");

    let spec = ChooserSpec::builder("Attach to process")
        .with_column(Column::new("PID", 6).with_format(ColumnFormat::Decimal))
        .with_column(Column::new("Name", 16))
        .with_column(Column::new("Memory", 12))
        .build()
        .expect("Failed to build chooser spec");

    let model = ProcessModel::sample();
    let host = TerminalHost::new();
    let mut controller = ChooserController::new(spec, model, host);

    match controller.show_modal().expect("Failed to show chooser") {
        ModalOutcome::Chosen(row) => println!("attached to row {row}"),
        ModalOutcome::NoSelection => println!("nothing picked"),
        ModalOutcome::Empty => println!("no processes to show"),
    }
}
