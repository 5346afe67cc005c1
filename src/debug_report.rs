use slotlist::{EventRecord, Field, Source, ThreadExtractionVerbose, ThreadOutcome};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(source: &str, out: &ThreadExtractionVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    let title = out.details.title.as_deref().unwrap_or("<no title>");
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Thread: \"{}\"", title), ansi::CYAN)));
    println!("   {}", palette.dim(source));

    match &out.outcome {
        ThreadOutcome::Event(record) => {
            println!("\n{}", palette.paint("━━━ Event ━━━", ansi::GRAY));
            print_record(record, out, &palette);

            println!("\n{}", palette.paint("━━━ Roster ━━━", ansi::GRAY));
            print_roster(record, &palette);
        }
        ThreadOutcome::NotAnEvent { .. } => {
            println!("\n{}", palette.paint("Not an event thread, skipped.", ansi::YELLOW));
        }
        ThreadOutcome::Unreadable => {
            println!("\n{}", palette.paint("No thread title found, nothing extracted.", ansi::YELLOW));
        }
    }

    println!("\n{}", palette.paint("━━━ Diagnostics ━━━", ansi::GRAY));
    if out.diagnostics.is_empty() {
        println!("{}", palette.dim("  None"));
    }
    for diagnostic in &out.diagnostics {
        println!(
            "  {} {} {}",
            palette.paint(format!("{:?}", diagnostic.kind), ansi::YELLOW),
            palette.dim("│"),
            diagnostic
        );
    }

    // Timing
    let metrics = &out.details.metrics;
    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Layout: {}  │  Fields: {}  │  Roster: {}  │  Reconcile: {}",
        palette.paint(format!("{:?}", metrics.total), ansi::GREEN),
        palette.dim(format!("{:?}", metrics.layout)),
        palette.paint(format!("{:?}", metrics.fields), ansi::CYAN),
        palette.paint(format!("{:?}", metrics.roster), ansi::CYAN),
        palette.dim(format!("{:?}", metrics.reconcile)),
    );
    println!();
}

fn print_record(record: &EventRecord, out: &ThreadExtractionVerbose, palette: &ansi::Palette) {
    let or_dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
    let rows = [
        (Field::Name, record.name.clone()),
        (Field::Category, record.category.to_string()),
        (Field::Size, or_dash(record.capacity.map(|c| c.to_string()))),
        (Field::Date, or_dash(record.date.map(|d| d.to_string()))),
        (Field::Time, or_dash(record.start_time.map(|t| t.format("%H:%M").to_string()))),
        (Field::Map, record.map.clone()),
        (Field::Creator, record.creator.clone()),
        (Field::ThreadId, or_dash(record.thread_id.map(|id| id.to_string()))),
        (Field::PostId, or_dash(record.post_id.map(|id| id.to_string()))),
    ];

    for (field, value) in rows {
        let source = out.details.trace.iter().find(|t| t.field == field).map(|t| t.source);
        println!(
            "  {:<10} {}  {}",
            palette.paint(field.as_str(), ansi::BLUE),
            palette.bold(palette.paint(value, ansi::GREEN)),
            source.map(|s| fmt_source(s, palette)).unwrap_or_default(),
        );
    }
}

fn print_roster(record: &EventRecord, palette: &ansi::Palette) {
    let Some(roster) = &record.roster else {
        println!("{}", palette.dim("  No slot list"));
        return;
    };

    for slot in &roster.slots {
        let mut line = format!(
            "  {} {} {} {}",
            palette.paint(format!("#{:<3}", slot.key), ansi::GRAY),
            palette.paint(format!("{:<8}", slot.role.as_str()), ansi::BLUE),
            palette.bold(&slot.player),
            palette.paint(slot.status.to_string(), ansi::YELLOW),
        );
        if let Some(raw) = &slot.raw_role {
            line.push_str(&format!(" {}", palette.dim(format!("({raw})"))));
        }
        if slot.unconfirmed {
            line.push_str(&format!(" {}", palette.dim("unconfirmed")));
        }
        println!("{line}");
    }

    if !roster.reserve.is_empty() {
        println!("  {}", palette.paint("Reserve:", ansi::CYAN));
        for entry in &roster.reserve {
            println!("    {} {}", palette.bold(&entry.player), palette.paint(entry.status.to_string(), ansi::YELLOW));
        }
    }
}

fn fmt_source(source: Source, palette: &ansi::Palette) -> String {
    match source {
        Source::Fallback => palette.paint("fallback", ansi::YELLOW),
        other => palette.dim(other.to_string()),
    }
}
