//! TUI rendering traits for schedsync types.
//!
//! Extension traits that add colored terminal rendering to schedsync-core
//! types using owo_colors.

use owo_colors::OwoColorize;
use schedsync_core::event::Event;
use schedsync_core::normalize::{NormalizedExport, RowFailure};
use schedsync_core::remote::Remote;
use schedsync_core::sync::{ActionKind, ActionOutcome, Reconciliation, SyncReport};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Rendering that can expand into a full listing.
pub trait VerboseRender {
    fn render(&self, verbose: bool) -> String;
}

impl Render for ActionKind {
    fn render(&self) -> String {
        let symbol = self.symbol();
        match self {
            ActionKind::Insert => symbol.green().to_string(),
            ActionKind::Delete => symbol.red().to_string(),
        }
    }
}

fn colorize(kind: ActionKind, text: &str) -> String {
    match kind {
        ActionKind::Insert => text.green().to_string(),
        ActionKind::Delete => text.red().to_string(),
    }
}

fn render_action(kind: ActionKind, event: &Event) -> String {
    format!(
        "{} {} {}",
        kind.render(),
        colorize(kind, &event.to_string()),
        event.render_time().dimmed()
    )
}

impl Render for Event {
    fn render(&self) -> String {
        format!("{} {}", self, self.render_time().dimmed())
    }
}

impl Render for Remote {
    fn render(&self) -> String {
        match self.calendar_id() {
            Some(id) => format!("📅 {} ({})", self.provider.name(), id),
            None => format!("📅 {}", self.provider.name()),
        }
    }
}

impl Render for RowFailure {
    fn render(&self) -> String {
        format!("line {}: {}", self.line, self.error)
    }
}

impl Render for ActionOutcome {
    fn render(&self) -> String {
        let line = render_action(self.kind, &self.event);
        match &self.error {
            Some(error) => format!("{}\n      {}", line, error.red()),
            None => line,
        }
    }
}

impl Render for SyncReport {
    fn render(&self) -> String {
        let summary = format!(
            "Synced: {} inserted, {} deleted",
            self.inserted(),
            self.deleted()
        );

        match self.failed() {
            0 => summary,
            n => format!("{}, {}", summary, format!("{} failed", n).red()),
        }
    }
}

/// Show counts instead of individual events above this many
const COMPACT_THRESHOLD: usize = 5;

fn render_action_list(kind: ActionKind, events: &[Event], verbose: bool, lines: &mut Vec<String>) {
    if events.is_empty() {
        return;
    }

    if verbose || events.len() <= COMPACT_THRESHOLD {
        for event in events {
            lines.push(format!("   {}", render_action(kind, event)));
        }
    } else {
        let label = match kind {
            ActionKind::Insert => format!("({} new {})", events.len(), pluralize(events.len())),
            ActionKind::Delete => format!("({} stale {})", events.len(), pluralize(events.len())),
        };
        lines.push(format!("   {} {}", kind.render(), colorize(kind, &label)));
    }
}

fn pluralize(count: usize) -> &'static str {
    if count == 1 { "event" } else { "events" }
}

impl VerboseRender for Reconciliation {
    fn render(&self, verbose: bool) -> String {
        if self.is_empty() {
            return "   No changes".dimmed().to_string();
        }

        let mut lines = Vec::new();
        render_action_list(ActionKind::Delete, &self.to_delete, verbose, &mut lines);
        render_action_list(ActionKind::Insert, &self.to_insert, verbose, &mut lines);
        lines.join("\n")
    }
}

impl VerboseRender for NormalizedExport {
    fn render(&self, verbose: bool) -> String {
        let mut lines = Vec::new();

        if verbose || self.events.len() <= COMPACT_THRESHOLD {
            for event in &self.events {
                lines.push(format!("   {}", event.render()));
            }
        }

        lines.push(format!(
            "   {} {} read",
            self.events.len(),
            pluralize(self.events.len())
        ));

        if !self.failures.is_empty() {
            lines.push(
                format!("   {} skipped:", pluralize_rows(self.failures.len()))
                    .yellow()
                    .to_string(),
            );
            for failure in &self.failures {
                lines.push(format!("      {}", failure.render().yellow()));
            }
        }

        lines.join("\n")
    }
}

fn pluralize_rows(count: usize) -> String {
    if count == 1 {
        "1 row".to_string()
    } else {
        format!("{} rows", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn all_day(summary: &str, d: u32) -> Event {
        let start = NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        Event::all_day(summary, start, start.succ_opt().unwrap())
    }

    #[test]
    fn compacts_long_plans_unless_verbose() {
        let plan = Reconciliation {
            to_insert: (1..=6).map(|d| all_day("New", d)).collect(),
            to_delete: vec![all_day("Old", 20).with_id("o1")],
        };

        let compact = plan.render(false);
        assert_eq!(compact.lines().count(), 2);
        assert!(compact.contains("(6 new events)"));
        assert!(compact.contains("Old"));

        let full = plan.render(true);
        assert_eq!(full.lines().count(), 7);
    }

    #[test]
    fn empty_plan_says_so() {
        assert!(Reconciliation::default().render(false).contains("No changes"));
    }
}
