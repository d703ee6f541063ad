//! Progress reporting for the install stages

use crate::driver::Stage;
use colored::Colorize;

/// Receives stage transitions from the driver
pub trait Progress {
    /// Called once before the first stage
    fn intro(&mut self, _title: &str) {}

    fn start(&mut self, stage: Stage);

    fn finish(&mut self, stage: Stage, detail: Option<String>);

    fn skip(&mut self, stage: Stage, reason: &str);

    /// The stage failed; the error itself is reported by the caller
    fn fail(&mut self, stage: Stage);
}

impl<P: Progress + ?Sized> Progress for Box<P> {
    fn intro(&mut self, title: &str) {
        (**self).intro(title)
    }

    fn start(&mut self, stage: Stage) {
        (**self).start(stage)
    }

    fn finish(&mut self, stage: Stage, detail: Option<String>) {
        (**self).finish(stage, detail)
    }

    fn skip(&mut self, stage: Stage, reason: &str) {
        (**self).skip(stage, reason)
    }

    fn fail(&mut self, stage: Stage) {
        (**self).fail(stage)
    }
}

/// One colored line per stage
#[derive(Debug, Default)]
pub struct PlainProgress;

impl Progress for PlainProgress {
    fn intro(&mut self, title: &str) {
        println!("{}", title.cyan().bold());
    }

    fn start(&mut self, stage: Stage) {
        println!("  {} {}...", "->".blue(), stage.label());
    }

    fn finish(&mut self, _stage: Stage, detail: Option<String>) {
        if let Some(detail) = detail {
            println!("     {}", detail.dimmed());
        }
    }

    fn skip(&mut self, stage: Stage, reason: &str) {
        println!("  {} {} ({})", "-".dimmed(), stage.label().dimmed(), reason);
    }

    fn fail(&mut self, stage: Stage) {
        println!("  {} {}", "x".red(), stage.label());
    }
}

/// Discards everything
#[derive(Debug, Default)]
pub struct SilentProgress;

impl Progress for SilentProgress {
    fn start(&mut self, _stage: Stage) {}

    fn finish(&mut self, _stage: Stage, _detail: Option<String>) {}

    fn skip(&mut self, _stage: Stage, _reason: &str) {}

    fn fail(&mut self, _stage: Stage) {}
}

/// Records transitions, for tests
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub events: Vec<(Stage, &'static str)>,
}

impl Progress for RecordingProgress {
    fn start(&mut self, stage: Stage) {
        self.events.push((stage, "start"));
    }

    fn finish(&mut self, stage: Stage, _detail: Option<String>) {
        self.events.push((stage, "finish"));
    }

    fn skip(&mut self, stage: Stage, _reason: &str) {
        self.events.push((stage, "skip"));
    }

    fn fail(&mut self, stage: Stage) {
        self.events.push((stage, "fail"));
    }
}
