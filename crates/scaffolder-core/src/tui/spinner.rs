//! Spinner per install stage

use crate::driver::Stage;
use crate::progress::Progress;

/// Shows a cliclack spinner while each stage runs
#[derive(Default)]
pub struct SpinnerProgress {
    spinner: Option<cliclack::ProgressBar>,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Progress for SpinnerProgress {
    fn intro(&mut self, title: &str) {
        let _ = cliclack::intro(title);
    }

    fn start(&mut self, stage: Stage) {
        let spinner = cliclack::spinner();
        spinner.start(format!("{}...", stage.label()));
        self.spinner = Some(spinner);
    }

    fn finish(&mut self, stage: Stage, detail: Option<String>) {
        if let Some(spinner) = self.spinner.take() {
            match detail {
                Some(detail) => spinner.stop(format!("{}: {}", stage.label(), detail)),
                None => spinner.stop(stage.label()),
            }
        }
    }

    fn skip(&mut self, stage: Stage, reason: &str) {
        let _ = cliclack::log::remark(format!("{} skipped ({})", stage.label(), reason));
    }

    fn fail(&mut self, stage: Stage) {
        match self.spinner.take() {
            Some(spinner) => spinner.error(format!("{} failed", stage.label())),
            None => {
                let _ = cliclack::log::error(format!("{} failed", stage.label()));
            }
        }
    }
}
