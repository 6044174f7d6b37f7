use std::time::Duration;

use shared::{
    corpus::QUOTES,
    domain::{CellIndex, Quote},
};

use crate::{config::Settings, random::RandomSource};

pub const STAGE_COUNT: usize = 5;

/// One step of a fetch run. Each stage shows its message for one sampled
/// delay before the run moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    StartingFetch,
    LoggingIn,
    BrowsingPage,
    SelectingQuote,
    Selected,
}

impl Stage {
    pub const ALL: [Stage; STAGE_COUNT] = [
        Stage::StartingFetch,
        Stage::LoggingIn,
        Stage::BrowsingPage,
        Stage::SelectingQuote,
        Stage::Selected,
    ];

    /// Zero-based position in [`Stage::ALL`].
    pub fn position(self) -> usize {
        match self {
            Stage::StartingFetch => 0,
            Stage::LoggingIn => 1,
            Stage::BrowsingPage => 2,
            Stage::SelectingQuote => 3,
            Stage::Selected => 4,
        }
    }

    /// One-based stage number as reported in events.
    pub fn number(self) -> u8 {
        self.position() as u8 + 1
    }

    pub fn next(self) -> Option<Stage> {
        Stage::ALL.get(self.position() + 1).copied()
    }

    pub fn message(self, page: u32) -> String {
        match self {
            Stage::StartingFetch => "Starting fetch...".to_string(),
            Stage::LoggingIn => "Logging in...".to_string(),
            Stage::BrowsingPage => format!("Browsing to page {page}..."),
            Stage::SelectingQuote => "Selecting random quote...".to_string(),
            Stage::Selected => "Selected.".to_string(),
        }
    }
}

/// Everything random about a run, drawn once when the run is launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub page: u32,
    pub delays: [Duration; STAGE_COUNT],
    pub quote: Quote,
}

impl RunPlan {
    pub fn draw(random: &mut dyn RandomSource, settings: &Settings) -> Self {
        let page = random.page_number(settings.pages());
        let (min, max) = settings.stage_delay_bounds();
        let delays = std::array::from_fn(|_| random.stage_delay(min, max));
        let position = random.quote_index(QUOTES.len()).min(QUOTES.len() - 1);
        Self {
            page,
            delays,
            quote: QUOTES[position].to_quote(),
        }
    }

    pub fn total_delay(&self) -> Duration {
        self.delays.iter().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running(Stage),
    Done,
}

/// A single run for one cell, advanced one stage at a time.
#[derive(Debug, Clone)]
pub struct FetchRun {
    index: CellIndex,
    plan: RunPlan,
    state: RunState,
}

impl FetchRun {
    pub fn new(index: CellIndex, plan: RunPlan) -> Self {
        Self {
            index,
            plan,
            state: RunState::Running(Stage::StartingFetch),
        }
    }

    pub fn index(&self) -> CellIndex {
        self.index
    }

    pub fn plan(&self) -> &RunPlan {
        &self.plan
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// The active stage with its message and hold time, or `None` once done.
    pub fn current(&self) -> Option<(Stage, String, Duration)> {
        match self.state {
            RunState::Running(stage) => Some((
                stage,
                stage.message(self.plan.page),
                self.plan.delays[stage.position()],
            )),
            RunState::Done => None,
        }
    }

    pub fn advance(&mut self) {
        self.state = match self.state {
            RunState::Running(stage) => stage.next().map_or(RunState::Done, RunState::Running),
            RunState::Done => RunState::Done,
        };
    }
}

#[cfg(test)]
#[path = "tests/stage_tests.rs"]
mod tests;
