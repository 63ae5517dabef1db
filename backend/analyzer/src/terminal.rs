//! Terminal renderer, bars grow from 0 to their score over a second.

use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use scores::style::DEFAULT_STYLE;
use tokio::time::sleep;

use crate::{
    html::LOADING_LABEL,
    state::{AnalyzerState, Observer},
    view::{View, render},
};

pub const ANIMATION: Duration = Duration::from_millis(1000);
const FRAMES: u32 = 40;
const BAR_LENGTH: u64 = 100;

pub struct TerminalObserver {
    multi_progress: MultiProgress,
    spinner: Option<ProgressBar>,
    /// Bars on screen with the position they grow towards.
    bars: Vec<(ProgressBar, u64)>,
    drawn: Option<View>,
    animation: Duration,
}

impl TerminalObserver {
    pub fn new(animate: bool) -> Self {
        Self::with_target(ProgressDrawTarget::stderr(), animate)
    }

    pub fn with_target(target: ProgressDrawTarget, animate: bool) -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(target),
            spinner: None,
            bars: Vec::new(),
            drawn: None,
            animation: if animate { ANIMATION } else { Duration::ZERO },
        }
    }

    /// Runs the bars up to their scores and leaves them on screen.
    pub async fn settle(&mut self) {
        if !self.animation.is_zero() {
            let frame = self.animation / FRAMES;

            for step in 1..=FRAMES {
                sleep(frame).await;

                let progress = ease_out(f64::from(step) / f64::from(FRAMES));
                for (bar, target) in &self.bars {
                    bar.set_position((*target as f64 * progress).round() as u64);
                }
            }
        }

        for (bar, target) in self.bars.drain(..) {
            bar.set_position(target);
            bar.finish();
        }
    }

    fn draw(&mut self, view: &View) {
        for (bar, _) in self.bars.drain(..) {
            self.multi_progress.remove(&bar);
        }

        let overall = self.add_bar("Overall Score", DEFAULT_STYLE.color, view.ring.label());
        self.bars.push((overall, position(view.ring.overall)));

        for bar in &view.bars {
            let line = self.add_bar(&capitalize(&bar.name), bar.style.color, bar.label());
            self.bars.push((line, position(bar.value)));
        }

        if self.animation.is_zero() {
            for (bar, target) in &self.bars {
                bar.set_position(*target);
            }
        }
    }

    fn add_bar(&self, name: &str, color: &str, label: String) -> ProgressBar {
        let template = format!("{{prefix:>16.bold}} [{{bar:40.{color}/white}}] {{msg}}");
        let style = ProgressStyle::with_template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏ ");

        let bar = self.multi_progress.add(ProgressBar::new(BAR_LENGTH));
        bar.set_style(style);
        bar.set_prefix(name.to_string());
        bar.set_message(label);
        bar
    }
}

impl Observer for TerminalObserver {
    fn changed(&mut self, state: &AnalyzerState) {
        if state.loading {
            if self.spinner.is_none() {
                let spinner = self.multi_progress.add(ProgressBar::new_spinner());
                spinner.set_message(LOADING_LABEL);
                spinner.enable_steady_tick(Duration::from_millis(100));
                self.spinner = Some(spinner);
            }
            return;
        }

        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }

        if let Some(scores) = &state.scores {
            let view = render(scores);
            if self.drawn.as_ref() != Some(&view) {
                self.draw(&view);
                self.drawn = Some(view);
            }
        }
    }

    fn alert(&mut self, message: &str) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }

        self.multi_progress.suspend(|| eprintln!("{message}"));
    }
}

/// Bars can only show 0..=100, the label keeps the real value.
fn position(value: f64) -> u64 {
    value.clamp(0.0, BAR_LENGTH as f64) as u64
}

fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Upper cases the first letter of every word.
fn capitalize(name: &str) -> String {
    let mut capitalized = String::with_capacity(name.len());
    let mut word_start = true;

    for c in name.chars() {
        if word_start {
            capitalized.extend(c.to_uppercase());
        } else {
            capitalized.push(c);
        }
        word_start = c.is_whitespace();
    }

    capitalized
}
