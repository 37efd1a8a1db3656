use std::fmt;

use log::{debug, info};

use crate::Millis;
use crate::config::Timing;
use crate::sequencer::timer::TimerGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Show the first `chars` characters of `line`.
    Reveal { line: usize, chars: usize },
    /// Clear the text and start typing `line` (or finish).
    Advance { line: usize },
    Complete,
}

/// Types lines one character at a time, holds each finished line, then
/// clears it and moves on. Completes once after the last line.
pub struct Typewriter {
    lines: Vec<String>,
    char_interval: Millis,
    line_hold: Millis,
    final_pause: Millis,
    timers: Option<TimerGroup<Step>>,
    line: usize,
    text: String,
    complete: bool,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl Typewriter {
    pub fn new(lines: Vec<String>, timing: &Timing) -> Self {
        Self {
            lines,
            char_interval: timing.char_interval_ms,
            line_hold: timing.line_hold_ms,
            final_pause: timing.final_pause_ms,
            timers: None,
            line: 0,
            text: String::new(),
            complete: false,
            on_complete: None,
        }
    }

    /// Callback fired exactly once, when the sequence completes or is skipped.
    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Begin typing at `now`. A typewriter runs once; later calls are ignored.
    pub fn start(&mut self, now: Millis) {
        if self.timers.is_some() {
            debug!("typewriter already started");
            return;
        }
        let mut timers = TimerGroup::new(now);
        self.schedule_line(&mut timers, 0);
        self.timers = Some(timers);
    }

    pub fn advance_to(&mut self, now: Millis) {
        let Some(mut timers) = self.timers.take() else {
            return;
        };
        while let Some((_, step)) = timers.pop_due(now) {
            match step {
                Step::Reveal { line, chars } => {
                    let full = &self.lines[line];
                    let end = full.char_indices().nth(chars).map_or(full.len(), |(i, _)| i);
                    self.text.clear();
                    self.text.push_str(&full[..end]);
                    if end == full.len() {
                        timers.schedule(self.line_hold, Step::Advance { line: line + 1 });
                    } else {
                        timers.schedule(
                            self.char_interval,
                            Step::Reveal {
                                line,
                                chars: chars + 1,
                            },
                        );
                    }
                }
                Step::Advance { line } => {
                    self.text.clear();
                    self.line = line;
                    self.schedule_line(&mut timers, line);
                }
                Step::Complete => self.finish(),
            }
        }
        timers.settle(now);
        self.timers = Some(timers);
    }

    /// Jump straight to completion, cancelling every pending step.
    pub fn skip(&mut self) {
        self.dispose();
        self.text.clear();
        self.finish();
    }

    /// Cancel every pending step. The typewriter never resumes.
    pub fn dispose(&mut self) {
        if let Some(timers) = &mut self.timers {
            timers.dispose();
        } else {
            self.timers = Some(disposed_group());
        }
    }

    /// Currently displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Index of the line being typed.
    pub fn line_index(&self) -> usize {
        self.line
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn is_running(&self) -> bool {
        self.timers.as_ref().is_some_and(|t| !t.is_idle())
    }

    fn schedule_line(&self, timers: &mut TimerGroup<Step>, line: usize) {
        match self.lines.get(line) {
            None => {
                timers.schedule(self.final_pause, Step::Complete);
            }
            Some(text) if text.is_empty() => {
                timers.schedule(self.line_hold, Step::Advance { line: line + 1 });
            }
            Some(_) => {
                timers.schedule(self.char_interval, Step::Reveal { line, chars: 1 });
            }
        }
    }

    fn finish(&mut self) {
        if self.complete {
            return;
        }
        self.complete = true;
        info!("intro complete after {} line(s)", self.line);
        if let Some(callback) = self.on_complete.take() {
            callback();
        }
    }
}

fn disposed_group() -> TimerGroup<Step> {
    let mut group = TimerGroup::new(0);
    group.dispose();
    group
}

impl fmt::Debug for Typewriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typewriter")
            .field("line", &self.line)
            .field("text", &self.text)
            .field("complete", &self.complete)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn typewriter(lines: &[&str]) -> (Typewriter, Rc<Cell<u32>>) {
        let fired = Rc::new(Cell::new(0));
        let f = Rc::clone(&fired);
        let tw = Typewriter::new(
            lines.iter().map(|l| (*l).to_string()).collect(),
            &Timing::default(),
        )
        .on_complete(move || f.set(f.get() + 1));
        (tw, fired)
    }

    #[test]
    fn types_holds_clears_then_completes() {
        let (mut tw, fired) = typewriter(&["Hi"]);
        tw.start(0);

        tw.advance_to(50);
        assert_eq!(tw.text(), "H");
        tw.advance_to(100);
        assert_eq!(tw.text(), "Hi");

        tw.advance_to(2599);
        assert_eq!(tw.text(), "Hi");
        tw.advance_to(2600);
        assert_eq!(tw.text(), "");
        assert_eq!(fired.get(), 0);

        tw.advance_to(3599);
        assert_eq!(fired.get(), 0);
        tw.advance_to(3600);
        assert_eq!(fired.get(), 1);
        assert!(tw.is_complete());

        tw.advance_to(100_000);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn one_large_tick_matches_fine_ticks() {
        let (mut coarse, coarse_fired) = typewriter(&["abc", "de"]);
        coarse.start(0);
        coarse.advance_to(150 + 2500 + 100);
        assert_eq!(coarse.text(), "de");
        assert_eq!(coarse.line_index(), 1);

        coarse.advance_to(2750 + 2500 + 1000);
        assert_eq!(coarse_fired.get(), 1);
    }

    #[test]
    fn multibyte_characters_reveal_whole() {
        let (mut tw, _) = typewriter(&["né✓"]);
        tw.start(0);
        tw.advance_to(100);
        assert_eq!(tw.text(), "né");
        tw.advance_to(150);
        assert_eq!(tw.text(), "né✓");
    }

    #[test]
    fn empty_line_is_held_then_skipped() {
        let (mut tw, fired) = typewriter(&["", "a"]);
        tw.start(0);
        tw.advance_to(2500);
        assert_eq!(tw.line_index(), 1);
        tw.advance_to(2550);
        assert_eq!(tw.text(), "a");
        tw.advance_to(2550 + 2500 + 1000);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn no_lines_completes_after_final_pause() {
        let (mut tw, fired) = typewriter(&[]);
        tw.start(10);
        tw.advance_to(1009);
        assert_eq!(fired.get(), 0);
        tw.advance_to(1010);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn skip_completes_once_and_cancels() {
        let (mut tw, fired) = typewriter(&["Hello"]);
        tw.start(0);
        tw.advance_to(120);
        tw.skip();
        assert_eq!(fired.get(), 1);
        assert_eq!(tw.text(), "");
        tw.advance_to(60_000);
        assert_eq!(tw.text(), "");
        tw.skip();
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn disposed_typewriter_stops_revealing() {
        let (mut tw, fired) = typewriter(&["Hello"]);
        tw.start(0);
        tw.advance_to(100);
        assert_eq!(tw.text(), "He");
        tw.dispose();
        tw.advance_to(60_000);
        assert_eq!(tw.text(), "He");
        assert_eq!(fired.get(), 0);
        assert!(!tw.is_running());
    }

    #[test]
    fn start_twice_does_not_restart() {
        let (mut tw, _) = typewriter(&["Hey"]);
        tw.start(0);
        tw.advance_to(100);
        tw.start(100);
        tw.advance_to(150);
        assert_eq!(tw.text(), "Hey");
    }
}
