use crate::aggregation::Aggregation;
use crate::form::{EntryForm, FormError};
use crate::map::MapView;
use crate::model::{Measurement, Site};
use crate::scheduler::Scheduler;
use crate::ui;
use ratatui::layout::{Position, Rect};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Deferred UI work
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    /// End the cool-down of the form at this index
    Unlock(usize),
}

/// Application state
pub struct App {
    pub map: MapView,
    pub aggregation: Aggregation,
    pub forms: Vec<EntryForm>,
    /// Index of the form receiving key input
    pub focused: usize,
    pub should_quit: bool,
    /// Tooltip of the marker under the mouse
    pub tooltip: Option<String>,
    /// Last message for the status bar
    pub status: Option<String>,
    scheduler: Scheduler<Task>,
    cooldown: Duration,
    /// Inner map area in terminal cells, known after the first layout
    map_area: Option<Rect>,
    needs_redraw: bool,
}

impl App {
    pub fn new(map: MapView, aggregation: Aggregation, sites: Vec<Site>, cooldown: Duration) -> Self {
        Self {
            map,
            aggregation,
            forms: sites.into_iter().map(EntryForm::new).collect(),
            focused: 0,
            should_quit: false,
            tooltip: None,
            status: None,
            scheduler: Scheduler::new(),
            cooldown,
            map_area: None,
            needs_redraw: true,
        }
    }

    /// Re-run layout for a new terminal size and refit the map
    pub fn resize(&mut self, width: u16, height: u16) {
        let area = ui::map_area(Rect::new(0, 0, width, height));
        self.map.resize(area.width as usize, area.height as usize);
        self.map_area = Some(area);
        self.tooltip = None;
        self.needs_redraw = true;
    }

    pub fn map_area(&self) -> Option<Rect> {
        self.map_area
    }

    /// Track the mouse for marker tooltips
    pub fn hover(&mut self, col: u16, row: u16) {
        let tooltip = self.map_area.and_then(|area| {
            if area.contains(Position::new(col, row)) {
                self.map.tooltip_at_cell(col - area.x, row - area.y)
            } else {
                None
            }
        });
        if tooltip != self.tooltip {
            self.tooltip = tooltip;
            self.needs_redraw = true;
        }
    }

    pub fn focused_form(&self) -> Option<&EntryForm> {
        self.forms.get(self.focused)
    }

    pub fn focused_form_mut(&mut self) -> Option<&mut EntryForm> {
        self.needs_redraw = true;
        self.forms.get_mut(self.focused)
    }

    pub fn focus_next(&mut self) {
        if !self.forms.is_empty() {
            self.focused = (self.focused + 1) % self.forms.len();
            self.needs_redraw = true;
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.forms.is_empty() {
            self.focused = (self.focused + self.forms.len() - 1) % self.forms.len();
            self.needs_redraw = true;
        }
    }

    /// Submit the focused form: on success the measurement goes to the
    /// aggregation, the marker is updated and the form's cool-down starts.
    pub fn submit_focused(&mut self, now: Instant) -> Result<(), FormError> {
        let idx = self.focused;
        let Some(form) = self.forms.get_mut(idx) else {
            return Ok(());
        };
        self.needs_redraw = true;

        let values = match form.submit() {
            Ok(values) => values,
            Err(e) => {
                self.status = Some(e.to_string());
                return Err(e);
            }
        };

        let measurement = Measurement::new(form.site().clone(), values);
        let update = self.aggregation.receive(measurement);
        self.map.set_marker(&update.site, update.total);

        let task = self.scheduler.schedule(now + self.cooldown, Task::Unlock(idx));
        form.set_unlock_task(task);
        self.status = Some(format!("{} sent ({}ppp total)", update.site.name, update.total));
        Ok(())
    }

    /// Run every task due at `now`
    pub fn tick(&mut self, now: Instant) {
        for task in self.scheduler.take_due(now) {
            match task {
                Task::Unlock(idx) => {
                    if let Some(form) = self.forms.get_mut(idx) {
                        form.unlock();
                        debug!(site = %form.site().name, "form unlocked");
                    }
                }
            }
            self.needs_redraw = true;
        }

        // Locked forms show a countdown
        if self.forms.iter().any(EntryForm::is_locked) {
            self.needs_redraw = true;
        }
    }

    /// Time left until the form at `idx` is editable again
    pub fn cooldown_remaining(&self, idx: usize, now: Instant) -> Option<Duration> {
        let task = self.forms.get(idx)?.unlock_task()?;
        let due = self.scheduler.due_of(task)?;
        Some(due.saturating_duration_since(now))
    }

    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Consume the re-render trigger (UI changes or marker updates)
    pub fn take_redraw(&mut self) -> bool {
        let map_dirty = self.map.take_dirty();
        std::mem::take(&mut self.needs_redraw) || map_dirty
    }

    pub fn quit(&mut self) {
        info!("quit requested");
        self.should_quit = true;
    }
}
