//! The demo application: one list of labels filling the terminal.
//!
//! The list lays its items out in columns of one-line cells and scrolls
//! horizontally. The app is the list's host: it forwards terminal input,
//! keeps the horizontal adjustment in step with the terminal width and runs
//! the autoscroll timers the list asks for.

use std::time::{Duration, Instant};

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
    MouseEventKind,
};
use hlist::prelude::*;
use log::{debug, info};

use crate::error::DemoResult;
use crate::settings::DemoSettings;
use crate::terminal::{Span, Style, Terminal, fit};

/// Presses closer together than this count as a double or triple click.
const MULTI_CLICK_INTERVAL: Duration = Duration::from_millis(400);

/// Poll timeout when no timer is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

const WORDS: &[&str] = &[
    "apple", "birch", "cedar", "delta", "ember", "fjord", "grove", "harbor", "iris", "juniper",
    "kestrel", "lantern", "meadow", "nectar", "orchid", "pebble", "quartz", "river", "saffron",
    "thistle", "umber", "violet", "willow", "xenon", "yarrow", "zephyr", "東京", "café",
];

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    deadline: Instant,
    axis: Axis,
    token: TimerToken,
}

#[derive(Debug, Clone, Copy)]
struct LastPress {
    at: Instant,
    position: Point,
    kind: PressKind,
}

pub struct App {
    list: ListContainer<String>,
    keybinds: Keybinds,
    settings: DemoSettings,
    timers: Vec<PendingTimer>,
    last_press: Option<LastPress>,
    shift_held: bool,
    captured: bool,
    /// Size of the area the list is drawn in, excluding the status line.
    viewport: Size,
    next_label: usize,
    running: bool,
}

impl App {
    pub fn new(settings: DemoSettings, width: u16, height: u16) -> Self {
        let mut list = ListContainer::with_config(settings.list_config());
        for index in 0..settings.items {
            let mut item = Item::new(label(index)).with_size(i32::from(settings.column_width), 1);
            if settings.insensitive.contains(&index) {
                item = item.insensitive();
            }
            list.push(item);
        }

        let mut app = Self {
            list,
            keybinds: default_keybinds(),
            next_label: settings.items,
            settings,
            timers: Vec::new(),
            last_press: None,
            shift_held: false,
            captured: false,
            viewport: Size::new(1, 1),
            running: true,
        };

        app.list.map();
        app.resize(width, height);
        app.list.focus(FocusDirection::Forward);
        app.drain_events(Instant::now());
        info!(
            "demo started: {} items, {:?} mode",
            app.list.len(),
            app.list.selection_mode()
        );
        app
    }

    pub fn list(&self) -> &ListContainer<String> {
        &self.list
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run until the user quits.
    pub fn run(&mut self, terminal: &mut Terminal) -> DemoResult<()> {
        let (width, height) = terminal.size()?;
        self.resize(width, height);

        while self.is_running() {
            terminal.draw(&self.spans())?;

            let timeout = self.next_timeout(Instant::now()).unwrap_or(IDLE_POLL);
            for event in terminal.poll(Some(timeout))? {
                self.handle_event(event, Instant::now());
            }
            self.fire_due_timers(Instant::now());
        }

        let removed = self.list.shutdown();
        info!("demo finished, released {} items", removed.len());
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    pub fn handle_event(&mut self, event: CrosstermEvent, now: Instant) {
        match event {
            CrosstermEvent::Key(key) => self.on_key(key),
            CrosstermEvent::Mouse(mouse) => self.on_mouse(mouse, now),
            CrosstermEvent::Resize(width, height) => self.resize(width, height),
            CrosstermEvent::FocusLost => self.list.focus_out(),
            _ => {}
        }
        self.drain_events(now);
    }

    fn on_key(&mut self, key: KeyEvent) {
        let phase = match key.kind {
            KeyEventKind::Release => KeyPhase::Release,
            KeyEventKind::Press | KeyEventKind::Repeat => KeyPhase::Press,
        };

        if phase == KeyPhase::Press && self.handle_app_key(key) {
            return;
        }

        let code = Key::from(key.code);
        let modifiers = Modifiers::from(key.modifiers);

        // Terminals without release reporting never send a bare Shift, so
        // the first key without the modifier stands in for the release.
        if code == Key::Shift {
            self.shift_held = phase == KeyPhase::Press;
        } else if modifiers.shift {
            self.shift_held = true;
        } else if self.shift_held {
            self.shift_held = false;
            self.list
                .handle_key(&self.keybinds, KeyPhase::Release, KeyCombo::key(Key::Shift));
        }

        let combo = KeyCombo::new(code, modifiers);
        if self.list.handle_key(&self.keybinds, phase, combo) {
            self.follow_focus();
        }
    }

    /// Keys the demo handles itself. Returns true if the key was consumed.
    fn handle_app_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') if !ctrl => self.running = false,
            KeyCode::Char('c') if ctrl => self.running = false,
            KeyCode::F(n @ 1..=4) => {
                let mode = match n {
                    1 => SelectionMode::Single,
                    2 => SelectionMode::Browse,
                    3 => SelectionMode::Multiple,
                    _ => SelectionMode::Extended,
                };
                info!("selection mode -> {:?}", mode);
                self.list.set_selection_mode(mode);
            }
            KeyCode::Delete => self.remove_focused(),
            KeyCode::Insert => self.insert_after_focus(),
            _ => return false,
        }
        true
    }

    fn on_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let modifiers = Modifiers::from(mouse.modifiers);
        let position = self.to_list(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(button) => {
                if i32::from(mouse.row) >= self.viewport.height {
                    return;
                }
                let kind = self.press_kind(position, now);
                self.list.pointer_press(position, button.into(), modifiers, kind);
            }
            MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                if self.captured {
                    self.list.pointer_motion(position);
                }
            }
            MouseEventKind::Up(button) => {
                self.list.pointer_release(position, button.into(), modifiers);
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
                self.list.scroll_horizontal(ScrollType::StepForward, 0.0);
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
                self.list.scroll_horizontal(ScrollType::StepBackward, 0.0);
            }
        }
    }

    /// Count rapid presses at the same spot as double and triple clicks.
    fn press_kind(&mut self, position: Point, now: Instant) -> PressKind {
        let kind = match self.last_press {
            Some(last)
                if last.position == position
                    && now.duration_since(last.at) <= MULTI_CLICK_INTERVAL =>
            {
                match last.kind {
                    PressKind::Initial => PressKind::Double,
                    PressKind::Double => PressKind::Triple,
                    PressKind::Triple => PressKind::Initial,
                }
            }
            _ => PressKind::Initial,
        };
        self.last_press = Some(LastPress {
            at: now,
            position,
            kind,
        });
        kind
    }

    /// Screen cell to list coordinates.
    fn to_list(&self, column: u16, row: u16) -> Point {
        let offset = self.list.hadjustment().map_or(0.0, |adj| adj.value);
        Point::new(i32::from(column) + offset as i32, i32::from(row))
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    fn remove_focused(&mut self) {
        let Some(focus) = self.list.focus_child() else {
            return;
        };
        for item in self.list.remove_items(&[focus]) {
            debug!("removed {:?}", item.data());
        }
        self.follow_focus();
    }

    fn insert_after_focus(&mut self) {
        let position = self
            .list
            .focus_child()
            .and_then(|id| self.list.child_position(id))
            .map_or(-1, |row| row as isize + 1);
        let text = label(self.next_label);
        self.next_label += 1;
        debug!("inserting {:?} at {}", text, position);

        let item = Item::new(text).with_size(i32::from(self.settings.column_width), 1);
        self.list.insert_items(vec![item], position);
    }

    // -------------------------------------------------------------------------
    // Host duties
    // -------------------------------------------------------------------------

    /// React to everything the list asked for since the last call.
    fn drain_events(&mut self, now: Instant) {
        for event in self.list.take_events() {
            match event {
                ListEvent::TimerScheduled { axis, token, delay } => {
                    self.timers.push(PendingTimer {
                        deadline: now + delay,
                        axis,
                        token,
                    });
                }
                ListEvent::TimerCancelled { token, .. } => {
                    self.timers.retain(|timer| timer.token != token);
                }
                ListEvent::InputCaptured(_) => self.captured = true,
                ListEvent::InputReleased(_) => self.captured = false,
                ListEvent::ResizeRequested => self.relayout(),
                ListEvent::SelectionChanged
                | ListEvent::ItemStateChanged { .. }
                | ListEvent::RedrawRequested(_)
                | ListEvent::FocusRequested(_)
                | ListEvent::AdjustmentChanged { .. } => {}
            }
        }
    }

    /// Fire every timer whose deadline has passed.
    pub fn fire_due_timers(&mut self, now: Instant) {
        let (due, pending): (Vec<_>, Vec<_>) = self
            .timers
            .drain(..)
            .partition(|timer| timer.deadline <= now);
        self.timers = pending;

        for timer in due {
            self.list.timer_fired(timer.axis, timer.token);
        }
        self.drain_events(now);
    }

    /// Time until the next timer is due.
    pub fn next_timeout(&self, now: Instant) -> Option<Duration> {
        self.timers
            .iter()
            .map(|timer| timer.deadline.saturating_duration_since(now))
            .min()
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Size::new(
            i32::from(width).max(1),
            (i32::from(height) - 1).max(1),
        );
        self.relayout();
    }

    /// Lay the list out for the current viewport and resize the horizontal
    /// scroll range to fit.
    fn relayout(&mut self) {
        let viewport = self.viewport;
        self.list
            .size_allocate(Rect::new(0, 0, viewport.width, viewport.height));
        let content = self.list.content_size();
        let width = content.width.max(viewport.width);
        self.list.size_allocate(Rect::new(0, 0, width, viewport.height));

        let old = self.list.hadjustment().map_or(0.0, |adj| adj.value);
        let page = f64::from(viewport.width);
        let mut adj = Adjustment::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(self.settings.column_width.max(1)),
            (page / 2.0).max(1.0),
            page,
        );
        adj.set_value(old);
        self.list.set_hadjustment(Some(adj));
    }

    /// Scroll horizontally so the focus child is in view.
    fn follow_focus(&mut self) {
        let Some(focus) = self.list.focus_child() else {
            return;
        };
        let Some(alloc) = self.list.item(focus).map(Item::allocation) else {
            return;
        };
        if let Some(adj) = self.list.adjustment_mut(Axis::Horizontal) {
            adj.clamp_page(f64::from(alloc.left()), f64::from(alloc.right()));
        }
    }

    // -------------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------------

    pub fn spans(&self) -> Vec<Span> {
        let offset = self.list.hadjustment().map_or(0.0, |adj| adj.value) as i32;
        let mut spans = Vec::with_capacity(self.list.len() + 1);

        for item in self.list.children() {
            let alloc = item.allocation();
            let x = alloc.left() - offset;
            if x < 0 || x >= self.viewport.width || alloc.top() >= self.viewport.height {
                continue;
            }

            let focused = self.list.item_has_focus(item.id());
            let style = Style {
                bold: focused && self.list.add_mode(),
                dim: !item.is_sensitive(),
                reverse: item.is_selected(),
                underline: focused,
            };
            let width = usize::try_from(alloc.width).unwrap_or(0);
            spans.push(Span {
                x: x as u16,
                y: alloc.top() as u16,
                text: fit(&format!(" {}", item.data()), width),
                style,
            });
        }

        spans.push(Span {
            x: 0,
            y: self.viewport.height as u16,
            text: self.status_line(),
            style: Style {
                reverse: true,
                ..Style::default()
            },
        });
        spans
    }

    fn status_line(&self) -> String {
        let list = self.list();
        let focus = list
            .focus_child()
            .and_then(|id| list.child_position(id))
            .map_or_else(|| "-".to_string(), |row| row.to_string());
        let mut flags = String::new();
        if list.add_mode() {
            flags.push_str(" ADD");
        }
        if list.anchor().is_some() {
            flags.push_str(" RANGE");
        }
        if list.has_grab() {
            flags.push_str(" DRAG");
        }

        let status = format!(
            " {:?} | {}/{} selected | focus {}{} | F1-F4 mode  Ins/Del  q quit",
            list.selection_mode(),
            list.selection().len(),
            list.len(),
            focus,
            flags,
        );
        fit(&status, usize::try_from(self.viewport.width).unwrap_or(0))
    }
}

fn label(index: usize) -> String {
    format!("{:>3} {}", index, WORDS[index % WORDS.len()])
}
