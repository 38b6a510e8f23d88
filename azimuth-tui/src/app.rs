//! Dashboard page: owns the filter selection, the search text and the data
//! source, and renders one FilterSelector per filter group.

use std::io;

use azimuth_filters::option::FilterOption;
use azimuth_filters::query::{DatasetFilters, FilterGroupKind};
use azimuth_filters::selector::{
    EventResult, FilterSelector, FilterSelectorEvent, FilterSelectorProps, LineTarget,
    RenderedLine, render_group,
};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::settings::{Settings, SettingsError};
use crate::source::{DatasetSource, Loaded, Snapshot};
use crate::terminal::{Cell, ScreenLine, Terminal};
use crate::theme::Theme;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Lines above the group list: title, search, blank.
const HEADER_LINES: usize = 3;
/// Lines below the group list: blank, filters, key hints.
const FOOTER_LINES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search,
}

struct Group {
    kind: FilterGroupKind,
    selector: FilterSelector,
    /// `None` until the dataset has been loaded, or when it lacks the group.
    options: Option<Vec<FilterOption>>,
}

type Change = (FilterGroupKind, Vec<String>);

pub struct App {
    settings: Settings,
    theme: Theme,
    source: DatasetSource,
    groups: Vec<Group>,
    filters: DatasetFilters,
    changes: mpsc::UnboundedReceiver<Change>,
    search: String,
    mode: Mode,
    /// Index into the flattened group lines.
    focus: usize,
    status: Option<String>,
    dirty: bool,
    quit: bool,
}

impl App {
    pub fn new(settings: Settings, source: DatasetSource) -> Self {
        let (tx, changes) = mpsc::unbounded_channel();
        let groups = FilterGroupKind::ALL
            .into_iter()
            .map(|kind| {
                let tx = tx.clone();
                let selector = FilterSelector::with_policy(settings.pagination)
                    .on_change(move |values| {
                        let _ = tx.send((kind, values));
                    });
                Group {
                    kind,
                    selector,
                    options: None,
                }
            })
            .collect();

        Self {
            settings,
            theme: Theme::default(),
            source,
            groups,
            filters: DatasetFilters::new(),
            changes,
            search: String::new(),
            mode: Mode::Normal,
            focus: 0,
            status: None,
            dirty: true,
            quit: false,
        }
    }

    pub fn filters(&self) -> &DatasetFilters {
        &self.filters
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Load the dataset and process input until the user quits.
    pub async fn run(&mut self, terminal: &mut Terminal) -> Result<(), AppError> {
        let mut events = EventStream::new();
        self.reload();
        self.draw(terminal)?;

        while !self.should_quit() {
            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    }
                    Some(Ok(Event::Resize(..))) => self.dirty = true,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                Some(loaded) = self.source.recv() => self.on_loaded(loaded),
            }

            if self.needs_redraw() {
                self.draw(terminal)?;
            }
        }

        log::info!("quitting with filters {:?}", self.filters());
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Issue a new load request.
    fn reload(&mut self) {
        let generation = self.source.request();
        self.status = Some(format!("loading {}…", self.source.path().display()));
        self.dirty = true;
        log::info!("reload requested (generation {generation})");
    }

    fn on_loaded(&mut self, loaded: Loaded) {
        match self.source.accept(loaded) {
            Some(Ok(snapshot)) => self.apply_snapshot(&snapshot),
            Some(Err(e)) => {
                log::error!("failed to load dataset: {e}");
                self.status = Some(e.to_string());
            }
            None => return,
        }
        self.dirty = true;
    }

    /// Replace every group's options with the snapshot's.
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) {
        for group in &mut self.groups {
            group.options = snapshot.options(group.kind).map(<[FilterOption]>::to_vec);
        }
        self.status = None;
        self.clamp_focus();
        self.dirty = true;
        log::debug!("applied snapshot with {} groups", snapshot.groups.len());
    }

    /// Move selections reported by the selectors into the filter query.
    fn apply_changes(&mut self) {
        while let Ok((kind, values)) = self.changes.try_recv() {
            log::info!("{kind} filter set to {values:?}");
            self.filters.set_group(kind, values);
            self.dirty = true;
        }
    }

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    fn props<'a>(&'a self, group: &'a Group) -> FilterSelectorProps<'a> {
        let props = FilterSelectorProps::new(group.kind.label())
            .operator(self.settings.operator(group.kind))
            .max_selectable(self.settings.max_selectable(group.kind))
            .search(&self.search)
            .search_mode(self.settings.search_mode)
            .selected(self.filters.selected(group.kind))
            .loading(self.source.is_loading());
        match &group.options {
            Some(options) => props.options(options),
            None => props,
        }
    }

    /// Rendered lines of every group, tagged with the group index.
    fn group_lines(&self) -> Vec<(usize, RenderedLine)> {
        let render = self.settings.render_options();
        self.groups
            .iter()
            .enumerate()
            .flat_map(|(index, group)| {
                let view = group.selector.view(&self.props(group));
                render_group(&view, &render)
                    .into_iter()
                    .map(move |line| (index, line))
            })
            .collect()
    }

    fn focused(&self) -> Option<(usize, LineTarget)> {
        self.group_lines()
            .into_iter()
            .nth(self.focus)
            .map(|(index, line)| (index, line.target))
    }

    fn clamp_focus(&mut self) {
        let count = self.group_lines().len();
        self.focus = self.focus.min(count.saturating_sub(1));
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Search => self.handle_search_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Up => self.move_focus(-1),
            KeyCode::Down => self.move_focus(1),
            KeyCode::Tab => self.cycle_group(true),
            KeyCode::BackTab => self.cycle_group(false),
            KeyCode::Char(' ') => {
                if let Some((index, target)) = self.focused() {
                    let event = match target {
                        LineTarget::Header => FilterSelectorEvent::ToggleAll,
                        LineTarget::Option(value) => FilterSelectorEvent::ToggleOption(value),
                        LineTarget::SeeMore => FilterSelectorEvent::RevealMore,
                    };
                    self.dispatch(index, &event);
                }
            }
            KeyCode::Enter => {
                if let Some((index, _)) = self.focused()
                    && self.dispatch(index, &FilterSelectorEvent::ToggleCollapsed).is_consumed()
                {
                    self.focus_header(index);
                }
            }
            KeyCode::Char('m') => {
                if let Some((index, _)) = self.focused() {
                    self.dispatch(index, &FilterSelectorEvent::RevealMore);
                }
            }
            KeyCode::Char('/') => {
                self.mode = Mode::Search;
                self.dirty = true;
            }
            KeyCode::Char('r') => self.reload(),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Backspace => {
                self.search.pop();
            }
            KeyCode::Char(c) => self.search.push(c),
            _ => return,
        }
        self.clamp_focus();
        self.dirty = true;
    }

    fn dispatch(&mut self, index: usize, event: &FilterSelectorEvent) -> EventResult {
        let Some(group) = self.groups.get(index) else {
            return EventResult::Ignored;
        };
        let result = group.selector.dispatch(event, &self.props(group));
        log::trace!("{} {:?}: {:?}", group.kind, event, result);
        self.apply_changes();
        self.clamp_focus();
        result
    }

    fn move_focus(&mut self, delta: isize) {
        let count = self.group_lines().len();
        if count == 0 {
            return;
        }
        self.focus = self.focus.saturating_add_signed(delta).min(count - 1);
        self.dirty = true;
    }

    /// Focus the header of the next (or previous) group, wrapping around.
    fn cycle_group(&mut self, forward: bool) {
        let Some((current, _)) = self.focused() else {
            return;
        };
        let count = self.groups.len();
        let next = if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
        self.focus_header(next);
    }

    fn focus_header(&mut self, index: usize) {
        if let Some(position) = self
            .group_lines()
            .iter()
            .position(|(group, line)| *group == index && line.target == LineTarget::Header)
        {
            self.focus = position;
            self.dirty = true;
        }
    }

    // -------------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------------

    fn needs_redraw(&self) -> bool {
        self.dirty || self.groups.iter().any(|group| group.selector.is_dirty())
    }

    fn draw(&mut self, terminal: &mut Terminal) -> io::Result<()> {
        let (_, height) = terminal.size()?;
        let lines = self.screen(usize::from(height));
        terminal.draw(&lines)?;
        self.dirty = false;
        for group in &self.groups {
            group.selector.clear_dirty();
        }
        Ok(())
    }

    /// Compose a screen of exactly `height` lines, scrolled to keep focus
    /// visible. Screens too short for the header and footer are cut at the
    /// bottom.
    fn screen(&self, height: usize) -> Vec<ScreenLine> {
        let theme = &self.theme;
        let mut lines = Vec::with_capacity(height);

        lines.push(ScreenLine {
            cells: vec![Cell {
                text: format!("azimuth · {}", self.source.path().display()),
                fg: theme.primary,
                bold: true,
            }],
            bg: None,
        });
        lines.push(self.search_line());
        lines.push(ScreenLine::default());

        let body = height.saturating_sub(HEADER_LINES + FOOTER_LINES);
        let skip = (self.focus + 1).saturating_sub(body);
        for (position, (_, line)) in self.group_lines().into_iter().enumerate().skip(skip).take(body) {
            let mut screen_line = ScreenLine {
                cells: line
                    .spans
                    .into_iter()
                    .map(|span| {
                        let (fg, bold) = theme.tone(span.tone);
                        Cell {
                            text: span.text,
                            fg,
                            bold,
                        }
                    })
                    .collect(),
                bg: None,
            };
            if position == self.focus && self.mode == Mode::Normal {
                screen_line.bg = Some(theme.surface);
            }
            lines.push(screen_line);
        }

        while lines.len() + FOOTER_LINES < height {
            lines.push(ScreenLine::default());
        }
        lines.push(ScreenLine::default());
        lines.push(match &self.status {
            Some(status) => ScreenLine::plain(status.clone(), theme.warning),
            None => ScreenLine::plain(self.filter_summary(), theme.text),
        });
        lines.push(ScreenLine::plain(
            "↑/↓ move  tab group  space toggle  enter collapse  m more  / search  r reload  q quit",
            theme.text_muted,
        ));
        lines.truncate(height);
        lines
    }

    fn search_line(&self) -> ScreenLine {
        let theme = &self.theme;
        match self.mode() {
            Mode::Search => ScreenLine::plain(format!("/ {}_", self.search()), theme.text),
            Mode::Normal if self.search().is_empty() => {
                ScreenLine::plain("press / to search", theme.text_muted)
            }
            Mode::Normal => ScreenLine::plain(format!("/ {}", self.search()), theme.text_muted),
        }
    }

    /// One-line summary of the active filters.
    pub fn filter_summary(&self) -> String {
        if self.filters.is_empty() {
            return "no filters".to_string();
        }
        FilterGroupKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let values = self.filters.selected(kind);
                (!values.is_empty()).then(|| format!("{kind}: {}", values.join(", ")))
            })
            .collect::<Vec<_>>()
            .join("  ·  ")
    }
}
