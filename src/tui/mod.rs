mod ui;
mod widgets;

use std::io;
use std::time::Duration;

use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::advisor;
use crate::db::{Database, Stats};
use crate::models::{DaySchedule, ResourceBundle, StudyPlan, Topic, TopicDaySchedule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Topics,
    Plans,
    PlanDetail,
}

impl View {
    fn next(&self) -> Self {
        match self {
            View::Dashboard => View::Topics,
            View::Topics => View::Plans,
            View::Plans => View::Dashboard,
            View::PlanDetail => View::Plans,
        }
    }

    fn prev(&self) -> Self {
        match self {
            View::Dashboard => View::Plans,
            View::Topics => View::Dashboard,
            View::Plans => View::Topics,
            View::PlanDetail => View::Plans,
        }
    }
}

pub struct StatefulList<T> {
    pub items: Vec<T>,
    pub selected: Option<usize>,
}

impl<T> StatefulList<T> {
    fn with_items(items: Vec<T>) -> Self {
        let selected = if items.is_empty() { None } else { Some(0) };
        Self { items, selected }
    }

    fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i >= self.items.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.selected = Some(i);
    }

    fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i == 0 {
                    self.items.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.selected = Some(i);
    }

    fn selected_item(&self) -> Option<&T> {
        self.selected.and_then(|i| self.items.get(i))
    }
}

pub struct App {
    db: Database,
    pub view: View,
    pub stats: Stats,
    pub topics: StatefulList<Topic>,
    pub plans: StatefulList<StudyPlan>,
    pub selected_plan: Option<StudyPlan>,
    pub days: StatefulList<DaySchedule>,
    // Cursor over the topics of the selected day
    pub topic_cursor: usize,
    // Lazily computed resource panel for the topic under the cursor.
    // Recomputed on every toggle; never cached.
    pub resource_panel: Option<(String, ResourceBundle)>,
    pub today_sessions: Vec<TopicDaySchedule>,
    pub should_quit: bool,
}

impl App {
    pub fn new(db: Database) -> Result<Self, Box<dyn std::error::Error>> {
        let stats = db.get_stats()?;
        let topics = db.list_topics()?;
        let plans = db.list_plans()?;
        let today_sessions = Self::load_today_sessions(&db)?;

        Ok(Self {
            db,
            view: View::Dashboard,
            stats,
            topics: StatefulList::with_items(topics),
            plans: StatefulList::with_items(plans),
            selected_plan: None,
            days: StatefulList::with_items(Vec::new()),
            topic_cursor: 0,
            resource_panel: None,
            today_sessions,
            should_quit: false,
        })
    }

    fn load_today_sessions(db: &Database) -> Result<Vec<TopicDaySchedule>, Box<dyn std::error::Error>> {
        let today = Local::now().date_naive();
        let Some(plan) = db.latest_plan()? else {
            return Ok(Vec::new());
        };
        let schedule = db.get_schedule(plan.id)?;
        Ok(schedule
            .into_iter()
            .find(|d| d.date == today)
            .map(|d| d.topics)
            .unwrap_or_default())
    }

    pub fn refresh_data(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.stats = self.db.get_stats()?;
        self.topics = StatefulList::with_items(self.db.list_topics()?);
        self.plans = StatefulList::with_items(self.db.list_plans()?);
        self.today_sessions = Self::load_today_sessions(&self.db)?;
        Ok(())
    }

    fn select_plan(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(plan) = self.plans.selected_item() {
            self.selected_plan = Some(plan.clone());
            self.days = StatefulList::with_items(self.db.get_schedule(plan.id)?);
            self.topic_cursor = 0;
            self.resource_panel = None;
            self.view = View::PlanDetail;
        }
        Ok(())
    }

    fn close_plan(&mut self) {
        self.view = View::Plans;
        self.selected_plan = None;
        self.days = StatefulList::with_items(Vec::new());
        self.topic_cursor = 0;
        self.resource_panel = None;
    }

    fn selected_day_topic(&self) -> Option<&TopicDaySchedule> {
        self.days
            .selected_item()
            .and_then(|d| d.topics.get(self.topic_cursor))
    }

    fn cycle_topic_cursor(&mut self, forward: bool) {
        let Some(day) = self.days.selected_item() else {
            return;
        };
        if day.topics.is_empty() {
            return;
        }
        let len = day.topics.len();
        self.topic_cursor = if forward {
            (self.topic_cursor + 1) % len
        } else {
            (self.topic_cursor + len - 1) % len
        };
        self.resource_panel = None;
    }

    // Toggle the resource panel for the topic under the cursor. The bundle
    // is computed on demand each time the panel opens.
    fn toggle_resources(&mut self) {
        let Some(level) = self.selected_plan.as_ref().map(|p| p.academic_level.clone()) else {
            return;
        };
        let Some(topic_name) = self.selected_day_topic().map(|t| t.topic_name.clone()) else {
            return;
        };

        match &self.resource_panel {
            Some((name, _)) if *name == topic_name => {
                self.resource_panel = None;
            }
            _ => {
                let bundle = advisor::suggest(&topic_name, &level);
                self.resource_panel = Some((topic_name, bundle));
            }
        }
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match key {
            KeyCode::Char('q') => self.should_quit = true,

            KeyCode::Char('r') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.refresh_data()?;
            }

            KeyCode::Esc => {
                if self.view == View::PlanDetail {
                    if self.resource_panel.is_some() {
                        self.resource_panel = None;
                    } else {
                        self.close_plan();
                    }
                }
            }

            KeyCode::Char('h') | KeyCode::Left => match self.view {
                View::PlanDetail => self.close_plan(),
                _ => self.view = self.view.prev(),
            },
            KeyCode::Char('l') | KeyCode::Right => match self.view {
                View::Plans => self.select_plan()?,
                View::PlanDetail => {}
                _ => self.view = self.view.next(),
            },

            KeyCode::Tab => {
                self.view = self.view.next();
            }
            KeyCode::BackTab => {
                self.view = self.view.prev();
            }

            KeyCode::Char('j') | KeyCode::Down => match self.view {
                View::Topics => self.topics.next(),
                View::Plans => self.plans.next(),
                View::PlanDetail => {
                    self.days.next();
                    self.topic_cursor = 0;
                    self.resource_panel = None;
                }
                _ => {}
            },
            KeyCode::Char('k') | KeyCode::Up => match self.view {
                View::Topics => self.topics.previous(),
                View::Plans => self.plans.previous(),
                View::PlanDetail => {
                    self.days.previous();
                    self.topic_cursor = 0;
                    self.resource_panel = None;
                }
                _ => {}
            },

            KeyCode::Char('g') => match self.view {
                View::Topics if !self.topics.items.is_empty() => {
                    self.topics.selected = Some(0);
                }
                View::Plans if !self.plans.items.is_empty() => {
                    self.plans.selected = Some(0);
                }
                View::PlanDetail if !self.days.items.is_empty() => {
                    self.days.selected = Some(0);
                    self.topic_cursor = 0;
                    self.resource_panel = None;
                }
                _ => {}
            },
            KeyCode::Char('G') => match self.view {
                View::Topics if !self.topics.items.is_empty() => {
                    self.topics.selected = Some(self.topics.items.len() - 1);
                }
                View::Plans if !self.plans.items.is_empty() => {
                    self.plans.selected = Some(self.plans.items.len() - 1);
                }
                View::PlanDetail if !self.days.items.is_empty() => {
                    self.days.selected = Some(self.days.items.len() - 1);
                    self.topic_cursor = 0;
                    self.resource_panel = None;
                }
                _ => {}
            },

            // Cycle through the selected day's topics
            KeyCode::Char('n') if self.view == View::PlanDetail => {
                self.cycle_topic_cursor(true);
            }
            KeyCode::Char('p') if self.view == View::PlanDetail => {
                self.cycle_topic_cursor(false);
            }

            // Expand/collapse the resource guide for the topic under the cursor
            KeyCode::Char('o') if self.view == View::PlanDetail => {
                self.toggle_resources();
            }

            KeyCode::Enter => match self.view {
                View::Plans => self.select_plan()?,
                View::PlanDetail => self.toggle_resources(),
                _ => {}
            },

            _ => {}
        }
        Ok(())
    }
}

pub fn run(db: Database) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(db)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key.code, key.modifiers)?;
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
