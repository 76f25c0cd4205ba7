mod preview;

use anyhow::{Result, anyhow};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use heading_hierarchy_config::{SettingsStore, TomlSettingsStore};
use heading_hierarchy_engine::{
    ActiveView, DocumentReader, HeadingHierarchyPlugin, Preview, RerenderQueue, RootClasses, Vault,
    ViewMode,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use relative_path::RelativePathBuf;
use std::{
    env,
    fs::OpenOptions,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
};

const LOG_FILE: &str = "heading-hierarchy.log";

struct App {
    store: TomlSettingsStore,
    files: Vec<RelativePathBuf>,
    file_list_state: ListState,
    plugin: HeadingHierarchyPlugin<Vault, RootClasses>,
    rerenders: RerenderQueue,
    preview: Option<Preview>,
    status: Option<String>,
}

impl App {
    fn new(vault: Vault, store: TomlSettingsStore) -> Result<Self> {
        let files = vault.markdown_files()?;
        log::info!(
            "Previewing {} notes in {}",
            files.len(),
            vault.root().display()
        );
        let plugin = HeadingHierarchyPlugin::load(&store, vault, RootClasses::new());

        let mut app = Self {
            store,
            files,
            file_list_state: ListState::default(),
            plugin,
            rerenders: RerenderQueue::new(),
            preview: None,
            status: None,
        };

        if !app.files.is_empty() {
            app.file_list_state.select(Some(0));
            app.open_selected();
        }

        Ok(app)
    }

    fn next_file(&mut self) {
        if self.files.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(i) => (i + 1) % self.files.len(),
            None => 0,
        };
        self.file_list_state.select(Some(i));
        self.open_selected();
    }

    fn previous_file(&mut self) {
        if self.files.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(0) | None => self.files.len() - 1,
            Some(i) => i - 1,
        };
        self.file_list_state.select(Some(i));
        self.open_selected();
    }

    /// Switching files is a layout change onto a preview.
    fn open_selected(&mut self) {
        let Some(path) = self
            .file_list_state
            .selected()
            .and_then(|i| self.files.get(i))
            .cloned()
        else {
            return;
        };
        let view = ActiveView {
            path: &path,
            mode: ViewMode::Preview,
        };
        self.plugin.on_layout_change(Some(view), &mut self.rerenders);
        self.process_rerenders();
    }

    fn process_rerenders(&mut self) {
        for path in self.rerenders.drain() {
            match self.plugin.reader().read(&path) {
                Ok(source) => {
                    self.preview = Some(self.plugin.render_preview(&path, &source));
                    self.status = None;
                }
                Err(e) => {
                    log::warn!("Could not render {path}: {e}");
                    self.preview = None;
                    self.status = Some(format!("Error reading file: {e}"));
                }
            }
        }
    }

    fn toggle_author_style(&mut self) {
        let enabled = !self.plugin.settings().enable_additional_css;
        if let Err(e) = self
            .plugin
            .set_enable_additional_css(&self.store, enabled)
        {
            log::warn!("Failed to save settings: {e}");
            self.status = Some(format!("Failed to save settings: {e}"));
        }
    }

    fn author_style(&self) -> bool {
        self.plugin.style().author_style_enabled()
    }
}

fn init_file_logging() -> Result<()> {
    let log_dir = TomlSettingsStore::config_dir();
    std::fs::create_dir_all(&log_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(LOG_FILE))?;
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Prints the annotated HTML preview of one markdown file.
fn export_html(store: &TomlSettingsStore, file: &Path) -> Result<()> {
    let root = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let name = file
        .file_name()
        .ok_or_else(|| anyhow!("'{}' is not a file", file.display()))?;
    let path = RelativePathBuf::from_path(name)?;

    let vault = Vault::open(root)?;
    let source = vault.read(&path)?;
    let mut plugin = HeadingHierarchyPlugin::load(store, vault, RootClasses::new());
    let preview = plugin.render_preview(&path, &source);

    println!(
        "{}",
        preview::html_document(&preview, plugin.style().author_style_enabled())
    );
    plugin.unload();
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let store = TomlSettingsStore::at_default_path();
    let config_path = store.path().to_path_buf();

    if args.len() == 3 && args[1] == "--html" {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Warn)
            .init();
        return export_html(&store, Path::new(&args[2]));
    }

    let notes_path: PathBuf;
    let from_config;

    if args.len() == 2 {
        notes_path = PathBuf::from(&args[1]);
        from_config = false;
    } else if args.len() == 1 {
        match store.load() {
            Ok(Some(settings)) => match settings.notes_path {
                Some(path) => {
                    notes_path = path;
                    from_config = true;
                }
                None => {
                    eprintln!(
                        "Error: No notes path provided and none set in {}",
                        config_path.display()
                    );
                    eprintln!("Usage: {} <notes-folder-path>", args[0]);
                    process::exit(1);
                }
            },
            Ok(None) => {
                eprintln!("Error: No notes path provided and no settings file found");
                eprintln!("Usage: {} <notes-folder-path>", args[0]);
                eprintln!(
                    "Or set notes_path in a settings file at {}",
                    config_path.display()
                );
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: {e}");
                eprintln!("Usage: {} <notes-folder-path>", args[0]);
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [notes-folder-path]", args[0]);
        eprintln!("       {} --html <file.md>", args[0]);
        process::exit(1);
    };

    let vault = match Vault::open(&notes_path) {
        Ok(vault) => vault,
        Err(e) => {
            let source = if from_config {
                format!(" from settings file '{}'", config_path.display())
            } else {
                String::new()
            };
            eprintln!(
                "Error: Notes path '{}'{} is invalid: {e}",
                notes_path.display(),
                source
            );
            process::exit(1);
        }
    };

    if let Err(e) = init_file_logging() {
        eprintln!("Warning: logging disabled: {e}");
    }

    let mut app = App::new(vault, store)?;

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    app.plugin.unload();

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_file(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_file(),
                KeyCode::Char('c') => app.toggle_author_style(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(rows[0]);

    let file_items: Vec<ListItem> = app
        .files
        .iter()
        .map(|path| ListItem::new(Line::from(Span::raw(format!("📄 {path}")))))
        .collect();

    let files_list = List::new(file_items)
        .block(Block::default().borders(Borders::ALL).title("Files"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(files_list, chunks[0], &mut app.file_list_state);

    let author_style = app.author_style();
    let (title, content_text) = match (&app.status, &app.preview) {
        (Some(status), _) => ("Preview".to_string(), vec![Line::from(status.clone())]),
        (None, Some(preview)) => (
            preview.path().to_string(),
            preview::preview_lines(preview, author_style),
        ),
        (None, None) => (
            "Preview".to_string(),
            vec![Line::from("Select a file to preview it")],
        ),
    };

    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(ratatui::widgets::Wrap { trim: false });

    f.render_widget(content, chunks[1]);

    let style_state = if author_style { "on" } else { "off" };
    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next | "),
        Span::raw(format!("c: Author style ({style_state})")),
    ]);

    f.render_widget(Paragraph::new(help_text), rows[1]);
}
