// Interactive store selector: check departments, classes and subclasses, press `s` to save.
use std::env;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::{DefaultTerminal, Frame};

use tui_storeselect::{
    CascadePolicy, Hierarchy, HierarchyLabels, SavedItemsTable, SavedTableStyle, SelectionModel,
    SelectorEvent, SelectorGlyphs, SelectorStyle, SelectorView, SelectorViewState,
};

struct DemoArgs {
    departments: usize,
    classes: usize,
    subclasses: usize,
    policy: CascadePolicy,
    ascii: bool,
}

impl DemoArgs {
    fn usage() {
        eprintln!("Usage: store [OPTIONS]");
        eprintln!("Options:");
        eprintln!("  -d, --departments <N>  Number of departments (default: 10)");
        eprintln!("  -c, --classes <N>      Classes per department (default: 3)");
        eprintln!("  -s, --subclasses <N>   Subclasses per class (default: 2)");
        eprintln!("      --scoped           Clear only the toggled branch");
        eprintln!("      --ascii            ASCII checkboxes and guides");
        eprintln!("  -h, --help             Show this help");
    }

    fn parse() -> Self {
        let mut parsed = Self {
            departments: 10,
            classes: 3,
            subclasses: 2,
            policy: CascadePolicy::Global,
            ascii: false,
        };

        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => {
                    Self::usage();
                    std::process::exit(0);
                }
                "-d" | "--departments" => {
                    if let Some(value) = args.next().and_then(|v| v.parse().ok()) {
                        parsed.departments = value;
                    }
                }
                "-c" | "--classes" => {
                    if let Some(value) = args.next().and_then(|v| v.parse().ok()) {
                        parsed.classes = value;
                    }
                }
                "-s" | "--subclasses" => {
                    if let Some(value) = args.next().and_then(|v| v.parse().ok()) {
                        parsed.subclasses = value;
                    }
                }
                "--scoped" => parsed.policy = CascadePolicy::Scoped,
                "--ascii" => parsed.ascii = true,
                _ => {
                    eprintln!("Unknown argument: {arg}");
                    Self::usage();
                    std::process::exit(2);
                }
            }
        }
        parsed
    }
}

struct App<'a> {
    selection: SelectionModel,
    state: SelectorViewState,
    style: SelectorStyle<'a>,
    table_style: SavedTableStyle<'a>,
    glyphs: SelectorGlyphs<'static>,
    status: String,
}

fn render(frame: &mut Frame, app: &mut App<'_>) {
    let [body, footer] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
    let [tree_area, table_area] =
        Layout::horizontal([Constraint::Fill(2), Constraint::Fill(1)]).areas(body);

    let label = HierarchyLabels;
    let widget =
        SelectorView::new(&app.selection, &label, app.style.clone()).glyphs(app.glyphs);
    frame.render_stateful_widget(widget, tree_area, &mut app.state);
    frame.render_widget(
        SavedItemsTable::new(&app.selection, app.table_style.clone()),
        table_area,
    );
    frame.render_widget(Paragraph::new(app.status.as_str()), footer);
}

fn run_app(mut terminal: DefaultTerminal, mut app: App<'_>) -> io::Result<()> {
    app.state.select_first();

    loop {
        terminal.draw(|frame| render(frame, &mut app))?;

        if event::poll(Duration::from_millis(200))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    _ => {
                        if let SelectorEvent::Saved(count) =
                            app.state.handle_key(&mut app.selection, key)
                        {
                            app.status = format!(
                                "saved {count} item(s), {} total",
                                app.selection.saved_len()
                            );
                        }
                    }
                },
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    Ok(())
}

fn main() -> io::Result<()> {
    let args = DemoArgs::parse();
    let hierarchy = match Hierarchy::generated(args.departments, args.classes, args.subclasses) {
        Ok(hierarchy) => hierarchy,
        Err(err) => {
            eprintln!("Invalid hierarchy: {err}");
            return Ok(());
        }
    };

    let mut style = SelectorStyle::default();
    style.block_style = Style::default()
        .fg(Color::Rgb(221, 227, 235))
        .bg(Color::Rgb(24, 28, 36));
    style.border_style = Style::default().fg(Color::Rgb(92, 110, 140));
    style.line_style = Style::default().fg(Color::Rgb(86, 98, 120));
    style.checked_style = Style::default()
        .fg(Color::Rgb(136, 192, 208))
        .add_modifier(Modifier::BOLD);
    style.highlight_style = Style::default()
        .fg(Color::Rgb(255, 255, 255))
        .bg(Color::Rgb(52, 66, 96))
        .add_modifier(Modifier::BOLD);
    style.title = Some(Line::from(format!("Store ({:?} cascade)", args.policy)));

    let mut table_style = SavedTableStyle::default();
    table_style.block_style = style.block_style;
    table_style.border_style = style.border_style;
    table_style.header_style = Style::default()
        .fg(Color::Rgb(229, 201, 133))
        .add_modifier(Modifier::BOLD);

    let app = App {
        selection: SelectionModel::with_policy(hierarchy, args.policy),
        state: SelectorViewState::new(),
        style,
        table_style,
        glyphs: if args.ascii {
            SelectorGlyphs::ascii()
        } else {
            SelectorGlyphs::unicode()
        },
        status: "space: toggle  s: save  g: guides  q: quit".to_string(),
    };

    let terminal = ratatui::init();
    let result = run_app(terminal, app);
    ratatui::restore();
    result
}
