//! Text rendering of the read model

use std::fmt::Write;

use todo_core::app::AppView;
use todo_core::task::Filter;
use todo_core::theme::Theme;

struct Palette {
    accent: &'static str,
    muted: &'static str,
    reset: &'static str,
}

impl Palette {
    fn for_theme(theme: Theme, color: bool) -> Self {
        if !color {
            return Self {
                accent: "",
                muted: "",
                reset: "",
            };
        }
        match theme {
            Theme::Light => Self {
                accent: "\x1b[34m",
                muted: "\x1b[90m",
                reset: "\x1b[0m",
            },
            Theme::Dark => Self {
                accent: "\x1b[96m",
                muted: "\x1b[37m",
                reset: "\x1b[0m",
            },
        }
    }
}

/// Render the whole screen; `color` enables ANSI escapes
pub fn render(view: &AppView<'_>, color: bool) -> String {
    let p = Palette::for_theme(view.theme, color);
    let mut out = String::new();

    let _ = writeln!(out, "{}My Tasks{} ({} mode)", p.accent, p.reset, view.theme);
    let _ = writeln!(
        out,
        "Total {}  Active {}  Completed {}",
        view.counts.total, view.counts.active, view.counts.completed
    );
    if !view.search_term.is_empty() {
        let _ = writeln!(out, "Search: {:?}", view.search_term);
    }

    if view.show_filters {
        let tabs: Vec<String> = Filter::ALL
            .iter()
            .map(|f| {
                let label = format!("{} ({})", f.label(), view.counts.for_filter(*f));
                if *f == view.filter {
                    format!("{}[{}]{}", p.accent, label, p.reset)
                } else {
                    format!(" {} ", label)
                }
            })
            .collect();
        let _ = writeln!(out, "{}", tabs.join(" "));
    }

    let _ = writeln!(out);
    if let Some(empty) = view.empty_state {
        let _ = writeln!(out, "  {}", empty.title());
        let _ = writeln!(out, "  {}{}{}", p.muted, empty.subtitle(), p.reset);
    }
    for (i, task) in view.tasks.iter().enumerate() {
        let mark = if task.completed { "x" } else { " " };
        match view.editing.filter(|e| e.id == task.id) {
            Some(session) => {
                let _ = writeln!(out, "{:>3}. [{}] > {}_", i + 1, mark, session.text);
            }
            None if task.completed => {
                let _ = writeln!(
                    out,
                    "{:>3}. [{}] {}{}{}",
                    i + 1,
                    mark,
                    p.muted,
                    task.text,
                    p.reset
                );
            }
            None => {
                let _ = writeln!(out, "{:>3}. [{}] {}", i + 1, mark, task.text);
            }
        }
    }

    if view.show_clear_completed {
        let _ = writeln!(out);
        let _ = writeln!(out, "Clear completed ({}) with `clear`", view.counts.completed);
    }
    out
}
