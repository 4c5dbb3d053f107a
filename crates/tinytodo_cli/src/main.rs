//! Command-line driver for the tinytodo core.
//!
//! # Responsibility
//! - Translate shell arguments into core list operations.
//! - Render list state and change notifications to stdout.
//!
//! The interesting behavior lives in `tinytodo_core`; this binary is the
//! input/rendering collaborator kept deliberately thin.

use std::env;
use std::error::Error;
use std::process::ExitCode;

use tinytodo_core::db::open_db;
use tinytodo_core::{
    default_log_level, init_logging, ListEvent, SqliteTodoRepository, TodoId, TodoList,
    TodoRepository,
};

const USAGE: &str = "\
usage: tinytodo <command> [args]

commands:
  add <text>       create a new todo at the end of the list
  list             print all todos in display order
  toggle <n>       flip completion of the n-th displayed todo
  edit <n> <text>  replace the text of the n-th displayed todo
  rm <n>           delete the n-th displayed todo
  clear            delete every completed todo
  all-done         mark every todo completed
  all-undone       mark every todo not completed
  stats            print total/done/remaining counts

environment:
  TINYTODO_DB       database file (default: tinytodo.db)
  TINYTODO_LOG      log level (default: debug/info by build mode)
  TINYTODO_LOG_DIR  absolute directory for log files; unset disables logging
";

fn main() -> ExitCode {
    if let Ok(log_dir) = env::var("TINYTODO_LOG_DIR") {
        let level = env::var("TINYTODO_LOG").unwrap_or_else(|_| default_log_level().to_string());
        if let Err(err) = init_logging(&level, &log_dir) {
            eprintln!("tinytodo: logging disabled: {err}");
        }
    }

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprint!("{USAGE}");
        return ExitCode::from(2);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tinytodo: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let db_path = env::var("TINYTODO_DB").unwrap_or_else(|_| "tinytodo.db".to_string());
    let conn = open_db(&db_path)?;
    let mut list = TodoList::new(SqliteTodoRepository::new(&conn));
    list.subscribe(render_event);
    list.load()?;

    let command = args[0].as_str();
    let rest = &args[1..];
    match command {
        "add" => {
            list.create(rest.join(" "))?;
        }
        "list" => render_list(&list),
        "toggle" => {
            list.toggle_done(displayed_id(&list, rest)?);
        }
        "edit" => {
            let id = displayed_id(&list, rest)?;
            if rest.len() < 2 {
                return Err("edit needs a position and the new text".into());
            }
            list.update_content(id, rest[1..].join(" "));
        }
        "rm" => {
            list.delete(displayed_id(&list, rest)?);
        }
        "clear" => {
            let removed = list.clear_completed();
            println!("removed {removed} completed todo(s)");
        }
        "all-done" => list.toggle_all_complete(true),
        "all-undone" => list.toggle_all_complete(false),
        "stats" => render_stats(&list),
        other => return Err(format!("unknown command `{other}`\n{USAGE}").into()),
    }

    Ok(())
}

/// Resolves a 1-based display position from the first argument to the
/// member's persistence id.
fn displayed_id<R: TodoRepository>(
    list: &TodoList<R>,
    rest: &[String],
) -> Result<TodoId, Box<dyn Error>> {
    let raw = rest.first().ok_or("missing position argument")?;
    let position: usize = raw
        .parse()
        .map_err(|_| format!("position must be a number, got `{raw}`"))?;
    if position == 0 {
        return Err("positions start at 1".into());
    }
    list.iter()
        .nth(position - 1)
        .and_then(|todo| todo.id)
        .ok_or_else(|| format!("no todo at position {position}").into())
}

fn render_event(event: &ListEvent) {
    match event {
        ListEvent::Added(todo) => println!("added: {}", todo.content),
        ListEvent::Changed(todo) => {
            println!("updated: [{}] {}", check_mark(todo.done), todo.content);
        }
        ListEvent::Destroyed(todo) => println!("removed: {}", todo.content),
        // A reset precedes a full redraw; nothing to print per item here.
        ListEvent::Reset { .. } => {}
    }
}

fn render_list<R: TodoRepository>(list: &TodoList<R>) {
    for (position, todo) in list.iter().enumerate() {
        println!(
            "{:>3}. [{}] {}",
            position + 1,
            check_mark(todo.done),
            todo.content
        );
    }
    render_stats(list);
}

fn render_stats<R: TodoRepository>(list: &TodoList<R>) {
    let stats = list.stats();
    println!(
        "{} total, {} done, {} remaining",
        stats.total, stats.done, stats.remaining
    );
}

fn check_mark(done: bool) -> &'static str {
    if done {
        "x"
    } else {
        " "
    }
}
