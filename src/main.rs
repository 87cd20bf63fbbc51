mod form;
mod model;
mod persist;
mod store;
mod theme;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use form::Form;
use model::{Item, Priority, SortOrder};
use persist::FileStore;
use store::{FilterMode, ItemList};

#[derive(Parser)]
#[command(name = "shelf", about = "Shelf — minimal item manager with a local store")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Create .shelf/ in the current directory
    Init,
    /// Add a new item
    Add {
        name: String,
        description: String,
        #[arg(short, long, default_value = "low")]
        priority: Priority,
    },
    /// Show item details
    Show { id: u64 },
    /// List items, one filter mode at a time
    List {
        /// Keep only items with this priority
        #[arg(short, long, group = "mode")]
        priority: Option<Priority>,
        /// Keep items whose name contains this text, sorted by name
        #[arg(short, long, group = "mode")]
        search: Option<String>,
        /// Sort by creation date
        #[arg(long, group = "mode", value_name = "ORDER")]
        by_date: Option<SortOrder>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Edit an item's name, description, or priority
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        priority: Option<Priority>,
    },
    /// Delete an item
    Delete { id: u64 },
    /// Show the active theme, or flip it
    Theme {
        /// Flip between light and dark
        #[arg(long)]
        toggle: bool,
    },
    /// Generate shell completions
    Completions { shell: Shell },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Cmd::Init => {
            FileStore::init().map_err(|e| e.to_string())?;
            println!("initialized .shelf/");
            Ok(())
        }
        Cmd::Add {
            name,
            description,
            priority,
        } => {
            let mut list = load_items()?;
            let mut form = Form {
                name,
                description,
                priority,
                ..Form::default()
            };
            match list.add(&mut form).map_err(|e| e.to_string())? {
                Some(id) => {
                    println!("added {id}");
                    Ok(())
                }
                None => Err(form::VALIDATION_MSG.to_string()),
            }
        }
        Cmd::Show { id } => {
            let list = load_items()?;
            let item = list.get(id).ok_or_else(|| format!("no item with id {id}"))?;
            println!("  ID: {}", item.id);
            println!("  Name: {}", item.name);
            println!("  Priority: {}", item.priority);
            println!("  Description: {}", item.description);
            println!("  Created: {}", item.created_at.format("%Y-%m-%d %H:%M"));
            if let Some(modified) = item.modified_at {
                println!("  Modified: {}", modified.format("%Y-%m-%d %H:%M"));
            }
            Ok(())
        }
        Cmd::List {
            priority,
            search,
            by_date,
            page,
        } => {
            let list = load_items()?;
            let mode = filter_mode(priority, search, by_date);
            // Navigation owns the clamp; view trusts the page it is given.
            let total_pages = list.view(mode.as_ref(), 1).total_pages;
            let page = page.clamp(1, total_pages);
            let view = list.view(mode.as_ref(), page);

            print_list_header();
            for item in &view.items {
                print_list_row(item);
            }
            println!("page {page} of {} ({} items)", view.total_pages, view.total_items);
            Ok(())
        }
        Cmd::Edit {
            id,
            name,
            description,
            priority,
        } => {
            let mut list = load_items()?;
            let mut form = Form::default();
            if !list.start_edit(id, &mut form) {
                return Err(format!("no item with id {id}"));
            }
            if let Some(n) = name {
                form.name = n;
            }
            if let Some(d) = description {
                form.description = d;
            }
            if let Some(p) = priority {
                form.priority = p;
            }
            if list.update(&mut form).map_err(|e| e.to_string())? {
                println!("updated {id}");
                Ok(())
            } else {
                Err(form::VALIDATION_MSG.to_string())
            }
        }
        Cmd::Delete { id } => {
            let mut list = load_items()?;
            if list.delete(id).map_err(|e| e.to_string())? {
                println!("deleted {id}");
            } else {
                println!("no item with id {id} (nothing to delete)");
            }
            Ok(())
        }
        Cmd::Theme { toggle } => {
            let kv = FileStore::open().map_err(|e| e.to_string())?;
            let mut themes = theme::ThemeStore::load(kv).map_err(|e| e.to_string())?;
            if toggle {
                let now = themes.toggle().map_err(|e| e.to_string())?;
                println!("theme set to {now}");
            } else {
                println!("{}", themes.current());
            }
            Ok(())
        }
        Cmd::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}

fn load_items() -> Result<ItemList<FileStore>, String> {
    let kv = FileStore::open().map_err(|e| e.to_string())?;
    ItemList::load(kv).map_err(|e| e.to_string())
}

/// Map the mutually exclusive list flags (clap enforces at most one) onto
/// the single active filter mode.
fn filter_mode(
    priority: Option<Priority>,
    search: Option<String>,
    by_date: Option<SortOrder>,
) -> Option<FilterMode> {
    if let Some(p) = priority {
        Some(FilterMode::Priority(p))
    } else if let Some(text) = search {
        Some(FilterMode::NameSearch(text))
    } else {
        by_date.map(FilterMode::DateSort)
    }
}

fn print_list_header() {
    println!("{:<5} {:<8} {:<17} {}", "ID", "PRI", "CREATED", "NAME");
    println!("{}", "-".repeat(50));
}

fn print_list_row(item: &Item) {
    println!(
        "{:<5} {:<8} {:<17} {}",
        item.id,
        item.priority.to_string(),
        item.created_at.format("%Y-%m-%d %H:%M").to_string(),
        item.name
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_mode_priority() {
        assert_eq!(
            filter_mode(Some(Priority::High), None, None),
            Some(FilterMode::Priority(Priority::High))
        );
    }

    #[test]
    fn filter_mode_search() {
        assert_eq!(
            filter_mode(None, Some("milk".to_string()), None),
            Some(FilterMode::NameSearch("milk".to_string()))
        );
    }

    #[test]
    fn filter_mode_date() {
        assert_eq!(
            filter_mode(None, None, Some(SortOrder::Desc)),
            Some(FilterMode::DateSort(SortOrder::Desc))
        );
    }

    #[test]
    fn filter_mode_none() {
        assert_eq!(filter_mode(None, None, None), None);
    }

    #[test]
    fn cli_args_parse() {
        Cli::command().debug_assert();
    }
}
