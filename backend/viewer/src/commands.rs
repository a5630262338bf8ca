use dashboard::Dashboard;

pub const HELP: &str = "\
commands:
  search <text>   filter descriptions (live, case insensitive)
  clear           clear the search
  menu            open/close the CTA dropdown
  pick <n|label>  choose a CTA from the dropdown
  next, prev      change page
  help            show this list
  quit            exit";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Clear,
    Menu,
    Pick(String),
    Next,
    Previous,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Redraw,
    Message(String),
    Exit,
}

impl Command {
    /// The search argument is everything after the first space, untouched.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_start();
        let (word, raw) = line.split_once(' ').unwrap_or((line, ""));
        let rest = raw.trim();

        let command = match word.trim_end().to_lowercase().as_str() {
            "search" | "s" => Command::Search(raw.to_string()),
            "clear" => Command::Clear,
            "menu" | "m" => Command::Menu,
            "pick" | "p" if !rest.is_empty() => Command::Pick(rest.to_string()),
            "next" | "n" => Command::Next,
            "prev" | "previous" => Command::Previous,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => return None,
        };

        Some(command)
    }
}

pub fn apply(dashboard: &mut Dashboard, command: Command) -> Outcome {
    match command {
        Command::Search(term) => dashboard.set_search_term(&term),
        Command::Clear => dashboard.set_search_term(""),
        Command::Menu => dashboard.toggle_dropdown(),
        Command::Pick(choice) => {
            if !dashboard.dropdown_open() {
                return Outcome::Message("Open the CTA menu first (menu)".into());
            }

            match resolve_option(&dashboard.category_options(), &choice) {
                Some(category) => dashboard.select_category(&category),
                None => return Outcome::Message(format!("No CTA option {choice:?}")),
            }
        }
        Command::Next => dashboard.next_page(),
        Command::Previous => dashboard.previous_page(),
        Command::Help => return Outcome::Message(HELP.into()),
        Command::Quit => return Outcome::Exit,
    }

    Outcome::Redraw
}

// 1-based index first, then exact label.
fn resolve_option(options: &[String], choice: &str) -> Option<String> {
    if let Ok(index) = choice.parse::<usize>() {
        if let Some(option) = index.checked_sub(1).and_then(|i| options.get(i)) {
            return Some(option.clone());
        }
    }

    options.iter().find(|option| option.as_str() == choice).cloned()
}
