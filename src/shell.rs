use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::application::Carnet;
use crate::core::note::{NoteFields, NoteId};
use crate::message::Message;
use crate::task::Task;

/// One line of user input. Positions are 1-based indexes into the list as
/// currently displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Open(usize),
    Search(String),
    Pin(usize),
    Remove(usize),
    Title(String),
    Body(String),
    Mode,
    Dismiss,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "n" | "new" => Self::New,
            "o" | "open" => match rest.parse() {
                Ok(n) => Self::Open(n),
                Err(_) => Self::Unknown(line.to_string()),
            },
            "s" | "search" => Self::Search(rest.to_string()),
            "p" | "pin" => match rest.parse() {
                Ok(n) => Self::Pin(n),
                Err(_) => Self::Unknown(line.to_string()),
            },
            "rm" | "del" => match rest.parse() {
                Ok(n) => Self::Remove(n),
                Err(_) => Self::Unknown(line.to_string()),
            },
            "t" | "title" => Self::Title(rest.to_string()),
            "b" | "body" => Self::Body(rest.to_string()),
            "m" | "mode" => Self::Mode,
            "e" | "err" => Self::Dismiss,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

#[derive(Debug)]
enum Input {
    Message(Message),
    Help,
    Quit,
    Nothing,
}

/// Route a raw input line. While the delete dialog is up the rest of the
/// interface is inert: only an explicit "o"/"oui" confirms, anything else
/// cancels, like clicking outside the dialog.
fn handle_line(app: &Carnet, line: &str) -> Input {
    if app.is_dialog_open() {
        let answer = line.trim().to_lowercase();
        return if matches!(answer.as_str(), "o" | "oui" | "y" | "yes") {
            Input::Message(Message::DeleteNote)
        } else {
            Input::Message(Message::CancelDeleteNote)
        };
    }

    match Command::parse(line) {
        Command::New => Input::Message(Message::CreateNote),
        Command::Open(n) => match nth_visible(app, n) {
            Some(id) => Input::Message(Message::SelectNote(id)),
            None => {
                println!("Aucune note n°{}", n);
                Input::Nothing
            }
        },
        Command::Search(query) => Input::Message(Message::SearchQueryChanged(query)),
        Command::Pin(n) => match nth_visible(app, n) {
            Some(id) => Input::Message(Message::TogglePinNote(id)),
            None => {
                println!("Aucune note n°{}", n);
                Input::Nothing
            }
        },
        Command::Remove(n) => match nth_visible(app, n) {
            Some(id) => Input::Message(Message::ConfirmDeleteNote(id)),
            None => {
                println!("Aucune note n°{}", n);
                Input::Nothing
            }
        },
        Command::Title(text) => match app.selected_note() {
            Some(note) => Input::Message(Message::SubmitEdit(
                note.id,
                NoteFields::new(text, note.content.clone()),
            )),
            None => {
                println!("Aucune note ouverte");
                Input::Nothing
            }
        },
        Command::Body(text) => match app.selected_note() {
            Some(note) => Input::Message(Message::SubmitEdit(
                note.id,
                NoteFields::new(note.title.clone(), text),
            )),
            None => {
                println!("Aucune note ouverte");
                Input::Nothing
            }
        },
        Command::Mode => Input::Message(Message::ToggleDarkMode),
        Command::Dismiss => Input::Message(Message::DismissError),
        Command::Help => Input::Help,
        Command::Quit => Input::Quit,
        Command::Empty => Input::Nothing,
        Command::Unknown(line) => {
            println!("Commande inconnue : {} (h pour l'aide)", line);
            Input::Nothing
        }
    }
}

/// Resolve a 1-based position in the displayed list to a note id.
fn nth_visible(app: &Carnet, n: usize) -> Option<NoteId> {
    let index = n.checked_sub(1)?;
    app.visible_notes().get(index).map(|note| note.id)
}

/// Spawn every future of a task; results come back through the channel.
fn spawn_all(task: Task<Message>, tx: &mpsc::UnboundedSender<Message>) {
    for future in task.into_futures() {
        let tx = tx.clone();
        tokio::spawn(async move {
            // A closed receiver means the shell already quit.
            let _ = tx.send(future.await);
        });
    }
}

fn render(app: &Carnet) {
    let mode = if app.dark_mode() { "sombre" } else { "clair" };
    println!();
    println!("=== carnet ({}) - mode {} ===", app.server_url(), mode);

    if app.is_loading() {
        println!("Chargement...");
        return;
    }

    if let Some(e) = app.last_error() {
        println!("!! {} (e pour masquer)", e);
    }

    if !app.search_query().is_empty() {
        println!("Rechercher : {}", app.search_query());
    }

    let selected = app.selected_note().map(|note| note.id);
    let visible = app.visible_notes();
    if visible.is_empty() {
        println!("(aucune note)");
    }
    for (i, note) in visible.iter().enumerate() {
        let open = if selected == Some(note.id) { ">" } else { " " };
        let pin = if app.is_pinned(note.id) { "*" } else { " " };
        println!(
            "{}{}{:>3}. {}  ({})",
            open,
            pin,
            i + 1,
            note.title,
            note.last_updated_at.format("%d/%m/%Y %H:%M")
        );
    }

    if let Some(note) = app.selected_note() {
        println!("--- {} ---", note.title);
        if !note.content.is_empty() {
            println!("{}", note.content);
        }
        if app.save_badge_visible() {
            println!("[Enregistrer]");
        }
    }

    if app.is_dialog_open() {
        println!();
        println!("Êtes-vous sûr de vouloir supprimer cette note ?");
        println!("[o] Supprimer   [autre] Annuler");
    }
}

fn print_help() {
    println!("n/new             créer une note");
    println!("o/open <n>        ouvrir la note n°<n>");
    println!("t/title <texte>   remplacer le titre de la note ouverte");
    println!("b/body <texte>    remplacer le contenu de la note ouverte");
    println!("s/search [terme]  filtrer par titre (sans terme : tout afficher)");
    println!("p/pin <n>         épingler / désépingler");
    println!("rm <n>            supprimer (avec confirmation)");
    println!("m/mode            basculer le mode sombre");
    println!("e/err             masquer l'erreur affichée");
    println!("q/quit            quitter");
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

/// Drive the application: completion messages and input lines feed the same
/// update loop, and the state is re-rendered after every message.
pub async fn run(mut app: Carnet, initial: Task<Message>) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_all(initial, &tx);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    render(&app);
    prompt();

    loop {
        tokio::select! {
            Some(message) = rx.recv() => {
                let task = app.update(message);
                spawn_all(task, &tx);
                render(&app);
                prompt();
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    // End of input: behave like quit.
                    _ => break,
                };
                match handle_line(&app, &line) {
                    Input::Message(message) => {
                        let task = app.update(message);
                        spawn_all(task, &tx);
                        render(&app);
                    }
                    Input::Help => print_help(),
                    Input::Quit => break,
                    Input::Nothing => {}
                }
                prompt();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CarnetConfig;

    #[test]
    fn parses_bare_words() {
        assert_eq!(Command::parse("new"), Command::New);
        assert_eq!(Command::parse("  q "), Command::Quit);
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(Command::parse("zzz"), Command::Unknown("zzz".to_string()));
    }

    #[test]
    fn parses_indexed_commands() {
        assert_eq!(Command::parse("open 3"), Command::Open(3));
        assert_eq!(Command::parse("p 1"), Command::Pin(1));
        assert_eq!(Command::parse("rm 2"), Command::Remove(2));
        assert_eq!(
            Command::parse("open trois"),
            Command::Unknown("open trois".to_string())
        );
    }

    #[test]
    fn keeps_argument_text_verbatim() {
        assert_eq!(
            Command::parse("title Liste de courses"),
            Command::Title("Liste de courses".to_string())
        );
        assert_eq!(
            Command::parse("search marché"),
            Command::Search("marché".to_string())
        );
        assert_eq!(Command::parse("search"), Command::Search(String::new()));
    }

    #[test]
    fn any_input_but_a_confirmation_cancels_the_dialog() {
        let (mut app, _fetch) = Carnet::new(CarnetConfig::default()).unwrap();
        app.update(Message::ConfirmDeleteNote(NoteId(1)));

        match handle_line(&app, "s courses") {
            Input::Message(Message::CancelDeleteNote) => {}
            other => panic!("expected cancel, got {:?}", other),
        }

        match handle_line(&app, "oui") {
            Input::Message(Message::DeleteNote) => {}
            other => panic!("expected delete, got {:?}", other),
        }
    }
}
