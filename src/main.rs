use anyhow::{Context, Result};
use form_forge::{FieldList, FieldType, FormConfig, FormEvent, FormSession, Outcome};
use std::io::{self, BufRead, Write};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "\
Commands:
  type <text|number|email|password|select>   set draft field type
  label <text>                                set draft label
  required [on|off]                           set draft required flag
  option <text>                               add an option to the draft
  unoption <n>                                remove draft option n
  add                                         commit the draft as a field
  remove <n>                                  remove field n
  drag <n> | hover <n> | drop                 drag field n around the list
  generate                                    print the form markup
  list | json                                 show the fields
  help | quit
Lines starting with '{' are read as JSON events, e.g. {\"event\":\"hover\",\"index\":2}";

enum Command {
    Event(FormEvent),
    List,
    Json,
    Help,
    Quit,
}

fn main() -> Result<()> {
    let config = FormConfig::from_env().context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::info!(indent = config.indent, "form_forge v{}", env!("CARGO_PKG_VERSION"));

    let mut session = FormSession::new(config.generator());
    session.subscribe(print_fields);

    println!("--- Form Field Generator ---");
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line.context("Failed to read input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match parse_command(line) {
            Ok(c) => c,
            Err(msg) => {
                println!("[Input] {msg}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::List => list_fields(&session),
            Command::Json => println!("{}", serde_json::to_string_pretty(&*session.fields())?),
            Command::Event(event) => match session.dispatch(event) {
                Ok(outcome) => report(&outcome, config.banner),
                Err(e) => println!("[Notice] {}", e.notification()),
            },
        }
    }

    Ok(())
}

fn parse_command(line: &str) -> Result<Command, String> {
    if line.starts_with('{') {
        return serde_json::from_str(line)
            .map(Command::Event)
            .map_err(|e| format!("Invalid event JSON: {e}"));
    }

    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let index = || {
        rest.parse::<usize>()
            .map_err(|_| format!("'{word}' expects a position, got '{rest}'"))
    };

    let event = match word.to_ascii_lowercase().as_str() {
        "quit" | "exit" => return Ok(Command::Quit),
        "help" => return Ok(Command::Help),
        "list" => return Ok(Command::List),
        "json" => return Ok(Command::Json),
        "type" => FormEvent::SetFieldType {
            field_type: rest.parse::<FieldType>().map_err(|e| format!("{e}"))?,
        },
        "label" => FormEvent::SetLabel { label: rest.to_string() },
        "required" => FormEvent::SetRequired {
            required: !matches!(rest, "off" | "no" | "false"),
        },
        "option" => FormEvent::AddOption { text: rest.to_string() },
        "unoption" => FormEvent::RemoveOptionAt { index: index()? },
        "add" => FormEvent::SubmitAddField { draft: None },
        "remove" => FormEvent::RemoveFieldAt { index: index()? },
        "drag" => FormEvent::BeginDrag { index: index()? },
        "hover" => FormEvent::Hover { index: index()? },
        "drop" | "cancel" => FormEvent::EndDrag,
        "generate" => FormEvent::RequestGenerate,
        other => return Err(format!("Unknown command '{other}'. Type 'help'.")),
    };
    Ok(Command::Event(event))
}

fn report(outcome: &Outcome, banner: bool) {
    match outcome {
        Outcome::Generated(code) => {
            if banner {
                println!("HTML Code:");
            }
            print!("{code}");
        }
        Outcome::DragStarted { index } => println!("[Drag] Holding field {index}"),
        Outcome::Moved { from, to } => println!("[Drag] {from} -> {to}"),
        Outcome::DragEnded(Some(summary)) => println!(
            "[Drag] Dropped at {} ({} moves)",
            summary.ended_at, summary.moves
        ),
        Outcome::DragEnded(None) => println!("[Drag] Nothing was being dragged"),
        // Subscriber already printed the new list.
        Outcome::ListChanged(_) => {}
        Outcome::DraftChanged | Outcome::Unchanged => {}
    }
}

fn print_fields(fields: &FieldList) {
    println!("[Fields] {} field(s)", fields.len());
    for (i, field) in fields.iter().enumerate() {
        println!("  {i}. {} ({})", field.label, field.field_type);
    }
}

fn list_fields(session: &FormSession) {
    let draft = session.store().draft();
    println!(
        "[Draft] type={} label='{}' required={} options={:?}",
        draft.field_type, draft.label, draft.is_required, draft.options
    );
    let fields = session.fields();
    if fields.is_empty() {
        println!("[Fields] none");
        return;
    }
    for (i, field) in fields.iter().enumerate() {
        let marker = if session.is_drag_source(i) { "*" } else { " " };
        println!("{marker} {i}. {} ({})", field.label, field.field_type);
    }
}
