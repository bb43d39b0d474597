//! Interactive REPL.

use colored::Colorize;
use fsesl_client::Client;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};

const HELP_TEXT: &str = r#"
Every input line is sent to the switch as an api command, e.g.:
  status                        Overall switch status
  show channels                 Active channel table
  show calls                    Active call table
  sofia status                  SIP stack summary
  sofia status profile <name>   One SIP profile in detail
  uptime                        Seconds since startup

Local commands:
  help, ?                       Show this help
  quit, exit, q                 Exit the REPL
"#;

pub fn run(client: &mut Client) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "fsesl".bold().cyan());
    println!(
        "Connecting to {}:{}...",
        client.connection().config().host,
        client.connection().config().port
    );

    client.connect()?;
    println!("{}", "Connected!".green());

    // Create readline editor
    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .build();
    let mut rl: Editor<(), DefaultHistory> = Editor::with_config(config)?;

    // Load history
    let history_path = std::env::var("HOME")
        .map(|h| std::path::PathBuf::from(h).join(".fsesl_history"))
        .unwrap_or_else(|_| ".fsesl_history".into());
    let _ = rl.load_history(&history_path);

    println!("Type 'help' for available commands.\n");

    loop {
        let prompt = format!("{} ", "freeswitch>".cyan());
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match line {
                    "help" | "?" => println!("{}", HELP_TEXT),
                    "quit" | "exit" | "q" => break,
                    command => match client.execute(command) {
                        Ok(reply) if reply.is_empty() => {
                            println!("{}\n", "(empty reply)".dimmed());
                        }
                        Ok(reply) => println!("{}\n", reply),
                        Err(e) => println!("{}: {}\n", "Error".red(), e),
                    },
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                println!("{}: {:?}", "Error".red(), err);
                break;
            }
        }
    }

    // Save history
    let _ = rl.save_history(&history_path);

    client.disconnect();
    println!("{}", "Disconnected.".dimmed());

    Ok(())
}
