/**
 * Chatcast Terminal Client
 *
 * Reads lines from stdin and sends them to the relay; redraws the message
 * list on every change. `/resend` retries failed messages, `/name <new>`
 * renames, `/quit` exits.
 */

use chatcast::client::{
    ChatSession, ClientConfig, Command, ConnectionStatus, IdentityStore, MessageList,
};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const DEFAULT_WIDTH: usize = 80;

fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.parse().ok())
        .unwrap_or(DEFAULT_WIDTH)
}

fn draw(list: &MessageList, user_id: &str, status: &ConnectionStatus) {
    let width = terminal_width();
    let mut out = std::io::stdout().lock();

    // Clear screen, cursor home
    let _ = write!(out, "\x1b[2J\x1b[H");
    for row in chatcast::client::render(list, user_id) {
        let _ = writeln!(out, "{}", row.to_line(width));
    }
    let _ = writeln!(out, "\n-- {:?} --", status);
    let _ = write!(out, "> ");
    let _ = out.flush();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Logs go to stderr so they stay out of the redrawn screen
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env()?;
    let identity_store = IdentityStore::from_config(&config)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let identity = match identity_store.load()? {
        Some(identity) => identity,
        None => {
            print!("Choose a username: ");
            std::io::stdout().flush()?;
            let username = lines
                .next_line()
                .await?
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "anonymous".to_string());
            identity_store.load_or_create(|| username)?
        }
    };

    tracing::info!("[Client] Connecting to {} as {}", config.server_url(), identity.username);

    let mut session = ChatSession::new(&config, identity);
    let listener = session.connect();

    let mut updates = session.store().subscribe();
    let mut status = listener.status();
    let user_id = session.identity().user_id.clone();
    let redraw = tokio::spawn(async move {
        loop {
            let list = updates.borrow_and_update().clone();
            let current = status.borrow_and_update().clone();
            draw(&list, &user_id, &current);

            tokio::select! {
                changed = updates.changed() => if changed.is_err() { break },
                changed = status.changed() => if changed.is_err() { break },
            }
        }
    });

    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Quit => break,
            Command::Ignore => {}
            Command::Resend => {
                let tickets = session.resend_failed();
                if tickets.is_empty() {
                    eprintln!("Nothing to resend");
                }
            }
            Command::Rename(name) => {
                session.set_username(name);
                identity_store.save(session.identity())?;
            }
            Command::Send(text) => {
                session.set_draft(text);
                if let Err(e) = session.send() {
                    eprintln!("{}", e);
                }
            }
        }
    }

    listener.close();
    redraw.abort();
    Ok(())
}
