use chess_terminal::app::{commands, App};
use chess_terminal::config::ClientConfig;
use chess_terminal::debug;
use chess_terminal::services::api::{BridgeWalletProvider, CosmWasmClientFactory};
use chess_terminal::services::{FileSessionStore, SessionManager};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const PROMPT: &str = "chess> ";

fn print_output(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "{}", text);
    if !text.ends_with('\n') {
        let _ = writeln!(stdout);
    }
    let _ = stdout.flush();
}

fn prompt() {
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "{}", PROMPT);
    let _ = stdout.flush();
}

#[tokio::main]
async fn main() {
    let _log_guard = debug::init();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Set CHESS_CONTRACT to the chess contract address and try again.");
            std::process::exit(2);
        }
    };
    tracing::info!(
        chain_id = %config.chain.chain_id,
        contract = %config.contract,
        bridge = %config.bridge_url,
        "Starting chess terminal"
    );

    let session = Arc::new(SessionManager::from_config(
        &config,
        Arc::new(BridgeWalletProvider::new(config.bridge_url.clone())),
        Arc::new(CosmWasmClientFactory::new()),
        Arc::new(FileSessionStore::new(&config.state_dir)),
    ));
    if let Err(e) = session.start().await {
        tracing::warn!(error = %e, "Wallet events unavailable");
        print_output(&format!("Wallet events unavailable: {}", e));
    }

    let app = App::new(config, session);
    app.start();

    print_output("Chess terminal. Type 'help' for commands.");
    prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while app.is_running() {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read stdin");
                        break;
                    }
                };
                match commands::parse(&line) {
                    Ok(Some(command)) => print_output(&app.handle_command(command)),
                    Ok(None) => {}
                    Err(e) => print_output(&e.to_string()),
                }
                if app.is_running() {
                    prompt();
                }
            }
            event = app.next_event() => {
                let Some(event) = event else { break };
                if let Some(text) = app.handle_event(event) {
                    print_output(&format!("\n{}", text));
                    prompt();
                }
            }
        }
    }

    app.shutdown();
    tracing::info!("Chess terminal stopped");
}
