use clap::{Parser, Subcommand};
use std::io::Write;
use std::os::unix::net::UnixStream;
use whorl::sys::server::SOCKET_PATH;

#[derive(Parser, Debug)]
#[command(name = "whorlctl", version, about = "Control a running whorl daemon", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Summon the menu at the cursor.
    Show,
    /// Dismiss the menu.
    Hide,
    /// Summon or dismiss, depending on current state.
    Toggle,
    /// Write the default config file and print its path.
    Init,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Show => send_command("show"),
        Commands::Hide => send_command("hide"),
        Commands::Toggle => send_command("toggle"),
        Commands::Init => {
            let path = whorl::config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn send_command(cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to whorl daemon at {}: {}. Is whorl running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
