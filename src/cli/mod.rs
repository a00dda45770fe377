use clap::Parser;

mod server;

/// Command line options for the creddash backend.
#[derive(Debug, Parser)]
#[command(about = "Social dashboard backend", version, author)]
pub struct Cli {
    #[clap(subcommand)]
    pub subcommand: Subcommand,
}

impl Cli {
    pub fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        match self.subcommand {
            Subcommand::Server(args) => self::server::run(args).map_err(Into::into),
        }
    }
}

#[derive(Debug, Parser)]
pub enum Subcommand {
    /// Expose the creddash HTTP API server
    Server(self::server::ServerCommand),
}
