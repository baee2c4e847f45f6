use clap::Parser;
use lockbox::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    lockbox::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Init { no_key_file } => lockbox::cli::commands::init::execute(&cli, no_key_file),
        Commands::Keygen { ref output } => {
            lockbox::cli::commands::keygen::execute(&cli, output.as_deref())
        }
        Commands::Add {
            ref site,
            ref username,
            ref secret,
        } => lockbox::cli::commands::add::execute(&cli, site, username, secret.as_deref()),
        Commands::List { json } => lockbox::cli::commands::list::execute(&cli, json),
        Commands::Reveal { id, copy } => lockbox::cli::commands::reveal::execute(&cli, id, copy),
        Commands::Remove { id, force } => lockbox::cli::commands::remove::execute(&cli, id, force),
        Commands::Audit { last } => lockbox::cli::commands::audit_cmd::execute(&cli, last),
        Commands::Completions { shell } => lockbox::cli::commands::completions::execute(shell),
        Commands::Version => lockbox::cli::commands::version::execute(),
    };

    if let Err(e) = result {
        lockbox::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
