use std::path::PathBuf;

use babyon::auth::{JwtVerifier, UserRole};
use babyon::config::AppConfig;
use babyon::error::AppError;
use clap::{Args, Parser, Subcommand};

use crate::demo::{run_demo, DemoArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Babyon API",
    about = "Run and demonstrate the Babyon sitter profile service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Walk through question hand-out and an AI video upload in process
    Demo(DemoArgs),
    /// Print a signed bearer token for local testing
    Token(TokenArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// CSV question bank to seed instead of the built-in questions
    #[arg(long)]
    pub(crate) questions: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct TokenArgs {
    /// Numeric user id placed in the token subject
    #[arg(long)]
    pub(crate) user_id: u64,
    /// sitter, parent or admin
    #[arg(long, default_value = "sitter", value_parser = parse_role)]
    pub(crate) role: UserRole,
    #[arg(long)]
    pub(crate) email: Option<String>,
    #[arg(long, default_value_t = 60)]
    pub(crate) ttl_minutes: i64,
}

fn parse_role(raw: &str) -> Result<UserRole, String> {
    UserRole::parse(raw).ok_or_else(|| format!("unknown role '{raw}' (expected sitter, parent or admin)"))
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args),
        Command::Token(args) => print_token(args),
    }
}

fn print_token(args: TokenArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let email = args
        .email
        .unwrap_or_else(|| format!("user{}@babyon.dev", args.user_id));
    let token = JwtVerifier::new(&config.auth.jwt_secret).issue(
        args.user_id,
        &email,
        args.role,
        chrono::Duration::minutes(args.ttl_minutes),
    )?;
    println!("{token}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_command_parses_role_and_defaults() {
        let cli = Cli::try_parse_from(["babyon-api", "token", "--user-id", "12", "--role", "Parent"])
            .expect("arguments parse");
        match cli.command {
            Some(Command::Token(args)) => {
                assert_eq!(args.user_id, 12);
                assert_eq!(args.role, UserRole::Parent);
                assert_eq!(args.ttl_minutes, 60);
            }
            other => panic!("expected token command, got {other:?}"),
        }
    }

    #[test]
    fn unknown_roles_are_rejected() {
        assert!(Cli::try_parse_from(["babyon-api", "token", "--user-id", "1", "--role", "nanny"]).is_err());
    }
}
