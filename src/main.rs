use clap::Parser;
use snipster::api;
use snipster::cli::{Cli, Command};
use snipster::config::Config;
use snipster::logging;
use snipster::model::{join_tags, Snippet};
use snipster::repo::{self, SnippetRepository};
use snipster::report;
use std::process::ExitCode;

fn log_level(cli: &Cli) -> &'static str {
    if cli.global.verbose {
        "debug"
    } else if matches!(cli.command, Command::Serve(_)) {
        "info"
    } else {
        "warn"
    }
}

fn run_command(command: Command, repo: &mut dyn SnippetRepository) -> snipster::Result<()> {
    match command {
        Command::Add(args) => {
            let tags = join_tags(&args.tag_list());
            let mut snippet = Snippet::new(args.title, args.code, args.language)
                .with_favorite(args.favorite);
            snippet.description = args.description;
            snippet.tags = tags;

            println!("{}", repo.add(snippet)?);
        }
        Command::All(args) => {
            let snippets = repo.all()?;
            report::print_list(&snippets, args.json)?;
        }
        Command::Get(args) => {
            let snippet = repo.get(args.id)?;
            report::print_one(&snippet, args.json)?;
        }
        Command::Delete(args) => {
            println!("{}", repo.delete(args.id)?);
        }
        Command::Favorite(args) => {
            println!("{}", repo.toggle_favorite(args.id)?);
        }
        Command::Tag(args) => {
            let tags = args.tag_list();
            println!("{}", repo.tag(args.id, &tags, args.remove)?);
        }
        Command::Serve(_) => {
            unreachable!("serve is dispatched before opening a command repository")
        }
    }

    repo.flush()
}

fn serve(mut config: Config, bind: Option<std::net::SocketAddr>) -> snipster::Result<()> {
    if let Some(bind) = bind {
        config.bind = bind;
    }

    let repo = repo::open_repository(&config)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(api::run_http_server(repo, config.bind))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    dotenv::dotenv().ok();
    logging::init(log_level(&cli));

    let config = match Config::load(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Command::Serve(args) => serve(config, args.bind),
        command => repo::open_repository(&config)
            .and_then(|mut repo| run_command(command, repo.as_mut())),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
