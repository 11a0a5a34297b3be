//! `jobhunter dashboard`: an interactive loop over one `DashboardState`.
//!
//! One command is handled at a time; every remote call is awaited before the
//! next line is read. Alerts raised while handling a command are printed once
//! it finishes.

use std::str::FromStr;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use crate::commands::alert;
use crate::commands::jobs::{generate_for_job, print_detail, print_page};
use crate::dashboard::bulk::generate_for_selected;
use crate::dashboard::pagination::Paginator;
use crate::dashboard::DashboardState;
use crate::models::resume::DocumentKind;
use crate::state::AppState;

const HELP: &str = "\
commands:
  search <query>        find and rank jobs (clears the selection)
  list                  show the current page
  next | prev | page N  move between pages
  show <id>             show job details and make it active
  toggle <id>           check/uncheck a job for bulk actions
  select-page | clear   select the visible page / clear the selection
  resume [id]           tailored resume for a job (default: active job)
  letter [id]           cover letter for a job (default: active job)
  bulk resume|letter    generate for every selected job, one at a time
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardCommand {
    Search(String),
    List,
    Next,
    Prev,
    Page(usize),
    Show(String),
    Toggle(String),
    SelectPage,
    Clear,
    Generate(DocumentKind, Option<String>),
    Bulk(DocumentKind),
    Help,
    Quit,
}

fn parse_kind(word: &str) -> Option<DocumentKind> {
    match word {
        "resume" | "resumes" => Some(DocumentKind::Resume),
        "letter" | "letters" | "cover-letter" => Some(DocumentKind::CoverLetter),
        _ => None,
    }
}

impl FromStr for DashboardCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());
        let needs_arg = |name: &str| format!("usage: {name} <id>");

        match head {
            "search" | "s" => Ok(DashboardCommand::Search(rest.to_string())),
            "list" | "ls" => Ok(DashboardCommand::List),
            "next" | "n" => Ok(DashboardCommand::Next),
            "prev" | "p" => Ok(DashboardCommand::Prev),
            "page" => rest
                .parse::<usize>()
                .map(DashboardCommand::Page)
                .map_err(|_| "usage: page <number>".to_string()),
            "show" => arg.map(DashboardCommand::Show).ok_or_else(|| needs_arg("show")),
            "toggle" | "t" => arg
                .map(DashboardCommand::Toggle)
                .ok_or_else(|| needs_arg("toggle")),
            "select-page" => Ok(DashboardCommand::SelectPage),
            "clear" => Ok(DashboardCommand::Clear),
            "resume" => Ok(DashboardCommand::Generate(DocumentKind::Resume, arg)),
            "letter" => Ok(DashboardCommand::Generate(DocumentKind::CoverLetter, arg)),
            "bulk" => parse_kind(rest)
                .map(DashboardCommand::Bulk)
                .ok_or_else(|| "usage: bulk resume|letter".to_string()),
            "help" | "?" => Ok(DashboardCommand::Help),
            "quit" | "exit" | "q" => Ok(DashboardCommand::Quit),
            other => Err(format!("unknown command '{other}', try 'help'")),
        }
    }
}

pub async fn run(state: &AppState) -> Result<()> {
    let mut dashboard = DashboardState::new(Paginator::new(state.config.page_size)?);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    println!("{HELP}");
    loop {
        stdout.write_all(b"jobhunter> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<DashboardCommand>() {
            Ok(DashboardCommand::Quit) => break,
            Ok(command) => handle(state, &mut dashboard, command).await,
            Err(usage) => println!("{usage}"),
        }

        for message in dashboard.take_alerts() {
            alert(&message);
        }
    }

    info!("Dashboard closed");
    Ok(())
}

async fn handle(state: &AppState, dashboard: &mut DashboardState, command: DashboardCommand) {
    match command {
        DashboardCommand::Search(query) => {
            if !dashboard.begin_search(&query) {
                return;
            }
            let query = dashboard.query().to_string();
            match state.client.match_jobs(&query, state.config.match_limit).await {
                Ok(results) => dashboard.finish_search(results),
                Err(e) => dashboard.fail_search(&e),
            }
            print_page(dashboard);
        }
        DashboardCommand::List => print_page(dashboard),
        DashboardCommand::Next => {
            dashboard.next_page();
            print_page(dashboard);
        }
        DashboardCommand::Prev => {
            dashboard.prev_page();
            print_page(dashboard);
        }
        DashboardCommand::Page(n) => {
            dashboard.goto_page(n);
            print_page(dashboard);
        }
        DashboardCommand::Show(id) => {
            if dashboard.set_active(&id) {
                if let Some(result) = dashboard.active() {
                    print_detail(result);
                }
            } else {
                println!("No job with id {id} in the current results");
            }
        }
        DashboardCommand::Toggle(id) => match dashboard.toggle_selection(&id) {
            Some(true) => println!("Selected {id} ({} selected)", dashboard.selection_len()),
            Some(false) => println!("Unselected {id} ({} selected)", dashboard.selection_len()),
            None => println!("No job with id {id} in the current results"),
        },
        DashboardCommand::SelectPage => {
            dashboard.select_page();
            println!("{} jobs selected", dashboard.selection_len());
        }
        DashboardCommand::Clear => dashboard.clear_selection(),
        DashboardCommand::Generate(kind, id) => {
            let job = match id {
                Some(id) => dashboard.find(&id).map(|r| r.job.clone()),
                None => dashboard.active().map(|r| r.job.clone()),
            };
            match job {
                Some(job) => generate_for_job(state, dashboard, kind, &job).await,
                None => println!("Select a job to view details first"),
            }
        }
        DashboardCommand::Bulk(kind) => {
            if dashboard.selection_len() == 0 {
                println!("No jobs selected");
                return;
            }
            let mut sink = state.sink();
            let report = generate_for_selected(dashboard, kind, &state.client, &mut sink).await;
            println!(
                "{}: {} of {} generated, {} failed",
                report.kind.label(),
                report.succeeded(),
                report.attempted(),
                report.failed()
            );
        }
        DashboardCommand::Help => println!("{HELP}"),
        DashboardCommand::Quit => {}
    }
}
