use std::sync::Arc;

use anyhow::Context;
use log::info;
use pixgrid::{
    app::App,
    config::Config,
    presenter::{LogImageLoader, ResultsPresenter, TerminalGrid},
    search::{SearchClient, SearchQuery},
};
use reqwest::Client;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

const TEXT_EVENT_BUFFER: usize = 64;

/// Every line on stdin is the full contents of the search box after an edit
async fn read_text_events(events: mpsc::Sender<SearchQuery>) -> std::io::Result<()> {
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut line = Vec::new();
    loop {
        line.clear();
        if stdin.read_until(b'\n', &mut line).await? == 0 {
            return Ok(());
        }
        while matches!(line.last(), Some(b'\n') | Some(b'\r')) {
            line.pop();
        }
        if events.send(SearchQuery::from(line.clone())).await.is_err() {
            return Ok(());
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env().context("Could not load configuration")?;
    let client = SearchClient::new(Client::new(), &config).context("Invalid USER_AGENT")?;
    let presenter = ResultsPresenter::new(
        Box::new(TerminalGrid::new(std::io::stdout())),
        Box::new(LogImageLoader),
    );
    let app = App::new(Arc::new(client), presenter, &config);

    let (tx, rx) = mpsc::channel(TEXT_EVENT_BUFFER);
    let reader = tokio::spawn(read_text_events(tx));
    let presenter = app.run(rx).await;
    reader.await??;
    info!("Stopped with {} photos on screen", presenter.state().len());
    Ok(())
}

#[tokio::main]
async fn main() {
    better_panic::install();
    env_logger::init();

    if let Err(err) = run().await {
        eprintln!("{:?}", err);
        std::process::exit(1);
    }
}
