//! `DraftDesk` - terminal email triage with AI-drafted replies
//!
//! Reads commands from stdin and renders the triage list and reading pane to
//! stdout. Backend requests run in the background and post their results back
//! to the event loop.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod message;
mod view;

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Context;
use draftdesk_core::{
    HttpBackend, InboxService, NoticeLevel, PendingRequest, Settings, TriageListItem,
    TriageSession,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use message::{Command, Event};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they do not interleave with the rendered views.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "draftdesk=info,draftdesk_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting DraftDesk");

    let path = Settings::default_path();
    let is_first_run = !tokio::fs::try_exists(&path).await.unwrap_or(true);
    let mut settings = Settings::load(&path)
        .await
        .with_context(|| format!("loading settings from {}", path.display()))?;
    if is_first_run && let Err(e) = settings.save(&path).await {
        warn!(error = %e, "Failed to write default settings");
    }
    settings.apply_env()?;

    let backend = HttpBackend::new(&settings.backend).context("configuring backend")?;
    info!(backend = %backend.base_url(), "Using backend");

    let (tx, rx) = mpsc::unbounded_channel();
    let mut app = DraftDesk {
        session: TriageSession::new(),
        backend: Arc::new(backend),
        events: tx,
        inbox_limit: settings.inbox_limit,
        is_loading: false,
    };

    println!("{}", view::HELP);
    app.refresh_inbox();
    app.run(rx).await;

    info!("Goodbye");
    Ok(())
}

/// Application state.
struct DraftDesk {
    session: TriageSession,
    backend: Arc<HttpBackend>,
    events: mpsc::UnboundedSender<Event>,
    inbox_limit: usize,
    is_loading: bool,
}

impl DraftDesk {
    async fn run(&mut self, mut events: mpsc::UnboundedReceiver<Event>) {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let line = match line {
                        Ok(Some(line)) => line,
                        Ok(None) => break,
                        Err(e) => {
                            warn!(error = %e, "Failed to read stdin");
                            break;
                        }
                    };
                    match Command::parse(&line) {
                        Ok(Command::Quit) => break,
                        Ok(command) => self.update(command),
                        Err(usage) => println!("{usage}"),
                    }
                }
                Some(event) = events.recv() => self.handle_event(event),
            }

            for notice in self.session.drain_notices() {
                println!("{}", view::notice(&notice));
            }
        }
    }

    fn update(&mut self, command: Command) {
        match command {
            Command::List => println!("{}", view::inbox(&self.session, self.is_loading)),
            Command::Open(n) => {
                let selection = self
                    .session
                    .list_items(|id| Command::Select(id.clone()))
                    .get(n - 1)
                    .map(TriageListItem::click);
                match selection {
                    Some(select) => self.update(select),
                    None => println!("No email #{n}. Type `list` to see the inbox."),
                }
            }
            Command::Select(id) => {
                if self.session.select(&id) {
                    println!("{}", view::reading_pane(&self.session));
                }
            }
            Command::Show => println!("{}", view::reading_pane(&self.session)),
            Command::Draft => match self.session.request_draft() {
                Some(pending) => {
                    self.dispatch(pending);
                    println!("Generating draft...");
                }
                None => println!("{}", view::ignored("draft", &self.session)),
            },
            Command::Edit(text) => self.edit(text),
            Command::Append(text) => {
                let current = self
                    .session
                    .workflow()
                    .map(|w| w.draft().edited_text().to_string())
                    .unwrap_or_default();
                let text = if current.is_empty() {
                    text
                } else {
                    format!("{current}\n{text}")
                };
                self.edit(text);
            }
            Command::Send => match self.session.send_draft() {
                Some(pending) => {
                    self.dispatch(pending);
                    println!("Sending...");
                }
                None => println!("{}", view::ignored("send", &self.session)),
            },
            Command::Archive => match self.session.delete_or_archive() {
                Some(pending) => {
                    self.dispatch(pending);
                    println!("Archiving...");
                }
                None => println!("{}", view::ignored("archive", &self.session)),
            },
            Command::Refresh => self.refresh_inbox(),
            Command::RunAgent => self.run_agent(),
            Command::Help => println!("{}", view::HELP),
            Command::Quit => {}
        }
    }

    fn edit(&mut self, text: String) {
        if self.session.update_draft_text(text) {
            println!("{}", view::reading_pane(&self.session));
        } else {
            println!("{}", view::ignored("edit", &self.session));
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Completed(completion) => {
                if let Err(e) = self.session.apply(completion) {
                    // Already raised as a notice.
                    debug!(error = %e, "Request failed");
                }
                println!("{}", view::reading_pane(&self.session));
            }
            Event::InboxLoaded(Ok(mut emails)) => {
                self.is_loading = false;
                emails.truncate(self.inbox_limit);
                info!(count = emails.len(), "Inbox loaded");
                self.session.set_emails(emails);
                self.load_memories();
                println!("{}", view::inbox(&self.session, false));
            }
            Event::InboxLoaded(Err(e)) => {
                self.is_loading = false;
                self.session
                    .notify(NoticeLevel::Error, format!("Failed to load inbox: {e}"));
            }
            Event::MemoryLoaded(thread_id, Ok(memory)) => {
                let summary = memory.summary().map(str::to_string);
                self.session.set_summary(thread_id, summary);
            }
            Event::MemoryLoaded(thread_id, Err(e)) => {
                warn!(thread = %thread_id, error = %e, "Failed to load thread memory");
            }
            Event::AgentFinished(Ok(status)) => {
                self.session.notify(
                    NoticeLevel::Success,
                    format!("Agent finished: {}", status.status),
                );
                self.refresh_inbox();
            }
            Event::AgentFinished(Err(e)) => {
                self.session
                    .notify(NoticeLevel::Error, format!("Agent failed: {e}"));
            }
        }
    }

    /// Run a workflow request in the background.
    fn dispatch(&self, pending: PendingRequest) {
        let backend = Arc::clone(&self.backend);
        let events = self.events.clone();
        tokio::spawn(async move {
            let completion = pending.run(backend.as_ref()).await;
            let _ = events.send(Event::Completed(completion));
        });
    }

    fn refresh_inbox(&mut self) {
        self.is_loading = true;
        self.spawn(|backend| async move {
            Event::InboxLoaded(backend.list_emails().await.map_err(|e| e.to_string()))
        });
    }

    fn load_memories(&self) {
        let threads: HashSet<_> = self
            .session
            .emails()
            .iter()
            .map(|e| e.thread_id.clone())
            .filter(|t| !t.as_str().is_empty())
            .collect();

        for thread_id in threads {
            self.spawn(move |backend| async move {
                let memory = backend
                    .thread_memory(&thread_id)
                    .await
                    .map_err(|e| e.to_string());
                Event::MemoryLoaded(thread_id, memory)
            });
        }
    }

    fn run_agent(&self) {
        println!("Running agent...");
        self.spawn(|backend| async move {
            Event::AgentFinished(backend.run_agent().await.map_err(|e| e.to_string()))
        });
    }

    fn spawn<F, Fut>(&self, task: F)
    where
        F: FnOnce(Arc<HttpBackend>) -> Fut,
        Fut: Future<Output = Event> + Send + 'static,
    {
        let events = self.events.clone();
        let fut = task(Arc::clone(&self.backend));
        tokio::spawn(async move {
            let _ = events.send(fut.await);
        });
    }
}
