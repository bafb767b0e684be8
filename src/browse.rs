//! Interactive mode: identifiers arrive on stdin one per line, several reads
//! may be in flight at once, and only the newest identifier's result is
//! rendered.

use crate::cli::OutputFormat;
use crate::controller::{DetailController, FetchTicket};
use crate::display::DiscountFormula;
use crate::error::DetailError;
use crate::model::{Identifier, Record};
use crate::output;
use crate::reader::RecordReader;
use crate::variant::VariantOptions;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

type Completion = (FetchTicket, Result<Record, DetailError>);

pub struct BrowseSession<'a> {
    reader: Arc<dyn RecordReader>,
    options: &'a VariantOptions,
    formula: DiscountFormula,
    format: OutputFormat,
}

impl<'a> BrowseSession<'a> {
    pub fn new(
        reader: Arc<dyn RecordReader>,
        options: &'a VariantOptions,
        formula: DiscountFormula,
        format: OutputFormat,
    ) -> Self {
        Self {
            reader,
            options,
            formula,
            format,
        }
    }

    /// Runs until input is exhausted (or `q`/`quit` is read) and every
    /// outstanding read has completed.
    pub async fn run<I, O>(&self, mut input: I, mut out: O) -> Result<(), DetailError>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        let mut controller = DetailController::new();
        let mut pending: FuturesUnordered<BoxFuture<'static, Completion>> =
            FuturesUnordered::new();
        let mut buf = Vec::new();
        let mut input_open = true;

        loop {
            tokio::select! {
                read = input.read_until(b'\n', &mut buf), if input_open => {
                    match read {
                        Ok(0) => {
                            input_open = false;
                            continue;
                        }
                        Ok(_) => {}
                        Err(e) => {
                            tracing::warn!("Stopped reading input: {}", e);
                            input_open = false;
                            continue;
                        }
                    }

                    let line = match std::str::from_utf8(&buf) {
                        Ok(text) => text.trim().to_string(),
                        Err(_) => {
                            buf.clear();
                            self.write_line(&mut out, "Ignoring input line that is not valid UTF-8")
                                .await?;
                            continue;
                        }
                    };
                    buf.clear();

                    if line.is_empty() {
                        continue;
                    }
                    if line == "q" || line == "quit" {
                        input_open = false;
                        continue;
                    }

                    let id = match Identifier::parse(&line) {
                        Ok(id) => id,
                        Err(e) => {
                            self.write_line(&mut out, &e.to_string()).await?;
                            continue;
                        }
                    };

                    if let Some(ticket) = controller.set_identifier(id) {
                        pending.push(self.spawn_fetch(ticket));
                        self.write_state(&controller, &mut out).await?;
                    }
                }
                Some((ticket, result)) = pending.next(), if !pending.is_empty() => {
                    if controller.complete(ticket, result) {
                        self.write_state(&controller, &mut out).await?;
                    }
                }
                else => break,
            }
        }

        Ok(())
    }

    fn spawn_fetch(&self, ticket: FetchTicket) -> BoxFuture<'static, Completion> {
        let reader = Arc::clone(&self.reader);
        Box::pin(async move {
            let result = reader.fetch(&ticket.id).await;
            (ticket, result)
        })
    }

    async fn write_line<O>(&self, out: &mut O, text: &str) -> Result<(), DetailError>
    where
        O: AsyncWrite + Unpin,
    {
        out.write_all(format!("{}\n", text).as_bytes()).await?;
        out.flush().await?;
        Ok(())
    }

    async fn write_state<O>(
        &self,
        controller: &DetailController,
        out: &mut O,
    ) -> Result<(), DetailError>
    where
        O: AsyncWrite + Unpin,
    {
        let rendered =
            output::render(controller.state(), self.options, self.formula, self.format)?;
        out.write_all(rendered.as_bytes()).await?;
        out.flush().await?;
        Ok(())
    }
}
