//! Host console task
//!
//! Assembles lines from the host UART, runs them through the dispatch
//! engine and writes the buffered replies back.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::{Read, Write};

use quill_core::config::DispatchConfig;
use quill_core::{DispatchEngine, Disposition, LineError as DispatchLineError, RawLine};
use quill_protocol::{LineAssembler, LineError, Reply, ReplyLog, ReplySink};

use crate::channels::HALT_REQUEST;
use crate::executor::QueueExecutor;
use crate::halt::SignalHaltControl;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Replies buffered per line
const REPLY_LOG_SIZE: usize = 16;

type Engine = DispatchEngine<QueueExecutor, SignalHaltControl>;

/// Console task - one line at a time, replies flushed before the next line
#[embassy_executor::task]
pub async fn console_task(mut rx: BufferedUartRx, mut tx: BufferedUartTx, config: DispatchConfig) {
    info!("Console task started");

    let mut engine: Engine = DispatchEngine::new(QueueExecutor::new(), SignalHaltControl, config);
    let mut assembler = LineAssembler::new();
    let mut replies: ReplyLog<REPLY_LOG_SIZE> = ReplyLog::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        let n = match rx.read(&mut buf).await {
            Ok(n) => n,
            Err(e) => {
                // The line in progress may have lost bytes
                warn!("UART read error: {:?}", e);
                assembler.reset();
                continue;
            }
        };

        for &byte in &buf[..n] {
            match assembler.feed(byte) {
                Ok(Some(line)) => {
                    handle_line(&mut engine, &line, &mut replies);
                    flush(&mut tx, &mut replies).await;
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("Line assembly error: {:?}", e);
                    replies.send(&Reply::Rejected(reject_reason(e)));
                    flush(&mut tx, &mut replies).await;
                }
            }
        }
    }
}

fn handle_line(engine: &mut Engine, line: &str, replies: &mut ReplyLog<REPLY_LOG_SIZE>) {
    if let Some(cause) = HALT_REQUEST.try_take() {
        engine.halt(cause);
        warn!("External halt: {:?}", cause);
    }

    trace!("Line: {}", line);
    if engine.process_line(RawLine::new(line), replies) == Disposition::NotConsumed {
        debug!("Line left for another interpreter: {}", line);
    }
}

fn reject_reason(e: LineError) -> &'static str {
    match e {
        LineError::Overflow => DispatchLineError::TooLong.reason(),
        LineError::InvalidUtf8 => "Invalid characters",
    }
}

/// Write buffered replies to the host, oldest first
async fn flush(tx: &mut BufferedUartTx, replies: &mut ReplyLog<REPLY_LOG_SIZE>) {
    if replies.dropped() > 0 {
        warn!("{} replies dropped", replies.dropped());
    }

    while let Some(reply) = replies.pop() {
        if let Err(e) = tx.write_all(reply.as_bytes()).await {
            warn!("UART write failed: {:?}", e);
            break;
        }
    }
    replies.clear();
}
