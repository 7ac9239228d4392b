//! Motion consumer task
//!
//! Takes moves off the motion queue in order. A halt flushes every move
//! still waiting.

use defmt::*;
use embassy_futures::select::{select, Either};

use crate::channels::{MOTION_FLUSH, MOTION_QUEUE};
use crate::executor::MotionRequest;

/// Motion task - retires queued moves, flushes on halt
#[embassy_executor::task]
pub async fn motion_task() {
    info!("Motion task started");

    let mut retired: u32 = 0;

    loop {
        match select(MOTION_QUEUE.receive(), MOTION_FLUSH.wait()).await {
            Either::First(request) => {
                retired = retired.wrapping_add(1);
                run_move(retired, &request);
            }
            Either::Second(()) => {
                let discarded = flush_queue();
                warn!("Motion flushed, {} moves discarded", discarded);
            }
        }
    }
}

fn run_move(index: u32, request: &MotionRequest) {
    debug!(
        "Move #{}: {:?} in {:?} to {:?}, feed {:?}",
        index, request.mode, request.coords, request.target, request.feed
    );
}

/// Drop everything still queued
fn flush_queue() -> usize {
    let mut discarded = 0;
    while MOTION_QUEUE.try_receive().is_ok() {
        discarded += 1;
    }
    discarded
}
