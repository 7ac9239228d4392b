//! Halt button task
//!
//! A normally-open button to ground latches the machine into halt from
//! outside the host protocol.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Timer};

use quill_core::state::HaltCause;

use crate::channels::{HALT_REQUEST, MOTION_FLUSH};

/// Debounce delay after a falling edge
const DEBOUNCE: Duration = Duration::from_millis(20);

/// Halt button task
#[embassy_executor::task]
pub async fn halt_button_task(mut button: Input<'static>) {
    info!("Halt button task started");

    loop {
        button.wait_for_falling_edge().await;

        // Debounce
        Timer::after(DEBOUNCE).await;

        if button.is_low() {
            warn!("Halt button pressed");
            // Motion stops now; the console latches the halt before its next line
            MOTION_FLUSH.signal(());
            HALT_REQUEST.signal(HaltCause::External);

            // Wait for release
            button.wait_for_high().await;
        }
    }
}
