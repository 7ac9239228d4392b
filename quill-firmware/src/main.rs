//! Quill - G-code Command Ingestion Firmware
//!
//! Main firmware binary for RP2040-based motion controllers. Receives
//! G-code lines from a host over UART0, validates and dispatches them, and
//! answers with the line protocol's acknowledgments.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use quill_core::config::DispatchConfig;

mod channels;
mod executor;
mod halt;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 512]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 512]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Quill firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Compiled-in dispatch configuration
    let config = DispatchConfig::default();
    info!("Dispatch config: {:?}", config);

    // Host console on UART0, 115200 baud default
    let uart_config = UartConfig::default();

    let tx_buf = TX_BUF.init([0u8; 512]);
    let rx_buf = RX_BUF.init([0u8; 512]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    info!("UART initialized for host console");

    // Halt button on GPIO 2, active low
    let halt_button = Input::new(p.PIN_2, Pull::Up);

    spawner.spawn(tasks::motion_task()).unwrap();
    spawner.spawn(tasks::halt_button_task(halt_button)).unwrap();
    spawner.spawn(tasks::console_task(rx, tx, config)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
}
