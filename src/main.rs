//! SPWM Modulator Main Application
//!
//! Entry point for the STM32G474-based modulator firmware.
//! Initializes hardware and spawns async tasks.

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::usart::{self, BufferedUart};
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use spwm_firmware::hal::pwm::PwmBank;
use spwm_firmware::hal::serial::Console;
use spwm_firmware::prelude::*;
use spwm_firmware::session::CommandSession;

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    USART2 => usart::BufferedInterruptHandler<peripherals::USART2>;
});

/// Live waveform configuration, shared with the PWM interrupt layer
static STORE: ConfigStore = ConfigStore::new(WaveformParams::STARTUP);

static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Bench bring-up PWM bank: logs register writes over RTT.
///
/// The board integration layer replaces this with an implementation over
/// the TIM1 registers and calls
/// [`spwm_firmware::hal::pwm::service_zero_crossing`] from each channel's
/// zero-crossing interrupt handler.
struct RttPwmBank;

impl PwmBank for RttPwmBank {
    fn set_period(&mut self, period: u16) {
        defmt::debug!("TBPRD <- {}", period);
    }

    fn set_phase(&mut self, channel: Channel, counts: u16) {
        defmt::debug!("{} TBPHS <- {}", channel, counts);
    }

    fn set_compare(&mut self, channel: Channel, compare: u16) {
        defmt::debug!("{} CMPA <- {}", channel, compare);
    }
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("SPWM Modulator Firmware v{}", env!("CARGO_PKG_VERSION"));

    // Initialize STM32G474 peripherals with default clock configuration
    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    // Status LED (PA5 on Nucleo boards)
    let led = Output::new(p.PA5, Level::Low, Speed::Low);

    // Operator console on USART2 (PA3 = RX, PA2 = TX, ST-Link VCP)
    let mut uart_config = usart::Config::default();
    uart_config.baudrate = CONSOLE_BAUD;
    let uart = BufferedUart::new(
        p.USART2,
        Irqs,
        p.PA3,
        p.PA2,
        TX_BUF.init([0; 256]),
        RX_BUF.init([0; 64]),
        uart_config,
    )
    .unwrap();

    info!("Console UART initialized at {} baud", CONSOLE_BAUD);

    // Spawn background tasks
    spawner.spawn(heartbeat_task(led)).unwrap();
    spawner.spawn(console_task(uart)).unwrap();

    info!("Tasks spawned, entering main loop");

    // Main loop - additional coordination can happen here
    loop {
        Timer::after(Duration::from_secs(10)).await;
        info!("Main loop tick");
    }
}

/// Operator console task - feeds received bytes into the command session
#[embassy_executor::task]
async fn console_task(uart: BufferedUart<'static>) {
    let mut session = CommandSession::new(&STORE);
    let mut bank = RttPwmBank;
    Console::new(uart).run(&mut session, &mut bank).await
}

/// Heartbeat task - blinks LED to show system is running
#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) {
    loop {
        led.set_high();
        Timer::after(Duration::from_millis(100)).await;
        led.set_low();
        Timer::after(Duration::from_millis(900)).await;
    }
}
