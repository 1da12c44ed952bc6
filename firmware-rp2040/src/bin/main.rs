#![no_std]
#![no_main]

use defmt::{error, info, trace};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{Async, Config as UartConfig, Uart, UartRx, UartTx};
use embassy_sync::pipe::Pipe;
use embassy_time::{Duration, Instant, Ticker};
use relnav_core::{FrameLayout, InitialLink, VisibilityMask};
use relnav_rp2040::channel::{RxPipe, TxPipe, TX_PIPE_SIZE};
use relnav_rp2040::{
    shared, uart_error_to_channel_error, DefmtEventSink, PipeChannel, RelNav, RelNavConfig,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
});

/// Sensor link speed.
const SENSOR_BAUD: u32 = 115_200;

/// Navigation pipeline rate.
const CONTROL_RATE_HZ: u64 = 20;

/// The tracking rig on the leader: five markers, no length byte.
const NAV_CONFIG: RelNavConfig = RelNavConfig::new()
    .with_layout(FrameLayout::IMPLICIT_WITH_VISIBILITY)
    .with_visibility_mask(VisibilityMask::FIVE_MARKERS)
    .with_initial_link(InitialLink::Stale);

/// Bytes from the sensor, filled by the RX task.
static RX_PIPE: StaticCell<RxPipe> = StaticCell::new();

/// Request tokens to the sensor, drained by the TX task.
static TX_PIPE: StaticCell<TxPipe> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("RelNav companion starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let rx_pipe: &'static RxPipe = RX_PIPE.init(Pipe::new());
    let tx_pipe: &'static TxPipe = TX_PIPE.init(Pipe::new());

    // --- UART Setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = SENSOR_BAUD;

    #[cfg(not(feature = "uart-flow-control"))]
    let uart = Uart::new(
        p.UART1,
        p.PIN_8, // TX
        p.PIN_9, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    #[cfg(feature = "uart-flow-control")]
    let uart = Uart::new_with_rtscts(
        p.UART1,
        p.PIN_8,  // TX
        p.PIN_9,  // RX
        p.PIN_11, // RTS
        p.PIN_10, // CTS
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let (tx, rx) = uart.split();

    // On-board LED: lit while the link is fresh
    let led = Output::new(p.PIN_25, Level::Low);

    // Spawn tasks (spawn the SpawnToken, then unwrap the result)
    spawner.spawn(uart_rx_task(rx, rx_pipe)).unwrap();
    spawner.spawn(uart_tx_task(tx, tx_pipe)).unwrap();
    spawner.spawn(control_task(rx_pipe, tx_pipe)).unwrap();
    spawner.spawn(status_task(led)).unwrap();

    info!("RelNav companion initialized, polling sensor...");
}

/// Milliseconds since boot, truncated. The link monitor works in wrapping
/// `u32` time.
fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// UART RX task - moves sensor bytes into the RX pipe.
#[embassy_executor::task]
async fn uart_rx_task(mut rx: UartRx<'static, Async>, pipe: &'static RxPipe) {
    let mut byte = [0u8; 1];
    loop {
        if let Err(e) = rx.read(&mut byte).await {
            error!("UART RX error: {:?}", uart_error_to_channel_error(e));
            continue;
        }
        // A full pipe means the control task is behind; its backlog drain
        // discards old frames anyway
        if pipe.try_write(&byte).is_err() {
            trace!("RX pipe full, byte dropped");
        }
    }
}

/// UART TX task - writes queued request tokens to the sensor.
#[embassy_executor::task]
async fn uart_tx_task(mut tx: UartTx<'static, Async>, pipe: &'static TxPipe) {
    let mut buf = [0u8; TX_PIPE_SIZE];
    loop {
        let n = pipe.read(&mut buf).await;
        if let Err(e) = tx.write(&buf[..n]).await {
            error!("UART TX error: {:?}", uart_error_to_channel_error(e));
        }
    }
}

/// Control task - runs the navigation pipeline at a fixed rate.
#[embassy_executor::task]
async fn control_task(rx_pipe: &'static RxPipe, tx_pipe: &'static TxPipe) {
    let mut channel = PipeChannel::new(rx_pipe, tx_pipe);
    let mut nav = match RelNav::new(&mut channel, NAV_CONFIG, DefmtEventSink, now_ms()) {
        Ok(nav) => nav,
        Err(e) => {
            error!("RelNav config rejected: {}", e);
            return;
        }
    };

    // A failed first request is logged by the sink; the next tick retries
    let _ = nav.begin();

    let mut ticker = Ticker::every(Duration::from_hz(CONTROL_RATE_HZ));
    loop {
        ticker.next().await;
        nav.poll(shared::attitude(), now_ms());
        shared::publish_snapshot(nav.snapshot());
    }
}

/// Status task - logs the published state once a second and drives the LED.
#[embassy_executor::task]
async fn status_task(mut led: Output<'static>) {
    let mut ticker = Ticker::every(Duration::from_secs(1));
    loop {
        ticker.next().await;
        let snapshot = shared::snapshot();
        led.set_level(Level::from(!snapshot.stale));

        let guidance = snapshot.guidance;
        info!(
            "RelNav: ticks={} stale={} status={} bearing={}cd alt={}cm range={}cm pitch={}cd",
            shared::control_ticks(),
            snapshot.stale,
            snapshot.status,
            guidance.bearing_error_cd,
            guidance.altitude_error_cm,
            guidance.slant_range_cm,
            guidance.pitch_command_cd,
        );
    }
}
