//! Relative navigation companion firmware for RP2040.
//!
//! Talks to the pose sensor over UART, runs the navigation pipeline at a
//! fixed control rate and publishes the result for the flight-control side.
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | UART1 TX | 8    | Request tokens to the sensor |
//! | UART1 RX | 9    | Pose frames from the sensor |
//! | LED      | 25   | On-board LED, lit while the link is fresh |
//!
//! # Architecture
//!
//! Four Embassy tasks:
//!
//! - **UART RX**: copies received bytes into the RX [`Pipe`](embassy_sync::pipe::Pipe)
//! - **UART TX**: drains the TX pipe onto the wire
//! - **Control**: runs [`RelNav::poll`](relnav_core::RelNav::poll) on a
//!   20 Hz ticker over a [`PipeChannel`] and publishes a snapshot
//! - **Status**: logs the snapshot once a second and drives the LED
//!
//! Task-to-task state goes through [`shared`]: blocking mutexes around
//! `Copy` values, read by copying.
//!
//! # Attitude Input
//!
//! This firmware does not estimate own-ship attitude. Whatever provides it
//! (an IMU task, or a task relaying the autopilot's attitude) must call
//! [`shared::publish_attitude`] at or above the control rate. Until the
//! first call the control task uses [`Attitude::LEVEL`], so guidance is
//! computed as if wings-level.
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`uart-flow-control`**: Enable hardware flow control (CTS/RTS on GPIO 10/11)

#![no_std]

pub mod channel;
pub mod events;
pub mod shared;

pub use channel::{uart_error_to_channel_error, PipeChannel, RxPipe, TxPipe};
pub use events::DefmtEventSink;

pub use relnav_core::{Attitude, PoseStatus, RelNav, RelNavConfig, RelNavSnapshot};
