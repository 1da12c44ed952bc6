//! [`ByteChannel`] over a pair of Embassy pipes.
//!
//! The UART tasks own the peripheral halves and move bytes between the wire
//! and the pipes; the control task only ever touches the pipes, so polling
//! never waits on the UART.

use embassy_rp::uart::Error as UartError;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::pipe::Pipe;
use relnav_proto::{ByteChannel, ChannelError};

/// Receive pipe capacity: room for several frames of backlog.
pub const RX_PIPE_SIZE: usize = 128;

/// Transmit pipe capacity: a handful of request tokens.
pub const TX_PIPE_SIZE: usize = 32;

pub type RxPipe = Pipe<CriticalSectionRawMutex, RX_PIPE_SIZE>;
pub type TxPipe = Pipe<CriticalSectionRawMutex, TX_PIPE_SIZE>;

/// Control-task side of the UART pipes.
pub struct PipeChannel<'p> {
    rx: &'p RxPipe,
    tx: &'p TxPipe,
}

impl<'p> PipeChannel<'p> {
    #[must_use]
    pub const fn new(rx: &'p RxPipe, tx: &'p TxPipe) -> Self {
        Self { rx, tx }
    }
}

impl ByteChannel for PipeChannel<'_> {
    fn available(&self) -> usize {
        self.rx.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.rx.try_read(&mut byte) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), ChannelError> {
        if self.tx.free_capacity() < bytes.len() {
            return Err(ChannelError::Full);
        }
        let mut rest = bytes;
        while !rest.is_empty() {
            let n = self.tx.try_write(rest).map_err(|_| ChannelError::Full)?;
            rest = &rest[n..];
        }
        Ok(())
    }

    fn skip(&mut self, count: usize) -> usize {
        let mut scratch = [0u8; 32];
        let mut skipped = 0;
        while skipped < count {
            let chunk = (count - skipped).min(scratch.len());
            match self.rx.try_read(&mut scratch[..chunk]) {
                Ok(n) => skipped += n,
                Err(_) => break,
            }
        }
        skipped
    }
}

/// Map UART errors onto the channel error space.
///
/// A helper instead of a `From` impl: both types live in foreign crates.
#[inline]
#[must_use]
pub fn uart_error_to_channel_error(e: UartError) -> ChannelError {
    match e {
        UartError::Overrun => ChannelError::Full,
        _ => ChannelError::Io,
    }
}
