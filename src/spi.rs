//! embedded-hal SPI transport

use embedded_hal::spi::SpiDevice;

use crate::Transport;

/// [`Transport`] backed by an `embedded-hal` 1.x [`SpiDevice`].
///
/// The AD9833 clocks data in on the falling SCLK edge with the clock idling
/// high (SPI mode 2), MSB first. FSYNC is the chip select and must frame
/// each 16-bit word, so configure the `SpiDevice` to manage FSYNC as its CS
/// line and keep transactions to a single word.
pub struct SpiTransport<SPI> {
    spi: SPI,
}

impl<SPI> SpiTransport<SPI> {
    pub fn new(spi: SPI) -> Self {
        SpiTransport { spi }
    }

    /// Consume the transport and return the SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiDevice> Transport for SpiTransport<SPI> {
    type Error = SPI::Error;

    fn transmit16(&mut self, word: u16) -> Result<(), Self::Error> {
        self.spi.write(&word.to_be_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::spi::{ErrorType, Operation};

    #[derive(Default)]
    struct LoggingSpi {
        bytes: Vec<u8>,
        transactions: usize,
    }

    impl ErrorType for LoggingSpi {
        type Error = Infallible;
    }

    impl SpiDevice for LoggingSpi {
        fn transaction(
            &mut self,
            operations: &mut [Operation<'_, u8>],
        ) -> Result<(), Infallible> {
            self.transactions += 1;
            for op in operations.iter() {
                if let Operation::Write(data) = op {
                    self.bytes.extend_from_slice(data);
                }
            }
            Ok(())
        }
    }

    #[test]
    fn words_go_out_big_endian_one_transaction_each() {
        let mut transport = SpiTransport::new(LoggingSpi::default());
        transport.transmit16(0x51F4).unwrap();
        transport.transmit16(0xC000).unwrap();

        let spi = transport.release();
        assert_eq!(spi.bytes, [0x51, 0xF4, 0xC0, 0x00]);
        // One CS assertion per 16-bit word.
        assert_eq!(spi.transactions, 2);
    }
}
