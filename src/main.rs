use core::convert::Infallible;

use ad9833::{Ad9833, Transport, Waveform};

/// Records every word the driver puts on the wire.
#[derive(Default)]
struct Recorder {
    words: Vec<u16>,
}

impl Transport for Recorder {
    type Error = Infallible;

    fn transmit16(&mut self, word: u16) -> Result<(), Infallible> {
        self.words.push(word);
        Ok(())
    }
}

fn dump(label: &str, words: &mut Vec<u16>) {
    println!("{label}:");
    for word in words.drain(..) {
        println!("  -> {word:#06X}");
    }
}

fn main() {
    let mut dds = Ad9833::new(Recorder::default());

    dds.initialize().unwrap();
    dump("initialize (137 Hz sine on FREQ0/PHASE0, FREQ1/PHASE1 preloaded)",
        &mut dds.transport_mut().words);

    dds.apply_config_1(4_000.0, 0.0, Waveform::Triangle).unwrap();
    dump("apply_config_1 (4 kHz triangle)", &mut dds.transport_mut().words);

    println!("control register cache: {:#06X}", dds.control_word());
}
