//! Key Decoder profiling program, same manual `Instant`-loop shape as
//! the teacher's `vtinput/benches/parser.rs`.

use std::collections::VecDeque;
use std::hint::black_box;
use std::time::{Duration, Instant};

use ledit_key::{DecodeOutcome, KeyDecoder};
use ledit_term::{ReadOutcome, TermError, TerminalPort};

/// Replays a fixed byte sequence, looping back to the start once
/// exhausted, so the decoder never hits EOF mid-benchmark.
struct LoopingPort {
    bytes: VecDeque<u8>,
    script: Vec<u8>,
}

impl LoopingPort {
    fn new(script: &[u8]) -> Self {
        Self {
            bytes: script.iter().copied().collect(),
            script: script.to_vec(),
        }
    }
}

impl TerminalPort for LoopingPort {
    fn enter_raw(&mut self) -> Result<(), TermError> {
        Ok(())
    }
    fn leave_raw(&mut self) -> Result<(), TermError> {
        Ok(())
    }
    fn read_byte(&mut self, _timeout_ms: i32) -> Result<ReadOutcome, TermError> {
        if self.bytes.is_empty() {
            self.bytes = self.script.iter().copied().collect();
        }
        Ok(ReadOutcome::Byte(self.bytes.pop_front().unwrap()))
    }
    fn write(&mut self, _bytes: &[u8]) -> Result<(), TermError> {
        Ok(())
    }
    fn is_tty(&self) -> bool {
        true
    }
    fn columns(&self) -> u16 {
        80
    }
    fn clear_screen(&mut self) -> Result<(), TermError> {
        Ok(())
    }
}

fn run_benchmark(script: &[u8], keys: usize) -> Duration {
    let decoder = KeyDecoder::default();
    let mut port = LoopingPort::new(script);
    let start = Instant::now();
    for _ in 0..keys {
        match decoder.next_key(&mut port).unwrap() {
            DecodeOutcome::Key(k) => {
                black_box(k);
            }
            DecodeOutcome::Eof => break,
        }
    }
    start.elapsed()
}

fn main() {
    println!("Key Decoder Profiler");
    println!("=====================\n");

    const KEYS: usize = 200_000;

    let cases: Vec<(&str, &[u8])> = vec![
        ("ASCII typing", b"the quick brown fox"),
        ("Arrow keys", b"\x1b[A\x1b[B\x1b[C\x1b[D"),
        ("Home/End/Delete", b"\x1b[H\x1b[F\x1b[3~"),
        ("UTF-8 multibyte", "café日本語".as_bytes()),
    ];

    for (name, script) in cases {
        let elapsed = run_benchmark(script, KEYS);
        let keys_per_sec = KEYS as f64 / elapsed.as_secs_f64();
        println!(
            "{:<20} {:>8} keys  {:>8.2} ms  {:>12.0} keys/s",
            name,
            KEYS,
            elapsed.as_secs_f64() * 1000.0,
            keys_per_sec
        );
    }
}
