//! Renderer profiling program, same manual `Instant`-loop shape as the
//! teacher's `vtinput/benches/parser.rs` and `vtio/benches/parser.rs`.

use std::hint::black_box;
use std::time::{Duration, Instant};

use ledit_edit::RenderMetrics;
use ledit_render::{AppendBuffer, render_multi_line, render_single_line};

fn bench_single_line(line: &[u8], pos: usize, cols: u16, iters: usize) -> Duration {
    let mut out = AppendBuffer::new();
    let start = Instant::now();
    for _ in 0..iters {
        out.clear();
        black_box(render_single_line(&mut out, "prompt> ", line, pos, cols, false, None, None));
    }
    start.elapsed()
}

fn bench_multi_line(line: &[u8], pos: usize, cols: u16, iters: usize) -> Duration {
    let mut out = AppendBuffer::new();
    let mut metrics = RenderMetrics::default();
    let start = Instant::now();
    for _ in 0..iters {
        out.clear();
        render_multi_line(&mut out, "prompt> ", line, pos, cols, false, None, None, &mut metrics);
    }
    start.elapsed()
}

fn main() {
    println!("Renderer Profiler");
    println!("==================\n");

    const ITERS: usize = 100_000;
    let short = b"hello world".to_vec();
    let long_line = "x".repeat(400).into_bytes();

    let cases: Vec<(&str, fn(&[u8], usize, u16, usize) -> Duration, &[u8], usize, u16)> = vec![
        ("single-line, fits", bench_single_line, &short, 6, 80),
        ("single-line, scrolls", bench_single_line, &long_line, 400, 80),
        ("multi-line, one row", bench_multi_line, &short, 6, 80),
        ("multi-line, wraps", bench_multi_line, &long_line, 400, 80),
    ];

    for (name, f, line, pos, cols) in cases {
        let elapsed = f(line, pos, cols, ITERS);
        let frames_per_sec = ITERS as f64 / elapsed.as_secs_f64();
        println!(
            "{:<24} {:>8} iters  {:>8.2} ms  {:>12.0} frames/s",
            name,
            ITERS,
            elapsed.as_secs_f64() * 1000.0,
            frames_per_sec
        );
    }
}
