use std::time::{Duration, Instant};

use mkfile::size_to_string;

const REFRESH: Duration = Duration::from_millis(500);

pub struct Progress {
    start: Instant,
    last: Option<Instant>,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            last: None,
        }
    }

    pub fn update(&mut self, written: u64, total: u64) {
        let now = Instant::now();
        let due = self.last.map_or(true, |x| now.duration_since(x) >= REFRESH);
        if !due && written < total {
            return;
        }
        self.last = Some(now);

        let elapsed = now.duration_since(self.start).as_secs_f64();
        let bytes_per_second = if elapsed > 0.0 {
            written as f64 / elapsed
        } else {
            0.0
        };
        display_progress(total - written, total, bytes_per_second);
    }
}

pub fn display_progress(left: u64, total: u64, bytes_per_second: f64) {
    let written = total - left;
    let bytes_per_second = bytes_per_second.round() as u64;
    let time_left = if bytes_per_second > 0 {
        left / bytes_per_second
    } else {
        0
    };

    let minutes_left = time_left / 60;
    let seconds_left = time_left % 60;

    let percent = if total > 0 {
        written as f32 * 100f32 / total as f32
    } else {
        100f32
    };

    eprintln!(
        "{:.2}% done ({} out of {}) written at {}/s ETA {:02}:{:02}",
        percent,
        written,
        total,
        size_to_string(bytes_per_second),
        minutes_left,
        seconds_left
    );
}
