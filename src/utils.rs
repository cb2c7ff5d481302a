use std::time::Instant;

/// Sink for the stage's progress and error messages, each line stamped with
/// the time elapsed since the sink was created
pub struct Progress {
    start: Instant,
}

impl Progress {
    pub fn new() -> Self {
        Progress {
            start: Instant::now(),
        }
    }

    pub fn info<T: std::fmt::Display>(&mut self, s: T) {
        println!("[{:6.1}s] {}", self.elapsed(), s);
    }

    /// Report a non-fatal problem; the stage carries on
    pub fn error<T: std::fmt::Display>(&mut self, s: T) {
        eprintln!("[{:6.1}s] ERROR {}", self.elapsed(), s);
    }

    fn elapsed(&self) -> f32 {
        (Instant::now() - self.start).as_secs_f32()
    }
}

pub fn format_bytes(n: u64) -> String {
    if n < 1000 {
        format!("{}B", n)
    } else if n < 1000 * 1024 {
        format!("{:.1}kiB", n as f32 / 1024.)
    } else if n < 1000 * 1024 * 1024 {
        format!("{:.1}MiB", n as f32 / 1024. / 1024.)
    } else {
        format!("{:.1}GiB", n as f32 / 1024. / 1024. / 1024.)
    }
}

pub fn format_num(n: usize) -> String {
    if n < 1000 {
        format!("{}", n)
    } else if n < 1000 * 1000 {
        format!("{:.1}k", n as f32 / 1000.)
    } else {
        format!("{:.1}M", n as f32 / 1000. / 1000.)
    }
}
