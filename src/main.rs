// RTMP upload bandwidth tester
//
// Usage:
//   rtmp_tester <url> <stream-key> [duration-seconds]
//
// A duration of 0 (or none) keeps sending until the process is stopped; a
// negative one sets up the session and sends nothing.
// The result is printed to stdout as JSON.

use rtmp_tester::{render_report, BandwidthTester};
use std::env;
use log::error;

const DEFAULT_URL: &str = "rtmp://localhost/stream";
const DEFAULT_STREAM_KEY: &str = "SOMEKEY";

/// Leading signed decimal integer of `arg`, or 0 when there is none.
///
/// Trailing text is ignored, so `5.5` reads as 5 and `-5` stays negative.
fn parse_duration_arg(arg: &str) -> i64 {
    let trimmed = arg.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits_len = trimmed[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    trimmed[..sign_len + digits_len].parse().unwrap_or(0)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let (url, stream_key, duration_secs) = if args.len() >= 3 {
        let duration = args.get(3).map_or(0, |d| parse_duration_arg(d));
        (args[1].clone(), args[2].clone(), duration)
    } else {
        (DEFAULT_URL.to_string(), DEFAULT_STREAM_KEY.to_string(), 0)
    };

    let tester = BandwidthTester::new();
    let result = match tester.run(&url, &stream_key, duration_secs).await {
        Ok(result) => result,
        Err(e) => {
            error!("Bandwidth test failed: {}", e);
            std::process::exit(1);
        }
    };

    match render_report(&result) {
        Ok(report) => println!("{}", report),
        Err(e) => error!("Error rendering result: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_arg() {
        assert_eq!(parse_duration_arg("30"), 30);
        assert_eq!(parse_duration_arg(" 7"), 7);
        assert_eq!(parse_duration_arg("+3"), 3);
        assert_eq!(parse_duration_arg("-5"), -5);
        assert_eq!(parse_duration_arg("5.5"), 5);
        assert_eq!(parse_duration_arg("10s"), 10);
    }

    #[test]
    fn test_parse_duration_arg_defaults_to_zero() {
        for arg in ["", "abc", "-", "+", ".5", "99999999999999999999"] {
            assert_eq!(parse_duration_arg(arg), 0, "{:?}", arg);
        }
    }
}
