use std::io;

use mkfile::Status;

mod progress;

pub use progress::Progress;

pub fn setup_logging(verbosity_level: u32) {
    use fern::colors::{Color, ColoredLevelConfig};

    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::White)
        .debug(Color::BrightWhite)
        .trace(Color::Cyan);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            const SUFFIX: &str = "\x1b[0m";
            let prefix = format!(
                "[{}][{}]\x1b[{}m ",
                record.target(),
                record.level(),
                colors.get_color(&record.level()).to_fg_str()
            );

            // every line gets its own prefix so multi-line messages stay aligned
            let lines: Vec<String> = message
                .to_string()
                .split('\n')
                .map(|line| format!("{}{}{}", prefix, line, SUFFIX))
                .collect();

            out.finish(format_args!("{}", lines.join("\n")))
        })
        .level(match verbosity_level {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Warn,
            2 => log::LevelFilter::Info,
            3 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .chain(io::stdout())
        .apply()
        .unwrap();
}

pub fn exit_code(status: Status) -> i32 {
    match status {
        Status::Ok | Status::Cancelled => 0,
        Status::ClientError => 2,
        Status::Conflict => 3,
        Status::ServerError => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::exit_code;
    use mkfile::{Error, Status};
    use std::path::PathBuf;

    #[test]
    fn test_exit_code() {
        assert_eq!(exit_code(Status::Cancelled), 0);
        assert_eq!(exit_code(Error::UnknownSuffix('X').status()), 2);
        assert_eq!(exit_code(Error::FileExists(PathBuf::from("x")).status()), 3);
        assert_eq!(exit_code(Status::ServerError), 4);
    }
}
