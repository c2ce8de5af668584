use env_logger::{Builder, WriteStyle};
use log::LevelFilter;

pub fn init_logging(verbose: bool, no_color: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let style = if no_color {
        WriteStyle::Never
    } else {
        WriteStyle::Auto
    };

    Builder::new()
        .filter_level(level)
        .write_style(style)
        .format_timestamp(None)
        .init();
}
