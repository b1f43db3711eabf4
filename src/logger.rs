pub use data::log::Error;

pub fn setup(is_debug: bool) -> Result<(), Error> {
    let level_filter = std::env::var("RUST_LOG")
        .ok()
        .as_deref()
        .map(str::parse::<log::Level>)
        .transpose()?
        .unwrap_or(log::Level::Info)
        .to_level_filter();

    let mut io_sink = fern::Dispatch::new().format(|out, message, record| {
        out.finish(format_args!(
            "{}:{} -- {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            message
        ));
    });

    if is_debug {
        io_sink = io_sink.chain(std::io::stdout());
    } else {
        let log_path = data::log::path()?;
        data::log::rotate(&log_path)?;

        io_sink = io_sink.chain(fern::log_file(log_path).map_err(data::log::Error::Io)?);
    }

    fern::Dispatch::new()
        .level(log::LevelFilter::Off)
        .level_for("iced_wgpu", log::LevelFilter::Info)
        .level_for("data", level_filter)
        .level_for("api", level_filter)
        .level_for("trastboard", level_filter)
        .chain(io_sink)
        .apply()?;

    Ok(())
}
