use std::{
    fs::{self, File},
    io,
    path::Path,
};

use anyhow::Result;
use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    {ContentLimit, FileRotate},
};
use log::Log;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

pub struct MainLogger {
    write_logger: Box<WriteLogger<FileRotate<AppendTimestamp>>>,
    echo_to_stderr: bool,
}

impl Log for MainLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.write_logger.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        self.write_logger.log(record);

        if self.echo_to_stderr && self.enabled(record.metadata()) {
            eprintln!("{}:{} -- {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {
        self.write_logger.flush();
    }
}

fn rolling_file(cache_dir: &str) -> Result<FileRotate<AppendTimestamp>> {
    let log_folder = Path::new(cache_dir).join("logs");
    fs::create_dir_all(&log_folder)?;
    Ok(FileRotate::new(
        log_folder.join("main.log"),
        AppendTimestamp::default(FileLimit::MaxFiles(3)),
        ContentLimit::Lines(1000),
        Compression::None,
        #[cfg(unix)]
        None,
    ))
}

pub fn build_logger(
    cache_dir: &str,
    level: LevelFilter,
    echo_to_stderr: bool,
) -> Result<MainLogger> {
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    Ok(MainLogger {
        write_logger: WriteLogger::new(level, config, rolling_file(cache_dir)?),
        echo_to_stderr,
    })
}

// Can only succeed once per process.
pub fn init(cache_dir: &str, echo_to_stderr: bool) -> Result<()> {
    let main_logger = build_logger(cache_dir, LevelFilter::Info, echo_to_stderr)?;
    log::set_boxed_logger(Box::new(main_logger))?;
    log::set_max_level(LevelFilter::Info);
    Ok(())
}

pub fn export(cache_dir: &str, target_file_path: &str) -> Result<()> {
    let mut zip = zip::ZipWriter::new(File::create(target_file_path)?);
    let default_options =
        zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    let log_folder = Path::new(cache_dir).join("logs/");
    for entry in (fs::read_dir(&log_folder)?).flatten() {
        let path = entry.path();
        if path.is_file() {
            if let Some(name) = path.strip_prefix(cache_dir)?.to_str() {
                zip.start_file(name, default_options)?;
                let mut log_file = File::open(path)?;
                io::copy(&mut log_file, &mut zip)?;
            }
        }
    }

    zip.finish()?;
    Ok(())
}
