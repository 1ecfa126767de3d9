#[cfg(not(feature = "disable-batches"))]
mod batches;
#[cfg(not(feature = "disable-large-objects"))]
mod large_objects;
mod rendering;
mod simple;
mod timing;

#[cfg(not(feature = "disable-batches"))]
use batches::batches;
#[cfg(not(feature = "disable-large-objects"))]
use large_objects::large_objects;
use log::LevelFilter;
use rendering::rendering;
use simple::simple;
use sqlpeek::Connection;
use std::env;
use timing::timing;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

pub async fn execute_tests<C: Connection>(mut connection: C) {
    simple(&mut connection).await;
    rendering(&mut connection).await;
    timing(&mut connection).await;
    #[cfg(not(feature = "disable-batches"))]
    batches(&mut connection).await;
    #[cfg(not(feature = "disable-large-objects"))]
    large_objects(&mut connection).await;
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
