pub mod category_filter;
pub mod constants;
pub mod engine_config;
pub mod env;
pub mod instantiate_run;
pub mod progress_bars;
