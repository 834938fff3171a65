mod global_log;
mod show_log;
