mod config;
mod discovery;
mod supervise;
