pub mod cli_args;

pub mod cli_dispatch;

pub mod commands;

pub mod editor;

pub mod effects;

pub mod remote;

pub mod render;

pub mod repl_runtime;

pub mod session;

pub mod tui;
