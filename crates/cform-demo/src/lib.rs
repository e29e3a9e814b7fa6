#![forbid(unsafe_code)]

//! Line-driven front end for the `cform` contact form.

pub mod app;
pub mod cli;
pub mod command;
pub mod logging;
