//! Event mediation between input sources and the chip store.

pub mod list_controller;
