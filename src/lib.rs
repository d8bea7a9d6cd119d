//! Client for the MovieBox mobile API.
//!
//! [`auth`] signs requests, [`api`] sends them and reads the JSON replies,
//! [`streams`] turns a play-info stream list into player invocations.

pub mod api;
pub mod auth;
pub mod cli;
pub mod common;
pub mod configs;
pub mod streams;
