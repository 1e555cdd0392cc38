// A build script has no caller to hand a Result to, so a bad
// configuration aborts the build with a panic.
#![allow(clippy::panic)]

//! Build script for the restyle binary crate.
//!
//! ## Service base URL
//!
//! The style service's base URL is baked into the WASM binary from the
//! `RESTYLE_API_URL` environment variable, read in `main.rs` with
//! `option_env!`.  This script makes cargo rebuild when the variable
//! changes and validates it with the same `ServiceConfig` rules the app
//! uses, so a typo fails the build instead of every request in the
//! browser.
//!
//! Leaving the variable unset is allowed: the app then starts
//! unconfigured and reports every submission as a failed request.

use std::env;

use restyle_core::{API_URL_ENV, ServiceConfig};

fn main() {
    println!("cargo:rerun-if-env-changed={API_URL_ENV}");

    let value = env::var(API_URL_ENV).ok();
    match ServiceConfig::from_env_value(value.as_deref()) {
        Ok(Some(_)) => {}
        Ok(None) => println!(
            "cargo:warning={API_URL_ENV} is not set; the app will be unable to reach the style service"
        ),
        Err(e) => panic!("{API_URL_ENV} is invalid: {e}"),
    }
}
