// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Urn is a command line tool for playing the urn-to-earn game on chain

#![forbid(unsafe_code)]

use clap::Parser;
use std::process::exit;
use urn::{common::utils::start_logger, Tool};

#[tokio::main]
async fn main() {
    start_logger();

    // Run the corresponding tools
    let result = Tool::parse().execute().await;

    // At this point, we'll want to print and determine whether to exit for an error code
    match result {
        Ok(inner) => println!("{}", inner),
        Err(inner) => {
            println!("{}", inner);
            exit(1);
        },
    }
}
