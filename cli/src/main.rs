// This file is part of efpga-upload, an application to upload bitstreams to eFPGAs over UART or a bit-banged GPIO link.
//
// Copyright 2025 Canonical Ltd.
//
// SPDX-License-Identifier: GPL-3.0-only
//
// efpga-upload is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License version 3, as published by the Free Software Foundation.
//
// efpga-upload is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranties of MERCHANTABILITY, SATISFACTORY QUALITY, or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with this program.  If not, see http://www.gnu.org/licenses/.

use clap::{ArgAction, Parser, Subcommand};
use efpga_uploader::config::{DEFAULT_BAUDRATE, DEFAULT_BITBANG_CONFIG, DEFAULT_PORT};
use efpga_uploader::upload::{upload_over_bitbang, upload_over_uart};
use log::{debug, error};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "efpga-upload")]
#[command(bin_name = "efpga-upload")]
#[command(version, about = "Upload a bitstream to an eFPGA over UART or bit-banged GPIO")]
struct Cli {
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Show more detailed logs. Repeat for trace output. RUST_LOG takes precedence."
    )]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the bitstream verbatim to a serial port
    Uart {
        #[arg(help = "Specifies the bitstream file to be uploaded.")]
        bitstream_file: PathBuf,
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_BAUDRATE,
            help = "Specifies the baudrate. The default is the eFPGA's baud rate at 10 MHz."
        )]
        baudrate: u32,
        #[arg(
            short,
            long,
            default_value = DEFAULT_PORT,
            help = "Specifies the serial port, either a path or a bare name such as ttyACM0."
        )]
        port: PathBuf,
    },
    /// Clock the bitstream out over two GPIO lines, as described by a config file
    Bitbang {
        #[arg(
            default_value = DEFAULT_BITBANG_CONFIG,
            help = r#"JSON (or .toml) file providing `bitstream_file`, `fpga_sclk` and `fpga_sdata`.
Optional keys: `gpio_dir` (sysfs GPIO directory) and `empty_payload`
("skip" or "full_word", what the closing disable word sends)."#
        )]
        config_file: PathBuf,
    },
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));
    if verbose == 0 {
        builder.format_timestamp(None).format_target(false);
    } else {
        builder.format_timestamp_secs().format_target(true);
    }
    builder.init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    debug!("parsed cli command with {cli:?}");

    let result = match &cli.command {
        Commands::Uart {
            bitstream_file,
            baudrate,
            port,
        } => upload_over_uart(bitstream_file, port, *baudrate),
        Commands::Bitbang { config_file } => upload_over_bitbang(config_file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
