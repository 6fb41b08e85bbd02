// Confgen: Compiling Network Designs into Device Configurations
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

use confgen::model::input::NetworkDescription;
use confgen::{compile_network, host_platforms, CompilerConfig};

use chrono::Local;
use clap::{Parser, Subcommand};
use log::*;
use std::error::Error;
use std::fs::write;

fn main() -> Result<(), Box<dyn Error>> {
    // run clap
    let args = CommandLineArguments::parse();

    // initialize the env logger
    pretty_env_logger::init();

    match args.cmd {
        MainCommand::Compile { input, host, config, output } => {
            let model = NetworkDescription::from_file(&input)?.build()?;
            let config = match config {
                Some(filename) => CompilerConfig::from_file(filename)?,
                None => CompilerConfig::default(),
            };
            let timestamp = Local::now().format("%Y%m%d_%H%M%S_%6f").to_string();

            info!("Compiling {}", input);
            let result = compile_network(&model, &config, host.as_deref(), timestamp);

            let json = result.store.to_json()?;
            match output {
                Some(filename) => write(filename, json)?,
                None => println!("{}", json),
            }

            info!(
                "Compiled {} devices ({} failed, {} warnings)",
                result.num_compiled(),
                result.failed().count(),
                result.warnings().count(),
            );
            result.check()?;
        }
        MainCommand::Hosts { input } => {
            let model = NetworkDescription::from_file(&input)?.build()?;
            for (host, platform) in host_platforms(&model) {
                println!("{} {}", host, platform);
            }
        }
    }

    Ok(())
}

#[derive(Parser, Debug)]
#[clap(name = "confgen", author = "Tibor Schneider")]
struct CommandLineArguments {
    /// Action to perform
    #[clap(subcommand)]
    cmd: MainCommand,
}

#[derive(Subcommand, Debug)]
enum MainCommand {
    /// Compile a network description into device configuration records
    #[clap(name = "compile")]
    Compile {
        /// Network description (JSON)
        input: String,
        /// Only compile this host
        #[clap(long)]
        host: Option<String>,
        /// Compiler configuration (JSON)
        #[clap(short, long)]
        config: Option<String>,
        /// Write the compiled records into this file instead of stdout
        #[clap(short, long)]
        output: Option<String>,
    },
    /// List all hosts and their platforms
    #[clap(name = "hosts")]
    Hosts {
        /// Network description (JSON)
        input: String,
    },
}
