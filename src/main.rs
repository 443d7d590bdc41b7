// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proteus CLI entrypoint.
//!
//! Runs the interactive TUI on a DSL document: a file argument, the built-in
//! demo (`--demo`), or an empty buffer.

use std::error::Error;

use proteus::layout::layered::LayeredOracle;
use proteus::pipeline::{NoopTypesetter, RenderDriver};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<file>]\n  {program} --demo\n\nOpens the plate-notation TUI. \
         With <file>, the DSL document is loaded into the editor; --demo loads a built-in \
         example; with neither, the editor starts empty."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    file: Option<String>,
}

fn parse_options(args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    for arg in args {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.file.is_some() {
                    return Err(());
                }
                options.file = Some(arg);
            }
        }
    }

    if options.demo && options.file.is_some() {
        return Err(());
    }
    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "proteus".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let source = if options.demo {
            proteus::tui::demo_document().to_owned()
        } else if let Some(file) = &options.file {
            std::fs::read_to_string(file)?
        } else {
            String::new()
        };

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let driver = RenderDriver::new(LayeredOracle, NoopTypesetter);

            let tui_join = tokio::task::spawn_blocking(move || {
                proteus::tui::run(driver, source).map_err(|err| err.to_string())
            })
            .await;

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(std::io::Error::new(std::io::ErrorKind::Other, err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("proteus: {err}");
        std::process::exit(1);
    }
}
