//! cgmes-header - prints the model headers of a CGMES `.xml` document or `.zip` bundle

use std::env;
use std::process::ExitCode;

use anyhow::Result;
use cgmes_rs::{load, HeaderFile};

const USAGE: &str = "usage: cgmes-header <file.xml|bundle.zip> [--xml]";

fn render(file: &HeaderFile, as_xml: bool) -> Result<String> {
    if as_xml {
        file.header.to_xml()
    } else {
        file.header.to_json()
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let as_xml = args.iter().any(|arg| arg == "--xml");
    let Some(path) = args.iter().find(|arg| !arg.starts_with("--")) else {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    let files = match load(path) {
        Ok(files) => files,
        Err(e) => {
            log::error!("Failed to load '{}': {:#}", path, e);
            return ExitCode::FAILURE;
        }
    };
    log::info!("Loaded {} model header(s) from {}", files.len(), path);

    for file in &files {
        match render(file, as_xml) {
            Ok(text) => {
                if files.len() > 1 {
                    println!("# {}", file.name);
                }
                println!("{}", text);
            }
            Err(e) => {
                log::error!("Failed to render header of '{}': {:#}", file.name, e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
